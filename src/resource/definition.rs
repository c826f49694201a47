//! # Resource Definitions
//!
//! A resource is one table exposed through the uniform CRUD contract. Every
//! difference between resources (key column, field list, ordering, paging,
//! defaults) is data in a [`ResourceDef`], not handler code.

/// How an incoming field value is coerced before binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Passed through unchanged
    Text,
    /// Empty string becomes null
    Number,
    /// Normalized to `YYYY-MM-DD`; empty or unparseable becomes null
    Date,
}

/// One writable column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Database column
    pub column: &'static str,
    /// JSON property name in requests and responses
    pub json: &'static str,
    pub kind: FieldKind,
    /// Value used on create when the field is absent, null or empty
    pub default: Option<&'static str>,
}

impl FieldDef {
    const fn new(column: &'static str, kind: FieldKind) -> Self {
        Self {
            column,
            json: column,
            kind,
            default: None,
        }
    }

    pub const fn text(column: &'static str) -> Self {
        Self::new(column, FieldKind::Text)
    }

    pub const fn number(column: &'static str) -> Self {
        Self::new(column, FieldKind::Number)
    }

    pub const fn date(column: &'static str) -> Self {
        Self::new(column, FieldKind::Date)
    }

    /// Expose the column under a different JSON name
    pub const fn as_json(mut self, json: &'static str) -> Self {
        self.json = json;
        self
    }

    pub const fn with_default(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    pub fn is_renamed(&self) -> bool {
        self.column != self.json
    }
}

/// Primary key column (always an integer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDef {
    pub column: &'static str,
    pub json: &'static str,
}

impl KeyDef {
    pub const fn new(column: &'static str) -> Self {
        Self {
            column,
            json: column,
        }
    }

    pub const fn as_json(mut self, json: &'static str) -> Self {
        self.json = json;
        self
    }
}

/// Column set of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fields {
    /// Fixed, declared here
    Fixed(&'static [FieldDef]),
    /// Database-defined, read from the catalog at write time
    Dynamic,
}

/// Default list ordering by key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn sql(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// Which fields an update writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Every field; absent ones are written as null
    Full,
    /// Only the fields present in the body
    Partial,
}

/// Pagination and search support for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub default_page_size: u32,
    /// Columns matched case-insensitively by the `search` parameter
    pub search_columns: &'static [&'static str],
}

/// Column stamped by the database on create (`scrap_date = NOW()`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp {
    pub column: &'static str,
    pub expr: &'static str,
}

/// A business identifier generated server-side on create
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numbering {
    /// `IT/<seq>/<fiscal-year>` written to `column`
    Requisition { column: &'static str },
}

/// One table exposed through the CRUD contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDef {
    /// Human-readable singular name used in messages
    pub name: &'static str,
    /// Path segment under `/api`
    pub path: &'static str,
    pub table: &'static str,
    pub key: KeyDef,
    pub fields: Fields,
    /// Columns returned but never written by clients
    pub read_only: &'static [FieldDef],
    pub order: SortOrder,
    pub update_mode: UpdateMode,
    pub paging: Option<Paging>,
    pub stamps: &'static [Stamp],
    pub numbering: Option<Numbering>,
}

impl ResourceDef {
    /// Declared fields; empty for dynamic resources
    pub fn fixed_fields(&self) -> &'static [FieldDef] {
        match self.fields {
            Fields::Fixed(fields) => fields,
            Fields::Dynamic => &[],
        }
    }

    /// Whether responses need explicit JSON names instead of raw columns
    pub fn has_renamed_columns(&self) -> bool {
        self.key.column != self.key.json
            || self.fixed_fields().iter().any(FieldDef::is_renamed)
            || self.read_only.iter().any(FieldDef::is_renamed)
    }
}
