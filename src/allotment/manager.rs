//! # Allotment Manager
//!
//! Assigns assets to users and takes them back. An allotment starts as
//! `Allotted` and moves to `Returned` through [`AllotmentManager::return_asset`];
//! the full update can still set any status.

use chrono::NaiveDate;
use serde_json::Value;

use crate::db::{quote_ident, Gateway, Statement};
use crate::resource::definition::{
    FieldDef, Fields, KeyDef, ResourceDef, SortOrder, Stamp, UpdateMode,
};
use crate::resource::{query, Record};
use crate::rest_api::{RestError, RestResult};

use super::model::{
    Allotment, AllotmentInput, AllotmentStatus, CurrentAllotment, UserAllotment, ValidAllotment,
};

pub static ASSET_ALLOTMENT: ResourceDef = ResourceDef {
    name: "Asset allotment",
    path: "asset-allotment",
    table: "asset_allotment",
    key: KeyDef::new("allotment_id"),
    fields: Fields::Fixed(&[
        FieldDef::number("asset_sn"),
        FieldDef::text("user_name"),
        FieldDef::text("department"),
        FieldDef::text("location"),
        FieldDef::text("item_name"),
        FieldDef::text("item_make"),
        FieldDef::text("item_serial_no"),
        FieldDef::number("quantity"),
        FieldDef::date("allotment_date"),
        FieldDef::date("return_date"),
        FieldDef::text("status"),
        FieldDef::text("remarks"),
    ]),
    read_only: &[],
    order: SortOrder::Descending,
    update_mode: UpdateMode::Full,
    paging: None,
    stamps: &[],
    numbering: None,
};

const LIST_USERS: &str = "SELECT to_jsonb(a.user_name) FROM asset_allotment AS a \
     WHERE a.user_name IS NOT NULL GROUP BY a.user_name ORDER BY a.user_name";

const CURRENT: &str = "SELECT jsonb_build_object(\
     'allotment_id', aa.allotment_id, 'asset_sn', aa.asset_sn, \
     'user_name', aa.user_name, 'department', aa.department, \
     'location', aa.location, 'item_name', aa.item_name, \
     'item_make', aa.item_make, 'item_serial_no', aa.item_serial_no, \
     'quantity', aa.quantity, 'allotment_date', aa.allotment_date, \
     'status', aa.status, 'asset_number', ad.asset_number, \
     'make_model', ad.make_model, 'serial_number', ad.serial_number) \
     FROM asset_allotment AS aa \
     JOIN asset_details AS ad ON ad.sn = aa.asset_sn \
     WHERE aa.status = 'Allotted' \
     ORDER BY aa.allotment_date DESC";

const BY_USER: &str = "SELECT jsonb_build_object(\
     'allotment_id', aa.allotment_id, 'item_name', aa.item_name, \
     'quantity', aa.quantity, 'allotment_date', aa.allotment_date, \
     'return_date', aa.return_date, 'status', aa.status, \
     'remarks', aa.remarks, 'asset_number', ad.asset_number, \
     'make_model', ad.make_model, 'serial_number', ad.serial_number) \
     FROM asset_allotment AS aa \
     LEFT JOIN asset_details AS ad ON ad.sn = aa.asset_sn \
     WHERE aa.user_name = $1 \
     ORDER BY aa.allotment_date DESC";

const RETURN: &str = "UPDATE asset_allotment AS t \
     SET return_date = CURRENT_DATE, status = 'Returned' \
     WHERE t.allotment_id = $1 RETURNING to_jsonb(t)";

/// Condition over the inserted record: no other active allotment for the asset
fn single_active_guard() -> String {
    format!(
        "NOT EXISTS (SELECT 1 FROM {} AS a WHERE a.asset_sn = r.asset_sn AND a.status = '{}')",
        quote_ident(ASSET_ALLOTMENT.table),
        AllotmentStatus::Allotted
    )
}

fn opt<T: Into<Value>>(value: Option<T>) -> Value {
    value.map_or(Value::Null, Into::into)
}

fn date(value: Option<NaiveDate>) -> Value {
    value.map_or(Value::Null, |d| Value::String(d.format("%Y-%m-%d").to_string()))
}

/// Column record for a full-row write
fn allotment_record(input: ValidAllotment) -> Record {
    let mut record = Record::new();
    record.set("asset_sn", opt(input.asset_sn));
    record.set("user_name", opt(input.user_name));
    record.set("department", opt(input.department));
    record.set("location", opt(input.location));
    record.set("item_name", opt(input.item_name));
    record.set("item_make", opt(input.item_make));
    record.set("item_serial_no", opt(input.item_serial_no));
    record.set("quantity", opt(input.quantity));
    record.set("allotment_date", date(input.allotment_date));
    record.set("return_date", date(input.return_date));
    record.set("status", opt(input.status.map(|s| s.as_str())));
    record.set("remarks", opt(input.remarks));
    record
}

/// Allotment date of a row created without one; same clock as `RETURN`
const ALLOTTED_TODAY: &[Stamp] = &[Stamp {
    column: "allotment_date",
    expr: "CURRENT_DATE",
}];

/// Fill create-time defaults: one item, status allotted. A missing date is
/// stamped by the insert.
pub fn with_create_defaults(mut input: ValidAllotment) -> ValidAllotment {
    input.quantity = input.quantity.filter(|q| *q != 0).or(Some(1));
    input.status = input.status.or(Some(AllotmentStatus::Allotted));
    input
}

/// Insert for a new allotment; without a date the database stamps today
fn create_statement(input: ValidAllotment, guard: Option<&str>) -> Statement {
    let stamp_date = input.allotment_date.is_none();
    let mut record = allotment_record(input);
    let stamps: &[Stamp] = if stamp_date {
        record.remove("allotment_date");
        ALLOTTED_TODAY
    } else {
        &[]
    };

    query::insert_row(
        ASSET_ALLOTMENT.table,
        &record,
        stamps,
        &query::projection(&ASSET_ALLOTMENT),
        guard,
    )
}

/// Allotment lifecycle over the shared gateway
#[derive(Debug, Clone)]
pub struct AllotmentManager {
    gateway: Gateway,
    enforce_single_active: bool,
}

impl AllotmentManager {
    pub fn new(gateway: Gateway, enforce_single_active: bool) -> Self {
        Self {
            gateway,
            enforce_single_active,
        }
    }

    /// Distinct assignee names, ascending
    pub async fn list_users(&self) -> RestResult<Vec<String>> {
        Ok(self
            .gateway
            .fetch_all_as(&Statement::new(LIST_USERS))
            .await?)
    }

    /// Every allotment, newest first
    pub async fn list(&self) -> RestResult<Vec<Allotment>> {
        Ok(self
            .gateway
            .fetch_all_as(&query::select_all(&ASSET_ALLOTMENT))
            .await?)
    }

    pub async fn get(&self, id: i64) -> RestResult<Allotment> {
        self.gateway
            .fetch_optional_as(&query::select_by_key(&ASSET_ALLOTMENT, id))
            .await?
            .ok_or_else(|| RestError::not_found(ASSET_ALLOTMENT.name))
    }

    /// Allot an asset. Missing quantity, date and status take their defaults.
    pub async fn create(&self, body: &Value) -> RestResult<Allotment> {
        let input = AllotmentInput::from_body(body)?.validate()?;
        let input = with_create_defaults(input);

        let guard = match (self.enforce_single_active, input.status) {
            (true, Some(AllotmentStatus::Allotted)) => Some(single_active_guard()),
            _ => None,
        };
        let asset_sn = input.asset_sn;

        let stmt = create_statement(input, guard.as_deref());

        match self.gateway.fetch_optional_as::<Allotment>(&stmt).await? {
            Some(row) => {
                tracing::info!(
                    allotment_id = row.allotment_id,
                    asset_sn = ?row.asset_sn,
                    user = ?row.user_name,
                    "asset allotted"
                );
                Ok(row)
            }
            None if guard.is_some() => Err(RestError::Conflict(format!(
                "asset {} is already allotted",
                asset_sn.map_or_else(|| "null".to_string(), |sn| sn.to_string())
            ))),
            None => Err(RestError::Internal(
                "allotment insert returned no row".to_string(),
            )),
        }
    }

    /// Overwrite every field of an allotment
    pub async fn update(&self, id: i64, body: &Value) -> RestResult<Allotment> {
        let input = AllotmentInput::from_body(body)?.validate()?;
        let stmt = query::update_row(
            ASSET_ALLOTMENT.table,
            ASSET_ALLOTMENT.key.column,
            id,
            &allotment_record(input),
            &query::projection(&ASSET_ALLOTMENT),
        );

        let row = self
            .gateway
            .fetch_optional_as::<Allotment>(&stmt)
            .await?
            .ok_or_else(|| RestError::not_found(ASSET_ALLOTMENT.name))?;
        tracing::info!(allotment_id = id, "allotment updated");
        Ok(row)
    }

    /// Mark returned today. Repeating the call re-stamps the return date.
    pub async fn return_asset(&self, id: i64) -> RestResult<Allotment> {
        let stmt = Statement::new(RETURN).bind(id);
        let row = self
            .gateway
            .fetch_optional_as::<Allotment>(&stmt)
            .await?
            .ok_or_else(|| RestError::not_found(ASSET_ALLOTMENT.name))?;
        tracing::info!(allotment_id = id, "asset returned");
        Ok(row)
    }

    pub async fn delete(&self, id: i64) -> RestResult<u64> {
        let deleted = self
            .gateway
            .execute(&query::delete_row(
                ASSET_ALLOTMENT.table,
                ASSET_ALLOTMENT.key.column,
                id,
            ))
            .await?;
        tracing::info!(allotment_id = id, deleted, "allotment deleted");
        Ok(deleted)
    }

    /// Active allotments whose asset still exists, newest first
    pub async fn current(&self) -> RestResult<Vec<CurrentAllotment>> {
        Ok(self.gateway.fetch_all_as(&Statement::new(CURRENT)).await?)
    }

    /// A user's full history, including rows whose asset is gone
    pub async fn by_user(&self, user_name: &str) -> RestResult<Vec<UserAllotment>> {
        let stmt = Statement::new(BY_USER).bind(user_name);
        Ok(self.gateway.fetch_all_as(&stmt).await?)
    }
}
