//! # Resource Catalog
//!
//! The concrete resources served under `/api`.

use super::definition::{
    FieldDef, Fields, KeyDef, Numbering, Paging, ResourceDef, SortOrder, Stamp, UpdateMode,
};

pub static INDENTS: ResourceDef = ResourceDef {
    name: "Indent",
    path: "indents",
    table: "indents",
    key: KeyDef::new("id").as_json("Id"),
    fields: Fields::Fixed(&[
        FieldDef::text("descriptionofmaterial").as_json("DescriptionOfMaterial"),
        FieldDef::number("reqqty").as_json("ReqQty"),
        FieldDef::number("pendingqty").as_json("PendingQty"),
        FieldDef::text("uom").as_json("UOM"),
        FieldDef::number("presentstock").as_json("PresentStock"),
        FieldDef::number("avmc_last3months").as_json("AVMC_Last3Months"),
        FieldDef::number("maxcons_last1year").as_json("MaxCons_Last1Year"),
        FieldDef::date("requireddate").as_json("RequiredDate"),
        FieldDef::text("remarksordrawingno").as_json("RemarksOrDrawingNo"),
        FieldDef::text("requiredby").as_json("RequiredBy"),
        FieldDef::text("storemanager").as_json("StoreManager"),
        FieldDef::text("reviewedby").as_json("ReviewedBy"),
    ]),
    read_only: &[FieldDef::text("requisition_no").as_json("Requisition_No")],
    order: SortOrder::Descending,
    update_mode: UpdateMode::Partial,
    paging: None,
    stamps: &[],
    numbering: Some(Numbering::Requisition {
        column: "requisition_no",
    }),
};

pub static ASSET_DETAILS: ResourceDef = ResourceDef {
    name: "Asset",
    path: "asset-details",
    table: "asset_details",
    key: KeyDef::new("sn"),
    fields: Fields::Dynamic,
    read_only: &[],
    order: SortOrder::Ascending,
    update_mode: UpdateMode::Partial,
    paging: None,
    stamps: &[],
    numbering: None,
};

pub static SCRAP_ITEMS: ResourceDef = ResourceDef {
    name: "Scrap item",
    path: "scrap-items",
    table: "scrap_items",
    key: KeyDef::new("sn"),
    fields: Fields::Fixed(&[
        FieldDef::text("location"),
        FieldDef::text("department"),
        FieldDef::text("asset_number"),
        FieldDef::text("user_name"),
        FieldDef::text("make_model"),
        FieldDef::text("serial_number"),
        FieldDef::text("processor"),
        FieldDef::text("hdd"),
        FieldDef::text("ram"),
        FieldDef::text("status").with_default("Scrap"),
        FieldDef::date("dop_date"),
    ]),
    read_only: &[FieldDef::date("scrap_date")],
    order: SortOrder::Descending,
    update_mode: UpdateMode::Full,
    paging: None,
    stamps: &[Stamp {
        column: "scrap_date",
        expr: "NOW()",
    }],
    numbering: None,
};

pub static STOCK_ITEMS: ResourceDef = ResourceDef {
    name: "Stock item",
    path: "stock-items",
    table: "stock_items",
    key: KeyDef::new("sn"),
    fields: Fields::Fixed(&[
        FieldDef::text("department"),
        FieldDef::text("asset_number"),
        FieldDef::text("user_name"),
        FieldDef::text("item_type"),
        FieldDef::text("make_model"),
        FieldDef::text("serial_number"),
        FieldDef::text("processor"),
        FieldDef::text("hdd"),
        FieldDef::text("ram"),
        FieldDef::text("status"),
        FieldDef::date("dop_date"),
    ]),
    read_only: &[],
    order: SortOrder::Ascending,
    update_mode: UpdateMode::Full,
    paging: None,
    stamps: &[],
    numbering: None,
};

pub static INVOICES: ResourceDef = ResourceDef {
    name: "Invoice",
    path: "invoices",
    table: "invoice_details",
    key: KeyDef::new("sn"),
    fields: Fields::Fixed(&[
        FieldDef::date("indent_date"),
        FieldDef::text("material"),
        FieldDef::text("particular"),
        FieldDef::number("quantity"),
        FieldDef::text("uom"),
        FieldDef::text("vendor_name"),
        FieldDef::text("purchase_order_number"),
        FieldDef::date("purchase_order_date"),
        FieldDef::text("invoice_number"),
        FieldDef::date("invoice_date"),
        FieldDef::number("invoice_value"),
        FieldDef::number("taxable_value"),
        FieldDef::number("igst"),
        FieldDef::number("cgst"),
        FieldDef::number("sgst"),
        FieldDef::text("bill_handed_over_to"),
        FieldDef::date("allocation_date"),
        FieldDef::text("fixed_asset_number"),
        FieldDef::text("user_name"),
        FieldDef::date("use_from"),
        FieldDef::date("use_to"),
        FieldDef::text("remarks"),
    ]),
    read_only: &[],
    order: SortOrder::Descending,
    update_mode: UpdateMode::Full,
    paging: Some(Paging {
        default_page_size: 100,
        search_columns: &["material", "particular", "vendor_name", "invoice_number"],
    }),
    stamps: &[],
    numbering: None,
};

pub static EMAIL_IDS: ResourceDef = ResourceDef {
    name: "Email ID",
    path: "emailids",
    table: "email_id_details",
    key: KeyDef::new("sn"),
    fields: Fields::Fixed(&[
        FieldDef::text("first_name"),
        FieldDef::text("last_name"),
        FieldDef::text("email_address"),
        FieldDef::text("location"),
        FieldDef::text("particular"),
        FieldDef::text("remarks"),
    ]),
    read_only: &[],
    order: SortOrder::Descending,
    update_mode: UpdateMode::Full,
    paging: Some(Paging {
        default_page_size: 500,
        search_columns: &[
            "first_name",
            "last_name",
            "email_address",
            "location",
            "particular",
            "remarks",
        ],
    }),
    stamps: &[],
    numbering: None,
};

pub static COST_DETAILS: ResourceDef = ResourceDef {
    name: "Cost entry",
    path: "cost-details",
    table: "cost_details",
    key: KeyDef::new("sn"),
    fields: Fields::Fixed(&[
        FieldDef::date("date"),
        FieldDef::text("location"),
        FieldDef::text("cost_account"),
        FieldDef::text("cost_details"),
        FieldDef::number("amount"),
        FieldDef::date("payment_date"),
    ]),
    read_only: &[],
    order: SortOrder::Descending,
    update_mode: UpdateMode::Full,
    paging: None,
    stamps: &[],
    numbering: None,
};

pub static RENEWALS: ResourceDef = ResourceDef {
    name: "Renewal",
    path: "renewals",
    table: "renewals",
    key: KeyDef::new("id"),
    fields: Fields::Fixed(&[
        FieldDef::number("sn"),
        FieldDef::text("compliance_particulars"),
        FieldDef::text("last_year_details"),
        FieldDef::text("authority_provider"),
        FieldDef::text("auth_address"),
        FieldDef::text("law_statute"),
        FieldDef::date("last_due_date"),
        FieldDef::date("actual_date_of_compliences"),
        FieldDef::number("actual_cost"),
        FieldDef::text("frequency"),
        FieldDef::date("next_due_date"),
        FieldDef::text("notification_status").with_default("pending"),
    ]),
    read_only: &[],
    order: SortOrder::Descending,
    update_mode: UpdateMode::Full,
    paging: None,
    stamps: &[],
    numbering: None,
};

/// Every resource served through the generic CRUD routes
pub fn all() -> [&'static ResourceDef; 8] {
    [
        &INDENTS,
        &ASSET_DETAILS,
        &SCRAP_ITEMS,
        &STOCK_ITEMS,
        &INVOICES,
        &EMAIL_IDS,
        &COST_DETAILS,
        &RENEWALS,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_and_tables_unique() {
        let paths: HashSet<_> = all().iter().map(|d| d.path).collect();
        let tables: HashSet<_> = all().iter().map(|d| d.table).collect();
        assert_eq!(paths.len(), 8);
        assert_eq!(tables.len(), 8);
    }

    #[test]
    fn test_only_invoices_and_email_paginate() {
        let paged: Vec<_> = all()
            .iter()
            .filter(|d| d.paging.is_some())
            .map(|d| d.path)
            .collect();
        assert_eq!(paged, vec!["invoices", "emailids"]);
        assert_eq!(INVOICES.paging.unwrap().default_page_size, 100);
        assert_eq!(EMAIL_IDS.paging.unwrap().default_page_size, 500);
    }

    #[test]
    fn test_ordering_by_resource() {
        assert_eq!(ASSET_DETAILS.order, SortOrder::Ascending);
        assert_eq!(STOCK_ITEMS.order, SortOrder::Ascending);
        assert_eq!(INDENTS.order, SortOrder::Descending);
        assert_eq!(RENEWALS.order, SortOrder::Descending);
    }

    #[test]
    fn test_keys_never_declared_as_fields() {
        for def in all() {
            assert!(
                def.fixed_fields().iter().all(|f| f.column != def.key.column),
                "{} declares its key as a writable field",
                def.path
            );
        }
    }

    #[test]
    fn test_indents_use_pascal_case() {
        assert!(INDENTS.has_renamed_columns());
        assert!(!SCRAP_ITEMS.has_renamed_columns());
        assert_eq!(INDENTS.key.json, "Id");
    }
}
