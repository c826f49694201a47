//! Allotment rows, join views and write input.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resource::parse_calendar_date;
use crate::rest_api::{RestError, RestResult};

/// Lifecycle state of an allotment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllotmentStatus {
    Allotted,
    Returned,
}

impl AllotmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllotmentStatus::Allotted => "Allotted",
            AllotmentStatus::Returned => "Returned",
        }
    }
}

impl fmt::Display for AllotmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AllotmentStatus {
    type Err = RestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Allotted" => Ok(AllotmentStatus::Allotted),
            "Returned" => Ok(AllotmentStatus::Returned),
            other => Err(RestError::InvalidBody(format!(
                "status must be 'Allotted' or 'Returned', got '{}'",
                other
            ))),
        }
    }
}

/// A stored `asset_allotment` row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allotment {
    pub allotment_id: i64,
    pub asset_sn: Option<i64>,
    pub user_name: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub item_name: Option<String>,
    pub item_make: Option<String>,
    pub item_serial_no: Option<String>,
    pub quantity: Option<i64>,
    pub allotment_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub remarks: Option<String>,
}

/// Active allotment joined to its asset.
///
/// Asset master columns are database-defined, so they are kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentAllotment {
    pub allotment_id: i64,
    pub asset_sn: Option<i64>,
    pub user_name: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub item_name: Option<String>,
    pub item_make: Option<String>,
    pub item_serial_no: Option<String>,
    pub quantity: Option<i64>,
    pub allotment_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub asset_number: Option<Value>,
    pub make_model: Option<Value>,
    pub serial_number: Option<Value>,
}

/// One allotment in a user's history; asset fields are null once the asset
/// is gone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAllotment {
    pub allotment_id: i64,
    pub item_name: Option<String>,
    pub quantity: Option<i64>,
    pub allotment_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub remarks: Option<String>,
    pub asset_number: Option<Value>,
    pub make_model: Option<Value>,
    pub serial_number: Option<Value>,
}

/// Allotment fields as sent by clients.
///
/// Integers may arrive as numbers or numeric strings; dates and status are
/// validated by [`AllotmentInput::validate`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AllotmentInput {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub asset_sn: Option<i64>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub item_make: Option<String>,
    #[serde(default)]
    pub item_serial_no: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub allotment_date: Option<String>,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Input with dates and status checked
#[derive(Debug, Clone, PartialEq)]
pub struct ValidAllotment {
    pub asset_sn: Option<i64>,
    pub user_name: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub item_name: Option<String>,
    pub item_make: Option<String>,
    pub item_serial_no: Option<String>,
    pub quantity: Option<i64>,
    pub allotment_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub status: Option<AllotmentStatus>,
    pub remarks: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn strict_date(field: &str, value: Option<&str>) -> RestResult<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_calendar_date(raw).map(Some).ok_or_else(|| {
            RestError::InvalidBody(format!("{} is not a valid date: '{}'", field, raw))
        }),
    }
}

impl AllotmentInput {
    /// Decode a request body
    pub fn from_body(body: &Value) -> RestResult<Self> {
        if !body.is_object() {
            return Err(RestError::InvalidBody("expected a JSON object".to_string()));
        }
        serde_json::from_value(body.clone()).map_err(|e| RestError::InvalidBody(e.to_string()))
    }

    /// Check dates and status; blank strings count as absent
    pub fn validate(self) -> RestResult<ValidAllotment> {
        let allotment_date = strict_date("allotment_date", self.allotment_date.as_deref())?;
        let return_date = strict_date("return_date", self.return_date.as_deref())?;
        let status = match non_blank(self.status) {
            Some(s) => Some(s.parse::<AllotmentStatus>()?),
            None => None,
        };

        Ok(ValidAllotment {
            asset_sn: self.asset_sn,
            user_name: self.user_name,
            department: self.department,
            location: self.location,
            item_name: self.item_name,
            item_make: non_blank(self.item_make),
            item_serial_no: non_blank(self.item_serial_no),
            quantity: self.quantity,
            allotment_date,
            return_date,
            status,
            remarks: non_blank(self.remarks),
        })
    }
}

/// Serde helpers for loosely typed client input
pub(crate) mod lenient {
    use serde::de::{self, Deserializer};
    use serde::Deserialize;
    use serde_json::Value;

    /// Integer from a number or numeric string; null or `""` is `None`
    pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            Value::Number(n) => integral(n.as_i64().map(|v| v as f64).or_else(|| n.as_f64()))
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("expected an integer, got {}", n))),
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => integral(s.trim().parse::<f64>().ok())
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("expected an integer, got '{}'", s))),
            other => Err(de::Error::custom(format!("expected an integer, got {}", other))),
        }
    }

    fn integral(value: Option<f64>) -> Option<i64> {
        value
            .filter(|v| v.fract() == 0.0 && v.abs() < 9.0e15)
            .map(|v| v as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "Allotted".parse::<AllotmentStatus>().unwrap(),
            AllotmentStatus::Allotted
        );
        assert_eq!(AllotmentStatus::Returned.to_string(), "Returned");
        assert!("Lost".parse::<AllotmentStatus>().is_err());
    }

    #[test]
    fn test_lenient_integers() {
        let input = AllotmentInput::from_body(&json!({"asset_sn": "12", "quantity": 2})).unwrap();
        assert_eq!(input.asset_sn, Some(12));
        assert_eq!(input.quantity, Some(2));

        let input = AllotmentInput::from_body(&json!({"asset_sn": "", "quantity": null})).unwrap();
        assert_eq!(input.asset_sn, None);
        assert_eq!(input.quantity, None);

        assert!(AllotmentInput::from_body(&json!({"quantity": "two"})).is_err());
        assert!(AllotmentInput::from_body(&json!({"quantity": 1.5})).is_err());
    }

    #[test]
    fn test_validate_dates_and_status() {
        let valid = AllotmentInput::from_body(&json!({
            "allotment_date": "15/03/2024",
            "return_date": "",
            "status": "Returned",
            "item_make": ""
        }))
        .unwrap()
        .validate()
        .unwrap();

        assert_eq!(valid.allotment_date, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(valid.return_date, None);
        assert_eq!(valid.status, Some(AllotmentStatus::Returned));
        assert_eq!(valid.item_make, None);
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        let bad_date = AllotmentInput::from_body(&json!({"allotment_date": "soon"})).unwrap();
        assert!(matches!(bad_date.validate(), Err(RestError::InvalidBody(_))));

        let bad_status = AllotmentInput::from_body(&json!({"status": "Lost"})).unwrap();
        assert!(matches!(bad_status.validate(), Err(RestError::InvalidBody(_))));

        assert!(AllotmentInput::from_body(&json!("text")).is_err());
    }

    #[test]
    fn test_row_decodes_from_jsonb() {
        let row: Allotment = serde_json::from_value(json!({
            "allotment_id": 7,
            "asset_sn": 3,
            "user_name": "alice",
            "department": "IT",
            "location": "HQ",
            "item_name": "Laptop",
            "item_make": null,
            "item_serial_no": null,
            "quantity": 1,
            "allotment_date": "2024-03-15",
            "return_date": null,
            "status": "Allotted",
            "remarks": null
        }))
        .unwrap();
        assert_eq!(row.allotment_id, 7);
        assert_eq!(row.allotment_date, NaiveDate::from_ymd_opt(2024, 3, 15));
    }
}
