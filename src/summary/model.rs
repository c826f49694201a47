//! Report rows. Field names on the wire match the dashboard's column labels.

use serde::{Deserialize, Serialize};

/// Asset counts for one department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSummary {
    pub department: Option<String>,
    #[serde(rename = "DesktopLaptop")]
    pub desktop_laptop: i64,
    #[serde(rename = "Laptop")]
    pub laptop: i64,
    #[serde(rename = "Printer")]
    pub printer: i64,
}

/// Stock count for one item type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSummary {
    #[serde(rename = "Stock At")]
    pub stock_at: String,
    pub item_type: Option<String>,
    #[serde(rename = "Total")]
    pub total: i64,
}

/// Email registrations for one (location, particular) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailSummary {
    pub location: Option<String>,
    pub particular: Option<String>,
    pub totalcount: i64,
}

/// Spend for one (month, location, account) group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    /// `YYYY-MM`; null for entries without a date
    pub month: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "Cost Account")]
    pub cost_account: Option<String>,
    /// Null when every amount in the group is null
    pub totalcost: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_labels() {
        let row = StockSummary {
            stock_at: "IT Department".to_string(),
            item_type: Some("Mouse".to_string()),
            total: 4,
        };
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            json!({"Stock At": "IT Department", "item_type": "Mouse", "Total": 4})
        );

        let cost: CostSummary = serde_json::from_value(json!({
            "month": "2024-01",
            "location": "HQ",
            "Cost Account": "Internet",
            "totalcost": 150
        }))
        .unwrap();
        assert_eq!(cost.totalcost, Some(150.0));
        assert_eq!(cost.cost_account.as_deref(), Some("Internet"));
    }
}
