use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::lenient;
use crate::utils::db_utils::SqlValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(example = json!({
    "id": 7,
    "item_id": "GEM-118",
    "item_name": "Office chairs",
    "quantity": 4,
    "cost": 23600.0,
    "entry_date": "2024-05-14"
}))]
pub struct GemPurchase {
    pub id: u64,
    pub item_id: String,
    pub item_name: String,
    pub quantity: i32,
    pub cost: f64,
    #[schema(value_type = String, format = Date)]
    pub entry_date: NaiveDate,
}

/// A purchase made through the Government e-Marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct GemPurchaseFields {
    #[schema(example = "GEM-118")]
    #[serde(deserialize_with = "lenient::text")]
    pub item_id: String,

    #[schema(example = "Office chairs")]
    #[serde(deserialize_with = "lenient::text")]
    pub item_name: String,

    #[schema(example = 4)]
    #[serde(deserialize_with = "lenient::whole_number")]
    pub quantity: i32,

    #[schema(example = 23600.0)]
    #[serde(deserialize_with = "lenient::number")]
    pub cost: f64,

    #[schema(example = "2024-05-14", value_type = String, format = Date)]
    pub entry_date: NaiveDate,
}

impl GemPurchaseFields {
    pub fn into_values(self) -> Vec<SqlValue> {
        vec![
            SqlValue::String(self.item_id),
            SqlValue::String(self.item_name),
            SqlValue::I64(i64::from(self.quantity)),
            SqlValue::F64(self.cost),
            SqlValue::Date(self.entry_date),
        ]
    }
}
