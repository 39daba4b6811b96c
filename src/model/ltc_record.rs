use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::lenient;
use crate::utils::db_utils::SqlValue;

/// Leave Travel Concession reimbursement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LtcRecord {
    pub id: u64,
    pub employee_id: String,
    pub employee_name: String,
    pub amount: f64,
    #[schema(value_type = String, format = Date)]
    pub entry_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct LtcRecordFields {
    #[schema(example = "EMP-014")]
    #[serde(deserialize_with = "lenient::text")]
    pub employee_id: String,

    #[schema(example = "K. Das")]
    #[serde(deserialize_with = "lenient::text")]
    pub employee_name: String,

    #[schema(example = 18250.0)]
    #[serde(deserialize_with = "lenient::number")]
    pub amount: f64,

    #[schema(example = "2024-06-30", value_type = String, format = Date)]
    pub entry_date: NaiveDate,
}

impl LtcRecordFields {
    pub fn into_values(self) -> Vec<SqlValue> {
        vec![
            SqlValue::String(self.employee_id),
            SqlValue::String(self.employee_name),
            SqlValue::F64(self.amount),
            SqlValue::Date(self.entry_date),
        ]
    }
}
