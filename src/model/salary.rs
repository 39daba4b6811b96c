use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::lenient;
use crate::utils::db_utils::SqlValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "employee_id": "EMP-001",
    "employee_name": "Asha Rao",
    "salary": 85000.0,
    "entry_date": "2024-04-01"
}))]
pub struct Salary {
    pub id: u64,
    pub employee_id: String,
    pub employee_name: String,
    pub salary: f64,
    #[schema(value_type = String, format = Date)]
    pub entry_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct SalaryFields {
    #[schema(example = "EMP-001")]
    #[serde(deserialize_with = "lenient::text")]
    pub employee_id: String,

    #[schema(example = "Asha Rao")]
    #[serde(deserialize_with = "lenient::text")]
    pub employee_name: String,

    #[schema(example = 85000.0)]
    #[serde(deserialize_with = "lenient::number")]
    pub salary: f64,

    #[schema(example = "2024-04-01", value_type = String, format = Date)]
    pub entry_date: NaiveDate,
}

impl SalaryFields {
    pub fn into_values(self) -> Vec<SqlValue> {
        vec![
            SqlValue::String(self.employee_id),
            SqlValue::String(self.employee_name),
            SqlValue::F64(self.salary),
            SqlValue::Date(self.entry_date),
        ]
    }
}
