use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::category::ClaimType;
use crate::model::lenient;
use crate::utils::db_utils::SqlValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(example = json!({
    "id": 3,
    "claim_name": "Hospitalisation - R. Menon",
    "claim_type": "Advance Claim",
    "amount": 40000.0,
    "entry_date": "2024-02-20"
}))]
pub struct MedicalClaim {
    pub id: u64,
    pub claim_name: String,
    #[sqlx(try_from = "String")]
    pub claim_type: ClaimType,
    pub amount: f64,
    #[schema(value_type = String, format = Date)]
    pub entry_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct MedicalClaimFields {
    #[schema(example = "Hospitalisation - R. Menon")]
    #[serde(deserialize_with = "lenient::text")]
    pub claim_name: String,

    pub claim_type: ClaimType,

    #[schema(example = 40000.0)]
    #[serde(deserialize_with = "lenient::number")]
    pub amount: f64,

    #[schema(example = "2024-02-20", value_type = String, format = Date)]
    pub entry_date: NaiveDate,
}

impl MedicalClaimFields {
    pub fn into_values(self) -> Vec<SqlValue> {
        vec![
            SqlValue::String(self.claim_name),
            SqlValue::String(self.claim_type.as_ref().to_string()),
            SqlValue::F64(self.amount),
            SqlValue::Date(self.entry_date),
        ]
    }
}
