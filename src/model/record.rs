use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::model::category::RecordCategory;
use crate::model::gem_purchase::{GemPurchase, GemPurchaseFields};
use crate::model::ltc_record::{LtcRecord, LtcRecordFields};
use crate::model::medical_claim::{MedicalClaim, MedicalClaimFields};
use crate::model::salary::{Salary, SalaryFields};
use crate::utils::db_utils::SqlValue;

/// A stored row of any category, serialized as the bare row.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum Record {
    Salary(Salary),
    GemPurchase(GemPurchase),
    MedicalClaim(MedicalClaim),
    LtcRecord(LtcRecord),
}

impl Record {
    pub fn id(&self) -> u64 {
        match self {
            Record::Salary(r) => r.id,
            Record::GemPurchase(r) => r.id,
            Record::MedicalClaim(r) => r.id,
            Record::LtcRecord(r) => r.id,
        }
    }
}

/// Writable fields of a record, validated against its category's schema.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum RecordFields {
    Salary(SalaryFields),
    GemPurchase(GemPurchaseFields),
    MedicalClaim(MedicalClaimFields),
    LtcRecord(LtcRecordFields),
}

impl RecordFields {
    /// Parses a client payload for `category`. An echoed-back `id` is ignored;
    /// any other field outside the schema is an error.
    pub fn parse(category: RecordCategory, mut payload: Value) -> serde_json::Result<Self> {
        if let Value::Object(map) = &mut payload {
            map.remove("id");
        }

        Ok(match category {
            RecordCategory::Salaries => RecordFields::Salary(serde_json::from_value(payload)?),
            RecordCategory::GemPurchases => {
                RecordFields::GemPurchase(serde_json::from_value(payload)?)
            }
            RecordCategory::MedicalClaims => {
                RecordFields::MedicalClaim(serde_json::from_value(payload)?)
            }
            RecordCategory::LtcRecords => RecordFields::LtcRecord(serde_json::from_value(payload)?),
        })
    }

    pub fn category(&self) -> RecordCategory {
        match self {
            RecordFields::Salary(_) => RecordCategory::Salaries,
            RecordFields::GemPurchase(_) => RecordCategory::GemPurchases,
            RecordFields::MedicalClaim(_) => RecordCategory::MedicalClaims,
            RecordFields::LtcRecord(_) => RecordCategory::LtcRecords,
        }
    }

    /// Bind values in the order of `RecordCategory::columns`.
    pub fn into_values(self) -> Vec<SqlValue> {
        match self {
            RecordFields::Salary(f) => f.into_values(),
            RecordFields::GemPurchase(f) => f.into_values(),
            RecordFields::MedicalClaim(f) => f.into_values(),
            RecordFields::LtcRecord(f) => f.into_values(),
        }
    }
}
