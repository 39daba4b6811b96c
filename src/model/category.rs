use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// A record category. Doubles as the role handed out at login and as the
/// table backing the category.
#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RecordCategory {
    Salaries,
    GemPurchases,
    MedicalClaims,
    LtcRecords,
}

impl RecordCategory {
    /// Table name. Only ever one of the four static names below.
    pub fn table(&self) -> &'static str {
        match self {
            RecordCategory::Salaries => "salaries",
            RecordCategory::GemPurchases => "gem_purchases",
            RecordCategory::MedicalClaims => "medical_claims",
            RecordCategory::LtcRecords => "ltc_records",
        }
    }

    /// Category-specific form fields, in display order. `entry_date` is common
    /// to every category and not included.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            RecordCategory::Salaries => &["employee_id", "employee_name", "salary"],
            RecordCategory::GemPurchases => &["item_id", "item_name", "quantity", "cost"],
            RecordCategory::MedicalClaims => &["claim_name", "claim_type", "amount"],
            RecordCategory::LtcRecords => &["employee_id", "employee_name", "amount"],
        }
    }

    /// Writable columns: the category fields followed by `entry_date`.
    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns = self.fields().to_vec();
        columns.push("entry_date");
        columns
    }

    /// Human title, e.g. `GEM PURCHASES`.
    pub fn title(&self) -> String {
        self.table().replacen('_', " ", 1).to_uppercase()
    }
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, AsRefStr, ToSchema,
)]
pub enum ClaimType {
    #[strum(serialize = "Claim")]
    Claim,
    #[serde(rename = "Advance Claim")]
    #[strum(serialize = "Advance Claim")]
    AdvanceClaim,
}

impl TryFrom<String> for ClaimType {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
