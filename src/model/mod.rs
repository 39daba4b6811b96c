pub mod category;
pub mod gem_purchase;
pub mod lenient;
pub mod ltc_record;
pub mod medical_claim;
pub mod record;
pub mod salary;

pub use category::{ClaimType, RecordCategory};
pub use record::{Record, RecordFields};
