//! Terminal client for the portal: login, a per-role dashboard and PDF reports.

pub mod api;
pub mod cli;
pub mod dashboard;
pub mod dates;
pub mod error;
pub mod report;
pub mod session;

/// A record as the API returns it: `id`, the role's fields and `entry_date`.
pub type Row = serde_json::Map<String, serde_json::Value>;

pub use api::PortalClient;
pub use dashboard::Dashboard;
pub use error::{ClientError, ClientResult};
pub use session::{Session, SessionStore, View};
