use reqwest::{Response, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::client::Row;
use crate::client::error::{ClientError, ClientResult};
use crate::model::RecordCategory;
use crate::models::{CreatedResponse, LoginReqDto, LoginResponse};
use crate::utils::db_utils::DateRange;

pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// HTTP client for the portal API. One request per call, no retries.
#[derive(Debug, Clone)]
pub struct PortalClient {
    http: reqwest::Client,
    base_url: String,
}

impl PortalClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn records_url(&self, category: RecordCategory) -> String {
        format!("{}/api/{}", self.base_url, category.table())
    }

    pub fn record_url(&self, category: RecordCategory, id: u64) -> String {
        format!("{}/{}", self.records_url(category), id)
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<RecordCategory> {
        let resp = self
            .http
            .post(format!("{}/login", self.base_url))
            .json(&LoginReqDto {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            return Err(ClientError::InvalidCredentials);
        }

        let body: LoginResponse = check(resp).await?.json().await?;
        if !body.success {
            return Err(ClientError::InvalidCredentials);
        }

        Ok(body.role)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, category: RecordCategory, range: DateRange) -> ClientResult<Vec<Row>> {
        let mut query = Vec::new();
        if let Some(from) = range.from {
            query.push(("from", from.to_string()));
        }
        if let Some(to) = range.to {
            query.push(("to", to.to_string()));
        }

        let resp = self
            .http
            .get(self.records_url(category))
            .query(&query)
            .send()
            .await?;

        let rows: Vec<Row> = check(resp).await?.json().await?;
        debug!(count = rows.len(), "Fetched records");
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, category: RecordCategory, id: u64) -> ClientResult<Row> {
        let resp = self.http.get(self.record_url(category, id)).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    /// Returns the id the server assigned.
    #[instrument(skip(self, payload))]
    pub async fn create(&self, category: RecordCategory, payload: &Row) -> ClientResult<u64> {
        let resp = self
            .http
            .post(self.records_url(category))
            .json(payload)
            .send()
            .await?;

        let created: CreatedResponse = check(resp).await?.json().await?;
        Ok(created.id)
    }

    #[instrument(skip(self, payload))]
    pub async fn update(&self, category: RecordCategory, id: u64, payload: &Row) -> ClientResult<()> {
        let resp = self
            .http
            .put(self.record_url(category, id))
            .json(payload)
            .send()
            .await?;

        check(resp).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, category: RecordCategory, id: u64) -> ClientResult<()> {
        let resp = self.http.delete(self.record_url(category, id)).send().await?;
        check(resp).await?;
        Ok(())
    }
}

/// Turns a non-2xx answer into `ClientError::Server`, keeping the server's
/// `error` or `message` text.
async fn check(resp: Response) -> ClientResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let text = resp.text().await.unwrap_or_default();
    Err(ClientError::Server {
        status: status.as_u16(),
        message: server_message(&text),
    })
}

fn server_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => json
            .get("error")
            .or_else(|| json.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
        Err(_) => body.to_string(),
    }
}
