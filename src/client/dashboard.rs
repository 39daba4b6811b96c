use std::path::Path;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::client::Row;
use crate::client::api::PortalClient;
use crate::client::dates;
use crate::client::error::{ClientError, ClientResult};
use crate::client::report;
use crate::model::RecordCategory;
use crate::utils::db_utils::DateRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(u64),
    Updated(u64),
}

/// The role's working screen: the loaded rows, the date filter, and a single
/// in-progress form that either creates a record or edits one.
#[derive(Debug, Clone)]
pub struct Dashboard {
    role: RecordCategory,
    records: Vec<Row>,
    filter: DateRange,
    form: Row,
    mode: FormMode,
}

impl Dashboard {
    pub fn new(role: RecordCategory) -> Self {
        Self {
            role,
            records: Vec::new(),
            filter: DateRange::default(),
            form: Row::new(),
            mode: FormMode::Create,
        }
    }

    pub fn role(&self) -> RecordCategory {
        self.role
    }

    pub fn heading(&self) -> String {
        format!("{} Portal", self.role.title())
    }

    /// Table columns: the role's fields, then the entry date.
    pub fn columns(&self) -> Vec<&'static str> {
        self.role.columns()
    }

    pub fn records(&self) -> &[Row] {
        &self.records
    }

    pub fn filter(&self) -> DateRange {
        self.filter
    }

    pub fn set_filter(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        self.filter = DateRange { from, to };
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn form(&self) -> &Row {
        &self.form
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<Value>) -> ClientResult<()> {
        if !self.role.columns().contains(&name) {
            return Err(ClientError::Invalid(format!(
                "`{}` is not a {} field (expected one of: {})",
                name,
                self.role,
                self.role.columns().join(", ")
            )));
        }

        self.form.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Loads `record` into the form and switches to edit mode. The entry
    /// date is shown as the local calendar day.
    pub fn begin_edit(&mut self, record: &Row) -> ClientResult<()> {
        let id = record
            .get("id")
            .and_then(Value::as_u64)
            .ok_or_else(|| ClientError::Invalid("record has no numeric id".to_string()))?;

        let mut form = record.clone();
        normalize_entry_date(&mut form);

        self.form = form;
        self.mode = FormMode::Edit(id);
        debug!(id, "Editing record");
        Ok(())
    }

    pub fn reset_form(&mut self) {
        self.form.clear();
        self.mode = FormMode::Create;
    }

    /// What gets sent on save: the form without `id`, date normalized.
    pub fn payload(&self) -> Row {
        let mut payload = self.form.clone();
        payload.remove("id");
        normalize_entry_date(&mut payload);
        payload
    }

    pub async fn refresh(&mut self, client: &PortalClient) -> ClientResult<&[Row]> {
        self.records = client.list(self.role, self.filter).await?;
        Ok(&self.records)
    }

    /// Creates or updates depending on the form mode, then clears the form
    /// and reloads the table. Once the write is accepted the save counts as
    /// done; a failed reload only leaves the table stale.
    pub async fn submit(&mut self, client: &PortalClient) -> ClientResult<SaveOutcome> {
        let payload = self.payload();

        let outcome = match self.mode {
            FormMode::Create => SaveOutcome::Created(client.create(self.role, &payload).await?),
            FormMode::Edit(id) => {
                client.update(self.role, id, &payload).await?;
                SaveOutcome::Updated(id)
            }
        };
        info!(role = %self.role, ?outcome, "Record saved");

        self.reset_form();
        self.reload(client).await;
        Ok(outcome)
    }

    /// Deletes and reloads. As with `submit`, only the delete itself can fail.
    pub async fn delete(&mut self, client: &PortalClient, id: u64) -> ClientResult<()> {
        client.delete(self.role, id).await?;
        info!(role = %self.role, id, "Record deleted");
        self.reload(client).await;
        Ok(())
    }

    async fn reload(&mut self, client: &PortalClient) {
        if let Err(e) = self.refresh(client).await {
            warn!(role = %self.role, error = %e, "Reload after write failed; table is stale");
        }
    }

    /// The loaded rows as display cells, in `columns()` order.
    pub fn table(&self) -> Vec<Vec<String>> {
        let columns = self.columns();
        self.records
            .iter()
            .map(|record| columns.iter().map(|c| cell(record, c)).collect())
            .collect()
    }

    pub fn report_title(&self) -> String {
        format!("{} REPORT", self.role.title())
    }

    pub fn report_file_name(&self) -> String {
        format!("{}_report.pdf", self.role.table())
    }

    pub fn export_pdf(&self, path: &Path) -> ClientResult<()> {
        report::save_table(path, &self.report_title(), &self.columns(), &self.table())?;
        info!(path = %path.display(), rows = self.records.len(), "Report written");
        Ok(())
    }
}

fn normalize_entry_date(row: &mut Row) {
    if let Some(Value::String(raw)) = row.get_mut("entry_date") {
        *raw = dates::display(raw);
    }
}

/// Display text for one field of a record.
pub fn cell(record: &Row, field: &str) -> String {
    match record.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) if field == "entry_date" => dates::display(s),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
