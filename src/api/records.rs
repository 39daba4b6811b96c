use std::str::FromStr;

use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use sqlx::MySqlPool;
use tracing::{debug, info, instrument};
use utoipa::IntoParams;

use crate::db;
use crate::error::ApiError;
use crate::model::{Record, RecordCategory, RecordFields};
use crate::models::{CreatedResponse, MessageResponse};
use crate::utils::db_utils::DateRange;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecordQuery {
    /// Earliest entry date, inclusive (YYYY-MM-DD)
    #[param(example = "2024-01-01")]
    pub from: Option<String>,
    /// Latest entry date, inclusive (YYYY-MM-DD)
    #[param(example = "2024-03-31")]
    pub to: Option<String>,
}

impl RecordQuery {
    /// Blank bounds are treated as absent, the way an untouched date input
    /// submits them.
    pub fn date_range(&self) -> Result<DateRange, ApiError> {
        Ok(DateRange {
            from: parse_bound("from", self.from.as_deref())?,
            to: parse_bound("to", self.to.as_deref())?,
        })
    }
}

fn parse_bound(name: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("`{name}` must be a date (YYYY-MM-DD), got {s:?}"))),
    }
}

pub fn parse_category(table: &str) -> Result<RecordCategory, ApiError> {
    RecordCategory::from_str(table).map_err(|_| ApiError::UnknownCategory(table.to_string()))
}

fn parse_fields(category: RecordCategory, body: Value) -> Result<RecordFields, ApiError> {
    RecordFields::parse(category, body).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// List records
#[utoipa::path(
    get,
    path = "/api/{table}",
    params(
        ("table" = RecordCategory, Path, description = "Record category"),
        RecordQuery
    ),
    responses(
        (status = 200, description = "Rows in the category, filtered by entry date", body = [Record]),
        (status = 400, description = "Malformed date bound"),
        (status = 404, description = "Unknown record category")
    ),
    tag = "Records"
)]
#[instrument(skip(pool, query), fields(table = %path))]
pub async fn list_records(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
    query: web::Query<RecordQuery>,
) -> Result<HttpResponse, ApiError> {
    let category = parse_category(&path)?;
    let range = query.date_range()?;

    let records = db::list_records(pool.get_ref(), category, range).await?;
    info!(count = records.len(), "Listed records");

    Ok(HttpResponse::Ok().json(records))
}

/// Get one record
#[utoipa::path(
    get,
    path = "/api/{table}/{id}",
    params(
        ("table" = RecordCategory, Path, description = "Record category"),
        ("id" = u64, Path, description = "Record ID")
    ),
    responses(
        (status = 200, body = Record),
        (status = 404, description = "Unknown category or record")
    ),
    tag = "Records"
)]
#[instrument(skip(pool, path))]
pub async fn get_record(
    pool: web::Data<MySqlPool>,
    path: web::Path<(String, u64)>,
) -> Result<HttpResponse, ApiError> {
    let (table, id) = path.into_inner();
    let category = parse_category(&table)?;

    let record = db::get_record(pool.get_ref(), category, id).await?;
    debug!(%category, id = record.id(), "Fetched record");
    Ok(HttpResponse::Ok().json(record))
}

/// Create a record
#[utoipa::path(
    post,
    path = "/api/{table}",
    params(
        ("table" = RecordCategory, Path, description = "Record category")
    ),
    request_body = RecordFields,
    responses(
        (status = 200, description = "Record added", body = CreatedResponse),
        (status = 400, description = "Payload does not match the category schema"),
        (status = 404, description = "Unknown record category"),
        (status = 500, description = "Database error, message passed through as `error`")
    ),
    tag = "Records"
)]
#[instrument(skip(pool, body), fields(table = %path))]
pub async fn create_record(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let category = parse_category(&path)?;
    let fields = parse_fields(category, body.into_inner())?;

    let id = db::insert_record(pool.get_ref(), fields).await?;
    info!(id, "Record added");

    Ok(HttpResponse::Ok().json(CreatedResponse {
        message: "Record added".to_string(),
        id,
    }))
}

/// Overwrite a record
#[utoipa::path(
    put,
    path = "/api/{table}/{id}",
    params(
        ("table" = RecordCategory, Path, description = "Record category"),
        ("id" = u64, Path, description = "Record ID")
    ),
    request_body = RecordFields,
    responses(
        (status = 200, description = "Record updated", body = MessageResponse),
        (status = 400, description = "Payload does not match the category schema"),
        (status = 404, description = "Unknown category or record")
    ),
    tag = "Records"
)]
#[instrument(skip(pool, path, body))]
pub async fn update_record(
    pool: web::Data<MySqlPool>,
    path: web::Path<(String, u64)>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let (table, id) = path.into_inner();
    let category = parse_category(&table)?;
    let fields = parse_fields(category, body.into_inner())?;

    db::update_record(pool.get_ref(), id, fields).await?;
    info!(%category, id, "Record updated");

    Ok(HttpResponse::Ok().json(MessageResponse::new("Record updated")))
}

/// Delete a record
#[utoipa::path(
    delete,
    path = "/api/{table}/{id}",
    params(
        ("table" = RecordCategory, Path, description = "Record category"),
        ("id" = u64, Path, description = "Record ID")
    ),
    responses(
        (status = 200, description = "Record deleted", body = MessageResponse),
        (status = 404, description = "Unknown category or record")
    ),
    tag = "Records"
)]
#[instrument(skip(pool, path))]
pub async fn delete_record(
    pool: web::Data<MySqlPool>,
    path: web::Path<(String, u64)>,
) -> Result<HttpResponse, ApiError> {
    let (table, id) = path.into_inner();
    let category = parse_category(&table)?;

    db::delete_record(pool.get_ref(), category, id).await?;
    info!(%category, id, "Record deleted");

    Ok(HttpResponse::Ok().json(MessageResponse::new("Record deleted")))
}
