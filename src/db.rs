use sqlx::MySqlPool;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::ApiError;
use crate::model::gem_purchase::GemPurchase;
use crate::model::ltc_record::LtcRecord;
use crate::model::medical_claim::MedicalClaim;
use crate::model::salary::Salary;
use crate::model::{Record, RecordCategory, RecordFields};
use crate::utils::db_utils::{
    DateRange, SqlStatement, build_count_by_id_sql, build_delete_sql, build_insert_sql,
    build_select_one_sql, build_select_sql, build_update_sql, execute, fetch_all, fetch_count,
};

pub fn connect_options(config: &Config) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&config.db_host)
        .port(config.db_port)
        .username(&config.db_user)
        .password(&config.db_password)
        .database(&config.db_name)
        .ssl_mode(config.db_ssl_mode)
}

pub async fn init_db(config: &Config) -> Result<MySqlPool, sqlx::Error> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_with(connect_options(config))
        .await?;

    info!(host = %config.db_host, database = %config.db_name, "Connected to MySQL database");

    if config.run_migrations {
        run_migrations(&pool).await?;
    }

    Ok(pool)
}

pub async fn run_migrations(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Record tables are up to date");
    Ok(())
}

async fn fetch_records(
    pool: &MySqlPool,
    category: RecordCategory,
    statement: SqlStatement,
) -> Result<Vec<Record>, sqlx::Error> {
    debug!(sql = %statement.sql, values = ?statement.values, "Fetching records");

    Ok(match category {
        RecordCategory::Salaries => fetch_all::<Salary>(pool, statement)
            .await?
            .into_iter()
            .map(Record::Salary)
            .collect(),
        RecordCategory::GemPurchases => fetch_all::<GemPurchase>(pool, statement)
            .await?
            .into_iter()
            .map(Record::GemPurchase)
            .collect(),
        RecordCategory::MedicalClaims => fetch_all::<MedicalClaim>(pool, statement)
            .await?
            .into_iter()
            .map(Record::MedicalClaim)
            .collect(),
        RecordCategory::LtcRecords => fetch_all::<LtcRecord>(pool, statement)
            .await?
            .into_iter()
            .map(Record::LtcRecord)
            .collect(),
    })
}

pub async fn list_records(
    pool: &MySqlPool,
    category: RecordCategory,
    range: DateRange,
) -> Result<Vec<Record>, ApiError> {
    Ok(fetch_records(pool, category, build_select_sql(category, range)).await?)
}

pub async fn get_record(pool: &MySqlPool, category: RecordCategory, id: u64) -> Result<Record, ApiError> {
    fetch_records(pool, category, build_select_one_sql(category, id))
        .await?
        .into_iter()
        .next()
        .ok_or(ApiError::NotFound { category, id })
}

/// Returns the server-assigned id.
pub async fn insert_record(pool: &MySqlPool, fields: RecordFields) -> Result<u64, ApiError> {
    let category = fields.category();
    let statement = build_insert_sql(category, fields.into_values());
    debug!(sql = %statement.sql, "Inserting record");

    let result = execute(pool, statement).await?;
    Ok(result.last_insert_id())
}

pub async fn update_record(pool: &MySqlPool, id: u64, fields: RecordFields) -> Result<(), ApiError> {
    let category = fields.category();
    let statement = build_update_sql(category, fields.into_values(), id);
    debug!(sql = %statement.sql, id, "Updating record");

    let result = execute(pool, statement).await?;

    // An overwrite with identical values reports zero changed rows, so
    // confirm the row is really gone before calling it missing.
    if result.rows_affected() == 0
        && fetch_count(pool, build_count_by_id_sql(category, id)).await? == 0
    {
        return Err(ApiError::NotFound { category, id });
    }

    Ok(())
}

pub async fn delete_record(pool: &MySqlPool, category: RecordCategory, id: u64) -> Result<(), ApiError> {
    let result = execute(pool, build_delete_sql(category, id)).await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound { category, id });
    }

    Ok(())
}
