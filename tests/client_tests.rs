//! Drives `PortalClient` and `Dashboard` over real HTTP. `/login` is served
//! by the production route table; the record endpoints are an in-memory
//! stand-in so no database is needed.

use std::collections::HashMap;
use std::sync::Mutex;

use actix_web::dev::ServerHandle;
use actix_web::web::{self, Data};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer};
use chrono::NaiveDate;
use serde_json::json;
use sqlx::mysql::MySqlPoolOptions;

use finance_portal::auth::credentials::CredentialStore;
use finance_portal::client::dashboard::{FormMode, SaveOutcome};
use finance_portal::client::{ClientError, Dashboard, PortalClient, Row};
use finance_portal::config::Config;
use finance_portal::model::RecordCategory;
use finance_portal::{db, routes};

#[derive(Default)]
struct Store {
    rows: Mutex<Vec<Row>>,
    next_id: Mutex<u64>,
    queries: Mutex<Vec<String>>,
    fail_list: bool,
}

impl Store {
    fn failing_list() -> Self {
        Self {
            fail_list: true,
            ..Self::default()
        }
    }

    fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn last_query(&self) -> String {
        self.queries.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

async fn list(store: Data<Store>, req: HttpRequest) -> HttpResponse {
    store.queries.lock().unwrap().push(req.query_string().to_string());
    if store.fail_list {
        return HttpResponse::InternalServerError().json(json!({"error": "list unavailable"}));
    }

    let params = web::Query::<HashMap<String, String>>::from_query(req.query_string())
        .unwrap()
        .into_inner();
    let rows: Vec<Row> = store
        .rows
        .lock()
        .unwrap()
        .iter()
        .filter(|row| {
            let date = row["entry_date"].as_str().unwrap_or_default();
            params.get("from").map_or(true, |from| date >= from.as_str())
                && params.get("to").map_or(true, |to| date <= to.as_str())
        })
        .cloned()
        .collect();

    HttpResponse::Ok().json(rows)
}

async fn create(store: Data<Store>, body: web::Json<Row>) -> HttpResponse {
    let id = {
        let mut next = store.next_id.lock().unwrap();
        *next += 1;
        *next
    };

    let mut row = body.into_inner();
    row.insert("id".to_string(), json!(id));
    store.rows.lock().unwrap().push(row);

    HttpResponse::Ok().json(json!({"message": "Record added", "id": id}))
}

async fn get_one(store: Data<Store>, path: web::Path<(String, u64)>) -> HttpResponse {
    let (_, id) = path.into_inner();
    match store.rows.lock().unwrap().iter().find(|r| r["id"] == json!(id)) {
        Some(row) => HttpResponse::Ok().json(row),
        None => HttpResponse::NotFound().json(json!({"error": format!("No record {id}")})),
    }
}

async fn update(store: Data<Store>, path: web::Path<(String, u64)>, body: web::Json<Row>) -> HttpResponse {
    let (_, id) = path.into_inner();
    let mut rows = store.rows.lock().unwrap();
    match rows.iter_mut().find(|r| r["id"] == json!(id)) {
        Some(row) => {
            *row = body.into_inner();
            row.insert("id".to_string(), json!(id));
            HttpResponse::Ok().json(json!({"message": "Record updated"}))
        }
        None => HttpResponse::NotFound().json(json!({"error": format!("No record {id}")})),
    }
}

async fn remove(store: Data<Store>, path: web::Path<(String, u64)>) -> HttpResponse {
    let (_, id) = path.into_inner();
    let mut rows = store.rows.lock().unwrap();
    let before = rows.len();
    rows.retain(|r| r["id"] != json!(id));

    if rows.len() == before {
        HttpResponse::NotFound().json(json!({"error": format!("No record {id}")}))
    } else {
        HttpResponse::Ok().json(json!({"message": "Record deleted"}))
    }
}

struct TestServer {
    client: PortalClient,
    handle: ServerHandle,
}

async fn start(store: Data<Store>) -> TestServer {
    // The real record routes move aside so the stand-in owns `/api`.
    let config = Config::from_lookup(|key| (key == "API_PREFIX").then(|| "/db".to_string())).unwrap();
    let pool = MySqlPoolOptions::new().connect_lazy_with(db::connect_options(&config));
    let credentials = Data::new(CredentialStore::with_defaults().unwrap());

    let server = HttpServer::new(move || {
        let config = config.clone();
        App::new()
            .app_data(Data::new(pool.clone()))
            .app_data(credentials.clone())
            .app_data(store.clone())
            .configure(move |cfg| routes::configure(cfg, &config))
            .service(
                web::resource("/api/{table}")
                    .route(web::get().to(list))
                    .route(web::post().to(create)),
            )
            .service(
                web::resource("/api/{table}/{id}")
                    .route(web::get().to(get_one))
                    .route(web::put().to(update))
                    .route(web::delete().to(remove)),
            )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    TestServer {
        client: PortalClient::new(format!("http://{addr}")),
        handle,
    }
}

fn fill(dashboard: &mut Dashboard, employee_id: &str, name: &str, amount: &str, date: &str) {
    dashboard.set_field("employee_id", employee_id).unwrap();
    dashboard.set_field("employee_name", name).unwrap();
    dashboard.set_field("amount", amount).unwrap();
    dashboard.set_field("entry_date", date).unwrap();
}

#[actix_web::test]
async fn login_returns_role_or_invalid_credentials() {
    let server = start(Data::new(Store::default())).await;

    let role = server.client.login("ltc_admin", "ltc@123").await.unwrap();
    assert_eq!(role, RecordCategory::LtcRecords);

    let err = server.client.login("ltc_admin", "wrong").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidCredentials));

    let err = server.client.login("", "").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidCredentials));

    // A body with the password missing is still a credentials failure.
    let resp = reqwest::Client::new()
        .post(format!("{}/login", server.client.base_url()))
        .json(&json!({"username": "ltc_admin"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 401);

    server.handle.stop(false).await;
}

#[actix_web::test]
async fn dashboard_create_filter_edit_delete() {
    let store = Data::new(Store::default());
    let server = start(store.clone()).await;
    let client = &server.client;
    let mut dashboard = Dashboard::new(RecordCategory::LtcRecords);

    assert!(dashboard.refresh(client).await.unwrap().is_empty());

    fill(&mut dashboard, "E1", "Asha", "1200", "2091-03-05");
    assert_eq!(dashboard.submit(client).await.unwrap(), SaveOutcome::Created(1));
    assert_eq!(dashboard.mode(), FormMode::Create);
    assert!(dashboard.form().is_empty());
    assert_eq!(dashboard.records().len(), 1);

    fill(&mut dashboard, "E2", "Ravi", "800", "2091-07-20");
    assert_eq!(dashboard.submit(client).await.unwrap(), SaveOutcome::Created(2));
    assert_eq!(dashboard.records().len(), 2);

    // Only the set bound goes on the wire.
    dashboard.set_filter(NaiveDate::from_ymd_opt(2091, 6, 1), None);
    let rows = dashboard.refresh(client).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["employee_id"], "E2");
    assert_eq!(store.last_query(), "from=2091-06-01");

    dashboard.set_filter(None, None);
    let record = client.get(RecordCategory::LtcRecords, 1).await.unwrap();
    dashboard.begin_edit(&record).unwrap();
    dashboard.set_field("amount", "1500").unwrap();
    assert_eq!(dashboard.submit(client).await.unwrap(), SaveOutcome::Updated(1));

    assert_eq!(store.row_count(), 2);
    let edited = dashboard
        .records()
        .iter()
        .find(|r| r["id"] == json!(1))
        .unwrap();
    assert_eq!(edited["amount"], "1500");
    assert_eq!(edited["employee_name"], "Asha");

    dashboard.delete(client, 2).await.unwrap();
    assert_eq!(dashboard.records().len(), 1);

    let err = dashboard.delete(client, 2).await.unwrap_err();
    assert!(matches!(err, ClientError::Server { status: 404, .. }));

    server.handle.stop(false).await;
}

#[actix_web::test]
async fn committed_write_counts_as_saved_when_reload_fails() {
    let store = Data::new(Store::failing_list());
    let server = start(store.clone()).await;
    let client = &server.client;
    let mut dashboard = Dashboard::new(RecordCategory::LtcRecords);

    fill(&mut dashboard, "E1", "Asha", "1200", "2091-03-05");
    assert_eq!(dashboard.submit(client).await.unwrap(), SaveOutcome::Created(1));
    assert_eq!(store.row_count(), 1);
    assert!(dashboard.form().is_empty());

    dashboard.delete(client, 1).await.unwrap();
    assert_eq!(store.row_count(), 0);

    let err = dashboard.refresh(client).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Server { status: 500, ref message } if message == "list unavailable"
    ));

    server.handle.stop(false).await;
}
