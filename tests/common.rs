use mentor_availability::{
    api::router::create_router,
    background::start_cache_invalidator,
    config::Config,
    infra::factory::build_state,
    infra::repositories::{
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_program_repo::SqliteProgramRepo,
        sqlite_session_repo::SqliteSessionRepo,
    },
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use std::str::FromStr;
use tower::ServiceExt;
use serde_json::Value;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        Self::with_cache_ttl(0).await
    }

    pub async fn with_cache_ttl(ttl_secs: u64) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            default_timezone: "UTC".to_string(),
            availability_cache_ttl_secs: ttl_secs,
            lookup_timeout_ms: 5000,
        };

        let state = Arc::new(build_state(
            &config,
            Arc::new(SqliteSessionRepo::new(pool.clone())),
            Arc::new(SqliteProgramRepo::new(pool.clone())),
            Arc::new(SqliteBookingRepo::new(pool.clone())),
        ));

        let events = state.events.subscribe();
        let cache = state.availability.cache();
        tokio::spawn(async move {
            start_cache_invalidator(cache, events).await;
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(
            Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
        ).await.unwrap();
        let status = response.status();
        (status, parse_body(response).await)
    }

    pub async fn post(&self, uri: &str, payload: Value) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(
            Request::builder().method("POST").uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string())).unwrap()
        ).await.unwrap();
        let status = response.status();
        (status, parse_body(response).await)
    }

    pub async fn create_program(&self, mentor_id: &str, title: &str, capacity: i32) -> String {
        let (status, body) = self.post(
            &format!("/api/v1/mentors/{}/programs", mentor_id),
            serde_json::json!({"title": title, "total_price_cents": 20000, "capacity": capacity}),
        ).await;
        assert_eq!(status, StatusCode::CREATED, "program creation failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_session(&self, mentor_id: &str, payload: Value) -> String {
        let (status, body) = self.post(&format!("/api/v1/mentors/{}/sessions", mentor_id), payload).await;
        assert_eq!(status, StatusCode::CREATED, "session creation failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn book(&self, payload: Value) -> StatusCode {
        self.post("/api/v1/bookings", payload).await.0
    }

    pub async fn availability(&self, mentor_id: &str) -> Value {
        let (status, body) = self.get(&format!("/api/v1/mentors/{}/availability", mentor_id)).await;
        assert_eq!(status, StatusCode::OK, "availability failed: {}", body);
        body
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
