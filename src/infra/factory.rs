use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use chrono_tz::Tz;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tokio::sync::broadcast;
use tracing::{info, warn};
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::ports::{BookingRepository, ProgramRepository, SessionRepository};
use crate::domain::services::{
    availability::AvailabilityService, cache::AvailabilityCache, scheduling::SchedulingService,
};
use crate::infra::repositories::{
    postgres_booking_repo::PostgresBookingRepo, postgres_program_repo::PostgresProgramRepo,
    postgres_session_repo::PostgresSessionRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_program_repo::SqliteProgramRepo,
    sqlite_session_repo::SqliteSessionRepo,
};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Wires services over whichever store implementation was chosen.
pub fn build_state(
    config: &Config,
    session_repo: Arc<dyn SessionRepository>,
    program_repo: Arc<dyn ProgramRepository>,
    booking_repo: Arc<dyn BookingRepository>,
) -> AppState {
    let default_timezone: Tz = config.default_timezone.parse().unwrap_or_else(|_| {
        warn!("Unknown DEFAULT_TIMEZONE {}, falling back to UTC", config.default_timezone);
        chrono_tz::UTC
    });

    let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
    let cache = Arc::new(AvailabilityCache::new(Duration::from_secs(config.availability_cache_ttl_secs)));
    let lookup_timeout = Duration::from_millis(config.lookup_timeout_ms);

    let availability = Arc::new(AvailabilityService::new(
        session_repo.clone(),
        program_repo.clone(),
        booking_repo.clone(),
        cache,
        lookup_timeout,
    ));
    let scheduling = Arc::new(SchedulingService::new(
        session_repo,
        program_repo,
        booking_repo,
        events.clone(),
    ));

    AppState {
        default_timezone,
        availability,
        scheduling,
        events,
    }
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        build_state(
            config,
            Arc::new(PostgresSessionRepo::new(pool.clone())),
            Arc::new(PostgresProgramRepo::new(pool.clone())),
            Arc::new(PostgresBookingRepo::new(pool)),
        )
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        build_state(
            config,
            Arc::new(SqliteSessionRepo::new(pool.clone())),
            Arc::new(SqliteProgramRepo::new(pool.clone())),
            Arc::new(SqliteBookingRepo::new(pool)),
        )
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
