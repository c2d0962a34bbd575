use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vacancy_tracker::{
    app,
    config::{get_config, init_config},
    database::{
        memory::MemoryStore,
        pool::{create_pool, run_migrations},
        postgres::PgStore,
        store::VacancyStore,
    },
    utils::time::SystemClock,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    init_config()?;
    let config = get_config()?;

    let (storage, store): (&'static str, Arc<dyn VacancyStore>) = match &config.database_url {
        Some(database_url) => {
            let pool = create_pool(config, database_url).await?;
            run_migrations(&pool).await?;
            info!("Connected to Postgres, migrations applied");
            let store: Arc<dyn VacancyStore> = Arc::new(PgStore::new(pool));
            ("postgres", store)
        }
        None => {
            warn!("DATABASE_URL not set, records are kept in memory and lost on exit");
            let store: Arc<dyn VacancyStore> = Arc::new(MemoryStore::new());
            ("memory", store)
        }
    };

    let app_state = AppState::new(storage, store, Arc::new(SystemClock));
    let app = app(app_state);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
