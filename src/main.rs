use dotenvy::dotenv;
use tracing::{info, warn};

use qrpass::config::AppConfig;
use qrpass::config::database::init_db_pool;
use qrpass::logging::init_tracing;
use qrpass::modules::admins::service::AdminService;
use qrpass::router::init_router;
use qrpass::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env();

    let db = init_db_pool(&config.database).await?;
    sqlx::migrate!().run(&db).await?;

    match &config.bootstrap {
        Some(bootstrap) => AdminService::ensure_initial_admin(&db, bootstrap).await?,
        None => warn!("no bootstrap admin configured; set INITIAL_ADMIN_EMAIL to seed one"),
    }

    let addr = config.server.bind_addr();
    let state = AppState::new(db, &config);
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("server listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
