use std::sync::Arc;
use tokio::sync::RwLock;

use crate::clients::BookingClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{
    CategoryService, MovieService, SeaOrmMovieService, SeatService, UploadService,
};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// Reusing one client across services enables connection pooling and avoids
/// socket exhaustion.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent("Marquee/1.0")
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub booking: Arc<BookingClient>,

    pub movie_service: Arc<dyn MovieService>,

    pub category_service: Arc<CategoryService>,

    pub seat_service: Arc<SeatService>,

    pub upload_service: Arc<UploadService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let http_client = build_shared_http_client(config.booking.request_timeout_seconds)?;
        let booking = Arc::new(BookingClient::with_shared_client(
            http_client,
            config.booking.base_url.trim_end_matches('/').to_string(),
        ));

        let movie_service =
            Arc::new(SeaOrmMovieService::new(store.clone())) as Arc<dyn MovieService>;
        let category_service = Arc::new(CategoryService::new(store.clone()));
        let seat_service = Arc::new(SeatService::new((*booking).clone()));
        let upload_service = Arc::new(UploadService::new(
            &config.uploads.path,
            config.uploads.max_file_size_bytes,
        ));

        let config = Arc::new(RwLock::new(config));

        Ok(Self {
            config,
            store,
            booking,
            movie_service,
            category_service,
            seat_service,
            upload_service,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
