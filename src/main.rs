use actix_web::{middleware, web, App, HttpServer};
use pantry_service::config::Config;
use pantry_service::db::Database;
use pantry_service::routes::configure_routes;
use pantry_service::services::bandit::{ModelCache, ModelStore};
use pantry_service::services::recipes::{
    CachedRecipeProvider, RecipeCache, RecipeProvider, SpoonacularClient,
};
use pantry_service::services::recommendation::Recommender;
use pantry_service::state::AppState;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    tracing::info!(service = %config.service.service_name, "starting");

    let redis_client = redis::Client::open(config.redis.url.clone())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let db = Arc::new(Database::new(redis_client.clone()));
    match db.ping().await {
        Ok(()) => tracing::info!("connected to redis"),
        Err(e) => tracing::warn!("redis unavailable at startup: {}", e),
    }

    let models = Arc::new(ModelCache::new(ModelStore::new(redis_client.clone())));

    let recipe_cache = RecipeCache::new(
        redis_client,
        Duration::from_secs(config.recipe_api.cache_ttl_seconds),
        Duration::from_secs(config.recipe_api.stale_ttl_seconds),
    );
    let provider: Arc<dyn RecipeProvider> = Arc::new(CachedRecipeProvider::new(
        SpoonacularClient::new(&config.recipe_api),
        recipe_cache,
    ));

    let recommender = Arc::new(Recommender::new(
        db.clone(),
        models.clone(),
        provider.clone(),
    ));

    let state = AppState {
        db,
        recommender,
        provider,
        service_name: config.service.service_name.clone(),
    };

    let addr = format!("{}:{}", config.service.host, config.service.port);
    tracing::info!(%addr, "http server listening");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    })
    .bind(&addr)?
    .run()
    .await
}
