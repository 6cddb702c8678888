use crate::db::Database;
use crate::services::recipes::RecipeProvider;
use crate::services::recommendation::Recommender;
use std::sync::Arc;

/// Shared application state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub recommender: Arc<Recommender>,
    pub provider: Arc<dyn RecipeProvider>,
    pub service_name: String,
}
