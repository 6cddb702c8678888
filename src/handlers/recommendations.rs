//! Recommendation, feedback and preference endpoints, all delegating to
//! the orchestrator.

use crate::error::Result;
use crate::models::FeedbackType;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Debug, Deserialize)]
pub struct FilteredQuery {
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub diet: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub recipe_id: i64,
    pub feedback_type: FeedbackType,
}

#[derive(Debug, Deserialize)]
pub struct CookedRequest {
    pub recipe_id: i64,
    #[serde(default = "default_servings")]
    pub servings_made: u32,
}

fn default_servings() -> u32 {
    1
}

/// GET /api/users/{user_id}/recommendations?limit=10
pub async fn get_recommendations(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<RecommendationQuery>,
) -> Result<HttpResponse> {
    let response = state
        .recommender
        .recommend(path.into_inner(), query.limit)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/users/{user_id}/recommendations/filtered?cuisine=&diet=&limit=10
pub async fn get_filtered_recommendations(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<FilteredQuery>,
) -> Result<HttpResponse> {
    let query = query.into_inner();
    let response = state
        .recommender
        .recommend_filtered(path.into_inner(), query.cuisine, query.diet, query.limit)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/users/{user_id}/feedback
pub async fn post_feedback(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<FeedbackRequest>,
) -> Result<HttpResponse> {
    let record = state
        .recommender
        .record_feedback(path.into_inner(), payload.recipe_id, payload.feedback_type)
        .await?;
    Ok(HttpResponse::Created().json(record))
}

/// GET /api/users/{user_id}/feedback
pub async fn list_feedback(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    state.db.get_user(user_id).await?;
    let history = state.db.list_feedback(user_id).await?;
    Ok(HttpResponse::Ok().json(history))
}

/// POST /api/users/{user_id}/recipes/cooked
pub async fn post_cooked(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<CookedRequest>,
) -> Result<HttpResponse> {
    let response = state
        .recommender
        .record_cooked(path.into_inner(), payload.recipe_id, payload.servings_made)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/users/{user_id}/preferences/summary
pub async fn get_preference_summary(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let summary = state.recommender.preference_summary(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// GET /api/users/{user_id}/preferences/statistics
pub async fn get_preference_statistics(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let statistics = state
        .recommender
        .preference_statistics(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(statistics))
}

/// POST /api/users/{user_id}/preferences/reset
pub async fn reset_preferences(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    state.recommender.reset_preferences(user_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "user_id": user_id,
        "status": "reset",
    })))
}
