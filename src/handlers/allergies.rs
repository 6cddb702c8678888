//! Allergy management. Allergens recorded here flow into recipe search
//! exclusions and safety scoring.

use crate::error::{AppError, Result};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct AddAllergyRequest {
    pub allergen: String,
    #[serde(default)]
    pub severity: Option<String>,
}

/// POST /api/users/{user_id}/allergies
pub async fn add_allergy(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<AddAllergyRequest>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    state.db.get_user(user_id).await?;

    if payload.allergen.trim().is_empty() {
        return Err(AppError::Validation(
            "allergen must not be empty".to_string(),
        ));
    }

    let allergy = state
        .db
        .add_allergy(user_id, &payload.allergen, payload.severity.clone())
        .await?;
    Ok(HttpResponse::Created().json(allergy))
}

/// GET /api/users/{user_id}/allergies
pub async fn list_allergies(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    state.db.get_user(user_id).await?;
    let allergies = state.db.list_allergies(user_id).await?;
    Ok(HttpResponse::Ok().json(allergies))
}

/// DELETE /api/users/{user_id}/allergies/{allergy_id}
pub async fn remove_allergy(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse> {
    let (user_id, allergy_id) = path.into_inner();
    state.db.remove_allergy(user_id, allergy_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
