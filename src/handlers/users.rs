//! User profile lookup.

use crate::error::Result;
use crate::models::UserProfile;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use uuid::Uuid;

/// GET /api/users/{user_id}
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let user = state.db.get_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserProfile::from(&user)))
}
