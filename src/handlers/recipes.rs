//! Recipe detail passthrough.

use crate::error::Result;
use crate::state::AppState;
use actix_web::{web, HttpResponse};

/// GET /api/recipes/{recipe_id}
pub async fn get_recipe(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let details = state.provider.get_recipe_information(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(details))
}
