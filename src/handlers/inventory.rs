//! Inventory endpoints. Expiry dates are derived from the shelf-life
//! estimate unless the client supplies one.

use crate::error::{AppError, Result};
use crate::models::{InventoryItem, InventoryItemUpdate};
use crate::services::inventory;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct AddInventoryRequest {
    pub item_name: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub shelf_life_days: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInventoryRequest {
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<chrono::DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct ExpiringQuery {
    #[serde(default = "default_expiring_days")]
    pub days: i64,
}

fn default_expiring_days() -> i64 {
    3
}

/// POST /api/users/{user_id}/inventory
pub async fn add_item(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<AddInventoryRequest>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    state.db.get_user(user_id).await?;

    let item_name = payload.item_name.trim().to_string();
    if item_name.is_empty() {
        return Err(AppError::Validation(
            "item_name must not be empty".to_string(),
        ));
    }
    if payload.quantity <= 0.0 {
        return Err(AppError::Validation(
            "quantity must be positive".to_string(),
        ));
    }

    let purchase = payload
        .purchase_date
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc());
    let shelf_life = payload.shelf_life_days.filter(|days| *days > 0);
    let expiry = inventory::expiry_for(&item_name, payload.quantity, purchase, shelf_life);

    let now = Utc::now();
    let item = InventoryItem {
        id: Uuid::new_v4(),
        user_id,
        item_name,
        quantity: payload.quantity,
        unit: payload
            .unit
            .clone()
            .filter(|unit| !unit.trim().is_empty())
            .unwrap_or_else(|| "piece".to_string()),
        expiry_date: expiry,
        added_at: now,
        updated_at: now,
    };
    state.db.put_inventory_item(&item).await?;

    Ok(HttpResponse::Created().json(item))
}

/// GET /api/users/{user_id}/inventory
pub async fn list_items(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    state.db.get_user(user_id).await?;
    let items = state.db.list_inventory(user_id).await?;
    Ok(HttpResponse::Ok().json(items))
}

/// GET /api/users/{user_id}/inventory/expiring?days=3
pub async fn list_expiring(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<ExpiringQuery>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    state.db.get_user(user_id).await?;
    let items = state.db.list_inventory(user_id).await?;
    let expiring = inventory::expiring_within(&items, query.days, Utc::now());
    Ok(HttpResponse::Ok().json(expiring))
}

/// PUT /api/users/{user_id}/inventory/{item_id}
pub async fn update_item(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
    payload: web::Json<UpdateInventoryRequest>,
) -> Result<HttpResponse> {
    let (user_id, item_id) = path.into_inner();

    if let Some(name) = &payload.item_name {
        if name.trim().is_empty() {
            return Err(AppError::Validation(
                "item_name must not be empty".to_string(),
            ));
        }
    }
    if let Some(quantity) = payload.quantity {
        if quantity <= 0.0 {
            return Err(AppError::Validation(
                "quantity must be positive".to_string(),
            ));
        }
    }

    let update = InventoryItemUpdate {
        item_name: payload.item_name.clone().map(|n| n.trim().to_string()),
        quantity: payload.quantity,
        unit: payload.unit.clone(),
        expiry_date: payload.expiry_date,
    };
    let item = state.db.update_inventory_item(user_id, item_id, &update).await?;

    Ok(HttpResponse::Ok().json(item))
}

/// DELETE /api/users/{user_id}/inventory/{item_id}
pub async fn delete_item(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse> {
    let (user_id, item_id) = path.into_inner();
    state.db.delete_inventory_item(user_id, item_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
