// src/inventory_handlers.rs
//! Обработчики инвентаризаций

use actix_web::{web, HttpResponse};
use log::info;
use std::sync::Arc;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::handlers::ListResponse;
use crate::models::{CreateInventoryRequest, Inventory, Medication, UpdateInventoryRequest};
use crate::AppState;

const INVENTORY_FIELD_LABELS: &[(&str, &str)] = &[
    ("id", "ID"),
    ("medication_id", "ID медикамента"),
    ("inventory_date", "Дата инвентаризации"),
    ("amount", "Количество упаковок"),
];

pub async fn get_inventories(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let inventories = Inventory::get_all(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(inventories, INVENTORY_FIELD_LABELS)))
}

pub async fn get_inventory_by_id(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let inventory = Inventory::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::inventory_not_found(id))?;
    Ok(HttpResponse::Ok().json(inventory))
}

pub async fn create_inventory(
    app_state: web::Data<Arc<AppState>>,
    request: web::Json<CreateInventoryRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;

    Medication::get_by_id(&app_state.db_pool, request.medication_id)
        .await?
        .ok_or_else(|| ApiError::medication_not_found(request.medication_id))?;

    let mut inventory = request.into_inventory();
    inventory.save(&app_state.db_pool).await?;

    info!(
        "Created inventory record for medication {} ({:?})",
        inventory.medication_id, inventory.id
    );
    Ok(HttpResponse::Created().json(inventory))
}

pub async fn update_inventory(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
    request: web::Json<UpdateInventoryRequest>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let request = request.into_inner();
    request.validate()?;
    if let Some(medication_id) = request.medication_id {
        Medication::get_by_id(&app_state.db_pool, medication_id)
            .await?
            .ok_or_else(|| ApiError::medication_not_found(medication_id))?;
    }

    let mut inventory = Inventory::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::inventory_not_found(id))?;
    request.apply_to(&mut inventory);
    inventory.save(&app_state.db_pool).await?;

    info!("Updated inventory record {}", id);
    Ok(HttpResponse::Ok().json(inventory))
}

pub async fn delete_inventory(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    Inventory::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::inventory_not_found(id))?;
    Inventory::delete(&app_state.db_pool, id).await?;

    info!("Deleted inventory record {}", id);
    Ok(HttpResponse::NoContent().finish())
}
