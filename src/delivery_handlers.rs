// src/delivery_handlers.rs
//! Обработчики поставок медикаментов

use actix_web::{web, HttpResponse};
use log::info;
use std::sync::Arc;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::handlers::ListResponse;
use crate::models::{CreateDeliveryRequest, Medication, StockDelivery, UpdateDeliveryRequest};
use crate::AppState;

const DELIVERY_FIELD_LABELS: &[(&str, &str)] = &[
    ("id", "ID"),
    ("medication_id", "ID медикамента"),
    ("application_date", "Дата заявки"),
    ("delivery_date", "Дата поставки"),
    ("amount", "Количество"),
];

pub async fn get_deliveries(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let deliveries = StockDelivery::get_all(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(deliveries, DELIVERY_FIELD_LABELS)))
}

pub async fn get_delivery_by_id(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let delivery = StockDelivery::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::delivery_not_found(id))?;
    Ok(HttpResponse::Ok().json(delivery))
}

/// Вставка с заполненной датой поставки триггером пополняет склад.
pub async fn create_delivery(
    app_state: web::Data<Arc<AppState>>,
    request: web::Json<CreateDeliveryRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;

    Medication::get_by_id(&app_state.db_pool, request.medication_id)
        .await?
        .ok_or_else(|| ApiError::medication_not_found(request.medication_id))?;

    let mut delivery = request.into_delivery();
    delivery.save(&app_state.db_pool).await?;

    info!(
        "Created delivery for medication {} ({:?})",
        delivery.medication_id, delivery.id
    );
    Ok(HttpResponse::Created().json(delivery))
}

pub async fn update_delivery(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
    request: web::Json<UpdateDeliveryRequest>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let request = request.into_inner();
    request.validate()?;
    if let Some(medication_id) = request.medication_id {
        Medication::get_by_id(&app_state.db_pool, medication_id)
            .await?
            .ok_or_else(|| ApiError::medication_not_found(medication_id))?;
    }

    let mut delivery = StockDelivery::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::delivery_not_found(id))?;
    request.apply_to(&mut delivery);
    delivery.save(&app_state.db_pool).await?;

    info!("Updated delivery {}", id);
    Ok(HttpResponse::Ok().json(delivery))
}

pub async fn delete_delivery(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    StockDelivery::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::delivery_not_found(id))?;
    StockDelivery::delete(&app_state.db_pool, id).await?;

    info!("Deleted delivery {}", id);
    Ok(HttpResponse::NoContent().finish())
}
