// src/order_handlers.rs
//! Обработчики заказов

use actix_web::{web, HttpResponse};
use chrono::Utc;
use log::info;
use std::sync::Arc;
use validator::Validate;

use crate::error::{validate_order_status, ApiError, ApiResult};
use crate::handlers::ListResponse;
use crate::models::order::expected_issue_date;
use crate::models::{Client, CreateOrderRequest, Order, Prescription, UpdateOrderRequest};
use crate::AppState;

pub const ORDER_FIELD_LABELS: &[(&str, &str)] = &[
    ("id", "ID"),
    ("prescription_id", "ID рецепта"),
    ("client_id", "ID клиента"),
    ("order_number", "Номер заказа"),
    ("status", "Статус"),
    ("date_of_issue", "Дата выдачи"),
    ("start_date", "Дата начала"),
    ("expected_date_of_issue", "Ожидаемая дата выдачи"),
    ("cost", "Стоимость"),
];

pub async fn get_orders(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let orders = Order::get_all(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(orders, ORDER_FIELD_LABELS)))
}

pub async fn get_order_by_id(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let order = Order::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::order_not_found(id))?;
    Ok(HttpResponse::Ok().json(order))
}

/// Сроки считает сервер: ожидаемая дата выдачи выводится по цепочке
/// рецепт -> лекарство -> технология; разрыв цепочки даёт 404.
pub async fn create_order(
    app_state: web::Data<Arc<AppState>>,
    request: web::Json<CreateOrderRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;
    validate_order_status(&request.status)?;

    let pool = &app_state.db_pool;

    let prescription = Prescription::get_by_id(pool, request.prescription_id)
        .await?
        .ok_or_else(|| ApiError::prescription_not_found(request.prescription_id))?;
    Client::get_by_id(pool, request.client_id)
        .await?
        .ok_or_else(|| ApiError::client_not_found(request.client_id))?;

    let medicine = prescription
        .medicine(pool)
        .await?
        .ok_or_else(|| ApiError::medicine_not_found(prescription.medicine_id))?;
    let technology = match medicine.tech_prep_id {
        Some(tech_id) => medicine
            .technology(pool)
            .await?
            .ok_or_else(|| ApiError::technology_not_found(tech_id))?,
        None => {
            return Err(ApiError::NotFound(format!(
                "Medicine {} has no technology of preparation",
                prescription.medicine_id
            )))
        }
    };

    let start_date = Utc::now();
    let mut order = Order {
        id: None,
        prescription_id: request.prescription_id,
        client_id: request.client_id,
        order_number: request.order_number,
        status: request.status,
        date_of_issue: request.date_of_issue,
        start_date,
        expected_date_of_issue: expected_issue_date(start_date, technology.preparation_time),
        cost: request.cost,
    };
    order.save(pool).await?;

    info!("Created order {} ({:?})", order.order_number, order.id);
    Ok(HttpResponse::Created().json(order))
}

pub async fn update_order(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
    request: web::Json<UpdateOrderRequest>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let request = request.into_inner();
    request.validate()?;
    if let Some(status) = &request.status {
        validate_order_status(status)?;
    }
    if let Some(prescription_id) = request.prescription_id {
        Prescription::get_by_id(&app_state.db_pool, prescription_id)
            .await?
            .ok_or_else(|| ApiError::prescription_not_found(prescription_id))?;
    }
    if let Some(client_id) = request.client_id {
        Client::get_by_id(&app_state.db_pool, client_id)
            .await?
            .ok_or_else(|| ApiError::client_not_found(client_id))?;
    }

    let mut order = Order::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::order_not_found(id))?;
    request.apply_to(&mut order);
    order.save(&app_state.db_pool).await?;

    // Триггер мог проставить дату выдачи
    let order = Order::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::order_not_found(id))?;

    info!("Updated order {}", id);
    Ok(HttpResponse::Ok().json(order))
}

pub async fn delete_order(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    Order::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::order_not_found(id))?;
    Order::delete(&app_state.db_pool, id).await?;

    info!("Deleted order {}", id);
    Ok(HttpResponse::NoContent().finish())
}

pub async fn get_order_prescription(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let order = Order::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::order_not_found(id))?;
    let prescription = order
        .prescription(&app_state.db_pool)
        .await?
        .ok_or_else(|| ApiError::prescription_not_found(order.prescription_id))?;
    Ok(HttpResponse::Ok().json(prescription))
}

pub async fn get_order_client(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let order = Order::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::order_not_found(id))?;
    let client = order
        .client(&app_state.db_pool)
        .await?
        .ok_or_else(|| ApiError::client_not_found(order.client_id))?;
    Ok(HttpResponse::Ok().json(client))
}
