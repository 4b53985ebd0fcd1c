// src/client_handlers.rs
//! Обработчики клиентов

use actix_web::{web, HttpResponse};
use log::info;
use std::sync::Arc;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::handlers::ListResponse;
use crate::models::{Client, CreateClientRequest, SearchClientQuery, UpdateClientRequest};
use crate::AppState;

const CLIENT_FIELD_LABELS: &[(&str, &str)] = &[
    ("id", "ID"),
    ("surname", "Фамилия"),
    ("name", "Имя"),
    ("patronymic", "Отчество"),
    ("phone_number", "Телефон"),
];

pub async fn get_clients(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let clients = Client::get_all(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(clients, CLIENT_FIELD_LABELS)))
}

pub async fn get_client_by_id(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let client = Client::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::client_not_found(id))?;
    Ok(HttpResponse::Ok().json(client))
}

pub async fn create_client(
    app_state: web::Data<Arc<AppState>>,
    request: web::Json<CreateClientRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;

    let mut client = request.into_client();
    client.save(&app_state.db_pool).await?;

    info!("Created client: {} {} ({:?})", client.surname, client.name, client.id);
    Ok(HttpResponse::Created().json(client))
}

pub async fn update_client(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
    request: web::Json<UpdateClientRequest>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let request = request.into_inner();
    request.validate()?;

    let mut client = Client::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::client_not_found(id))?;
    request.apply_to(&mut client);
    client.save(&app_state.db_pool).await?;

    info!("Updated client: {} {} ({})", client.surname, client.name, id);
    Ok(HttpResponse::Ok().json(client))
}

pub async fn delete_client(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    Client::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::client_not_found(id))?;
    Client::delete(&app_state.db_pool, id).await?;

    info!("Deleted client: {}", id);
    Ok(HttpResponse::NoContent().finish())
}

pub async fn get_client_orders(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let client = Client::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::client_not_found(id))?;
    let orders = client.orders(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(
        orders,
        crate::order_handlers::ORDER_FIELD_LABELS,
    )))
}

/// Поиск точного совпадения; отсутствующий клиент создаётся.
pub async fn search_client(
    app_state: web::Data<Arc<AppState>>,
    query: web::Query<SearchClientQuery>,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();
    query.validate()?;

    let found = Client::search(
        &app_state.db_pool,
        &query.surname,
        &query.name,
        query.patronymic.as_deref(),
        &query.phone_number,
    )
    .await?;

    match found {
        Some(client) => Ok(HttpResponse::Ok().json(client)),
        None => {
            let mut client = Client {
                id: None,
                surname: query.surname,
                name: query.name,
                patronymic: query.patronymic,
                phone_number: query.phone_number,
            };
            client.save(&app_state.db_pool).await?;
            info!(
                "Search created new client: {} {} ({:?})",
                client.surname, client.name, client.id
            );
            Ok(HttpResponse::Created().json(client))
        }
    }
}
