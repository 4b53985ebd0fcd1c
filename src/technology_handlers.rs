// src/technology_handlers.rs
//! Обработчики технологий приготовления

use actix_web::{web, HttpResponse};
use log::info;
use std::sync::Arc;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::handlers::ListResponse;
use crate::models::{CreateTechnologyRequest, Technology, UpdateTechnologyRequest};
use crate::AppState;

const TECHNOLOGY_FIELD_LABELS: &[(&str, &str)] = &[
    ("id", "ID"),
    ("description", "Описание"),
    ("preparation_time", "Время приготовления (дни)"),
];

pub async fn get_technologies(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let technologies = Technology::get_all(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(technologies, TECHNOLOGY_FIELD_LABELS)))
}

pub async fn get_technology_by_id(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let technology = Technology::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::technology_not_found(id))?;
    Ok(HttpResponse::Ok().json(technology))
}

pub async fn create_technology(
    app_state: web::Data<Arc<AppState>>,
    request: web::Json<CreateTechnologyRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;

    let mut technology = Technology {
        id: None,
        description: request.description,
        preparation_time: request.preparation_time,
    };
    technology.save(&app_state.db_pool).await?;

    info!("Created technology of preparation ({:?})", technology.id);
    Ok(HttpResponse::Created().json(technology))
}

pub async fn update_technology(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
    request: web::Json<UpdateTechnologyRequest>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let request = request.into_inner();
    request.validate()?;

    let mut technology = Technology::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::technology_not_found(id))?;
    request.apply_to(&mut technology);
    technology.save(&app_state.db_pool).await?;

    info!("Updated technology of preparation ({})", id);
    Ok(HttpResponse::Ok().json(technology))
}

pub async fn get_technology_medicines(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let technology = Technology::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::technology_not_found(id))?;
    let medicines = technology.medicines(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(
        medicines,
        crate::medicine_handlers::MEDICINE_FIELD_LABELS,
    )))
}
