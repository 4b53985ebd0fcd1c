// src/medication_handlers.rs
//! Обработчики базового справочника медикаментов

use actix_web::{web, HttpResponse};
use log::info;
use std::sync::Arc;
use validator::Validate;

use crate::error::{validate_unit_of_measure, ApiError, ApiResult};
use crate::handlers::ListResponse;
use crate::models::{CreateMedicationRequest, Medication, UpdateMedicationRequest};
use crate::AppState;

const MEDICATION_FIELD_LABELS: &[(&str, &str)] = &[
    ("id", "ID"),
    ("name", "Название"),
    ("manufacturer", "Производитель"),
    ("critical_norm", "Критическая норма"),
    ("shelf_life", "Срок годности (дни)"),
    ("unit_of_measure", "Единица измерения"),
    ("units_per_package", "Единиц в упаковке"),
    ("price", "Цена"),
    ("storage_conditions", "Условия хранения"),
    ("current_amount", "Текущий запас"),
];

const DELIVERY_FIELD_LABELS: &[(&str, &str)] = &[
    ("id", "ID"),
    ("medication_id", "ID медикамента"),
    ("application_date", "Дата заявки"),
    ("delivery_date", "Дата поставки"),
    ("amount", "Количество"),
];

pub async fn get_medications(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let medications = Medication::get_all(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(medications, MEDICATION_FIELD_LABELS)))
}

pub async fn get_medication_by_id(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let medication = Medication::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::medication_not_found(id))?;
    Ok(HttpResponse::Ok().json(medication))
}

pub async fn create_medication(
    app_state: web::Data<Arc<AppState>>,
    request: web::Json<CreateMedicationRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;
    validate_unit_of_measure(&request.unit_of_measure)?;

    let mut medication = request.into_medication();
    medication.save(&app_state.db_pool).await?;

    info!("Created medication: {} ({:?})", medication.name, medication.id);
    Ok(HttpResponse::Created().json(medication))
}

pub async fn update_medication(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
    request: web::Json<UpdateMedicationRequest>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let request = request.into_inner();
    request.validate()?;
    if let Some(unit) = &request.unit_of_measure {
        validate_unit_of_measure(unit)?;
    }

    let mut medication = Medication::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::medication_not_found(id))?;
    request.apply_to(&mut medication);
    medication.save(&app_state.db_pool).await?;

    info!("Updated medication: {} ({})", medication.name, id);
    Ok(HttpResponse::Ok().json(medication))
}

pub async fn get_medication_deliveries(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let medication = Medication::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::medication_not_found(id))?;
    let deliveries = medication.deliveries(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(deliveries, DELIVERY_FIELD_LABELS)))
}
