// src/medicine_handlers.rs
//! Обработчики лекарств (подтип медикамента)

use actix_web::{web, HttpResponse};
use log::info;
use std::sync::Arc;
use validator::Validate;

use crate::error::{
    validate_application, validate_medicine_kind, validate_medicine_type,
    validate_unit_of_measure, ApiError, ApiResult,
};
use crate::handlers::ListResponse;
use crate::models::{CreateMedicineRequest, Medicine, Technology, UpdateMedicineRequest};
use crate::AppState;

pub const MEDICINE_FIELD_LABELS: &[(&str, &str)] = &[
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
    ("type", "Тип лекарства"),
    ("kind", "Форма выпуска"),
    ("application", "Способ применения"),
    ("tech_prep_id", "ID технологии приготовления"),
];

pub async fn get_medicines(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let medicines = Medicine::get_all(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(medicines, MEDICINE_FIELD_LABELS)))
}

pub async fn get_medicine_by_id(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let medicine = Medicine::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::medicine_not_found(id))?;
    Ok(HttpResponse::Ok().json(medicine))
}

pub async fn create_medicine(
    app_state: web::Data<Arc<AppState>>,
    request: web::Json<CreateMedicineRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;
    validate_unit_of_measure(&request.medication.unit_of_measure)?;
    validate_medicine_type(&request.type_)?;
    validate_medicine_kind(&request.kind)?;
    validate_application(&request.application)?;

    if let Some(tech_id) = request.tech_prep_id {
        Technology::get_by_id(&app_state.db_pool, tech_id)
            .await?
            .ok_or_else(|| ApiError::technology_not_found(tech_id))?;
    }

    let mut medicine = request.into_medicine();
    medicine.save(&app_state.db_pool).await?;

    info!(
        "Created medicine: {} ({:?})",
        medicine.medication.name, medicine.medication.id
    );
    Ok(HttpResponse::Created().json(medicine))
}

pub async fn update_medicine(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
    request: web::Json<UpdateMedicineRequest>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let request = request.into_inner();
    request.validate()?;
    if let Some(unit) = &request.medication.unit_of_measure {
        validate_unit_of_measure(unit)?;
    }
    if let Some(type_) = &request.type_ {
        validate_medicine_type(type_)?;
    }
    if let Some(kind) = &request.kind {
        validate_medicine_kind(kind)?;
    }
    if let Some(application) = &request.application {
        validate_application(application)?;
    }
    if let Some(tech_id) = request.tech_prep_id {
        Technology::get_by_id(&app_state.db_pool, tech_id)
            .await?
            .ok_or_else(|| ApiError::technology_not_found(tech_id))?;
    }

    let mut medicine = Medicine::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::medicine_not_found(id))?;
    request.apply_to(&mut medicine);
    medicine.save(&app_state.db_pool).await?;

    info!("Updated medicine: {} ({})", medicine.medication.name, id);
    Ok(HttpResponse::Ok().json(medicine))
}

pub async fn get_medicine_prescriptions(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let medicine = Medicine::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::medicine_not_found(id))?;
    let prescriptions = medicine.prescriptions(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(
        prescriptions,
        crate::prescription_handlers::PRESCRIPTION_FIELD_LABELS,
    )))
}
