// src/prescription_handlers.rs
//! Обработчики рецептов

use actix_web::{web, HttpResponse};
use log::info;
use std::sync::Arc;
use validator::Validate;

use crate::error::{validate_application, ApiError, ApiResult};
use crate::handlers::ListResponse;
use crate::models::{
    Client, CreatePrescriptionRequest, Medicine, Prescription, UpdatePrescriptionRequest,
};
use crate::AppState;

pub const PRESCRIPTION_FIELD_LABELS: &[(&str, &str)] = &[
    ("id", "ID"),
    ("client_id", "ID клиента"),
    ("medicine_id", "ID лекарства"),
    ("prescription_number", "Номер рецепта"),
    ("doctor_surname", "Фамилия врача"),
    ("doctor_name", "Имя врача"),
    ("doctor_patronymic", "Отчество врача"),
    ("signature", "Подпись"),
    ("stamp", "Печать"),
    ("age", "Возраст"),
    ("diagnosis", "Диагноз"),
    ("amount", "Количество"),
    ("application", "Способ применения"),
];

pub async fn get_prescriptions(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let prescriptions = Prescription::get_all(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(prescriptions, PRESCRIPTION_FIELD_LABELS)))
}

pub async fn get_prescription_by_id(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let prescription = Prescription::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::prescription_not_found(id))?;
    Ok(HttpResponse::Ok().json(prescription))
}

/// Клиент переиспользуется через точный поиск, иначе создаётся новый.
pub async fn create_prescription(
    app_state: web::Data<Arc<AppState>>,
    request: web::Json<CreatePrescriptionRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;
    validate_application(&request.application)?;

    Medicine::get_by_id(&app_state.db_pool, request.medicine_id)
        .await?
        .ok_or_else(|| ApiError::medicine_not_found(request.medicine_id))?;

    let existing = Client::search(
        &app_state.db_pool,
        &request.surname,
        &request.name,
        request.patronymic.as_deref(),
        &request.phone_number,
    )
    .await?;

    let client_id = match existing {
        Some(client) => client.id.ok_or_else(|| {
            ApiError::InternalServerError("client row without id".to_string())
        })?,
        None => {
            let mut client = Client {
                id: None,
                surname: request.surname.clone(),
                name: request.name.clone(),
                patronymic: request.patronymic.clone(),
                phone_number: request.phone_number.clone(),
            };
            client.save(&app_state.db_pool).await?;
            client.id.ok_or_else(|| {
                ApiError::InternalServerError("client row without id".to_string())
            })?
        }
    };

    let mut prescription = Prescription {
        id: None,
        client_id,
        medicine_id: request.medicine_id,
        prescription_number: request.prescription_number,
        doctor_surname: request.doctor_surname,
        doctor_name: request.doctor_name,
        doctor_patronymic: request.doctor_patronymic,
        signature: request.signature,
        stamp: request.stamp,
        age: request.age,
        diagnosis: request.diagnosis,
        amount: request.amount,
        application: request.application,
    };
    prescription.save(&app_state.db_pool).await?;

    info!(
        "Created prescription {} for client {} ({:?})",
        prescription.prescription_number, client_id, prescription.id
    );
    Ok(HttpResponse::Created().json(prescription))
}

pub async fn update_prescription(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
    request: web::Json<UpdatePrescriptionRequest>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let request = request.into_inner();
    request.validate()?;
    if let Some(application) = &request.application {
        validate_application(application)?;
    }
    if let Some(client_id) = request.client_id {
        Client::get_by_id(&app_state.db_pool, client_id)
            .await?
            .ok_or_else(|| ApiError::client_not_found(client_id))?;
    }
    if let Some(medicine_id) = request.medicine_id {
        Medicine::get_by_id(&app_state.db_pool, medicine_id)
            .await?
            .ok_or_else(|| ApiError::medicine_not_found(medicine_id))?;
    }

    let mut prescription = Prescription::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::prescription_not_found(id))?;
    request.apply_to(&mut prescription);
    prescription.save(&app_state.db_pool).await?;

    info!("Updated prescription {}", id);
    Ok(HttpResponse::Ok().json(prescription))
}

pub async fn delete_prescription(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    Prescription::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::prescription_not_found(id))?;
    Prescription::delete(&app_state.db_pool, id).await?;

    info!("Deleted prescription {}", id);
    Ok(HttpResponse::NoContent().finish())
}

pub async fn get_prescription_orders(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let prescription = Prescription::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::prescription_not_found(id))?;
    let orders = prescription.orders(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(
        orders,
        crate::order_handlers::ORDER_FIELD_LABELS,
    )))
}
