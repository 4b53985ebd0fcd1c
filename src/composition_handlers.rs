// src/composition_handlers.rs
//! Обработчики рецептуры: связь лекарство-ингредиент

use actix_web::{web, HttpResponse};
use log::info;
use std::sync::Arc;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::handlers::ListResponse;
use crate::models::{Composition, Ingredient, Medicine, SaveCompositionRequest};
use crate::AppState;

pub const COMPOSITION_FIELD_LABELS: &[(&str, &str)] = &[
    ("medicine_id", "ID лекарства"),
    ("ingredient_id", "ID ингредиента"),
    ("amount", "Количество"),
];

pub async fn get_compositions(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let compositions = Composition::get_all(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(compositions, COMPOSITION_FIELD_LABELS)))
}

pub async fn get_compositions_by_medicine(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let medicine_id = path.into_inner();
    let medicine = Medicine::get_by_id(&app_state.db_pool, medicine_id)
        .await?
        .ok_or_else(|| ApiError::medicine_not_found(medicine_id))?;

    let compositions = medicine.compositions(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(compositions, COMPOSITION_FIELD_LABELS)))
}

/// POST ведёт себя как upsert по паре (medicine_id, ingredient_id).
pub async fn save_composition(
    app_state: web::Data<Arc<AppState>>,
    request: web::Json<SaveCompositionRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;

    Medicine::get_by_id(&app_state.db_pool, request.medicine_id)
        .await?
        .ok_or_else(|| ApiError::medicine_not_found(request.medicine_id))?;
    Ingredient::get_by_id(&app_state.db_pool, request.ingredient_id)
        .await?
        .ok_or_else(|| ApiError::ingredient_not_found(request.ingredient_id))?;

    let composition = request.into_composition();
    composition.save(&app_state.db_pool).await?;

    info!(
        "Saved composition: medicine {} / ingredient {}",
        composition.medicine_id, composition.ingredient_id
    );
    Ok(HttpResponse::Created().json(composition))
}
