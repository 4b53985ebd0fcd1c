// src/ingredient_handlers.rs
//! Обработчики ингредиентов (подтип медикамента)

use actix_web::{web, HttpResponse};
use log::info;
use std::sync::Arc;
use validator::Validate;

use crate::error::{validate_unit_of_measure, ApiError, ApiResult};
use crate::handlers::ListResponse;
use crate::models::{CreateIngredientRequest, Ingredient, UpdateIngredientRequest};
use crate::AppState;

const INGREDIENT_FIELD_LABELS: &[(&str, &str)] = &[
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
    ("type", "Тип ингредиента"),
    ("caution", "Предостережение"),
    ("incompatibility", "Несовместимость"),
];

pub async fn get_ingredients(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let ingredients = Ingredient::get_all(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(ingredients, INGREDIENT_FIELD_LABELS)))
}

pub async fn get_ingredient_by_id(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let ingredient = Ingredient::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::ingredient_not_found(id))?;
    Ok(HttpResponse::Ok().json(ingredient))
}

pub async fn create_ingredient(
    app_state: web::Data<Arc<AppState>>,
    request: web::Json<CreateIngredientRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;
    validate_unit_of_measure(&request.medication.unit_of_measure)?;

    let mut ingredient = request.into_ingredient();
    ingredient.save(&app_state.db_pool).await?;

    info!(
        "Created ingredient: {} ({:?})",
        ingredient.medication.name, ingredient.medication.id
    );
    Ok(HttpResponse::Created().json(ingredient))
}

pub async fn update_ingredient(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
    request: web::Json<UpdateIngredientRequest>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let request = request.into_inner();
    request.validate()?;
    if let Some(unit) = &request.medication.unit_of_measure {
        validate_unit_of_measure(unit)?;
    }

    let mut ingredient = Ingredient::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::ingredient_not_found(id))?;
    request.apply_to(&mut ingredient);
    ingredient.save(&app_state.db_pool).await?;

    info!("Updated ingredient: {} ({})", ingredient.medication.name, id);
    Ok(HttpResponse::Ok().json(ingredient))
}

pub async fn get_ingredient_medicines(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let ingredient = Ingredient::get_by_id(&app_state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::ingredient_not_found(id))?;
    let medicines = ingredient.used_in_medicines(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(
        medicines,
        crate::medicine_handlers::MEDICINE_FIELD_LABELS,
    )))
}
