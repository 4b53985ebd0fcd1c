// src/query_handlers.rs
//! Отчётные ручки /queries/* поверх представлений и SQL-функций

use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{validate_medicine_type, ApiError, ApiResult};
use crate::handlers::{CountResponse, ListResponse};
use crate::models::reports::{
    ClientByMedication, ClientWaitingForDelivery, ClientWithUnclaimedOrder,
    IngredientForProducingOrders, IngredientUsage, LowStockMedication,
    MedicationAtCriticalLevel, MedicineDetails, MedicinePriceComponent, MostFrequentClient,
    PreparationTechnology, ProducingOrder, TopMedication,
};
use crate::AppState;

const CLIENT_ORDER_FIELD_LABELS: &[(&str, &str)] = &[
    ("client_id", "ID клиента"),
    ("surname", "Фамилия"),
    ("name", "Имя"),
    ("patronymic", "Отчество"),
    ("phone_number", "Телефон"),
    ("order_number", "Номер заказа"),
    ("expected_date_of_issue", "Ожидаемая дата выдачи"),
];

const CLIENT_MEDICATION_FIELD_LABELS: &[(&str, &str)] = &[
    ("client_id", "ID клиента"),
    ("surname", "Фамилия"),
    ("name", "Имя"),
    ("patronymic", "Отчество"),
    ("phone_number", "Телефон"),
    ("order_number", "Номер заказа"),
    ("expected_date_of_issue", "Ожидаемая дата выдачи"),
    ("medication_name", "Название медикамента"),
    ("medication_type", "Тип медикамента"),
];

const MEDICINE_DETAILS_FIELD_LABELS: &[(&str, &str)] = &[
    ("medicine_id", "ID лекарства"),
    ("medicine_name", "Название лекарства"),
    ("medicine_type", "Тип лекарства"),
    ("preparation_description", "Технология приготовления"),
    ("component_name", "Компонент"),
    ("component_amount", "Количество компонента"),
    ("component_unit_of_measure", "Единица измерения"),
    ("component_price", "Цена компонента"),
    ("current_stock_amount", "Запас компонента"),
];

const TOP_MEDICATION_FIELD_LABELS: &[(&str, &str)] = &[
    ("medication_id", "ID медикамента"),
    ("medication_name", "Название"),
    ("order_count", "Число заказов"),
];

const INGREDIENT_USAGE_FIELD_LABELS: &[(&str, &str)] = &[
    ("ingredient_name", "Ингредиент"),
    ("unit_of_measure", "Единица измерения"),
    ("total_amount_used", "Израсходовано"),
];

const STOCK_LEVEL_FIELD_LABELS: &[(&str, &str)] = &[
    ("medication_id", "ID медикамента"),
    ("medication_name", "Название"),
    ("medication_type", "Тип"),
    ("current_amount", "Текущий запас"),
    ("critical_norm", "Критическая норма"),
];

const PRODUCING_ORDER_FIELD_LABELS: &[(&str, &str)] = &[
    ("order_id", "ID заказа"),
    ("prescription_id", "ID рецепта"),
    ("client_id", "ID клиента"),
    ("order_number", "Номер заказа"),
    ("expected_date_of_issue", "Ожидаемая дата выдачи"),
    ("status", "Статус"),
    ("date_of_issue", "Дата выдачи"),
    ("production_time", "Время приготовления (дни)"),
    ("cost", "Стоимость"),
];

const PRODUCING_INGREDIENT_FIELD_LABELS: &[(&str, &str)] = &[
    ("ingredient_id", "ID ингредиента"),
    ("ingredient_name", "Ингредиент"),
    ("total_required_amount", "Требуемое количество"),
    ("unit_of_measure", "Единица измерения"),
];

const TECHNOLOGY_FIELD_LABELS: &[(&str, &str)] = &[
    ("tech_id", "ID технологии"),
    ("tech_description", "Описание"),
    ("medicine_name", "Лекарство"),
    ("medicine_type", "Тип лекарства"),
];

const PRICE_COMPONENT_FIELD_LABELS: &[(&str, &str)] = &[
    ("medicine_name", "Лекарство"),
    ("medicine_price", "Цена лекарства"),
    ("component_name", "Компонент"),
    ("required_component_amount", "Количество компонента"),
    ("component_unit_of_measure", "Единица измерения"),
    ("component_price", "Цена компонента"),
];

const FREQUENT_CLIENT_FIELD_LABELS: &[(&str, &str)] = &[
    ("client_id", "ID клиента"),
    ("client_surname", "Фамилия"),
    ("client_name", "Имя"),
    ("client_patronymic", "Отчество"),
    ("total_orders", "Всего заказов"),
];

#[derive(Debug, Deserialize)]
pub struct TypeQuery {
    pub medication_type: String,
}

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub medicine_name: String,
}

#[derive(Debug, Deserialize)]
pub struct IngredientUsageQuery {
    pub ingredient_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct MedicationNamePeriodQuery {
    pub medication_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct MedicationTypePeriodQuery {
    pub medication_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct TechnologyQuery {
    pub medicine_type: Option<String>,
    /// Несколько названий через запятую
    pub medicine_names: Option<String>,
    #[serde(default)]
    pub from_producing_orders: bool,
}

#[derive(Debug, Deserialize)]
pub struct FrequentClientsQuery {
    pub medicine_type: Option<String>,
    pub medicine_names: Option<String>,
    pub limit: Option<i32>,
}

fn split_names(names: &Option<String>) -> Option<Vec<String>> {
    names.as_ref().map(|raw| {
        raw.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
}

// ---- Невостребованные заказы ----

pub async fn get_clients_with_unclaimed_orders(
    app_state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let rows = ClientWithUnclaimedOrder::get_all(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(rows, CLIENT_ORDER_FIELD_LABELS)))
}

pub async fn count_clients_with_unclaimed_orders(
    app_state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let count = ClientWithUnclaimedOrder::count(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(CountResponse { count }))
}

// ---- Ожидающие поставку ----

pub async fn get_clients_waiting_for_delivery(
    app_state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let rows = ClientWaitingForDelivery::get_all(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(rows, CLIENT_MEDICATION_FIELD_LABELS)))
}

pub async fn count_clients_waiting_for_delivery(
    app_state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let count = ClientWaitingForDelivery::count(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(CountResponse { count }))
}

pub async fn count_clients_waiting_for_delivery_by_type(
    app_state: web::Data<Arc<AppState>>,
    query: web::Query<TypeQuery>,
) -> ApiResult<HttpResponse> {
    validate_medicine_type(&query.medication_type)?;
    let count =
        ClientWaitingForDelivery::count_by_type(&app_state.db_pool, &query.medication_type)
            .await?;
    Ok(HttpResponse::Ok().json(CountResponse { count }))
}

// ---- Детали лекарств ----

pub async fn get_medicine_details(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let rows = MedicineDetails::get_all(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(rows, MEDICINE_DETAILS_FIELD_LABELS)))
}

pub async fn get_medicine_details_by_name(
    app_state: web::Data<Arc<AppState>>,
    query: web::Query<NameQuery>,
) -> ApiResult<HttpResponse> {
    let rows = MedicineDetails::get_by_name(&app_state.db_pool, &query.medicine_name).await?;
    if rows.is_empty() {
        return Err(ApiError::medicine_name_not_found(&query.medicine_name));
    }
    Ok(HttpResponse::Ok().json(ListResponse::new(rows, MEDICINE_DETAILS_FIELD_LABELS)))
}

// ---- Популярные медикаменты ----

pub async fn get_top_medications(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let rows = TopMedication::get_top_10(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(rows, TOP_MEDICATION_FIELD_LABELS)))
}

pub async fn get_top_medications_by_type(
    app_state: web::Data<Arc<AppState>>,
    query: web::Query<TypeQuery>,
) -> ApiResult<HttpResponse> {
    validate_medicine_type(&query.medication_type)?;
    let rows =
        TopMedication::get_top_10_by_type(&app_state.db_pool, &query.medication_type).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(rows, TOP_MEDICATION_FIELD_LABELS)))
}

// ---- Расход ингредиента за период ----

pub async fn get_ingredient_usage(
    app_state: web::Data<Arc<AppState>>,
    query: web::Query<IngredientUsageQuery>,
) -> ApiResult<HttpResponse> {
    let rows = IngredientUsage::get(
        &app_state.db_pool,
        &query.ingredient_name,
        query.start_date,
        query.end_date,
    )
    .await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(rows, INGREDIENT_USAGE_FIELD_LABELS)))
}

// ---- Клиенты по медикаменту и периоду ----

pub async fn get_clients_by_medication_name(
    app_state: web::Data<Arc<AppState>>,
    query: web::Query<MedicationNamePeriodQuery>,
) -> ApiResult<HttpResponse> {
    let rows = ClientByMedication::get_by_name_and_period(
        &app_state.db_pool,
        &query.medication_name,
        query.start_date,
        query.end_date,
    )
    .await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(rows, CLIENT_MEDICATION_FIELD_LABELS)))
}

pub async fn get_clients_by_medication_type(
    app_state: web::Data<Arc<AppState>>,
    query: web::Query<MedicationTypePeriodQuery>,
) -> ApiResult<HttpResponse> {
    validate_medicine_type(&query.medication_type)?;
    let rows = ClientByMedication::get_by_type_and_period(
        &app_state.db_pool,
        &query.medication_type,
        query.start_date,
        query.end_date,
    )
    .await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(rows, CLIENT_MEDICATION_FIELD_LABELS)))
}

pub async fn count_clients_by_medication_name(
    app_state: web::Data<Arc<AppState>>,
    query: web::Query<MedicationNamePeriodQuery>,
) -> ApiResult<HttpResponse> {
    let count = ClientByMedication::count_by_name_and_period(
        &app_state.db_pool,
        &query.medication_name,
        query.start_date,
        query.end_date,
    )
    .await?;
    Ok(HttpResponse::Ok().json(CountResponse { count }))
}

pub async fn count_clients_by_medication_type(
    app_state: web::Data<Arc<AppState>>,
    query: web::Query<MedicationTypePeriodQuery>,
) -> ApiResult<HttpResponse> {
    validate_medicine_type(&query.medication_type)?;
    let count = ClientByMedication::count_by_type_and_period(
        &app_state.db_pool,
        &query.medication_type,
        query.start_date,
        query.end_date,
    )
    .await?;
    Ok(HttpResponse::Ok().json(CountResponse { count }))
}

// ---- Складские уровни ----

pub async fn get_medications_at_critical_level(
    app_state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let rows = MedicationAtCriticalLevel::get_all(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(rows, STOCK_LEVEL_FIELD_LABELS)))
}

pub async fn get_low_stock_medications(
    app_state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let rows = LowStockMedication::get_all(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(rows, STOCK_LEVEL_FIELD_LABELS)))
}

// Здесь тип может быть и 'ingredient', поэтому без проверки по enum
pub async fn get_low_stock_medications_by_type(
    app_state: web::Data<Arc<AppState>>,
    query: web::Query<TypeQuery>,
) -> ApiResult<HttpResponse> {
    let rows =
        LowStockMedication::get_by_type(&app_state.db_pool, &query.medication_type).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(rows, STOCK_LEVEL_FIELD_LABELS)))
}

// ---- Изготавливаемые заказы ----

pub async fn get_producing_orders(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let rows = ProducingOrder::get_all(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(rows, PRODUCING_ORDER_FIELD_LABELS)))
}

pub async fn count_producing_orders(
    app_state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let count = ProducingOrder::count(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(CountResponse { count }))
}

pub async fn get_ingredients_for_producing_orders(
    app_state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let rows = IngredientForProducingOrders::get_all(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(rows, PRODUCING_INGREDIENT_FIELD_LABELS)))
}

pub async fn count_ingredients_for_producing_orders(
    app_state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let count = IngredientForProducingOrders::count(&app_state.db_pool).await?;
    Ok(HttpResponse::Ok().json(CountResponse { count }))
}

// ---- Технологии приготовления ----

pub async fn get_preparation_technologies(
    app_state: web::Data<Arc<AppState>>,
    query: web::Query<TechnologyQuery>,
) -> ApiResult<HttpResponse> {
    if let Some(medicine_type) = &query.medicine_type {
        validate_medicine_type(medicine_type)?;
    }
    let names = split_names(&query.medicine_names);
    let rows = PreparationTechnology::get(
        &app_state.db_pool,
        query.medicine_type.as_deref(),
        names.as_deref(),
        query.from_producing_orders,
    )
    .await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(rows, TECHNOLOGY_FIELD_LABELS)))
}

// ---- Цена лекарства и компоненты ----

pub async fn get_medicine_price_and_components(
    app_state: web::Data<Arc<AppState>>,
    query: web::Query<NameQuery>,
) -> ApiResult<HttpResponse> {
    let rows =
        MedicinePriceComponent::get_by_name(&app_state.db_pool, &query.medicine_name).await?;
    if rows.is_empty() {
        return Err(ApiError::medicine_name_not_found(&query.medicine_name));
    }
    Ok(HttpResponse::Ok().json(ListResponse::new(rows, PRICE_COMPONENT_FIELD_LABELS)))
}

// ---- Самые частые клиенты ----

pub async fn get_most_frequent_clients(
    app_state: web::Data<Arc<AppState>>,
    query: web::Query<FrequentClientsQuery>,
) -> ApiResult<HttpResponse> {
    if let Some(medicine_type) = &query.medicine_type {
        validate_medicine_type(medicine_type)?;
    }
    let limit = query.limit.unwrap_or(10);
    if limit < 1 {
        return Err(ApiError::BadRequest(format!("Invalid limit {}", limit)));
    }
    let names = split_names(&query.medicine_names);
    let rows = MostFrequentClient::get(
        &app_state.db_pool,
        query.medicine_type.as_deref(),
        names.as_deref(),
        limit,
    )
    .await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(rows, FREQUENT_CLIENT_FIELD_LABELS)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_names() {
        assert_eq!(split_names(&None), None);
        assert_eq!(
            split_names(&Some("Aspirin, Calming mixture".to_string())),
            Some(vec!["Aspirin".to_string(), "Calming mixture".to_string()])
        );
        assert_eq!(split_names(&Some(" , ".to_string())), Some(vec![]));
    }
}
