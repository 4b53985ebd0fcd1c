// src/models/reports.rs - Read-only projections over reporting views and SQL functions.
// Никакой записи: только связывание параметров и маппинг строк.
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ClientWithUnclaimedOrder {
    pub client_id: i32,
    pub surname: String,
    pub name: String,
    pub patronymic: Option<String>,
    pub phone_number: String,
    pub order_number: i32,
    pub expected_date_of_issue: DateTime<Utc>,
}

impl ClientWithUnclaimedOrder {
    pub async fn get_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT client_id, surname, name, patronymic, phone_number, order_number,
                    expected_date_of_issue
             FROM clients_with_unclaimed_orders",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT count_unclaimed_orders_clients()")
            .fetch_one(pool)
            .await
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ClientWaitingForDelivery {
    pub client_id: i32,
    pub surname: String,
    pub name: String,
    pub patronymic: Option<String>,
    pub phone_number: String,
    pub order_number: i32,
    pub expected_date_of_issue: DateTime<Utc>,
    pub medication_name: String,
    pub medication_type: String,
}

impl ClientWaitingForDelivery {
    pub async fn get_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT client_id, surname, name, patronymic, phone_number, order_number,
                    expected_date_of_issue, medication_name, medication_type
             FROM clients_waiting_for_delivery",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT count_clients_waiting_for_delivery()")
            .fetch_one(pool)
            .await
    }

    pub async fn count_by_type(pool: &PgPool, medication_type: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT count_clients_waiting_for_delivery_by_type($1)")
            .bind(medication_type)
            .fetch_one(pool)
            .await
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MedicineDetails {
    pub medicine_id: i32,
    pub medicine_name: String,
    pub medicine_type: String,
    pub preparation_description: Option<String>,
    pub component_name: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub component_amount: Option<Decimal>,
    pub component_unit_of_measure: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub component_price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub current_stock_amount: Option<Decimal>,
}

impl MedicineDetails {
    pub async fn get_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT medicine_id, medicine_name, medicine_type, preparation_description,
                    component_name, component_amount, component_unit_of_measure,
                    component_price, current_stock_amount
             FROM medicine_details_view",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn get_by_name(pool: &PgPool, name: &str) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM get_single_medicine_details($1)")
            .bind(name)
            .fetch_all(pool)
            .await
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TopMedication {
    pub medication_id: i32,
    pub medication_name: String,
    pub order_count: i64,
}

impl TopMedication {
    pub async fn get_top_10(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM get_top_10_medications()")
            .fetch_all(pool)
            .await
    }

    pub async fn get_top_10_by_type(
        pool: &PgPool,
        medicine_type: &str,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM get_top_10_medications_by_type($1)")
            .bind(medicine_type)
            .fetch_all(pool)
            .await
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct IngredientUsage {
    pub ingredient_name: String,
    pub unit_of_measure: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount_used: Decimal,
}

impl IngredientUsage {
    pub async fn get(
        pool: &PgPool,
        ingredient_name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM get_ingredient_usage_volume($1, $2, $3)")
            .bind(ingredient_name)
            .bind(start_date)
            .bind(end_date)
            .fetch_all(pool)
            .await
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ClientByMedication {
    pub client_id: i32,
    pub surname: String,
    pub name: String,
    pub patronymic: Option<String>,
    pub phone_number: String,
    pub order_number: i32,
    pub expected_date_of_issue: DateTime<Utc>,
    pub medication_name: String,
    pub medication_type: String,
}

impl ClientByMedication {
    pub async fn get_by_name_and_period(
        pool: &PgPool,
        medication_name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM get_clients_by_medication_name_and_period($1, $2, $3)",
        )
        .bind(medication_name)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(pool)
        .await
    }

    pub async fn get_by_type_and_period(
        pool: &PgPool,
        medication_type: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM get_clients_by_medication_type_and_period($1, $2, $3)",
        )
        .bind(medication_type)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(pool)
        .await
    }

    pub async fn count_by_name_and_period(
        pool: &PgPool,
        medication_name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT count_clients_by_medication_name_and_period($1, $2, $3)")
            .bind(medication_name)
            .bind(start_date)
            .bind(end_date)
            .fetch_one(pool)
            .await
    }

    pub async fn count_by_type_and_period(
        pool: &PgPool,
        medication_type: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT count_clients_by_medication_type_and_period($1, $2, $3)")
            .bind(medication_type)
            .bind(start_date)
            .bind(end_date)
            .fetch_one(pool)
            .await
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MedicationAtCriticalLevel {
    pub medication_id: i32,
    pub medication_name: String,
    pub medication_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub critical_norm: Decimal,
}

impl MedicationAtCriticalLevel {
    pub async fn get_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM get_medications_at_critical_level()")
            .fetch_all(pool)
            .await
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LowStockMedication {
    pub medication_id: i32,
    pub medication_name: String,
    pub medication_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub critical_norm: Decimal,
}

impl LowStockMedication {
    pub async fn get_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM get_low_stock_medications()")
            .fetch_all(pool)
            .await
    }

    pub async fn get_by_type(pool: &PgPool, medication_type: &str) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM get_low_stock_medications_by_type($1)")
            .bind(medication_type)
            .fetch_all(pool)
            .await
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProducingOrder {
    pub order_id: i32,
    pub prescription_id: i32,
    pub client_id: i32,
    pub order_number: i32,
    pub expected_date_of_issue: DateTime<Utc>,
    pub status: String,
    pub date_of_issue: Option<NaiveDate>,
    /// Дни приготовления; NULL, если у лекарства нет технологии
    pub production_time: Option<i32>,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
}

impl ProducingOrder {
    pub async fn get_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM get_producing_orders()")
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT count_producing_orders()")
            .fetch_one(pool)
            .await
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct IngredientForProducingOrders {
    pub ingredient_id: i32,
    pub ingredient_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_required_amount: Decimal,
    pub unit_of_measure: String,
}

impl IngredientForProducingOrders {
    pub async fn get_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM get_ingredients_for_producing_orders()")
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT count_ingredients_for_producing_orders()")
            .fetch_one(pool)
            .await
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PreparationTechnology {
    pub tech_id: i32,
    pub tech_description: String,
    pub medicine_name: String,
    pub medicine_type: String,
}

impl PreparationTechnology {
    pub async fn get(
        pool: &PgPool,
        medicine_type: Option<&str>,
        medicine_names: Option<&[String]>,
        from_producing_orders: bool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM get_technology_of_preparation($1, $2, $3)")
            .bind(medicine_type)
            .bind(medicine_names)
            .bind(from_producing_orders)
            .fetch_all(pool)
            .await
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MedicinePriceComponent {
    pub medicine_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub medicine_price: Decimal,
    pub component_name: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub required_component_amount: Option<Decimal>,
    pub component_unit_of_measure: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub component_price: Option<Decimal>,
}

impl MedicinePriceComponent {
    pub async fn get_by_name(pool: &PgPool, name: &str) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM get_medicine_price_and_components_info($1)")
            .bind(name)
            .fetch_all(pool)
            .await
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MostFrequentClient {
    pub client_id: i32,
    pub client_surname: String,
    pub client_name: String,
    pub client_patronymic: Option<String>,
    pub total_orders: i64,
}

impl MostFrequentClient {
    pub async fn get(
        pool: &PgPool,
        medicine_type: Option<&str>,
        medicine_names: Option<&[String]>,
        limit: i32,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM get_most_frequent_clients($1, $2, $3)")
            .bind(medicine_type)
            .bind(medicine_names)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
