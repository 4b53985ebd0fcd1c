// src/models/medication.rs - Base medication record (shared by ingredients and medicines)
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::models::delivery::StockDelivery;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Medication {
    pub id: Option<i32>,
    pub name: String,
    pub manufacturer: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub critical_norm: Decimal,
    /// Срок годности в днях
    pub shelf_life: i32,
    pub unit_of_measure: String,
    pub units_per_package: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub storage_conditions: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_amount: Decimal,
}

impl Medication {
    pub async fn get_by_id(pool: &PgPool, id: i32) -> Result<Option<Medication>, sqlx::Error> {
        sqlx::query_as::<_, Medication>(
            "SELECT id, name, manufacturer, critical_norm, shelf_life, unit_of_measure,
                    units_per_package, price, storage_conditions, current_amount
             FROM medication WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn get_all(pool: &PgPool) -> Result<Vec<Medication>, sqlx::Error> {
        sqlx::query_as::<_, Medication>(
            "SELECT id, name, manufacturer, critical_norm, shelf_life, unit_of_measure,
                    units_per_package, price, storage_conditions, current_amount
             FROM medication ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    /// INSERT с возвратом id, если записи ещё нет; иначе полный UPDATE.
    pub async fn save<'e, E>(&mut self, executor: E) -> Result<(), sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        match self.id {
            Some(id) => {
                sqlx::query(
                    "UPDATE medication
                     SET name = $1, manufacturer = $2, critical_norm = $3, shelf_life = $4,
                         unit_of_measure = $5, units_per_package = $6, price = $7,
                         storage_conditions = $8, current_amount = $9
                     WHERE id = $10",
                )
                .bind(&self.name)
                .bind(&self.manufacturer)
                .bind(self.critical_norm)
                .bind(self.shelf_life)
                .bind(&self.unit_of_measure)
                .bind(self.units_per_package)
                .bind(self.price)
                .bind(&self.storage_conditions)
                .bind(self.current_amount)
                .bind(id)
                .execute(executor)
                .await?;
            }
            None => {
                let (id,): (i32,) = sqlx::query_as(
                    "INSERT INTO medication (name, manufacturer, critical_norm, shelf_life,
                                             unit_of_measure, units_per_package, price,
                                             storage_conditions, current_amount)
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                     RETURNING id",
                )
                .bind(&self.name)
                .bind(&self.manufacturer)
                .bind(self.critical_norm)
                .bind(self.shelf_life)
                .bind(&self.unit_of_measure)
                .bind(self.units_per_package)
                .bind(self.price)
                .bind(&self.storage_conditions)
                .bind(self.current_amount)
                .fetch_one(executor)
                .await?;
                self.id = Some(id);
            }
        }
        Ok(())
    }

    pub async fn deliveries(&self, pool: &PgPool) -> Result<Vec<StockDelivery>, sqlx::Error> {
        match self.id {
            Some(id) => StockDelivery::get_by_medication(pool, id).await,
            None => Ok(Vec::new()),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMedicationRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub manufacturer: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub critical_norm: Decimal,
    #[validate(range(min = 1))]
    pub shelf_life: i32,
    pub unit_of_measure: String,
    #[validate(range(min = 1))]
    pub units_per_package: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub storage_conditions: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub current_amount: Option<Decimal>,
}

impl CreateMedicationRequest {
    pub fn into_medication(self) -> Medication {
        Medication {
            id: None,
            name: self.name,
            manufacturer: self.manufacturer,
            critical_norm: self.critical_norm,
            shelf_life: self.shelf_life,
            unit_of_measure: self.unit_of_measure,
            units_per_package: self.units_per_package,
            price: self.price,
            storage_conditions: self.storage_conditions,
            current_amount: self.current_amount.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMedicationRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub manufacturer: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub critical_norm: Option<Decimal>,
    #[validate(range(min = 1))]
    pub shelf_life: Option<i32>,
    pub unit_of_measure: Option<String>,
    #[validate(range(min = 1))]
    pub units_per_package: Option<i32>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub storage_conditions: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub current_amount: Option<Decimal>,
}

impl UpdateMedicationRequest {
    /// Накладывает только переданные поля.
    pub fn apply_to(self, medication: &mut Medication) {
        if let Some(name) = self.name {
            medication.name = name;
        }
        if let Some(manufacturer) = self.manufacturer {
            medication.manufacturer = manufacturer;
        }
        if let Some(critical_norm) = self.critical_norm {
            medication.critical_norm = critical_norm;
        }
        if let Some(shelf_life) = self.shelf_life {
            medication.shelf_life = shelf_life;
        }
        if let Some(unit) = self.unit_of_measure {
            medication.unit_of_measure = unit;
        }
        if let Some(units_per_package) = self.units_per_package {
            medication.units_per_package = units_per_package;
        }
        if let Some(price) = self.price {
            medication.price = price;
        }
        if let Some(storage_conditions) = self.storage_conditions {
            medication.storage_conditions = Some(storage_conditions);
        }
        if let Some(current_amount) = self.current_amount {
            medication.current_amount = current_amount;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn sample() -> Medication {
        Medication {
            id: Some(1),
            name: "Aspirin".to_string(),
            manufacturer: "Bayer".to_string(),
            critical_norm: d("10.0"),
            shelf_life: 730,
            unit_of_measure: "pc".to_string(),
            units_per_package: 20,
            price: d("3.50"),
            storage_conditions: Some("dry place".to_string()),
            current_amount: d("55.0"),
        }
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["name"], "Aspirin");
        // NUMERIC-поля сериализуются числами, не строками
        assert_eq!(value["price"], serde_json::json!(3.5));
        assert_eq!(value["current_amount"], serde_json::json!(55.0));
    }

    #[test]
    fn test_partial_update_merge() {
        let mut medication = sample();
        let update: UpdateMedicationRequest = serde_json::from_str(r#"{"price": 4.25}"#).unwrap();
        update.apply_to(&mut medication);
        assert_eq!(medication.price, d("4.25"));
        assert_eq!(medication.name, "Aspirin");
        assert_eq!(medication.shelf_life, 730);
    }

    #[test]
    fn test_create_request_defaults_amount_to_zero() {
        let request: CreateMedicationRequest = serde_json::from_str(
            r#"{"name": "Iodine", "manufacturer": "X", "critical_norm": 5,
                "shelf_life": 365, "unit_of_measure": "ml", "units_per_package": 1,
                "price": 1.2}"#,
        )
        .unwrap();
        let medication = request.into_medication();
        assert!(medication.id.is_none());
        assert_eq!(medication.current_amount, Decimal::ZERO);
    }
}
