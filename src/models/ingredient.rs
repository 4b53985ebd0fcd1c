// src/models/ingredient.rs - Ingredient: medication core + ingredient-specific row
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::models::medication::{CreateMedicationRequest, Medication, UpdateMedicationRequest};
use crate::models::medicine::Medicine;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ingredient {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub medication: Medication,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub type_: String,
    pub caution: Option<String>,
    pub incompatibility: Option<String>,
}

impl Ingredient {
    pub async fn get_by_id(pool: &PgPool, id: i32) -> Result<Option<Ingredient>, sqlx::Error> {
        sqlx::query_as::<_, Ingredient>(
            "SELECT m.id, m.name, m.manufacturer, m.critical_norm, m.shelf_life,
                    m.unit_of_measure, m.units_per_package, m.price, m.storage_conditions,
                    m.current_amount, i.type, i.caution, i.incompatibility
             FROM ingredient i
             JOIN medication m ON m.id = i.id
             WHERE i.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn get_all(pool: &PgPool) -> Result<Vec<Ingredient>, sqlx::Error> {
        sqlx::query_as::<_, Ingredient>(
            "SELECT m.id, m.name, m.manufacturer, m.critical_norm, m.shelf_life,
                    m.unit_of_measure, m.units_per_package, m.price, m.storage_conditions,
                    m.current_amount, i.type, i.caution, i.incompatibility
             FROM ingredient i
             JOIN medication m ON m.id = i.id
             ORDER BY m.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Базовая запись и строка подтипа пишутся в одной транзакции;
    /// повторное сохранение того же id идемпотентно.
    pub async fn save(&mut self, pool: &PgPool) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        self.medication.save(&mut *tx).await?;
        let id = self.medication.id.ok_or(sqlx::Error::RowNotFound)?;

        sqlx::query(
            "INSERT INTO ingredient (id, type, caution, incompatibility)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO UPDATE
             SET type = EXCLUDED.type,
                 caution = EXCLUDED.caution,
                 incompatibility = EXCLUDED.incompatibility",
        )
        .bind(id)
        .bind(&self.type_)
        .bind(&self.caution)
        .bind(&self.incompatibility)
        .execute(&mut *tx)
        .await?;

        tx.commit().await
    }

    pub async fn used_in_medicines(&self, pool: &PgPool) -> Result<Vec<Medicine>, sqlx::Error> {
        match self.medication.id {
            Some(id) => Medicine::get_by_ingredient(pool, id).await,
            None => Ok(Vec::new()),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateIngredientRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub medication: CreateMedicationRequest,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 100))]
    pub type_: String,
    pub caution: Option<String>,
    pub incompatibility: Option<String>,
}

impl CreateIngredientRequest {
    pub fn into_ingredient(self) -> Ingredient {
        Ingredient {
            medication: self.medication.into_medication(),
            type_: self.type_,
            caution: self.caution,
            incompatibility: self.incompatibility,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateIngredientRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub medication: UpdateMedicationRequest,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 100))]
    pub type_: Option<String>,
    pub caution: Option<String>,
    pub incompatibility: Option<String>,
}

impl UpdateIngredientRequest {
    pub fn apply_to(self, ingredient: &mut Ingredient) {
        self.medication.apply_to(&mut ingredient.medication);
        if let Some(type_) = self.type_ {
            ingredient.type_ = type_;
        }
        if let Some(caution) = self.caution {
            ingredient.caution = Some(caution);
        }
        if let Some(incompatibility) = self.incompatibility {
            ingredient.incompatibility = Some(incompatibility);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_flattened_json_shape() {
        let ingredient = Ingredient {
            medication: Medication {
                id: Some(3),
                name: "Menthol".to_string(),
                manufacturer: "Chemline".to_string(),
                critical_norm: Decimal::new(500, 1),
                shelf_life: 365,
                unit_of_measure: "g".to_string(),
                units_per_package: 1,
                price: Decimal::new(120, 2),
                storage_conditions: None,
                current_amount: Decimal::new(2000, 1),
            },
            type_: "essential oil component".to_string(),
            caution: Some("avoid eye contact".to_string()),
            incompatibility: None,
        };

        let value = serde_json::to_value(&ingredient).unwrap();
        // Поля базовой записи лежат на верхнем уровне, без вложенного объекта
        assert_eq!(value["id"], 3);
        assert_eq!(value["name"], "Menthol");
        assert_eq!(value["type"], "essential oil component");
        assert!(value.get("medication").is_none());
    }

    #[test]
    fn test_create_request_parses_flat_payload() {
        let request: CreateIngredientRequest = serde_json::from_str(
            r#"{"name": "Talc", "manufacturer": "Minerals Co", "critical_norm": 100,
                "shelf_life": 1000, "unit_of_measure": "g", "units_per_package": 1,
                "price": 0.4, "type": "powder base"}"#,
        )
        .unwrap();
        let ingredient = request.into_ingredient();
        assert_eq!(ingredient.medication.name, "Talc");
        assert_eq!(ingredient.type_, "powder base");
        assert!(ingredient.caution.is_none());
    }
}
