// src/models/composition.rs - Recipe link between a medicine and an ingredient
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Composition {
    pub medicine_id: i32,
    pub ingredient_id: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl Composition {
    pub async fn get_all(pool: &PgPool) -> Result<Vec<Composition>, sqlx::Error> {
        sqlx::query_as::<_, Composition>(
            "SELECT medicine_id, ingredient_id, amount
             FROM composition
             ORDER BY medicine_id, ingredient_id",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn get_by_medicine(
        pool: &PgPool,
        medicine_id: i32,
    ) -> Result<Vec<Composition>, sqlx::Error> {
        sqlx::query_as::<_, Composition>(
            "SELECT medicine_id, ingredient_id, amount
             FROM composition
             WHERE medicine_id = $1
             ORDER BY ingredient_id",
        )
        .bind(medicine_id)
        .fetch_all(pool)
        .await
    }

    /// Upsert по паре (medicine_id, ingredient_id): повторное сохранение
    /// оставляет одну строку с последним amount.
    pub async fn save<'e, E>(&self, executor: E) -> Result<(), sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        sqlx::query(
            "INSERT INTO composition (medicine_id, ingredient_id, amount)
             VALUES ($1, $2, $3)
             ON CONFLICT (medicine_id, ingredient_id) DO UPDATE
             SET amount = EXCLUDED.amount",
        )
        .bind(self.medicine_id)
        .bind(self.ingredient_id)
        .bind(self.amount)
        .execute(executor)
        .await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SaveCompositionRequest {
    pub medicine_id: i32,
    pub ingredient_id: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl SaveCompositionRequest {
    pub fn into_composition(self) -> Composition {
        Composition {
            medicine_id: self.medicine_id,
            ingredient_id: self.ingredient_id,
            amount: self.amount,
        }
    }
}
