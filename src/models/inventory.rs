// src/models/inventory.rs - Inventory check record
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Inventory {
    pub id: Option<i32>,
    pub medication_id: i32,
    pub inventory_date: NaiveDate,
    /// Фактически пересчитанное количество упаковок
    pub amount: i32,
}

impl Inventory {
    pub async fn get_by_id(pool: &PgPool, id: i32) -> Result<Option<Inventory>, sqlx::Error> {
        sqlx::query_as::<_, Inventory>(
            "SELECT id, medication_id, inventory_date, amount FROM inventory WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn get_all(pool: &PgPool) -> Result<Vec<Inventory>, sqlx::Error> {
        sqlx::query_as::<_, Inventory>(
            "SELECT id, medication_id, inventory_date, amount FROM inventory ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn save<'e, E>(&mut self, executor: E) -> Result<(), sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        match self.id {
            Some(id) => {
                sqlx::query(
                    "UPDATE inventory
                     SET medication_id = $1, inventory_date = $2, amount = $3
                     WHERE id = $4",
                )
                .bind(self.medication_id)
                .bind(self.inventory_date)
                .bind(self.amount)
                .bind(id)
                .execute(executor)
                .await?;
            }
            None => {
                let (id,): (i32,) = sqlx::query_as(
                    "INSERT INTO inventory (medication_id, inventory_date, amount)
                     VALUES ($1, $2, $3)
                     RETURNING id",
                )
                .bind(self.medication_id)
                .bind(self.inventory_date)
                .bind(self.amount)
                .fetch_one(executor)
                .await?;
                self.id = Some(id);
            }
        }
        Ok(())
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM inventory WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInventoryRequest {
    pub medication_id: i32,
    pub inventory_date: NaiveDate,
    #[validate(range(min = 0))]
    pub amount: i32,
}

impl CreateInventoryRequest {
    pub fn into_inventory(self) -> Inventory {
        Inventory {
            id: None,
            medication_id: self.medication_id,
            inventory_date: self.inventory_date,
            amount: self.amount,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateInventoryRequest {
    pub medication_id: Option<i32>,
    pub inventory_date: Option<NaiveDate>,
    #[validate(range(min = 0))]
    pub amount: Option<i32>,
}

impl UpdateInventoryRequest {
    pub fn apply_to(self, inventory: &mut Inventory) {
        if let Some(medication_id) = self.medication_id {
            inventory.medication_id = medication_id;
        }
        if let Some(inventory_date) = self.inventory_date {
            inventory.inventory_date = inventory_date;
        }
        if let Some(amount) = self.amount {
            inventory.amount = amount;
        }
    }
}
