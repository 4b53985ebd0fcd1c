// src/models/delivery.rs - Stock delivery of a medication
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StockDelivery {
    pub id: Option<i32>,
    pub medication_id: i32,
    /// Дата заявки
    pub application_date: NaiveDate,
    /// Дата фактической поставки; при вставке с датой триггер
    /// увеличивает current_amount медикамента
    pub delivery_date: Option<NaiveDate>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl StockDelivery {
    pub async fn get_by_id(pool: &PgPool, id: i32) -> Result<Option<StockDelivery>, sqlx::Error> {
        sqlx::query_as::<_, StockDelivery>(
            "SELECT id, medication_id, application_date, delivery_date, amount
             FROM medication_delivery WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn get_all(pool: &PgPool) -> Result<Vec<StockDelivery>, sqlx::Error> {
        sqlx::query_as::<_, StockDelivery>(
            "SELECT id, medication_id, application_date, delivery_date, amount
             FROM medication_delivery ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn get_by_medication(
        pool: &PgPool,
        medication_id: i32,
    ) -> Result<Vec<StockDelivery>, sqlx::Error> {
        sqlx::query_as::<_, StockDelivery>(
            "SELECT id, medication_id, application_date, delivery_date, amount
             FROM medication_delivery WHERE medication_id = $1 ORDER BY id",
        )
        .bind(medication_id)
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
                    "UPDATE medication_delivery
                     SET medication_id = $1, application_date = $2, delivery_date = $3,
                         amount = $4
                     WHERE id = $5",
                )
                .bind(self.medication_id)
                .bind(self.application_date)
                .bind(self.delivery_date)
                .bind(self.amount)
                .bind(id)
                .execute(executor)
                .await?;
            }
            None => {
                let (id,): (i32,) = sqlx::query_as(
                    "INSERT INTO medication_delivery (medication_id, application_date,
                                                      delivery_date, amount)
                     VALUES ($1, $2, $3, $4)
                     RETURNING id",
                )
                .bind(self.medication_id)
                .bind(self.application_date)
                .bind(self.delivery_date)
                .bind(self.amount)
                .fetch_one(executor)
                .await?;
                self.id = Some(id);
            }
        }
        Ok(())
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM medication_delivery WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDeliveryRequest {
    pub medication_id: i32,
    pub application_date: NaiveDate,
    pub delivery_date: Option<NaiveDate>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl CreateDeliveryRequest {
    pub fn into_delivery(self) -> StockDelivery {
        StockDelivery {
            id: None,
            medication_id: self.medication_id,
            application_date: self.application_date,
            delivery_date: self.delivery_date,
            amount: self.amount,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDeliveryRequest {
    pub medication_id: Option<i32>,
    pub application_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
}

impl UpdateDeliveryRequest {
    pub fn apply_to(self, delivery: &mut StockDelivery) {
        if let Some(medication_id) = self.medication_id {
            delivery.medication_id = medication_id;
        }
        if let Some(application_date) = self.application_date {
            delivery.application_date = application_date;
        }
        if let Some(delivery_date) = self.delivery_date {
            delivery.delivery_date = Some(delivery_date);
        }
        if let Some(amount) = self.amount {
            delivery.amount = amount;
        }
    }
}
