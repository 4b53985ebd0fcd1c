// src/models/order.rs - Medicine order
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::models::client::Client;
use crate::models::prescription::Prescription;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: Option<i32>,
    pub prescription_id: i32,
    pub client_id: i32,
    pub order_number: i32,
    pub status: String,
    /// Проставляется триггером при выдаче
    pub date_of_issue: Option<NaiveDate>,
    pub start_date: DateTime<Utc>,
    pub expected_date_of_issue: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
}

const SELECT_ORDER: &str =
    "SELECT id, prescription_id, client_id, order_number, status, date_of_issue,
            start_date, expected_date_of_issue, cost
     FROM medicine_order";

/// Ожидаемая дата выдачи: старт плюс время приготовления в днях.
pub fn expected_issue_date(start: DateTime<Utc>, preparation_days: i32) -> DateTime<Utc> {
    start + Duration::days(i64::from(preparation_days))
}

impl Order {
    pub async fn get_by_id(pool: &PgPool, id: i32) -> Result<Option<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>(&format!("{} WHERE id = $1", SELECT_ORDER))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn get_all(pool: &PgPool) -> Result<Vec<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>(&format!("{} ORDER BY id", SELECT_ORDER))
            .fetch_all(pool)
            .await
    }

    pub async fn get_by_client(pool: &PgPool, client_id: i32) -> Result<Vec<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>(&format!("{} WHERE client_id = $1 ORDER BY id", SELECT_ORDER))
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    pub async fn get_by_prescription(
        pool: &PgPool,
        prescription_id: i32,
    ) -> Result<Vec<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>(&format!(
            "{} WHERE prescription_id = $1 ORDER BY id",
            SELECT_ORDER
        ))
        .bind(prescription_id)
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
                    "UPDATE medicine_order
                     SET prescription_id = $1, client_id = $2, order_number = $3, status = $4,
                         date_of_issue = $5, start_date = $6, expected_date_of_issue = $7,
                         cost = $8
                     WHERE id = $9",
                )
                .bind(self.prescription_id)
                .bind(self.client_id)
                .bind(self.order_number)
                .bind(&self.status)
                .bind(self.date_of_issue)
                .bind(self.start_date)
                .bind(self.expected_date_of_issue)
                .bind(self.cost)
                .bind(id)
                .execute(executor)
                .await?;
            }
            None => {
                let (id,): (i32,) = sqlx::query_as(
                    "INSERT INTO medicine_order (prescription_id, client_id, order_number,
                                                 status, date_of_issue, start_date,
                                                 expected_date_of_issue, cost)
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                     RETURNING id",
                )
                .bind(self.prescription_id)
                .bind(self.client_id)
                .bind(self.order_number)
                .bind(&self.status)
                .bind(self.date_of_issue)
                .bind(self.start_date)
                .bind(self.expected_date_of_issue)
                .bind(self.cost)
                .fetch_one(executor)
                .await?;
                self.id = Some(id);
            }
        }
        Ok(())
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM medicine_order WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn prescription(&self, pool: &PgPool) -> Result<Option<Prescription>, sqlx::Error> {
        Prescription::get_by_id(pool, self.prescription_id).await
    }

    pub async fn client(&self, pool: &PgPool) -> Result<Option<Client>, sqlx::Error> {
        Client::get_by_id(pool, self.client_id).await
    }
}

/// Сроки (start_date, expected_date_of_issue) сервер вычисляет сам.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub prescription_id: i32,
    pub client_id: i32,
    pub order_number: i32,
    pub status: String,
    pub date_of_issue: Option<NaiveDate>,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOrderRequest {
    pub prescription_id: Option<i32>,
    pub client_id: Option<i32>,
    pub order_number: Option<i32>,
    pub status: Option<String>,
    pub date_of_issue: Option<NaiveDate>,
    pub start_date: Option<DateTime<Utc>>,
    pub expected_date_of_issue: Option<DateTime<Utc>>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub cost: Option<Decimal>,
}

impl UpdateOrderRequest {
    pub fn apply_to(self, order: &mut Order) {
        if let Some(prescription_id) = self.prescription_id {
            order.prescription_id = prescription_id;
        }
        if let Some(client_id) = self.client_id {
            order.client_id = client_id;
        }
        if let Some(order_number) = self.order_number {
            order.order_number = order_number;
        }
        if let Some(status) = self.status {
            order.status = status;
        }
        if let Some(date_of_issue) = self.date_of_issue {
            order.date_of_issue = Some(date_of_issue);
        }
        if let Some(start_date) = self.start_date {
            order.start_date = start_date;
        }
        if let Some(expected) = self.expected_date_of_issue {
            order.expected_date_of_issue = expected;
        }
        if let Some(cost) = self.cost {
            order.cost = cost;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_expected_issue_date() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap();
        let expected = expected_issue_date(start, 3);
        assert_eq!(expected, Utc.with_ymd_and_hms(2024, 3, 4, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_expected_issue_date_zero_days() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap();
        assert_eq!(expected_issue_date(start, 0), start);
    }

    #[test]
    fn test_order_json_dates_are_iso() {
        let order = Order {
            id: Some(9),
            prescription_id: 1,
            client_id: 2,
            order_number: 77,
            status: "ready".to_string(),
            date_of_issue: Some(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()),
            start_date: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            expected_date_of_issue: Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap(),
            cost: Decimal::new(1250, 2),
        };

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["date_of_issue"], "2024-03-05");
        assert_eq!(value["start_date"], "2024-03-01T00:00:00Z");
        assert_eq!(value["cost"], serde_json::json!(12.5));
    }

    #[test]
    fn test_update_overrides_expected_date() {
        let mut order = Order {
            id: Some(1),
            prescription_id: 1,
            client_id: 1,
            order_number: 1,
            status: "producing".to_string(),
            date_of_issue: None,
            start_date: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            expected_date_of_issue: Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap(),
            cost: Decimal::ONE,
        };

        let update: UpdateOrderRequest =
            serde_json::from_str(r#"{"expected_date_of_issue": "2024-03-10T00:00:00Z"}"#).unwrap();
        update.apply_to(&mut order);

        assert_eq!(
            order.expected_date_of_issue,
            Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap()
        );
        assert_eq!(order.status, "producing");
    }
}
