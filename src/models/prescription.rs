// src/models/prescription.rs - Doctor's prescription linking a client to a medicine
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::models::medicine::Medicine;
use crate::models::order::Order;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Prescription {
    pub id: Option<i32>,
    pub client_id: i32,
    pub medicine_id: i32,
    pub prescription_number: i32,
    pub doctor_surname: String,
    pub doctor_name: String,
    pub doctor_patronymic: Option<String>,
    pub signature: bool,
    pub stamp: bool,
    pub age: i32,
    pub diagnosis: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub application: String,
}

const SELECT_PRESCRIPTION: &str =
    "SELECT id, client_id, medicine_id, prescription_number, doctor_surname, doctor_name,
            doctor_patronymic, signature, stamp, age, diagnosis, amount, application
     FROM prescription";

impl Prescription {
    pub async fn get_by_id(pool: &PgPool, id: i32) -> Result<Option<Prescription>, sqlx::Error> {
        sqlx::query_as::<_, Prescription>(&format!("{} WHERE id = $1", SELECT_PRESCRIPTION))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn get_all(pool: &PgPool) -> Result<Vec<Prescription>, sqlx::Error> {
        sqlx::query_as::<_, Prescription>(&format!("{} ORDER BY id", SELECT_PRESCRIPTION))
            .fetch_all(pool)
            .await
    }

    pub async fn get_by_medicine(
        pool: &PgPool,
        medicine_id: i32,
    ) -> Result<Vec<Prescription>, sqlx::Error> {
        sqlx::query_as::<_, Prescription>(&format!(
            "{} WHERE medicine_id = $1 ORDER BY id",
            SELECT_PRESCRIPTION
        ))
        .bind(medicine_id)
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
                    "UPDATE prescription
                     SET client_id = $1, medicine_id = $2, prescription_number = $3,
                         doctor_surname = $4, doctor_name = $5, doctor_patronymic = $6,
                         signature = $7, stamp = $8, age = $9, diagnosis = $10,
                         amount = $11, application = $12
                     WHERE id = $13",
                )
                .bind(self.client_id)
                .bind(self.medicine_id)
                .bind(self.prescription_number)
                .bind(&self.doctor_surname)
                .bind(&self.doctor_name)
                .bind(&self.doctor_patronymic)
                .bind(self.signature)
                .bind(self.stamp)
                .bind(self.age)
                .bind(&self.diagnosis)
                .bind(self.amount)
                .bind(&self.application)
                .bind(id)
                .execute(executor)
                .await?;
            }
            None => {
                let (id,): (i32,) = sqlx::query_as(
                    "INSERT INTO prescription (client_id, medicine_id, prescription_number,
                                               doctor_surname, doctor_name, doctor_patronymic,
                                               signature, stamp, age, diagnosis, amount,
                                               application)
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                     RETURNING id",
                )
                .bind(self.client_id)
                .bind(self.medicine_id)
                .bind(self.prescription_number)
                .bind(&self.doctor_surname)
                .bind(&self.doctor_name)
                .bind(&self.doctor_patronymic)
                .bind(self.signature)
                .bind(self.stamp)
                .bind(self.age)
                .bind(&self.diagnosis)
                .bind(self.amount)
                .bind(&self.application)
                .fetch_one(executor)
                .await?;
                self.id = Some(id);
            }
        }
        Ok(())
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM prescription WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn medicine(&self, pool: &PgPool) -> Result<Option<Medicine>, sqlx::Error> {
        Medicine::get_by_id(pool, self.medicine_id).await
    }

    pub async fn orders(&self, pool: &PgPool) -> Result<Vec<Order>, sqlx::Error> {
        match self.id {
            Some(id) => Order::get_by_prescription(pool, id).await,
            None => Ok(Vec::new()),
        }
    }
}

fn default_true() -> bool {
    true
}

/// POST несёт и данные клиента: обработчик переиспользует существующего
/// клиента через Client::search или создаёт нового.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePrescriptionRequest {
    #[validate(length(min = 1, max = 100))]
    pub surname: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub patronymic: Option<String>,
    #[validate(length(min = 3, max = 20))]
    pub phone_number: String,
    pub medicine_id: i32,
    pub prescription_number: i32,
    #[validate(length(min = 1, max = 100))]
    pub doctor_surname: String,
    #[validate(length(min = 1, max = 100))]
    pub doctor_name: String,
    pub doctor_patronymic: Option<String>,
    #[serde(default = "default_true")]
    pub signature: bool,
    #[serde(default = "default_true")]
    pub stamp: bool,
    #[validate(range(min = 0, max = 150))]
    pub age: i32,
    #[validate(length(min = 1))]
    pub diagnosis: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub application: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePrescriptionRequest {
    pub client_id: Option<i32>,
    pub medicine_id: Option<i32>,
    pub prescription_number: Option<i32>,
    #[validate(length(min = 1, max = 100))]
    pub doctor_surname: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub doctor_name: Option<String>,
    pub doctor_patronymic: Option<String>,
    pub signature: Option<bool>,
    pub stamp: Option<bool>,
    #[validate(range(min = 0, max = 150))]
    pub age: Option<i32>,
    #[validate(length(min = 1))]
    pub diagnosis: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    pub application: Option<String>,
}

impl UpdatePrescriptionRequest {
    pub fn apply_to(self, prescription: &mut Prescription) {
        if let Some(client_id) = self.client_id {
            prescription.client_id = client_id;
        }
        if let Some(medicine_id) = self.medicine_id {
            prescription.medicine_id = medicine_id;
        }
        if let Some(prescription_number) = self.prescription_number {
            prescription.prescription_number = prescription_number;
        }
        if let Some(doctor_surname) = self.doctor_surname {
            prescription.doctor_surname = doctor_surname;
        }
        if let Some(doctor_name) = self.doctor_name {
            prescription.doctor_name = doctor_name;
        }
        if let Some(doctor_patronymic) = self.doctor_patronymic {
            prescription.doctor_patronymic = Some(doctor_patronymic);
        }
        if let Some(signature) = self.signature {
            prescription.signature = signature;
        }
        if let Some(stamp) = self.stamp {
            prescription.stamp = stamp;
        }
        if let Some(age) = self.age {
            prescription.age = age;
        }
        if let Some(diagnosis) = self.diagnosis {
            prescription.diagnosis = diagnosis;
        }
        if let Some(amount) = self.amount {
            prescription.amount = amount;
        }
        if let Some(application) = self.application {
            prescription.application = application;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_and_stamp_default_true() {
        let request: CreatePrescriptionRequest = serde_json::from_str(
            r#"{"surname": "Petrov", "name": "Petr", "phone_number": "+7-900-123-45-67",
                "medicine_id": 1, "prescription_number": 101, "doctor_surname": "Sidorova",
                "doctor_name": "Anna", "age": 34, "diagnosis": "flu", "amount": 2,
                "application": "internal"}"#,
        )
        .unwrap();
        assert!(request.signature);
        assert!(request.stamp);
        assert!(request.patronymic.is_none());
    }
}
