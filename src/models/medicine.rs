// src/models/medicine.rs - Medicine: medication core + dosage form and preparation link
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::models::composition::Composition;
use crate::models::medication::{CreateMedicationRequest, Medication, UpdateMedicationRequest};
use crate::models::prescription::Prescription;
use crate::models::technology::Technology;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Medicine {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub medication: Medication,
    /// finished | manufactured
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub type_: String,
    /// pills | mixture | ointment | solution | tincture | powder
    pub kind: String,
    /// internal | external | for mixing
    pub application: String,
    pub tech_prep_id: Option<i32>,
}

const SELECT_MEDICINE: &str =
    "SELECT m.id, m.name, m.manufacturer, m.critical_norm, m.shelf_life,
            m.unit_of_measure, m.units_per_package, m.price, m.storage_conditions,
            m.current_amount, mc.type, mc.kind, mc.application, mc.tech_prep_id
     FROM medicine mc
     JOIN medication m ON m.id = mc.id";

impl Medicine {
    pub async fn get_by_id(pool: &PgPool, id: i32) -> Result<Option<Medicine>, sqlx::Error> {
        sqlx::query_as::<_, Medicine>(&format!("{} WHERE mc.id = $1", SELECT_MEDICINE))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn get_all(pool: &PgPool) -> Result<Vec<Medicine>, sqlx::Error> {
        sqlx::query_as::<_, Medicine>(&format!("{} ORDER BY m.id", SELECT_MEDICINE))
            .fetch_all(pool)
            .await
    }

    pub async fn get_by_ingredient(
        pool: &PgPool,
        ingredient_id: i32,
    ) -> Result<Vec<Medicine>, sqlx::Error> {
        sqlx::query_as::<_, Medicine>(&format!(
            "{} JOIN composition c ON c.medicine_id = mc.id
             WHERE c.ingredient_id = $1
             ORDER BY m.id",
            SELECT_MEDICINE
        ))
        .bind(ingredient_id)
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
            "INSERT INTO medicine (id, type, kind, application, tech_prep_id)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE
             SET type = EXCLUDED.type,
                 kind = EXCLUDED.kind,
                 application = EXCLUDED.application,
                 tech_prep_id = EXCLUDED.tech_prep_id",
        )
        .bind(id)
        .bind(&self.type_)
        .bind(&self.kind)
        .bind(&self.application)
        .bind(self.tech_prep_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await
    }

    pub async fn technology(&self, pool: &PgPool) -> Result<Option<Technology>, sqlx::Error> {
        match self.tech_prep_id {
            Some(tech_id) => Technology::get_by_id(pool, tech_id).await,
            None => Ok(None),
        }
    }

    pub async fn compositions(&self, pool: &PgPool) -> Result<Vec<Composition>, sqlx::Error> {
        match self.medication.id {
            Some(id) => Composition::get_by_medicine(pool, id).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn prescriptions(&self, pool: &PgPool) -> Result<Vec<Prescription>, sqlx::Error> {
        match self.medication.id {
            Some(id) => Prescription::get_by_medicine(pool, id).await,
            None => Ok(Vec::new()),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMedicineRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub medication: CreateMedicationRequest,
    #[serde(rename = "type")]
    pub type_: String,
    pub kind: String,
    pub application: String,
    pub tech_prep_id: Option<i32>,
}

impl CreateMedicineRequest {
    pub fn into_medicine(self) -> Medicine {
        Medicine {
            medication: self.medication.into_medication(),
            type_: self.type_,
            kind: self.kind,
            application: self.application,
            tech_prep_id: self.tech_prep_id,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMedicineRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub medication: UpdateMedicationRequest,
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub kind: Option<String>,
    pub application: Option<String>,
    pub tech_prep_id: Option<i32>,
}

impl UpdateMedicineRequest {
    pub fn apply_to(self, medicine: &mut Medicine) {
        self.medication.apply_to(&mut medicine.medication);
        if let Some(type_) = self.type_ {
            medicine.type_ = type_;
        }
        if let Some(kind) = self.kind {
            medicine.kind = kind;
        }
        if let Some(application) = self.application {
            medicine.application = application;
        }
        if let Some(tech_prep_id) = self.tech_prep_id {
            medicine.tech_prep_id = Some(tech_prep_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_flat_payload_with_type_field() {
        let request: CreateMedicineRequest = serde_json::from_str(
            r#"{"name": "Cough mixture", "manufacturer": "in-house", "critical_norm": 5,
                "shelf_life": 14, "unit_of_measure": "ml", "units_per_package": 100,
                "price": 7.8, "type": "manufactured", "kind": "mixture",
                "application": "internal", "tech_prep_id": 2}"#,
        )
        .unwrap();
        let medicine = request.into_medicine();
        assert_eq!(medicine.type_, "manufactured");
        assert_eq!(medicine.kind, "mixture");
        assert_eq!(medicine.tech_prep_id, Some(2));
        assert_eq!(medicine.medication.price, Decimal::new(78, 1));
    }

    #[test]
    fn test_update_keeps_unset_fields() {
        let mut medicine = Medicine {
            medication: Medication {
                id: Some(5),
                name: "Ointment A".to_string(),
                manufacturer: "in-house".to_string(),
                critical_norm: Decimal::ONE,
                shelf_life: 30,
                unit_of_measure: "g".to_string(),
                units_per_package: 50,
                price: Decimal::TEN,
                storage_conditions: None,
                current_amount: Decimal::ZERO,
            },
            type_: "manufactured".to_string(),
            kind: "ointment".to_string(),
            application: "external".to_string(),
            tech_prep_id: Some(1),
        };

        let update: UpdateMedicineRequest =
            serde_json::from_str(r#"{"kind": "solution"}"#).unwrap();
        update.apply_to(&mut medicine);

        assert_eq!(medicine.kind, "solution");
        assert_eq!(medicine.application, "external");
        assert_eq!(medicine.tech_prep_id, Some(1));
    }
}
