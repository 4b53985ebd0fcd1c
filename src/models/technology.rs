// src/models/technology.rs - Technology of preparation
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::models::medicine::Medicine;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Technology {
    pub id: Option<i32>,
    pub description: String,
    /// Время приготовления в днях
    pub preparation_time: i32,
}

impl Technology {
    pub async fn get_by_id(pool: &PgPool, id: i32) -> Result<Option<Technology>, sqlx::Error> {
        sqlx::query_as::<_, Technology>(
            "SELECT id, description, preparation_time FROM technology_of_preparation WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn get_all(pool: &PgPool) -> Result<Vec<Technology>, sqlx::Error> {
        sqlx::query_as::<_, Technology>(
            "SELECT id, description, preparation_time FROM technology_of_preparation ORDER BY id",
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
                    "UPDATE technology_of_preparation
                     SET description = $1, preparation_time = $2
                     WHERE id = $3",
                )
                .bind(&self.description)
                .bind(self.preparation_time)
                .bind(id)
                .execute(executor)
                .await?;
            }
            None => {
                let (id,): (i32,) = sqlx::query_as(
                    "INSERT INTO technology_of_preparation (description, preparation_time)
                     VALUES ($1, $2)
                     RETURNING id",
                )
                .bind(&self.description)
                .bind(self.preparation_time)
                .fetch_one(executor)
                .await?;
                self.id = Some(id);
            }
        }
        Ok(())
    }

    pub async fn medicines(&self, pool: &PgPool) -> Result<Vec<Medicine>, sqlx::Error> {
        let Some(id) = self.id else {
            return Ok(Vec::new());
        };
        sqlx::query_as::<_, Medicine>(
            "SELECT m.id, m.name, m.manufacturer, m.critical_norm, m.shelf_life,
                    m.unit_of_measure, m.units_per_package, m.price, m.storage_conditions,
                    m.current_amount, mc.type, mc.kind, mc.application, mc.tech_prep_id
             FROM medicine mc
             JOIN medication m ON m.id = mc.id
             WHERE mc.tech_prep_id = $1
             ORDER BY m.id",
        )
        .bind(id)
        .fetch_all(pool)
        .await
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTechnologyRequest {
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 0))]
    pub preparation_time: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTechnologyRequest {
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub preparation_time: Option<i32>,
}

impl UpdateTechnologyRequest {
    pub fn apply_to(self, technology: &mut Technology) {
        if let Some(description) = self.description {
            technology.description = description;
        }
        if let Some(preparation_time) = self.preparation_time {
            technology.preparation_time = preparation_time;
        }
    }
}
