// src/models/client.rs - Pharmacy client
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::models::order::Order;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Client {
    pub id: Option<i32>,
    pub surname: String,
    pub name: String,
    pub patronymic: Option<String>,
    pub phone_number: String,
}

impl Client {
    pub async fn get_by_id(pool: &PgPool, id: i32) -> Result<Option<Client>, sqlx::Error> {
        sqlx::query_as::<_, Client>(
            "SELECT id, surname, name, patronymic, phone_number FROM client WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn get_all(pool: &PgPool) -> Result<Vec<Client>, sqlx::Error> {
        sqlx::query_as::<_, Client>(
            "SELECT id, surname, name, patronymic, phone_number FROM client ORDER BY id",
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
                    "UPDATE client
                     SET surname = $1, name = $2, patronymic = $3, phone_number = $4
                     WHERE id = $5",
                )
                .bind(&self.surname)
                .bind(&self.name)
                .bind(&self.patronymic)
                .bind(&self.phone_number)
                .bind(id)
                .execute(executor)
                .await?;
            }
            None => {
                let (id,): (i32,) = sqlx::query_as(
                    "INSERT INTO client (surname, name, patronymic, phone_number)
                     VALUES ($1, $2, $3, $4)
                     RETURNING id",
                )
                .bind(&self.surname)
                .bind(&self.name)
                .bind(&self.patronymic)
                .bind(&self.phone_number)
                .fetch_one(executor)
                .await?;
                self.id = Some(id);
            }
        }
        Ok(())
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM client WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Поиск точного совпадения; отсутствующее отчество сравнивается как IS NULL.
    pub async fn search(
        pool: &PgPool,
        surname: &str,
        name: &str,
        patronymic: Option<&str>,
        phone_number: &str,
    ) -> Result<Option<Client>, sqlx::Error> {
        match patronymic {
            Some(patronymic) => {
                sqlx::query_as::<_, Client>(
                    "SELECT id, surname, name, patronymic, phone_number
                     FROM client
                     WHERE surname = $1 AND name = $2 AND patronymic = $3 AND phone_number = $4",
                )
                .bind(surname)
                .bind(name)
                .bind(patronymic)
                .bind(phone_number)
                .fetch_optional(pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Client>(
                    "SELECT id, surname, name, patronymic, phone_number
                     FROM client
                     WHERE surname = $1 AND name = $2 AND patronymic IS NULL AND phone_number = $3",
                )
                .bind(surname)
                .bind(name)
                .bind(phone_number)
                .fetch_optional(pool)
                .await
            }
        }
    }

    pub async fn orders(&self, pool: &PgPool) -> Result<Vec<Order>, sqlx::Error> {
        match self.id {
            Some(id) => Order::get_by_client(pool, id).await,
            None => Ok(Vec::new()),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClientRequest {
    #[validate(length(min = 1, max = 100))]
    pub surname: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub patronymic: Option<String>,
    #[validate(length(min = 3, max = 20))]
    pub phone_number: String,
}

impl CreateClientRequest {
    pub fn into_client(self) -> Client {
        Client {
            id: None,
            surname: self.surname,
            name: self.name,
            patronymic: self.patronymic,
            phone_number: self.phone_number,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateClientRequest {
    #[validate(length(min = 1, max = 100))]
    pub surname: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub patronymic: Option<String>,
    #[validate(length(min = 3, max = 20))]
    pub phone_number: Option<String>,
}

impl UpdateClientRequest {
    pub fn apply_to(self, client: &mut Client) {
        if let Some(surname) = self.surname {
            client.surname = surname;
        }
        if let Some(name) = self.name {
            client.name = name;
        }
        if let Some(patronymic) = self.patronymic {
            client.patronymic = Some(patronymic);
        }
        if let Some(phone_number) = self.phone_number {
            client.phone_number = phone_number;
        }
    }
}

/// Параметры GET /clients/search
#[derive(Debug, Deserialize, Validate)]
pub struct SearchClientQuery {
    #[validate(length(min = 1, max = 100))]
    pub surname: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub patronymic: Option<String>,
    #[validate(length(min = 3, max = 20))]
    pub phone_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_update() {
        let mut client = Client {
            id: Some(1),
            surname: "Ivanov".to_string(),
            name: "Ivan".to_string(),
            patronymic: None,
            phone_number: "+7-900-000-00-00".to_string(),
        };

        let update: UpdateClientRequest =
            serde_json::from_str(r#"{"phone_number": "+7-900-111-11-11"}"#).unwrap();
        update.apply_to(&mut client);

        assert_eq!(client.phone_number, "+7-900-111-11-11");
        assert_eq!(client.surname, "Ivanov");
        assert!(client.patronymic.is_none());
    }
}
