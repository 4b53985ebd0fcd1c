// src/error.rs
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::models::{MedicineKind, MedicineType, MethodOfApplication, OrderStatus, UnitOfMeasure};

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    InternalServerError(String),
    ValidationError(String),
    DatabaseError(sqlx::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            ApiError::DatabaseError(err) => write!(f, "Database Error: {}", err),
        }
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let error_response = ErrorResponse {
            success: false,
            message: self.to_string(),
        };

        match self {
            ApiError::BadRequest(_) => HttpResponse::BadRequest().json(error_response),
            ApiError::NotFound(_) => HttpResponse::NotFound().json(error_response),
            ApiError::ValidationError(_) => HttpResponse::UnprocessableEntity().json(error_response),
            ApiError::DatabaseError(_) => HttpResponse::InternalServerError().json(error_response),
            ApiError::InternalServerError(_) => HttpResponse::InternalServerError().json(error_response),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::DatabaseError(err)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(err.to_string())
    }
}

// Специфичные ошибки для аптечной системы
impl ApiError {
    pub fn medication_not_found(id: i32) -> Self {
        ApiError::NotFound(format!("Medication with ID {} not found", id))
    }

    pub fn medicine_not_found(id: i32) -> Self {
        ApiError::NotFound(format!("Medicine with ID {} not found", id))
    }

    pub fn ingredient_not_found(id: i32) -> Self {
        ApiError::NotFound(format!("Ingredient with ID {} not found", id))
    }

    pub fn technology_not_found(id: i32) -> Self {
        ApiError::NotFound(format!("Technology of preparation with ID {} not found", id))
    }

    pub fn prescription_not_found(id: i32) -> Self {
        ApiError::NotFound(format!("Prescription with ID {} not found", id))
    }

    pub fn order_not_found(id: i32) -> Self {
        ApiError::NotFound(format!("Order with ID {} not found", id))
    }

    pub fn client_not_found(id: i32) -> Self {
        ApiError::NotFound(format!("Client with ID {} not found", id))
    }

    pub fn delivery_not_found(id: i32) -> Self {
        ApiError::NotFound(format!("Medication delivery with ID {} not found", id))
    }

    pub fn inventory_not_found(id: i32) -> Self {
        ApiError::NotFound(format!("Inventory with ID {} not found", id))
    }

    pub fn composition_not_found(medicine_id: i32, ingredient_id: i32) -> Self {
        ApiError::NotFound(format!(
            "Composition for medicine {} and ingredient {} not found",
            medicine_id, ingredient_id
        ))
    }

    pub fn medicine_name_not_found(name: &str) -> Self {
        ApiError::NotFound(format!("Medicine with name '{}' not found", name))
    }
}

// Валидация кодовых строковых полей
pub fn validate_order_status(status: &str) -> Result<(), ApiError> {
    OrderStatus::from_str(status).map(|_| ()).map_err(|_| {
        ApiError::ValidationError(format!(
            "Invalid order status '{}'. Valid statuses: waiting for a delivery, producing, ready, issued, cancelled",
            status
        ))
    })
}

pub fn validate_medicine_type(type_: &str) -> Result<(), ApiError> {
    MedicineType::from_str(type_).map(|_| ()).map_err(|_| {
        ApiError::ValidationError(format!(
            "Invalid medicine type '{}'. Valid types: finished, manufactured",
            type_
        ))
    })
}

pub fn validate_medicine_kind(kind: &str) -> Result<(), ApiError> {
    MedicineKind::from_str(kind).map(|_| ()).map_err(|_| {
        ApiError::ValidationError(format!(
            "Invalid medicine kind '{}'. Valid kinds: pills, mixture, ointment, solution, tincture, powder",
            kind
        ))
    })
}

pub fn validate_application(application: &str) -> Result<(), ApiError> {
    MethodOfApplication::from_str(application).map(|_| ()).map_err(|_| {
        ApiError::ValidationError(format!(
            "Invalid method of application '{}'. Valid methods: internal, external, for mixing",
            application
        ))
    })
}

pub fn validate_unit_of_measure(unit: &str) -> Result<(), ApiError> {
    UnitOfMeasure::from_str(unit).map(|_| ()).map_err(|_| {
        ApiError::ValidationError(format!(
            "Invalid unit of measure '{}'. Valid units: g, mg, ml, pc",
            unit
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::order_not_found(7).error_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::BadRequest("x".to_string()).error_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::ValidationError("x".to_string()).error_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::DatabaseError(sqlx::Error::PoolClosed).error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validate_order_status() {
        assert!(validate_order_status("waiting for a delivery").is_ok());
        assert!(validate_order_status("producing").is_ok());
        assert!(validate_order_status("done").is_err());
    }

    #[test]
    fn test_validate_application() {
        assert!(validate_application("for mixing").is_ok());
        assert!(validate_application("oral").is_err());
    }

    #[test]
    fn test_not_found_message_includes_id() {
        let err = ApiError::medication_not_found(42);
        assert!(err.to_string().contains("42"));
    }
}
