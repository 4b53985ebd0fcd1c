// src/handlers.rs - Shared response scaffolding
use serde::Serialize;
use std::collections::HashMap;

/// Ответ списочных ручек: данные плюс карта подписей полей для фронтенда.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub data: Vec<T>,
    pub headers: HashMap<&'static str, &'static str>,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(data: Vec<T>, labels: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            data,
            headers: labels.iter().copied().collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: &[(&str, &str)] = &[("id", "ID"), ("name", "Название")];

    #[test]
    fn test_list_response_shape() {
        let response = ListResponse::new(vec![1, 2, 3], LABELS);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["data"], serde_json::json!([1, 2, 3]));
        assert_eq!(value["headers"]["name"], "Название");
    }

    #[test]
    fn test_empty_list_keeps_headers() {
        let response = ListResponse::<i32>::new(Vec::new(), LABELS);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["data"], serde_json::json!([]));
        assert_eq!(value["headers"].as_object().unwrap().len(), 2);
    }
}
