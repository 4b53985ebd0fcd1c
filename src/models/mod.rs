// src/models/mod.rs - Entity layer: one file per table plus shared code enums
pub mod client;
pub mod composition;
pub mod delivery;
pub mod ingredient;
pub mod inventory;
pub mod medication;
pub mod medicine;
pub mod order;
pub mod prescription;
pub mod reports;
pub mod technology;

pub use client::{Client, CreateClientRequest, SearchClientQuery, UpdateClientRequest};
pub use composition::{Composition, SaveCompositionRequest};
pub use delivery::{CreateDeliveryRequest, StockDelivery, UpdateDeliveryRequest};
pub use ingredient::{CreateIngredientRequest, Ingredient, UpdateIngredientRequest};
pub use inventory::{CreateInventoryRequest, Inventory, UpdateInventoryRequest};
pub use medication::{CreateMedicationRequest, Medication, UpdateMedicationRequest};
pub use medicine::{CreateMedicineRequest, Medicine, UpdateMedicineRequest};
pub use order::{CreateOrderRequest, Order, UpdateOrderRequest};
pub use prescription::{CreatePrescriptionRequest, Prescription, UpdatePrescriptionRequest};
pub use technology::{CreateTechnologyRequest, Technology, UpdateTechnologyRequest};

use strum::{Display, EnumString};

// Кодовые значения хранятся в БД как текст; перечисления служат только
// для проверки входных данных на границе API.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum OrderStatus {
    #[strum(serialize = "waiting for a delivery")]
    WaitingForADelivery,
    #[strum(serialize = "producing")]
    Producing,
    #[strum(serialize = "ready")]
    Ready,
    #[strum(serialize = "issued")]
    Issued,
    #[strum(serialize = "cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum MedicineType {
    #[strum(serialize = "finished")]
    Finished,
    #[strum(serialize = "manufactured")]
    Manufactured,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum MedicineKind {
    #[strum(serialize = "pills")]
    Pills,
    #[strum(serialize = "mixture")]
    Mixture,
    #[strum(serialize = "ointment")]
    Ointment,
    #[strum(serialize = "solution")]
    Solution,
    #[strum(serialize = "tincture")]
    Tincture,
    #[strum(serialize = "powder")]
    Powder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum MethodOfApplication {
    #[strum(serialize = "internal")]
    Internal,
    #[strum(serialize = "external")]
    External,
    #[strum(serialize = "for mixing")]
    ForMixing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum UnitOfMeasure {
    #[strum(serialize = "g")]
    Grams,
    #[strum(serialize = "mg")]
    Milligrams,
    #[strum(serialize = "ml")]
    Milliliters,
    #[strum(serialize = "pc")]
    Pieces,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_order_status_round_trip() {
        for code in ["waiting for a delivery", "producing", "ready", "issued", "cancelled"] {
            let status = OrderStatus::from_str(code).unwrap();
            assert_eq!(status.to_string(), code);
        }
        assert!(OrderStatus::from_str("Ready").is_err());
    }

    #[test]
    fn test_application_with_space() {
        assert_eq!(
            MethodOfApplication::from_str("for mixing").unwrap(),
            MethodOfApplication::ForMixing
        );
        assert_eq!(MethodOfApplication::ForMixing.to_string(), "for mixing");
    }

    #[test]
    fn test_unit_codes() {
        assert_eq!(UnitOfMeasure::from_str("pc").unwrap(), UnitOfMeasure::Pieces);
        assert_eq!(UnitOfMeasure::Milligrams.to_string(), "mg");
        assert!(UnitOfMeasure::from_str("kg").is_err());
    }

    #[test]
    fn test_medicine_kind_codes() {
        for code in ["pills", "mixture", "ointment", "solution", "tincture", "powder"] {
            assert_eq!(MedicineKind::from_str(code).unwrap().to_string(), code);
        }
    }
}
