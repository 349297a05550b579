use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Clone, FromRow, ToSchema)]
pub struct Filament {
    /// Server-assigned UUID
    pub id: String,
    pub name: String,
    /// Material type (PLA, PETG, ABS, ...)
    pub material: String,
    pub color: String,
    pub manufacturer: Option<String>,
    /// Purchase price in cents
    pub purchase_price: Option<i64>,
    pub spool_weight_grams: i64,
    pub remaining_weight_grams: i64,
}

/// Request body shared by filament create and update.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FilamentPayload {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub material: String,
    #[validate(length(min = 1, max = 50))]
    pub color: String,
    pub manufacturer: Option<String>,
    /// Purchase price in cents
    #[validate(range(min = 0))]
    pub purchase_price: Option<i64>,
    #[validate(range(min = 0))]
    pub spool_weight_grams: i64,
    #[validate(range(min = 0))]
    pub remaining_weight_grams: i64,
}
