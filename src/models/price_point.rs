use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// One historical price for an asset, keyed (asset_id, timestamp).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PricePoint {
    pub asset_id: i32,
    pub timestamp: NaiveDateTime,
    pub price: f64,
}
