use serde::{Deserialize, Serialize};

/// A holding to be upserted into a portfolio, keyed (portfolio_id, asset_id).
/// The ticker is denormalized onto the row to match the deployed schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHolding {
    pub portfolio_id: i32,
    pub asset_id: i32,
    pub ticker: String,
    pub quantity: i32,
    pub purchase_price: f64,
}
