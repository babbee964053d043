use serde::{Deserialize, Serialize};

/// A catalog entry for an asset the seeder knows how to create.
#[derive(Debug, Clone, Copy)]
pub struct AssetSpec {
    pub ticker: &'static str,
    pub name: &'static str,
    pub asset_type: &'static str,
    pub source: &'static str,
}

/// An asset row after it has been upserted, with its database id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeededAsset {
    pub id: i32,
    pub ticker: String,
    pub name: String,
}
