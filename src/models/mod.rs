mod asset;
mod news;
mod portfolio;
mod price_point;
mod user;

pub use asset::{AssetSpec, SeededAsset};
pub use news::{NewsDraft, Sentiment};
pub use portfolio::NewHolding;
pub use price_point::PricePoint;
pub use user::NewUser;
