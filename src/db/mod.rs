pub mod asset_queries;
pub mod news_queries;
pub mod portfolio_queries;
pub mod price_queries;
pub mod user_queries;
