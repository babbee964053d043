mod checks;
mod client;

pub use checks::{run_all, Session};
pub use client::ApiClient;
