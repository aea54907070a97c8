pub mod client;
pub mod config;
pub mod errors;

pub use client::NavClient;
pub use config::Config;
pub use errors::ClientError;
