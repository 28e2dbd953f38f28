pub mod admin;
pub mod auth;
mod client;
pub mod company;
pub mod engineer;
mod error;
pub mod platform;
pub mod resource;
pub mod settings;

pub use client::{ApiClient, authenticated_client, new_client};
pub use error::{ApiError, FALLBACK_MESSAGE};
