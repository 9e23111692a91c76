//! API layer - client for the site REST API
//!
//! `ApiClient` wraps a `reqwest::Client`; each endpoint family adds its
//! operations in its own module:
//! - Page endpoints
//! - Blog endpoints
//! - Gallery endpoints
//! - Contact endpoints
//! - Auth endpoints
//! - Settings, analytics and upload endpoints

pub mod analytics;
pub mod auth;
pub mod blog;
pub mod client;
pub mod contact;
pub mod error;
pub mod gallery;
pub mod pages;
pub mod site;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests;

pub use client::ApiClient;
pub use error::{extract_detail, ApiError};
pub use upload::upload_path;
