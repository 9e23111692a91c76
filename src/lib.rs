//! Sectorfive - content client for the Sectorfive personal website
//!
//! This library provides the client side of the site: a session store, an
//! HTTP client for the site API, paged list views, visitor and admin view
//! models, the route table with its authorization gate and content
//! rendering helpers.

pub mod api;
pub mod config;
pub mod context;
pub mod models;
pub mod paging;
pub mod render;
pub mod router;
pub mod session;
pub mod views;

pub use api::{ApiClient, ApiError};
pub use config::Config;
pub use context::AppContext;
pub use router::{AuthGate, GateDecision, Route};
pub use session::{FileTokenStore, MemoryTokenStore, Session, SessionError, TokenStore};
