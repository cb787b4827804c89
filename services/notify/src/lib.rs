//! MercaTech report notifications
//!
//! A single `POST /` endpoint that emails the site administrator whenever a
//! user reports a listing. Mail goes out through the Resend API.

pub mod config;
pub mod email;
pub mod error;
pub mod routes;
pub mod state;
pub mod template;

pub use state::AppState;
