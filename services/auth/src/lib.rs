//! MercaTech authentication service
//!
//! Keeps the visitor's session with the hosted auth provider (Google and
//! Apple sign-in through Supabase Auth) and their marketplace profile in one
//! observable [`store::AuthState`], and serves both over HTTP.

pub mod config;
pub mod error;
pub mod gotrue;
pub mod models;
pub mod oauth;
pub mod provider;
pub mod repositories;
pub mod routes;
pub mod session;
pub mod store;
pub mod validation;

use std::sync::Arc;

use crate::store::AuthService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
}
