// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Devconnect: developer network backend
//!
//! This crate provides the backend API for user accounts, professional
//! profiles, and posts with embedded likes and comments.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod password;
pub mod policy;
pub mod routes;
pub mod subdoc;

use config::Config;
use db::FirestoreDb;
use middleware::auth::TokenService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub tokens: TokenService,
}
