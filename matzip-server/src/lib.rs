//! matzip-server: restaurant directory admin backend
//!
//! Postgres schema and repositories for restaurants, menus, images,
//! reviews and their lookup tables, plus the admin screen registry and
//! the HTTP API that serves both.

pub mod admin;
pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, create_pool_with_options, migrations, DbError};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
