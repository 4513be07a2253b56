//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool (default 5 connections) shared by all requests
//! - Changelists JOIN what they display - no N+1 queries
//! - DB constraints are the backstop; violations are classified, not parsed by handlers
//! - Transactions for multi-step operations

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repos;

pub use error::DbError;
pub use pool::{create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;
pub use sqlx::PgPool;
