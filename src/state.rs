//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! Unlike the SPA this service replaced, there is no process-global mutable
//! auth context: the session user and their effective role are resolved per
//! request from the pool, so the only shared resource is the database handle.

use sqlx::PgPool;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — the pool is internally reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
