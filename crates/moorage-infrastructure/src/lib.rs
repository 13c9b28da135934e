//! # Moorage Infrastructure
//!
//! PostgreSQL implementations of the engine's repository ports (adapters).

pub mod database;

pub use database::{
    create_pool, PgPlaceRepository, PgReservationRepository, PgTenantRepository, PgUserRepository,
};
