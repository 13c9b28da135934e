//! PostgreSQL repository implementations

pub mod place_repo_impl;
pub mod reservation_repo_impl;
pub mod tenant_repo_impl;
pub mod user_repo_impl;

pub use place_repo_impl::PgPlaceRepository;
pub use reservation_repo_impl::PgReservationRepository;
pub use tenant_repo_impl::PgTenantRepository;
pub use user_repo_impl::PgUserRepository;
