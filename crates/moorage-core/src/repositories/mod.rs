//! Repository traits (ports)

pub mod place_repository;
pub mod reservation_repository;
pub mod tenant_repository;
pub mod user_repository;

pub use place_repository::PlaceRepository;
pub use reservation_repository::ReservationRepository;
pub use tenant_repository::TenantRepository;
pub use user_repository::UserRepository;
