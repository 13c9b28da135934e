//! Domain entities

pub mod availability;
pub mod place;
pub mod reservation;
pub mod tenant;
pub mod user;

pub use availability::{segments, DayOccupancy, PlaceAvailability, Segment, TailPolicy};
pub use place::{NewPlace, Place, PlacePatch};
pub use reservation::{
    Reservation, ReservationDetail, ReservationDraft, ReservationPatch, ReservationView,
    ServiceFlags,
};
pub use tenant::{BusinessType, Tenant};
pub use user::User;
