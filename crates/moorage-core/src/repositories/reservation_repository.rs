//! Reservation repository trait (port)

use async_trait::async_trait;
use chrono::NaiveDate;
use moorage_shared::{DateRange, EntityId};

use crate::domain::{DayOccupancy, Reservation, ReservationDetail, ReservationDraft, ReservationView};
use crate::error::DomainError;

/// Storage port for the two-record reservation structure.
///
/// `admit` and `reschedule` are transactional primitives: the capacity
/// re-check and the write happen in one storage transaction, so two
/// concurrent admissions for the same place can never both pass the check
/// and jointly exceed capacity. Implementations signal a bounded lock wait
/// expiring with [`DomainError::Contention`].
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Capacity ledger: one entry per calendar day of the inclusive range,
    /// zero-occupancy days included, ascending by day.
    async fn daily_occupancy(
        &self,
        tenant_id: EntityId,
        place_id: EntityId,
        range: DateRange,
    ) -> Result<Vec<DayOccupancy>, DomainError>;

    /// Atomically re-checks that no day of the draft's span would meet or
    /// exceed the place's capacity, then persists envelope + detail. On
    /// rejection nothing is persisted.
    ///
    /// Errors: `CapacityExceeded`, `Contention`, `PlaceNotFound` (place
    /// vanished or deactivated since validation), `DatabaseError`.
    async fn admit(
        &self,
        tenant_id: EntityId,
        draft: &ReservationDraft,
        booked_on: NaiveDate,
    ) -> Result<EntityId, DomainError>;

    /// Atomically re-checks capacity for the new span, excluding the
    /// reservation's own current row, then updates both records together.
    /// Rejection leaves prior state untouched.
    async fn reschedule(
        &self,
        envelope: &Reservation,
        detail: &ReservationDetail,
    ) -> Result<(), DomainError>;

    async fn find_by_id(
        &self,
        tenant_id: EntityId,
        id: EntityId,
    ) -> Result<Option<(Reservation, ReservationDetail)>, DomainError>;

    /// Hard-deletes envelope + detail. Returns false when the id does not
    /// exist for this tenant.
    async fn delete(&self, tenant_id: EntityId, id: EntityId) -> Result<bool, DomainError>;

    /// Tenant's reservations joined with user and place names, ordered by
    /// entry date descending. Optionally filtered to one user.
    async fn list(
        &self,
        tenant_id: EntityId,
        user_id: Option<EntityId>,
    ) -> Result<Vec<ReservationView>, DomainError>;
}
