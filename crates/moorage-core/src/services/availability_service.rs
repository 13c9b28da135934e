//! Availability service: capacity ledger + segmenter orchestration

use std::sync::Arc;

use moorage_shared::{DateRange, EntityId};
use tracing::info;

use crate::domain::{segments, DayOccupancy, PlaceAvailability, TailPolicy};
use crate::error::DomainError;
use crate::repositories::{PlaceRepository, ReservationRepository};

/// Read path of the engine: per-day occupancy for one place, and contiguous
/// availability segments across all of a tenant's active places.
pub struct AvailabilityService<P: PlaceRepository, R: ReservationRepository> {
    place_repo: Arc<P>,
    reservation_repo: Arc<R>,
    tail: TailPolicy,
}

impl<P: PlaceRepository, R: ReservationRepository> AvailabilityService<P, R> {
    pub fn new(place_repo: Arc<P>, reservation_repo: Arc<R>, tail: TailPolicy) -> Self {
        Self {
            place_repo,
            reservation_repo,
            tail,
        }
    }

    /// Capacity ledger for one place: one entry per day of the inclusive
    /// range, zero-occupancy days included.
    pub async fn occupancy(
        &self,
        tenant_id: EntityId,
        place_id: EntityId,
        range: DateRange,
    ) -> Result<Vec<DayOccupancy>, DomainError> {
        // Tenant scoping first: a foreign place id must look missing.
        let place = self
            .place_repo
            .find_by_id(tenant_id, place_id)
            .await?
            .ok_or(DomainError::PlaceNotFound)?;

        self.reservation_repo
            .daily_occupancy(tenant_id, place.id, range)
            .await
    }

    /// Availability segments for every active place of the tenant, ordered
    /// as the place listing orders them.
    pub async fn availability(
        &self,
        tenant_id: EntityId,
        range: DateRange,
    ) -> Result<Vec<PlaceAvailability>, DomainError> {
        let places = self.place_repo.list_by_tenant(tenant_id).await?;

        let mut result = Vec::new();
        for place in places.into_iter().filter(|p| p.is_active) {
            let days = self
                .reservation_repo
                .daily_occupancy(tenant_id, place.id, range)
                .await?;

            result.push(PlaceAvailability {
                place_id: place.id,
                place_name: place.name,
                capacity: place.capacity,
                segments: segments(place.capacity, &days, self.tail),
            });
        }

        info!(
            tenant_id = %tenant_id,
            places = result.len(),
            "Computed availability"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{place, MockPlaces, MockReservations};
    use chrono::NaiveDate;
    use moorage_shared::new_id;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(date(start), date(end)).unwrap()
    }

    #[tokio::test]
    async fn test_occupancy_unknown_place_is_place_not_found() {
        let tenant_id = new_id();
        let mut places = MockPlaces::new();
        places.expect_find_by_id().returning(|_, _| Ok(None));
        let reservations = MockReservations::new();

        let service = AvailabilityService::new(
            Arc::new(places),
            Arc::new(reservations),
            TailPolicy::Closed,
        );

        let err = service
            .occupancy(tenant_id, new_id(), range("2025-06-10", "2025-06-12"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::PlaceNotFound));
    }

    #[tokio::test]
    async fn test_occupancy_passes_ledger_through() {
        let tenant_id = new_id();
        let known = place(tenant_id, 3);
        let place_id = known.id;

        let mut places = MockPlaces::new();
        places
            .expect_find_by_id()
            .returning(move |_, _| Ok(Some(known.clone())));

        let mut reservations = MockReservations::new();
        reservations.expect_daily_occupancy().returning(|_, _, r| {
            Ok(r.days()
                .map(|day| DayOccupancy { day, occupied: 1 })
                .collect())
        });

        let service = AvailabilityService::new(
            Arc::new(places),
            Arc::new(reservations),
            TailPolicy::Closed,
        );

        let days = service
            .occupancy(tenant_id, place_id, range("2025-06-10", "2025-06-12"))
            .await
            .unwrap();
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].day, date("2025-06-10"));
        assert!(days.iter().all(|d| d.occupied == 1));
    }

    #[tokio::test]
    async fn test_availability_skips_inactive_places_and_segments_the_rest() {
        let tenant_id = new_id();
        let active = place(tenant_id, 2);
        let mut retired = place(tenant_id, 2);
        retired.deactivate();

        let mut places = MockPlaces::new();
        let listing = vec![active.clone(), retired];
        places
            .expect_list_by_tenant()
            .returning(move |_| Ok(listing.clone()));

        let mut reservations = MockReservations::new();
        // free = [2, 0, 1]: one full day in the middle
        reservations.expect_daily_occupancy().returning(|_, _, r| {
            let occ = [0, 2, 1];
            Ok(r.days()
                .zip(occ)
                .map(|(day, occupied)| DayOccupancy { day, occupied })
                .collect())
        });

        let service = AvailabilityService::new(
            Arc::new(places),
            Arc::new(reservations),
            TailPolicy::Closed,
        );

        let result = service
            .availability(tenant_id, range("2025-07-01", "2025-07-03"))
            .await
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].place_id, active.id);
        assert_eq!(result[0].segments.len(), 2);
        assert_eq!(result[0].segments[0].min_free, 2);
        assert_eq!(result[0].segments[1].min_free, 1);
    }
}
