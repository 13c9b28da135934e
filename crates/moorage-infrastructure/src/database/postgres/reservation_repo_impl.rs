//! PostgreSQL reservation repository
//!
//! Owns the transactional discipline that closes the check-then-act race:
//! `admit` and `reschedule` lock the place row for the duration of one
//! transaction, so two concurrent admissions for the same place can never
//! both pass the capacity check. Lock waits are bounded by a per-transaction
//! `lock_timeout`; expiry surfaces as the retryable `Contention` error.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use tracing::{error, info, warn};
use uuid::Uuid;

use moorage_core::domain::{
    DayOccupancy, Reservation, ReservationDetail, ReservationDraft, ReservationView, ServiceFlags,
};
use moorage_core::error::DomainError;
use moorage_core::repositories::ReservationRepository;
use moorage_shared::DateRange;

// Postgres "lock_not_available", raised when lock_timeout expires.
const LOCK_NOT_AVAILABLE: &str = "55P03";

pub struct PgReservationRepository {
    pool: PgPool,
    lock_timeout_ms: u64,
}

impl PgReservationRepository {
    pub fn new(pool: PgPool, lock_timeout_ms: u64) -> Self {
        Self {
            pool,
            lock_timeout_ms,
        }
    }

    async fn begin_guarded(&self) -> Result<Transaction<'_, Postgres>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(to_domain)?;
        sqlx::query("SELECT set_config('lock_timeout', $1, true)")
            .bind(format!("{}ms", self.lock_timeout_ms))
            .execute(&mut *tx)
            .await
            .map_err(to_domain)?;
        Ok(tx)
    }

    /// Locks the place row for the rest of the transaction and returns its
    /// capacity. The lock serializes same-place admissions.
    async fn lock_place(
        tx: &mut Transaction<'_, Postgres>,
        tenant_id: Uuid,
        place_id: Uuid,
        require_active: bool,
    ) -> Result<i32, DomainError> {
        let row: Option<(i32,)> = sqlx::query_as(
            r#"
            SELECT capacity FROM places
            WHERE id = $1 AND tenant_id = $2 AND (is_active OR NOT $3)
            FOR UPDATE
            "#,
        )
        .bind(place_id)
        .bind(tenant_id)
        .bind(require_active)
        .fetch_optional(&mut **tx)
        .await
        .map_err(to_domain)?;

        row.map(|(capacity,)| capacity)
            .ok_or(DomainError::PlaceNotFound)
    }

    /// Maximum per-day occupancy of the place over the inclusive span,
    /// optionally excluding one reservation's own row.
    async fn max_occupancy(
        tx: &mut Transaction<'_, Postgres>,
        tenant_id: Uuid,
        place_id: Uuid,
        span: DateRange,
        exclude: Option<Uuid>,
    ) -> Result<i64, DomainError> {
        let (max_occupied,): (i64,) = sqlx::query_as(
            r#"
            SELECT COALESCE(MAX(per_day.occupied), 0)
            FROM (
                SELECT COUNT(DISTINCT r.id) AS occupied
                FROM generate_series($3::date, $4::date, interval '1 day') AS gs(day)
                JOIN reservation_details d
                    ON gs.day::date BETWEEN d.entry_date AND d.exit_date
                JOIN reservations r
                    ON r.id = d.reservation_id
                WHERE r.place_id = $1
                  AND r.tenant_id = $2
                  AND ($5::uuid IS NULL OR r.id <> $5)
                GROUP BY gs.day
            ) AS per_day
            "#,
        )
        .bind(place_id)
        .bind(tenant_id)
        .bind(span.start)
        .bind(span.end)
        .bind(exclude)
        .fetch_one(&mut **tx)
        .await
        .map_err(to_domain)?;

        Ok(max_occupied)
    }
}

fn to_domain(e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some(LOCK_NOT_AVAILABLE) {
            warn!("Lock timeout during reservation transaction");
            return DomainError::Contention;
        }
    }
    error!("Database error: {}", e);
    DomainError::DatabaseError(e.to_string())
}

// Internal row types for SQLx mapping

#[derive(Debug, FromRow)]
struct DayRow {
    day: NaiveDate,
    occupied: i64,
}

#[derive(Debug, FromRow)]
struct ReservationRow {
    id: Uuid,
    tenant_id: Uuid,
    place_id: Uuid,
    user_id: Uuid,
    booked_on: NaiveDate,
    entry_date: NaiveDate,
    exit_date: NaiveDate,
    vessel_type: String,
    requires_painting: bool,
    requires_mechanic: bool,
    requires_engine: bool,
}

impl From<ReservationRow> for (Reservation, ReservationDetail) {
    fn from(row: ReservationRow) -> Self {
        (
            Reservation {
                id: row.id,
                tenant_id: row.tenant_id,
                place_id: row.place_id,
                user_id: row.user_id,
                booked_on: row.booked_on,
            },
            ReservationDetail {
                reservation_id: row.id,
                entry_date: row.entry_date,
                exit_date: row.exit_date,
                vessel_type: row.vessel_type,
                flags: ServiceFlags {
                    painting: row.requires_painting,
                    mechanic: row.requires_mechanic,
                    engine: row.requires_engine,
                },
            },
        )
    }
}

#[derive(Debug, FromRow)]
struct ViewRow {
    id: Uuid,
    booked_on: NaiveDate,
    entry_date: NaiveDate,
    exit_date: NaiveDate,
    vessel_type: String,
    requires_painting: bool,
    requires_mechanic: bool,
    requires_engine: bool,
    user_id: Uuid,
    user_name: String,
    place_id: Uuid,
    place_name: String,
}

impl From<ViewRow> for ReservationView {
    fn from(row: ViewRow) -> Self {
        ReservationView {
            id: row.id,
            booked_on: row.booked_on,
            entry_date: row.entry_date,
            exit_date: row.exit_date,
            vessel_type: row.vessel_type,
            flags: ServiceFlags {
                painting: row.requires_painting,
                mechanic: row.requires_mechanic,
                engine: row.requires_engine,
            },
            user_id: row.user_id,
            user_name: row.user_name,
            place_id: row.place_id,
            place_name: row.place_name,
        }
    }
}

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    async fn daily_occupancy(
        &self,
        tenant_id: Uuid,
        place_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<DayOccupancy>, DomainError> {
        let rows: Vec<DayRow> = sqlx::query_as(
            r#"
            SELECT gs.day::date AS day,
                   COUNT(DISTINCT d.reservation_id) AS occupied
            FROM generate_series($3::date, $4::date, interval '1 day') AS gs(day)
            LEFT JOIN reservations r
                ON r.place_id = $1 AND r.tenant_id = $2
            LEFT JOIN reservation_details d
                ON d.reservation_id = r.id
               AND gs.day::date BETWEEN d.entry_date AND d.exit_date
            GROUP BY gs.day
            ORDER BY gs.day
            "#,
        )
        .bind(place_id)
        .bind(tenant_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await
        .map_err(to_domain)?;

        Ok(rows
            .into_iter()
            .map(|r| DayOccupancy {
                day: r.day,
                occupied: r.occupied,
            })
            .collect())
    }

    async fn admit(
        &self,
        tenant_id: Uuid,
        draft: &ReservationDraft,
        booked_on: NaiveDate,
    ) -> Result<Uuid, DomainError> {
        let mut tx = self.begin_guarded().await?;

        // Returning early drops the transaction, which rolls it back.
        let capacity = Self::lock_place(&mut tx, tenant_id, draft.place_id, true).await?;

        let span = DateRange::new(draft.entry_date, draft.exit_date)
            .map_err(|_| DomainError::InvalidRange)?;
        let max_occupied =
            Self::max_occupancy(&mut tx, tenant_id, draft.place_id, span, None).await?;
        if max_occupied >= i64::from(capacity) {
            warn!(
                tenant_id = %tenant_id,
                place_id = %draft.place_id,
                max_occupied,
                capacity,
                "Admission rejected: capacity exceeded"
            );
            return Err(DomainError::CapacityExceeded);
        }

        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO reservations (id, tenant_id, place_id, user_id, booked_on)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(tenant_id)
        .bind(draft.place_id)
        .bind(draft.user_id)
        .bind(booked_on)
        .fetch_one(&mut *tx)
        .await
        .map_err(to_domain)?;

        sqlx::query(
            r#"
            INSERT INTO reservation_details (
                reservation_id, entry_date, exit_date, vessel_type,
                requires_painting, requires_mechanic, requires_engine
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id)
        .bind(draft.entry_date)
        .bind(draft.exit_date)
        .bind(&draft.vessel_type)
        .bind(draft.flags.painting)
        .bind(draft.flags.mechanic)
        .bind(draft.flags.engine)
        .execute(&mut *tx)
        .await
        .map_err(to_domain)?;

        tx.commit().await.map_err(to_domain)?;

        info!(tenant_id = %tenant_id, reservation_id = %id, "Reservation persisted");
        Ok(id)
    }

    async fn reschedule(
        &self,
        envelope: &Reservation,
        detail: &ReservationDetail,
    ) -> Result<(), DomainError> {
        let mut tx = self.begin_guarded().await?;

        let capacity =
            Self::lock_place(&mut tx, envelope.tenant_id, envelope.place_id, false).await?;

        let span = DateRange::new(detail.entry_date, detail.exit_date)
            .map_err(|_| DomainError::InvalidRange)?;
        let max_occupied = Self::max_occupancy(
            &mut tx,
            envelope.tenant_id,
            envelope.place_id,
            span,
            Some(envelope.id),
        )
        .await?;
        if max_occupied >= i64::from(capacity) {
            return Err(DomainError::CapacityExceeded);
        }

        let updated = sqlx::query(
            r#"
            UPDATE reservations
            SET place_id = $3, user_id = $4
            WHERE id = $1 AND tenant_id = $2
            "#,
        )
        .bind(envelope.id)
        .bind(envelope.tenant_id)
        .bind(envelope.place_id)
        .bind(envelope.user_id)
        .execute(&mut *tx)
        .await
        .map_err(to_domain)?;
        if updated.rows_affected() == 0 {
            return Err(DomainError::NotFound);
        }

        sqlx::query(
            r#"
            UPDATE reservation_details
            SET entry_date = $2,
                exit_date = $3,
                vessel_type = $4,
                requires_painting = $5,
                requires_mechanic = $6,
                requires_engine = $7
            WHERE reservation_id = $1
            "#,
        )
        .bind(envelope.id)
        .bind(detail.entry_date)
        .bind(detail.exit_date)
        .bind(&detail.vessel_type)
        .bind(detail.flags.painting)
        .bind(detail.flags.mechanic)
        .bind(detail.flags.engine)
        .execute(&mut *tx)
        .await
        .map_err(to_domain)?;

        tx.commit().await.map_err(to_domain)?;

        info!(
            tenant_id = %envelope.tenant_id,
            reservation_id = %envelope.id,
            "Reservation rescheduled"
        );
        Ok(())
    }

    async fn find_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Option<(Reservation, ReservationDetail)>, DomainError> {
        let row: Option<ReservationRow> = sqlx::query_as(
            r#"
            SELECT r.id, r.tenant_id, r.place_id, r.user_id, r.booked_on,
                   d.entry_date, d.exit_date, d.vessel_type,
                   d.requires_painting, d.requires_mechanic, d.requires_engine
            FROM reservations r
            JOIN reservation_details d ON d.reservation_id = r.id
            WHERE r.id = $1 AND r.tenant_id = $2
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(to_domain)?;

        Ok(row.map(|r| r.into()))
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, DomainError> {
        // Detail row goes with the envelope via ON DELETE CASCADE.
        let result = sqlx::query(
            r#"
            DELETE FROM reservations
            WHERE id = $1 AND tenant_id = $2
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .execute(&self.pool)
        .await
        .map_err(to_domain)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        user_id: Option<Uuid>,
    ) -> Result<Vec<ReservationView>, DomainError> {
        let rows: Vec<ViewRow> = sqlx::query_as(
            r#"
            SELECT r.id, r.booked_on,
                   d.entry_date, d.exit_date, d.vessel_type,
                   d.requires_painting, d.requires_mechanic, d.requires_engine,
                   r.user_id, u.name AS user_name,
                   r.place_id, p.name AS place_name
            FROM reservations r
            JOIN reservation_details d ON d.reservation_id = r.id
            JOIN users u ON u.id = r.user_id
            JOIN places p ON p.id = r.place_id
            WHERE r.tenant_id = $1
              AND ($2::uuid IS NULL OR r.user_id = $2)
            ORDER BY d.entry_date DESC
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(to_domain)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}
