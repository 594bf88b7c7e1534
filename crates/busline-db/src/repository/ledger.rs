//! # Reservation Ledger
//!
//! The single write path for bookings. Every booking and cancellation
//! mutates three things in one SQLite transaction:
//!
//! 1. The seat's status column (`available` ↔ `booked`)
//! 2. The reservations table (insert ↔ delete)
//! 3. The bus's `available_seats` counter (decrement ↔ increment)
//!
//! ## Double-Booking Prevention
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Two Riders Race for Seat 7                                 │
//! │                                                                         │
//! │  Rider A                          Rider B                               │
//! │     │                                │                                  │
//! │     ▼                                ▼                                  │
//! │  BEGIN                            BEGIN                                 │
//! │  UPDATE seats SET status='booked' UPDATE seats ... (blocks on           │
//! │    WHERE ... AND                    SQLite's write lock until A         │
//! │    status='available'               commits)                            │
//! │  → 1 row affected                 → 0 rows affected                     │
//! │  INSERT reservation               ROLLBACK                              │
//! │  UPDATE counter -1                → SeatAlreadyBooked                   │
//! │  COMMIT                                                                 │
//! │     │                                │                                  │
//! │     ▼                                ▼                                  │
//! │  Confirmed                        Clean rejection                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The conditional UPDATE is the arbiter: whichever transaction commits it
//! first wins, and the loser observes zero affected rows. No application
//! mutex, no "held" state, no cleanup job.
//!
//! Transient `SQLITE_BUSY` errors (writer contention under load) are retried
//! a bounded number of times before surfacing.

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use busline_core::{BatchReceipt, Money, Reservation, ReservationView, SeatStatus};

/// How many times a booking retries after a transient write-lock conflict.
const BUSY_RETRIES: u32 = 3;

/// Repository owning all reservation writes.
#[derive(Debug, Clone)]
pub struct ReservationLedger {
    pool: SqlitePool,
}

impl ReservationLedger {
    /// Creates a new ReservationLedger.
    pub fn new(pool: SqlitePool) -> Self {
        ReservationLedger { pool }
    }

    // =========================================================================
    // Booking
    // =========================================================================

    /// Reserves a single seat for a user at the quoted cost.
    ///
    /// `cost_cents` is what gets recorded on the reservation row; the seat's
    /// catalog price is what the seat map displays.
    ///
    /// ## Errors
    /// - `NotFound` - bus or seat does not exist
    /// - `SeatAlreadyBooked` - the seat is held by another reservation
    /// - `ForeignKeyViolation` - the user id does not exist
    pub async fn reserve_seat(
        &self,
        user_id: i64,
        bus_id: i64,
        seat_no: i64,
        cost_cents: i64,
    ) -> DbResult<Reservation> {
        self.with_busy_retry(|| self.try_reserve_seat(user_id, bus_id, seat_no, cost_cents))
            .await
    }

    async fn try_reserve_seat(
        &self,
        user_id: i64,
        bus_id: i64,
        seat_no: i64,
        cost_cents: i64,
    ) -> DbResult<Reservation> {
        debug!(user_id, bus_id, seat_no, "Reserving seat");

        let mut tx = self.pool.begin().await?;

        let reservation = flip_and_record(&mut tx, user_id, bus_id, seat_no, cost_cents).await?;
        decrement_counter(&mut tx, bus_id, 1).await?;

        tx.commit().await?;

        info!(
            user_id,
            bus_id,
            seat_no,
            reservation_id = reservation.id,
            "Seat reserved"
        );
        Ok(reservation)
    }

    /// Reserves several seats on one bus for a user, all-or-nothing.
    ///
    /// Every seat is charged `price_per_seat_cents`. Either every requested
    /// seat is booked and a receipt covering all of them is returned, or no
    /// seat changes state at all. A single unavailable (or nonexistent, or
    /// duplicated) seat fails the whole batch.
    pub async fn reserve_seats(
        &self,
        user_id: i64,
        bus_id: i64,
        seat_nos: &[i64],
        price_per_seat_cents: i64,
    ) -> DbResult<BatchReceipt> {
        self.with_busy_retry(|| {
            self.try_reserve_seats(user_id, bus_id, seat_nos, price_per_seat_cents)
        })
        .await
    }

    async fn try_reserve_seats(
        &self,
        user_id: i64,
        bus_id: i64,
        seat_nos: &[i64],
        price_per_seat_cents: i64,
    ) -> DbResult<BatchReceipt> {
        debug!(user_id, bus_id, seats = ?seat_nos, "Reserving seat batch");

        // The HTTP layer caps the per-seat price, but the ledger is also a
        // library entry point; reject a total that cannot fit in i64 before
        // any seat changes state.
        let total_cost = Money::from_cents(price_per_seat_cents)
            .checked_mul(seat_nos.len() as i64)
            .ok_or_else(|| {
                DbError::QueryFailed(format!(
                    "batch total for {} seats at {price_per_seat_cents} cents overflows",
                    seat_nos.len()
                ))
            })?;

        let mut tx = self.pool.begin().await?;

        for &seat_no in seat_nos {
            // A duplicated seat number fails its second flip with
            // SeatAlreadyBooked, rolling back the whole batch.
            flip_and_record(&mut tx, user_id, bus_id, seat_no, price_per_seat_cents).await?;
        }
        decrement_counter(&mut tx, bus_id, seat_nos.len() as i64).await?;

        tx.commit().await?;

        info!(
            user_id,
            bus_id,
            booked = seat_nos.len(),
            total_cost_cents = total_cost.cents(),
            "Seat batch reserved"
        );
        Ok(BatchReceipt {
            booked: seat_nos.len() as i64,
            total_cost_cents: total_cost.cents(),
        })
    }

    // =========================================================================
    // Cancellation
    // =========================================================================

    /// Cancels the reservation holding a seat.
    ///
    /// A seat is held by at most one reservation, so `(bus_id, seat_no)`
    /// identifies it. Deletes the reservation row, flips the seat back to
    /// Available and increments the bus counter, all in one transaction.
    /// The seat is immediately reservable again by anyone.
    ///
    /// ## Errors
    /// - `NotFound` - no reservation exists for this seat
    pub async fn cancel(&self, bus_id: i64, seat_no: i64) -> DbResult<()> {
        self.with_busy_retry(|| self.try_cancel(bus_id, seat_no)).await
    }

    async fn try_cancel(&self, bus_id: i64, seat_no: i64) -> DbResult<()> {
        debug!(bus_id, seat_no, "Cancelling reservation");

        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query(
            r#"
            DELETE FROM reservations
            WHERE bus_id = ?1 AND seat_no = ?2
            "#,
        )
        .bind(bus_id)
        .bind(seat_no)
        .execute(&mut *tx)
        .await?;

        if deleted.rows_affected() == 0 {
            return Err(DbError::not_found(
                "Reservation",
                format!("bus {bus_id}, seat {seat_no}"),
            ));
        }

        // The reservation existed, so the seat must be Booked.
        sqlx::query(
            r#"
            UPDATE seats SET status = ?3
            WHERE bus_id = ?1 AND seat_no = ?2
            "#,
        )
        .bind(bus_id)
        .bind(seat_no)
        .bind(SeatStatus::Available)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE buses SET available_seats = available_seats + 1
            WHERE id = ?1
            "#,
        )
        .bind(bus_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(bus_id, seat_no, "Reservation cancelled");
        Ok(())
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Lists a user's reservations joined with bus details, oldest first.
    ///
    /// Returns an empty vector when the user has no reservations; the caller
    /// decides how to present that.
    pub async fn list_for_user(&self, user_id: i64) -> DbResult<Vec<ReservationView>> {
        let views: Vec<ReservationView> = sqlx::query_as::<_, ReservationView>(
            r#"
            SELECT
                r.id        AS reservation_id,
                r.seat_no   AS seat_no,
                r.cost_cents AS cost_cents,
                b.id        AS bus_id,
                b.name      AS bus_name,
                b.origin    AS origin,
                b.destination AS destination,
                b.start_time AS start_time,
                b.end_time  AS end_time
            FROM reservations r
            JOIN buses b ON b.id = r.bus_id
            WHERE r.user_id = ?1
            ORDER BY r.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(views)
    }

    // =========================================================================
    // Retry Plumbing
    // =========================================================================

    /// Runs an operation, retrying on transient SQLite write-lock errors.
    async fn with_busy_retry<T, F, Fut>(&self, mut op: F) -> DbResult<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = DbResult<T>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Err(err) if err.is_busy() && attempt < BUSY_RETRIES => {
                    attempt += 1;
                    warn!(attempt, "Write-lock conflict, retrying booking operation");
                    tokio::time::sleep(std::time::Duration::from_millis(20 * attempt as u64))
                        .await;
                }
                other => return other,
            }
        }
    }
}

// =============================================================================
// Transaction Steps
// =============================================================================

/// Flips one seat to Booked and records the reservation, inside the caller's
/// transaction.
///
/// The conditional UPDATE is the double-booking arbiter: zero affected rows
/// means the seat is missing or already held, and the caller's transaction
/// rolls back untouched.
async fn flip_and_record(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: i64,
    bus_id: i64,
    seat_no: i64,
    cost_cents: i64,
) -> DbResult<Reservation> {
    let flipped = sqlx::query(
        r#"
        UPDATE seats SET status = ?3
        WHERE bus_id = ?1 AND seat_no = ?2 AND status = ?4
        "#,
    )
    .bind(bus_id)
    .bind(seat_no)
    .bind(SeatStatus::Booked)
    .bind(SeatStatus::Available)
    .execute(&mut **tx)
    .await?;

    if flipped.rows_affected() == 0 {
        // Distinguish "no such seat" from "seat taken".
        let exists: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT 1 FROM seats WHERE bus_id = ?1 AND seat_no = ?2
            "#,
        )
        .bind(bus_id)
        .bind(seat_no)
        .fetch_optional(&mut **tx)
        .await?;

        return Err(match exists {
            Some(_) => DbError::SeatAlreadyBooked { bus_id, seat_no },
            None => DbError::not_found("Seat", format!("bus {bus_id}, seat {seat_no}")),
        });
    }

    let created_at = Utc::now();
    let inserted = sqlx::query(
        r#"
        INSERT INTO reservations (user_id, bus_id, seat_no, cost_cents, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(user_id)
    .bind(bus_id)
    .bind(seat_no)
    .bind(cost_cents)
    .bind(created_at)
    .execute(&mut **tx)
    .await?;

    Ok(Reservation {
        id: inserted.last_insert_rowid(),
        user_id,
        bus_id,
        seat_no,
        cost_cents,
        created_at,
    })
}

/// Decrements the bus availability counter inside the caller's transaction.
async fn decrement_counter(
    tx: &mut Transaction<'_, Sqlite>,
    bus_id: i64,
    by: i64,
) -> DbResult<()> {
    sqlx::query(
        r#"
        UPDATE buses SET available_seats = available_seats - ?2
        WHERE id = ?1
        "#,
    )
    .bind(bus_id)
    .bind(by)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
