//! # Bus Catalog Repository
//!
//! Read access to buses and their seat maps, plus catalog loading.
//!
//! All queries here are read-only with one exception: [`BusRepository::insert_with_seats`]
//! creates a bus together with its full seat grid in a single transaction, so
//! the `available_seats` counter starts out equal to the number of seat rows
//! it describes. After that point the counter is mutated only by the
//! reservation ledger.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use busline_core::layout::{seat_numbers, seat_position};
use busline_core::{Bus, Gender, NewBus, Seat, SeatStatus};

/// Repository for bus catalog operations.
#[derive(Debug, Clone)]
pub struct BusRepository {
    pool: SqlitePool,
}

impl BusRepository {
    /// Creates a new BusRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BusRepository { pool }
    }

    /// Lists all buses in the catalog.
    pub async fn list(&self) -> DbResult<Vec<Bus>> {
        let buses: Vec<Bus> = sqlx::query_as::<_, Bus>(
            r#"
            SELECT
                id, name, origin, destination, distance_km,
                start_time, end_time, travel_time,
                available_seats, seat_price_cents
            FROM buses
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(buses)
    }

    /// Gets a bus by ID.
    pub async fn get_by_id(&self, bus_id: i64) -> DbResult<Option<Bus>> {
        let bus: Option<Bus> = sqlx::query_as::<_, Bus>(
            r#"
            SELECT
                id, name, origin, destination, distance_km,
                start_time, end_time, travel_time,
                available_seats, seat_price_cents
            FROM buses
            WHERE id = ?1
            "#,
        )
        .bind(bus_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(bus)
    }

    /// Inserts a bus together with its seat grid.
    ///
    /// ## What This Does
    /// 1. Inserts the bus row with `available_seats = seat_count`
    /// 2. Inserts `seat_count` seat rows numbered 1..=seat_count, all
    ///    Available, each priced at the bus fare, laid out 4 to a row
    ///
    /// Both steps run in one transaction so no reader ever observes a bus
    /// whose counter disagrees with its seat rows.
    ///
    /// ## Returns
    /// The created bus with its assigned ID.
    pub async fn insert_with_seats(&self, new_bus: &NewBus, seat_count: i64) -> DbResult<Bus> {
        debug!(name = %new_bus.name, seat_count, "Inserting bus with seat grid");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO buses (
                name, origin, destination, distance_km,
                start_time, end_time, travel_time,
                available_seats, seat_price_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&new_bus.name)
        .bind(&new_bus.origin)
        .bind(&new_bus.destination)
        .bind(new_bus.distance_km)
        .bind(&new_bus.start_time)
        .bind(&new_bus.end_time)
        .bind(&new_bus.travel_time)
        .bind(seat_count)
        .bind(new_bus.seat_price_cents)
        .execute(&mut *tx)
        .await?;

        let bus_id = result.last_insert_rowid();

        for seat_no in seat_numbers(seat_count) {
            let pos = seat_position(seat_no);
            sqlx::query(
                r#"
                INSERT INTO seats (bus_id, seat_no, status, price_cents, gender, row_no, col_no)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(bus_id)
            .bind(seat_no)
            .bind(SeatStatus::Available)
            .bind(new_bus.seat_price_cents)
            .bind(Gender::Male)
            .bind(pos.row_no)
            .bind(pos.col_no)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(Bus {
            id: bus_id,
            name: new_bus.name.clone(),
            origin: new_bus.origin.clone(),
            destination: new_bus.destination.clone(),
            distance_km: new_bus.distance_km,
            start_time: new_bus.start_time.clone(),
            end_time: new_bus.end_time.clone(),
            travel_time: new_bus.travel_time.clone(),
            available_seats: seat_count,
            seat_price_cents: new_bus.seat_price_cents,
        })
    }

    /// Lists the full seat map for a bus, ordered by seat number.
    ///
    /// ## Errors
    /// Returns `NotFound` when the bus does not exist, so callers can tell
    /// "no such bus" apart from "bus with zero seats".
    pub async fn list_seats(&self, bus_id: i64) -> DbResult<Vec<Seat>> {
        if self.get_by_id(bus_id).await?.is_none() {
            return Err(DbError::not_found("Bus", bus_id));
        }

        let seats: Vec<Seat> = sqlx::query_as::<_, Seat>(
            r#"
            SELECT bus_id, seat_no, status, price_cents, gender, row_no, col_no
            FROM seats
            WHERE bus_id = ?1
            ORDER BY seat_no
            "#,
        )
        .bind(bus_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(seats)
    }

    /// Gets a single seat.
    pub async fn get_seat(&self, bus_id: i64, seat_no: i64) -> DbResult<Option<Seat>> {
        let seat: Option<Seat> = sqlx::query_as::<_, Seat>(
            r#"
            SELECT bus_id, seat_no, status, price_cents, gender, row_no, col_no
            FROM seats
            WHERE bus_id = ?1 AND seat_no = ?2
            "#,
        )
        .bind(bus_id)
        .bind(seat_no)
        .fetch_optional(&self.pool)
        .await?;

        Ok(seat)
    }

    /// Counts the seats currently Available for a bus, straight from the
    /// seat rows.
    ///
    /// The `buses.available_seats` counter must always equal this count.
    /// Tests use this to detect counter drift; production code reads the
    /// cached counter instead.
    pub async fn counted_available_seats(&self, bus_id: i64) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM seats
            WHERE bus_id = ?1 AND status = 'available'
            "#,
        )
        .bind(bus_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use busline_core::{DEFAULT_SEAT_COUNT, SEATS_PER_ROW};

    fn demo_bus() -> NewBus {
        NewBus {
            name: "Subash Express".into(),
            origin: "Tiruvannamalai".into(),
            destination: "Chennai".into(),
            distance_km: 190,
            start_time: "07:00:00".into(),
            end_time: "11:00:00".into(),
            travel_time: "4h".into(),
            seat_price_cents: 12000,
        }
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.buses();

        let bus = repo
            .insert_with_seats(&demo_bus(), DEFAULT_SEAT_COUNT)
            .await
            .unwrap();
        assert_eq!(bus.available_seats, 40);

        let buses = repo.list().await.unwrap();
        assert_eq!(buses.len(), 1);
        assert_eq!(buses[0].name, "Subash Express");

        let fetched = repo.get_by_id(bus.id).await.unwrap().unwrap();
        assert_eq!(fetched.seat_price_cents, 12000);

        assert!(repo.get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_seat_grid_layout() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.buses();

        let bus = repo.insert_with_seats(&demo_bus(), 40).await.unwrap();
        let seats = repo.list_seats(bus.id).await.unwrap();

        assert_eq!(seats.len(), 40);
        // Seat numbers are 1-based and contiguous
        assert_eq!(seats[0].seat_no, 1);
        assert_eq!(seats[39].seat_no, 40);
        // All start Available at the bus fare
        assert!(seats.iter().all(|s| s.is_available()));
        assert!(seats.iter().all(|s| s.price_cents == 12000));
        // 4-abreast grid: seat 5 starts the second row
        assert_eq!(seats[4].row_no, 1);
        assert_eq!(seats[4].col_no, 0);
        assert_eq!(SEATS_PER_ROW, 4);
    }

    #[tokio::test]
    async fn test_seats_of_missing_bus() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db.buses().list_seats(42).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_counted_available_matches_counter() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.buses();

        let bus = repo.insert_with_seats(&demo_bus(), 12).await.unwrap();
        let counted = repo.counted_available_seats(bus.id).await.unwrap();
        assert_eq!(counted, bus.available_seats);
    }
}
