//! Trip repository for database operations.

use domain::models::{CreateTripRequest, TripFeedFilters, UpdateTripRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{TripEntity, TripWithHostEntity};
use crate::metrics::QueryTimer;

const TRIP_COLUMNS: &str = "id, user_id, host_id, title, destination, start_date, end_date, \
     description, open_slots, budget_min, budget_max, preferences, status, \
     current_participants, created_at, updated_at";

const TRIP_WITH_HOST_COLUMNS: &str = "t.id, t.title, t.destination, t.start_date, t.end_date, \
     t.open_slots, t.current_participants, t.budget_min, t.budget_max, t.status, \
     t.host_id, u.email as host_email, u.display_name as host_display_name, \
     u.created_at as host_created_at";

/// Repository for trip-related database operations.
#[derive(Clone)]
pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    /// Creates a new TripRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create a new trip and enroll the host as its first participant.
    ///
    /// Runs in one transaction so a failure leaves neither row behind; the
    /// participant counter is seeded at 1 for the host.
    pub async fn create(
        &self,
        host_id: Uuid,
        payload: &CreateTripRequest,
    ) -> Result<TripEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_trip");

        let mut tx = self.pool.begin().await?;

        let trip = sqlx::query_as::<_, TripEntity>(&format!(
            r#"
            INSERT INTO trips (user_id, host_id, title, destination, start_date, end_date,
                               description, open_slots, budget_min, budget_max, preferences,
                               current_participants)
            VALUES ($1, $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 1)
            RETURNING {TRIP_COLUMNS}
            "#,
        ))
        .bind(host_id)
        .bind(&payload.title)
        .bind(&payload.destination)
        .bind(payload.start_date)
        .bind(payload.end_date)
        .bind(payload.description.as_deref())
        .bind(payload.open_slots)
        .bind(payload.budget_min)
        .bind(payload.budget_max)
        .bind(&payload.preferences)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO trip_participants (trip_id, user_id, role)
            VALUES ($1, $2, 'host')
            "#,
        )
        .bind(trip.id)
        .bind(host_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(trip)
    }

    /// Find a trip by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TripEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_trip_by_id");
        let result = sqlx::query_as::<_, TripEntity>(&format!(
            r#"
            SELECT {TRIP_COLUMNS}
            FROM trips
            WHERE id = $1
            "#,
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Feed page of active trips matching the filters, ordered by start date.
    ///
    /// Filter predicates are null-tolerant so one static query covers every
    /// combination; budget filters test for range overlap, matching trips
    /// with no budget set.
    pub async fn feed(
        &self,
        filters: &TripFeedFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TripWithHostEntity>, sqlx::Error> {
        let timer = QueryTimer::new("trip_feed");
        let result = sqlx::query_as::<_, TripWithHostEntity>(&format!(
            r#"
            SELECT {TRIP_WITH_HOST_COLUMNS}
            FROM trips t
            JOIN users u ON t.host_id = u.id
            WHERE t.status = 'active'
              AND ($1::text IS NULL OR t.destination ILIKE '%' || $1 || '%')
              AND ($2::date IS NULL OR t.start_date >= $2)
              AND ($3::date IS NULL OR t.start_date <= $3)
              AND ($4::double precision IS NULL OR t.budget_max IS NULL OR t.budget_max >= $4)
              AND ($5::double precision IS NULL OR t.budget_min IS NULL OR t.budget_min <= $5)
              AND (NOT $6 OR t.current_participants < t.open_slots)
            ORDER BY t.start_date ASC
            LIMIT $7 OFFSET $8
            "#,
        ))
        .bind(filters.destination.as_deref())
        .bind(filters.start_date_from)
        .bind(filters.start_date_to)
        .bind(filters.budget_min)
        .bind(filters.budget_max)
        .bind(filters.available_slots_only)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Total count of feed rows for the same filters.
    pub async fn feed_count(&self, filters: &TripFeedFilters) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("trip_feed_count");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM trips t
            WHERE t.status = 'active'
              AND ($1::text IS NULL OR t.destination ILIKE '%' || $1 || '%')
              AND ($2::date IS NULL OR t.start_date >= $2)
              AND ($3::date IS NULL OR t.start_date <= $3)
              AND ($4::double precision IS NULL OR t.budget_max IS NULL OR t.budget_max >= $4)
              AND ($5::double precision IS NULL OR t.budget_min IS NULL OR t.budget_min <= $5)
              AND (NOT $6 OR t.current_participants < t.open_slots)
            "#,
        )
        .bind(filters.destination.as_deref())
        .bind(filters.start_date_from)
        .bind(filters.start_date_to)
        .bind(filters.budget_min)
        .bind(filters.budget_max)
        .bind(filters.available_slots_only)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Trips the user hosts or participates in, deduplicated, newest first.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<TripWithHostEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_trips_for_user");
        let result = sqlx::query_as::<_, TripWithHostEntity>(&format!(
            r#"
            SELECT {TRIP_WITH_HOST_COLUMNS}
            FROM trips t
            JOIN users u ON t.host_id = u.id
            WHERE t.host_id = $1
               OR EXISTS (
                      SELECT 1 FROM trip_participants p
                      WHERE p.trip_id = t.id AND p.user_id = $1
                  )
            ORDER BY t.created_at DESC
            "#,
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Apply a partial update. Absent fields keep their stored values.
    pub async fn update_partial(
        &self,
        id: Uuid,
        update: &UpdateTripRequest,
    ) -> Result<Option<TripEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_trip");
        let result = sqlx::query_as::<_, TripEntity>(&format!(
            r#"
            UPDATE trips
            SET title = COALESCE($2, title),
                destination = COALESCE($3, destination),
                start_date = COALESCE($4, start_date),
                end_date = COALESCE($5, end_date),
                description = COALESCE($6, description),
                open_slots = COALESCE($7, open_slots),
                budget_min = COALESCE($8, budget_min),
                budget_max = COALESCE($9, budget_max),
                preferences = COALESCE($10, preferences),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {TRIP_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(update.title.as_deref())
        .bind(update.destination.as_deref())
        .bind(update.start_date)
        .bind(update.end_date)
        .bind(update.description.as_deref())
        .bind(update.open_slots)
        .bind(update.budget_min)
        .bind(update.budget_max)
        .bind(update.preferences.as_ref())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Soft-cancel a trip. Unconditional: cancelling an already cancelled
    /// trip rewrites the same status.
    pub async fn cancel(&self, id: Uuid) -> Result<Option<TripEntity>, sqlx::Error> {
        let timer = QueryTimer::new("cancel_trip");
        let result = sqlx::query_as::<_, TripEntity>(&format!(
            r#"
            UPDATE trips
            SET status = 'cancelled', updated_at = NOW()
            WHERE id = $1
            RETURNING {TRIP_COLUMNS}
            "#,
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Distinct destinations of active trips matching the prefix query.
    pub async fn search_destinations(
        &self,
        query: &str,
        limit: i64,
    ) -> Result<Vec<String>, sqlx::Error> {
        let timer = QueryTimer::new("search_trip_destinations");
        let result = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT destination
            FROM trips
            WHERE status = 'active' AND destination ILIKE '%' || $1 || '%'
            ORDER BY destination
            LIMIT $2
            "#,
        )
        .bind(query)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: TripRepository tests require a database connection and are covered by integration tests
}
