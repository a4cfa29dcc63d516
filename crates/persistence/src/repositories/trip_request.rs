//! Trip request repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{RequestStatusDb, RequestWithContextEntity, TripRequestEntity, TripStatusDb};
use crate::metrics::QueryTimer;

const REQUEST_COLUMNS: &str = "id, trip_id, user_id, status, message, created_at, updated_at";

const REQUEST_WITH_CONTEXT_COLUMNS: &str = "r.id, r.trip_id, r.user_id, r.status, r.message, r.created_at, \
     ru.email as requester_email, ru.display_name as requester_display_name, \
     ru.created_at as requester_created_at, \
     t.title as trip_title, t.destination as trip_destination, \
     t.start_date as trip_start_date, t.end_date as trip_end_date, \
     t.open_slots as trip_open_slots, t.current_participants as trip_current_participants, \
     t.budget_min as trip_budget_min, t.budget_max as trip_budget_max, \
     t.status as trip_status, \
     t.host_id, hu.email as host_email, hu.display_name as host_display_name, \
     hu.created_at as host_created_at";

/// Outcome of the acceptance transaction, resolved under the trip row lock.
#[derive(Debug)]
pub enum AcceptOutcome {
    Accepted(TripRequestEntity),
    NotFound,
    RequestNotPending,
    TripNotActive,
    NoOpenSlots,
}

/// Repository for join-request database operations.
#[derive(Clone)]
pub struct TripRequestRepository {
    pool: PgPool,
}

impl TripRequestRepository {
    /// Creates a new TripRequestRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new pending request.
    pub async fn create(
        &self,
        trip_id: Uuid,
        user_id: Uuid,
        message: Option<&str>,
    ) -> Result<TripRequestEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_trip_request");
        let result = sqlx::query_as::<_, TripRequestEntity>(&format!(
            r#"
            INSERT INTO trip_requests (trip_id, user_id, message)
            VALUES ($1, $2, $3)
            RETURNING {REQUEST_COLUMNS}
            "#,
        ))
        .bind(trip_id)
        .bind(user_id)
        .bind(message)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a request by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TripRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_trip_request_by_id");
        let result = sqlx::query_as::<_, TripRequestEntity>(&format!(
            r#"
            SELECT {REQUEST_COLUMNS}
            FROM trip_requests
            WHERE id = $1
            "#,
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a request with requester and trip context by ID.
    pub async fn find_view(
        &self,
        id: Uuid,
    ) -> Result<Option<RequestWithContextEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_trip_request_view");
        let result = sqlx::query_as::<_, RequestWithContextEntity>(&format!(
            r#"
            SELECT {REQUEST_WITH_CONTEXT_COLUMNS}
            FROM trip_requests r
            JOIN users ru ON r.user_id = ru.id
            JOIN trips t ON r.trip_id = t.id
            JOIN users hu ON t.host_id = hu.id
            WHERE r.id = $1
            "#,
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check whether the user already has a request (any status) for the trip.
    pub async fn exists_for(&self, trip_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_trip_request_exists");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM trip_requests WHERE trip_id = $1 AND user_id = $2)
            "#,
        )
        .bind(trip_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Requests for a trip with requester and trip context, newest first.
    pub async fn list_for_trip(
        &self,
        trip_id: Uuid,
    ) -> Result<Vec<RequestWithContextEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_trip_requests_for_trip");
        let result = sqlx::query_as::<_, RequestWithContextEntity>(&format!(
            r#"
            SELECT {REQUEST_WITH_CONTEXT_COLUMNS}
            FROM trip_requests r
            JOIN users ru ON r.user_id = ru.id
            JOIN trips t ON r.trip_id = t.id
            JOIN users hu ON t.host_id = hu.id
            WHERE r.trip_id = $1
            ORDER BY r.created_at DESC
            "#,
        ))
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Requests submitted by the user, newest first.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RequestWithContextEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_trip_requests_for_user");
        let result = sqlx::query_as::<_, RequestWithContextEntity>(&format!(
            r#"
            SELECT {REQUEST_WITH_CONTEXT_COLUMNS}
            FROM trip_requests r
            JOIN users ru ON r.user_id = ru.id
            JOIN trips t ON r.trip_id = t.id
            JOIN users hu ON t.host_id = hu.id
            WHERE r.user_id = $1
            ORDER BY r.created_at DESC
            "#,
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Accept a pending request: the authoritative capacity gate.
    ///
    /// One transaction locks the trip row, re-checks liveness and capacity,
    /// inserts the participant row, bumps the counter, and flips the request
    /// status. Any refusal rolls back and reports why; two hosts racing on
    /// the last slot serialize on the row lock so at most one succeeds.
    pub async fn accept(&self, request_id: Uuid) -> Result<AcceptOutcome, sqlx::Error> {
        let timer = QueryTimer::new("accept_trip_request");

        let mut tx = self.pool.begin().await?;

        let request = sqlx::query_as::<_, TripRequestEntity>(&format!(
            r#"
            SELECT {REQUEST_COLUMNS}
            FROM trip_requests
            WHERE id = $1
            FOR UPDATE
            "#,
        ))
        .bind(request_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(request) = request else {
            timer.record();
            return Ok(AcceptOutcome::NotFound);
        };
        if request.status != RequestStatusDb::Pending {
            timer.record();
            return Ok(AcceptOutcome::RequestNotPending);
        }

        let trip = sqlx::query_as::<_, (TripStatusDb, i32, i32)>(
            r#"
            SELECT status, open_slots, current_participants
            FROM trips
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(request.trip_id)
        .fetch_one(&mut *tx)
        .await?;

        let (status, open_slots, current_participants) = trip;
        if status != TripStatusDb::Active {
            timer.record();
            return Ok(AcceptOutcome::TripNotActive);
        }
        if current_participants >= open_slots {
            timer.record();
            return Ok(AcceptOutcome::NoOpenSlots);
        }

        sqlx::query(
            r#"
            INSERT INTO trip_participants (trip_id, user_id, role)
            VALUES ($1, $2, 'participant')
            "#,
        )
        .bind(request.trip_id)
        .bind(request.user_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE trips
            SET current_participants = current_participants + 1, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(request.trip_id)
        .execute(&mut *tx)
        .await?;

        let updated = sqlx::query_as::<_, TripRequestEntity>(&format!(
            r#"
            UPDATE trip_requests
            SET status = 'accepted', updated_at = NOW()
            WHERE id = $1
            RETURNING {REQUEST_COLUMNS}
            "#,
        ))
        .bind(request_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(AcceptOutcome::Accepted(updated))
    }

    /// Reject a pending request. Returns None if the request is missing or
    /// no longer pending.
    pub async fn reject(&self, request_id: Uuid) -> Result<Option<TripRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("reject_trip_request");
        let result = sqlx::query_as::<_, TripRequestEntity>(&format!(
            r#"
            UPDATE trip_requests
            SET status = 'rejected', updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {REQUEST_COLUMNS}
            "#,
        ))
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a request regardless of status. Accepted membership is
    /// unaffected; only the request record disappears.
    pub async fn delete(&self, request_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_trip_request");
        let result = sqlx::query(
            r#"
            DELETE FROM trip_requests
            WHERE id = $1
            "#,
        )
        .bind(request_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    // Note: TripRequestRepository tests require a database connection and are covered by integration tests
}
