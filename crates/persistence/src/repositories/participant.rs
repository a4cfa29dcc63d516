//! Trip participant repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ParticipantWithUserEntity, TripParticipantEntity, TripWithHostEntity};
use crate::metrics::QueryTimer;

const PARTICIPANT_COLUMNS: &str = "id, trip_id, user_id, role, joined_at";

/// Repository for trip membership database operations.
#[derive(Clone)]
pub struct ParticipantRepository {
    pool: PgPool,
}

impl ParticipantRepository {
    /// Creates a new ParticipantRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Roster for a trip with member profiles, host first, then join order.
    pub async fn list_for_trip(
        &self,
        trip_id: Uuid,
    ) -> Result<Vec<ParticipantWithUserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_participants_for_trip");
        let result = sqlx::query_as::<_, ParticipantWithUserEntity>(
            r#"
            SELECT p.id, p.trip_id, p.user_id, p.role, p.joined_at,
                   u.email, u.display_name, u.created_at as user_created_at
            FROM trip_participants p
            JOIN users u ON p.user_id = u.id
            WHERE p.trip_id = $1
            ORDER BY p.role = 'host' DESC, p.joined_at ASC
            "#,
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find the membership row for a user on a trip.
    pub async fn find_for_trip_user(
        &self,
        trip_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<TripParticipantEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_participant_for_trip_user");
        let result = sqlx::query_as::<_, TripParticipantEntity>(&format!(
            r#"
            SELECT {PARTICIPANT_COLUMNS}
            FROM trip_participants
            WHERE trip_id = $1 AND user_id = $2
            "#,
        ))
        .bind(trip_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check whether the user is a member of the trip (any role).
    pub async fn is_participant(&self, trip_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_is_participant");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM trip_participants WHERE trip_id = $1 AND user_id = $2)
            "#,
        )
        .bind(trip_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Remove a non-host participant and release their slot.
    ///
    /// One transaction deletes the membership row and decrements the trip's
    /// participant counter; the counter is untouched when no row matched.
    /// Returns the number of rows removed (0 or 1).
    pub async fn remove(&self, trip_id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("remove_participant");

        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query(
            r#"
            DELETE FROM trip_participants
            WHERE trip_id = $1 AND user_id = $2 AND role = 'participant'
            "#,
        )
        .bind(trip_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if deleted > 0 {
            sqlx::query(
                r#"
                UPDATE trips
                SET current_participants = current_participants - 1, updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(trip_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();
        Ok(deleted)
    }

    /// Trips the user is enrolled in, newest membership first.
    pub async fn list_trips_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<TripWithHostEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_participations_for_user");
        let result = sqlx::query_as::<_, TripWithHostEntity>(
            r#"
            SELECT t.id, t.title, t.destination, t.start_date, t.end_date,
                   t.open_slots, t.current_participants, t.budget_min, t.budget_max, t.status,
                   t.host_id, u.email as host_email, u.display_name as host_display_name,
                   u.created_at as host_created_at
            FROM trip_participants p
            JOIN trips t ON p.trip_id = t.id
            JOIN users u ON t.host_id = u.id
            WHERE p.user_id = $1
            ORDER BY p.joined_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: ParticipantRepository tests require a database connection and are covered by integration tests
}
