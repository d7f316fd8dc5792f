//! Repository for the `requests` table.

use hopelink_core::types::DbId;
use hopelink_core::workflow::{Actor, EntityType};
use sqlx::{PgExecutor, PgPool};

use crate::models::request::{CreateRequest, Request};
use crate::models::status_change::NewStatusChange;
use crate::models::ListFilter;
use crate::repositories::StatusChangeRepo;

/// Request columns joined with the recipient's name.
const SELECT: &str = "SELECT r.id, r.recipient_id, p.full_name AS recipient_name, \
     r.donation_id, r.title, r.description, r.urgency, r.status, \
     r.created_at, r.updated_at \
     FROM requests r LEFT JOIN profiles p ON p.id = r.recipient_id";

/// Provides create and read operations for requests.
pub struct RequestRepo;

impl RequestRepo {
    /// Insert a request at its initial stage and record the creation in the
    /// status history.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRequest,
        actor: Actor,
    ) -> Result<Request, sqlx::Error> {
        let initial = EntityType::Request.initial_stage().id;
        let mut tx = pool.begin().await?;

        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO requests (recipient_id, donation_id, title, description, urgency, status)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'normal'), $6)
             RETURNING id",
        )
        .bind(input.recipient_id)
        .bind(input.donation_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.urgency)
        .bind(initial)
        .fetch_one(&mut *tx)
        .await?;

        StatusChangeRepo::insert(
            &mut *tx,
            &NewStatusChange {
                entity_type: EntityType::Request.as_str(),
                entity_id: id,
                from_status: None,
                to_status: initial,
                actor: actor.as_str(),
                note: None,
            },
        )
        .await?;

        let request = Self::fetch(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(request)
    }

    async fn fetch<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<Request, sqlx::Error> {
        let query = format!("{SELECT} WHERE r.id = $1");
        sqlx::query_as::<_, Request>(&query)
            .bind(id)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Request>, sqlx::Error> {
        let query = format!("{SELECT} WHERE r.id = $1");
        sqlx::query_as::<_, Request>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List requests, newest first.
    pub async fn list(pool: &PgPool, filter: &ListFilter) -> Result<Vec<Request>, sqlx::Error> {
        let query = format!(
            "{SELECT}
             WHERE ($1::text[] IS NULL OR r.status = ANY($1))
             ORDER BY r.created_at DESC, r.id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Request>(&query)
            .bind(&filter.statuses)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// Requests matched to a donation, oldest first.
    pub async fn list_by_donation(
        pool: &PgPool,
        donation_id: DbId,
    ) -> Result<Vec<Request>, sqlx::Error> {
        let query = format!("{SELECT} WHERE r.donation_id = $1 ORDER BY r.created_at, r.id");
        sqlx::query_as::<_, Request>(&query)
            .bind(donation_id)
            .fetch_all(pool)
            .await
    }
}
