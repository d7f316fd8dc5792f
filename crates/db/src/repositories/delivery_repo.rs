//! Repository for the `deliveries` table.

use hopelink_core::types::DbId;
use hopelink_core::workflow::{Actor, EntityType};
use sqlx::{PgExecutor, PgPool};

use crate::models::delivery::{CreateDelivery, Delivery};
use crate::models::status_change::NewStatusChange;
use crate::models::ListFilter;
use crate::repositories::StatusChangeRepo;

/// Delivery columns joined with the volunteer's name.
const SELECT: &str = "SELECT v.id, v.donation_id, v.request_id, v.volunteer_id, \
     p.full_name AS volunteer_name, v.scheduled_for, v.status, \
     v.created_at, v.updated_at \
     FROM deliveries v LEFT JOIN profiles p ON p.id = v.volunteer_id";

/// Provides create and read operations for deliveries.
pub struct DeliveryRepo;

impl DeliveryRepo {
    /// Insert a delivery at its initial stage and record the creation in
    /// the status history.
    ///
    /// A second delivery for the same donation/request pair violates
    /// `uq_deliveries_claim`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDelivery,
        actor: Actor,
    ) -> Result<Delivery, sqlx::Error> {
        let initial = EntityType::Delivery.initial_stage().id;
        let mut tx = pool.begin().await?;

        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO deliveries (donation_id, request_id, volunteer_id, scheduled_for, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(input.donation_id)
        .bind(input.request_id)
        .bind(input.volunteer_id)
        .bind(input.scheduled_for)
        .bind(initial)
        .fetch_one(&mut *tx)
        .await?;

        StatusChangeRepo::insert(
            &mut *tx,
            &NewStatusChange {
                entity_type: EntityType::Delivery.as_str(),
                entity_id: id,
                from_status: None,
                to_status: initial,
                actor: actor.as_str(),
                note: None,
            },
        )
        .await?;

        let delivery = Self::fetch(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(delivery)
    }

    async fn fetch<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<Delivery, sqlx::Error> {
        let query = format!("{SELECT} WHERE v.id = $1");
        sqlx::query_as::<_, Delivery>(&query)
            .bind(id)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Delivery>, sqlx::Error> {
        let query = format!("{SELECT} WHERE v.id = $1");
        sqlx::query_as::<_, Delivery>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List deliveries, newest first.
    pub async fn list(pool: &PgPool, filter: &ListFilter) -> Result<Vec<Delivery>, sqlx::Error> {
        let query = format!(
            "{SELECT}
             WHERE ($1::text[] IS NULL OR v.status = ANY($1))
             ORDER BY v.created_at DESC, v.id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Delivery>(&query)
            .bind(&filter.statuses)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }
}
