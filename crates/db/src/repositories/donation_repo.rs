//! Repository for the `donations` table.

use hopelink_core::types::DbId;
use hopelink_core::workflow::{Actor, EntityType};
use sqlx::{PgExecutor, PgPool};

use crate::models::donation::{CreateDonation, Donation};
use crate::models::status_change::NewStatusChange;
use crate::models::ListFilter;
use crate::repositories::StatusChangeRepo;

/// Donation columns joined with the donor's name.
const SELECT: &str = "SELECT d.id, d.donor_id, p.full_name AS donor_name, d.title, \
     d.description, d.category, d.quantity, d.pickup_address, d.status, \
     d.created_at, d.updated_at \
     FROM donations d LEFT JOIN profiles p ON p.id = d.donor_id";

/// Provides create and read operations for donations.
///
/// Status writes go through [`StatusRepo`](super::StatusRepo).
pub struct DonationRepo;

impl DonationRepo {
    /// Insert a donation at its initial stage and record the creation in
    /// the status history.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDonation,
        actor: Actor,
    ) -> Result<Donation, sqlx::Error> {
        let initial = EntityType::Donation.initial_stage().id;
        let mut tx = pool.begin().await?;

        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO donations
                (donor_id, title, description, category, quantity, pickup_address, status)
             VALUES ($1, $2, $3, $4, COALESCE($5, 1), $6, $7)
             RETURNING id",
        )
        .bind(input.donor_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.category)
        .bind(input.quantity)
        .bind(&input.pickup_address)
        .bind(initial)
        .fetch_one(&mut *tx)
        .await?;

        StatusChangeRepo::insert(
            &mut *tx,
            &NewStatusChange {
                entity_type: EntityType::Donation.as_str(),
                entity_id: id,
                from_status: None,
                to_status: initial,
                actor: actor.as_str(),
                note: None,
            },
        )
        .await?;

        let donation = Self::fetch(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(donation)
    }

    async fn fetch<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<Donation, sqlx::Error> {
        let query = format!("{SELECT} WHERE d.id = $1");
        sqlx::query_as::<_, Donation>(&query)
            .bind(id)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Donation>, sqlx::Error> {
        let query = format!("{SELECT} WHERE d.id = $1");
        sqlx::query_as::<_, Donation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List donations, newest first.
    pub async fn list(pool: &PgPool, filter: &ListFilter) -> Result<Vec<Donation>, sqlx::Error> {
        let query = format!(
            "{SELECT}
             WHERE ($1::text[] IS NULL OR d.status = ANY($1))
             ORDER BY d.created_at DESC, d.id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(&filter.statuses)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }
}
