//! Integration tests for entity creation and compare-and-set status writes.

use assert_matches::assert_matches;
use hopelink_core::workflow::{Actor, EntityType};
use hopelink_db::models::delivery::CreateDelivery;
use hopelink_db::models::donation::CreateDonation;
use hopelink_db::models::profile::CreateProfile;
use hopelink_db::models::request::CreateRequest;
use hopelink_db::models::ListFilter;
use hopelink_db::repositories::{
    DeliveryRepo, DonationRepo, ProfileRepo, RequestRepo, StatusChangeRepo, StatusRepo,
    StatusWrite,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_donation(title: &str, donor_id: Option<i64>) -> CreateDonation {
    CreateDonation {
        donor_id,
        title: title.to_string(),
        description: None,
        category: Some("clothing".to_string()),
        quantity: None,
        pickup_address: None,
    }
}

fn new_request(title: &str, donation_id: Option<i64>) -> CreateRequest {
    CreateRequest {
        recipient_id: None,
        donation_id,
        title: title.to_string(),
        description: None,
        urgency: None,
    }
}

fn all_rows() -> ListFilter {
    ListFilter {
        statuses: None,
        limit: 100,
        offset: 0,
    }
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_donation_starts_available_with_history(pool: PgPool) {
    let donor = ProfileRepo::create(
        &pool,
        &CreateProfile {
            full_name: "Ada Obi".to_string(),
            role: "donor".to_string(),
            email: None,
            phone: None,
        },
    )
    .await
    .unwrap();

    let donation = DonationRepo::create(&pool, &new_donation("Coats", Some(donor.id)), Actor::Donor)
        .await
        .unwrap();

    assert_eq!(donation.status, "available");
    assert_eq!(donation.quantity, 1);
    assert_eq!(donation.donor_name.as_deref(), Some("Ada Obi"));

    let history = StatusChangeRepo::list_for_entity(&pool, EntityType::Donation, donation.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].from_status, None);
    assert_eq!(history[0].to_status, "available");
    assert_eq!(history[0].actor, "donor");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_donor_leaves_name_empty(pool: PgPool) {
    let donation = DonationRepo::create(&pool, &new_donation("Books", None), Actor::Admin)
        .await
        .unwrap();
    assert!(donation.donor_name.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_request_and_delivery_start_at_first_stage(pool: PgPool) {
    let donation = DonationRepo::create(&pool, &new_donation("Rice", None), Actor::Donor)
        .await
        .unwrap();
    let request = RequestRepo::create(&pool, &new_request("Food", Some(donation.id)), Actor::Recipient)
        .await
        .unwrap();
    assert_eq!(request.status, "open");
    assert_eq!(request.urgency, "normal");

    let delivery = DeliveryRepo::create(
        &pool,
        &CreateDelivery {
            donation_id: donation.id,
            request_id: request.id,
            volunteer_id: None,
            scheduled_for: None,
        },
        Actor::System,
    )
    .await
    .unwrap();
    assert_eq!(delivery.status, "pending");

    let matched = RequestRepo::list_by_donation(&pool, donation.id).await.unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, request.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_delivery_for_claim_is_rejected(pool: PgPool) {
    let donation = DonationRepo::create(&pool, &new_donation("Tents", None), Actor::Donor)
        .await
        .unwrap();
    let request = RequestRepo::create(&pool, &new_request("Shelter", None), Actor::Recipient)
        .await
        .unwrap();
    let input = CreateDelivery {
        donation_id: donation.id,
        request_id: request.id,
        volunteer_id: None,
        scheduled_for: None,
    };

    DeliveryRepo::create(&pool, &input, Actor::System).await.unwrap();
    let err = DeliveryRepo::create(&pool, &input, Actor::System)
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref db) if db.constraint() == Some("uq_deliveries_claim"));
}

// ---------------------------------------------------------------------------
// Status writes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_compare_and_set_applies_and_records_history(pool: PgPool) {
    let donation = DonationRepo::create(&pool, &new_donation("Shoes", None), Actor::Donor)
        .await
        .unwrap();

    let write = StatusRepo::compare_and_set(
        &pool,
        EntityType::Donation,
        donation.id,
        "available",
        "matched",
        Actor::System,
        Some("auto-matched"),
    )
    .await
    .unwrap();

    let change = assert_matches!(write, StatusWrite::Applied(change) => change);
    assert_eq!(change.from_status.as_deref(), Some("available"));
    assert_eq!(change.to_status, "matched");
    assert_eq!(change.note.as_deref(), Some("auto-matched"));

    let status = StatusRepo::current_status(&pool, EntityType::Donation, donation.id)
        .await
        .unwrap();
    assert_eq!(status.as_deref(), Some("matched"));

    let history = StatusChangeRepo::list_for_entity(&pool, EntityType::Donation, donation.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_compare_and_set_detects_stale_expectation(pool: PgPool) {
    let donation = DonationRepo::create(&pool, &new_donation("Toys", None), Actor::Donor)
        .await
        .unwrap();

    StatusRepo::compare_and_set(
        &pool,
        EntityType::Donation,
        donation.id,
        "available",
        "matched",
        Actor::System,
        None,
    )
    .await
    .unwrap();

    // A second writer still believes the donation is available.
    let write = StatusRepo::compare_and_set(
        &pool,
        EntityType::Donation,
        donation.id,
        "available",
        "cancelled",
        Actor::Admin,
        None,
    )
    .await
    .unwrap();

    assert_matches!(write, StatusWrite::Stale { ref current } if current == "matched");

    let history = StatusChangeRepo::list_for_entity(&pool, EntityType::Donation, donation.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 2, "stale write must not be recorded");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_compare_and_set_on_missing_row(pool: PgPool) {
    let write = StatusRepo::compare_and_set(
        &pool,
        EntityType::Request,
        999_999,
        "open",
        "claimed",
        Actor::Donor,
        None,
    )
    .await
    .unwrap();
    assert_matches!(write, StatusWrite::NotFound);
}

// ---------------------------------------------------------------------------
// Listing and counts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_status_set(pool: PgPool) {
    let a = DonationRepo::create(&pool, &new_donation("A", None), Actor::Donor)
        .await
        .unwrap();
    DonationRepo::create(&pool, &new_donation("B", None), Actor::Donor)
        .await
        .unwrap();
    StatusRepo::compare_and_set(
        &pool,
        EntityType::Donation,
        a.id,
        "available",
        "matched",
        Actor::System,
        None,
    )
    .await
    .unwrap();

    let all = DonationRepo::list(&pool, &all_rows()).await.unwrap();
    assert_eq!(all.len(), 2);

    let matched = DonationRepo::list(
        &pool,
        &ListFilter {
            statuses: Some(vec!["matched".to_string()]),
            limit: 100,
            offset: 0,
        },
    )
    .await
    .unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, a.id);

    let page = DonationRepo::list(
        &pool,
        &ListFilter {
            statuses: None,
            limit: 1,
            offset: 1,
        },
    )
    .await
    .unwrap();
    assert_eq!(page.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_count_by_status_groups_raw_values(pool: PgPool) {
    for title in ["A", "B", "C"] {
        DonationRepo::create(&pool, &new_donation(title, None), Actor::Donor)
            .await
            .unwrap();
    }
    let counts = StatusRepo::count_by_status(&pool, EntityType::Donation)
        .await
        .unwrap();
    assert_eq!(counts, vec![("available".to_string(), 3)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_back_to_back_writes_have_increasing_changed_at(pool: PgPool) {
    let donation = DonationRepo::create(&pool, &new_donation("Blankets", None), Actor::Donor)
        .await
        .unwrap();

    let mut stamps = vec![donation.created_at];
    for (from, to, actor) in [
        ("available", "matched", Actor::System),
        ("matched", "claimed", Actor::Recipient),
    ] {
        let write = StatusRepo::compare_and_set(
            &pool,
            EntityType::Donation,
            donation.id,
            from,
            to,
            actor,
            None,
        )
        .await
        .unwrap();
        let change = assert_matches!(write, StatusWrite::Applied(change) => change);
        stamps.push(change.changed_at);
    }

    assert!(stamps.windows(2).all(|w| w[0] < w[1]), "{stamps:?}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_snapshot_reads_rows_on_the_database_clock(pool: PgPool) {
    let a = DonationRepo::create(&pool, &new_donation("Coats", None), Actor::Donor)
        .await
        .unwrap();
    let b = DonationRepo::create(&pool, &new_donation("Hats", None), Actor::Donor)
        .await
        .unwrap();

    let snapshot = StatusRepo::snapshot(&pool, EntityType::Donation)
        .await
        .unwrap();
    assert_eq!(
        snapshot.rows,
        vec![(a.id, "available".to_string()), (b.id, "available".to_string())]
    );
    assert!(snapshot.taken_at >= b.created_at);
}
