//! HTTP tests for the stateless workflow queries.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn stages_lists_the_table_in_order(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/workflow/donations/stages").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let stages = json["data"]["stages"].as_array().unwrap();
    let ids: Vec<&str> = stages.iter().map(|s| s["id"].as_str().unwrap()).collect();
    assert_eq!(
        ids,
        vec!["available", "matched", "claimed", "in_transit", "delivered", "completed"]
    );
    assert_eq!(stages[3]["ordinal"], 3);
    assert_eq!(json["data"]["entity_type"], "donation");

    let exceptions: Vec<&str> = json["data"]["exceptions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(exceptions, vec!["cancelled", "expired"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_entity_type_is_a_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/workflow/parcels/stages").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lookup_in_transit_donation_is_sixty_percent(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/workflow/donation/lookup?status=in_transit").await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["view"]["kind"], "stage");
    assert_eq!(data["view"]["recognized"], true);
    assert_eq!(data["view"]["stage"]["ordinal"], 3);
    assert_eq!(data["progress"]["percentage"], 60);
    assert_eq!(data["progress"]["steps"][2], "completed");
    assert_eq!(data["progress"]["steps"][3], "current");
    assert_eq!(data["progress"]["steps"][4], "upcoming");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lookup_fulfilled_request_is_complete(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/workflow/requests/lookup?status=fulfilled").await;

    let data = &body_json(response).await["data"];
    assert_eq!(data["view"]["stage"]["ordinal"], 3);
    assert_eq!(data["progress"]["percentage"], 100);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lookup_unknown_status_falls_back_without_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/workflow/donations/lookup?status=bogus_value").await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["status"], "bogus_value");
    assert_eq!(data["view"]["recognized"], false);
    assert_eq!(data["view"]["stage"]["ordinal"], 0);
    assert_eq!(data["progress"]["percentage"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lookup_terminal_exception_has_no_progress(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/workflow/requests/lookup?status=rejected").await;

    let data = &body_json(response).await["data"];
    assert_eq!(data["view"]["kind"], "terminal");
    assert_eq!(data["view"]["exception"]["id"], "rejected");
    assert!(data["progress"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lookup_resolves_delivery_alias(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/workflow/deliveries/lookup?status=out_for_delivery").await;

    let data = &body_json(response).await["data"];
    assert_eq!(data["view"]["stage"]["id"], "picked_up");
    assert_eq!(data["view"]["recognized"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn transitions_require_an_actor(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/workflow/donations/transitions?status=available").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn transitions_for_donor_on_available_donation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(
        app,
        "/api/v1/workflow/donations/transitions?status=available&actor=donor",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["actor"], "donor");
    let transitions = data["transitions"].as_array().unwrap();
    assert_eq!(transitions.len(), 1);
    assert_eq!(transitions[0]["to"], "cancelled");
    assert_eq!(transitions[0]["kind"], "exception");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn breakdown_of_empty_table_lists_every_stage(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/workflow/deliveries/breakdown").await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["total"], 0);
    assert_eq!(data["stages"].as_array().unwrap().len(), 6);
    assert_eq!(data["exceptions"].as_array().unwrap().len(), 2);
}
