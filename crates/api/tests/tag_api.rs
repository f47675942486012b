//! HTTP-level integration tests for the video tag overlay surface:
//! manual placement, detector batch ingest, visibility queries, moderation,
//! edits, deletion, and counts.

mod common;

use axum::http::StatusCode;
use common::{
    assert_status_json, body_json, create_test_video, delete_auth, get, get_auth, post_json_auth,
    put_json_auth, user_with_token,
};
use sqlx::PgPool;
use wornby_core::types::DbId;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn manual_tag_body(name: &str, start: f64, end: f64) -> serde_json::Value {
    serde_json::json!({
        "position": { "x": 25.0, "y": 75.0 },
        "time_start": start,
        "time_end": end,
        "product": { "name": name, "brand": "TestBrand" }
    })
}

fn detection(name: &str, start: f64, end: f64, confidence: f64) -> serde_json::Value {
    serde_json::json!({
        "product": { "name": name },
        "position": { "x": 50.0, "y": 50.0 },
        "time_start": start,
        "time_end": end,
        "confidence": confidence
    })
}

/// Place a manual tag via the API and return its JSON representation.
async fn place_manual_tag(
    pool: &PgPool,
    video_id: DbId,
    token: &str,
    name: &str,
    start: f64,
    end: f64,
) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/videos/{video_id}/tags"),
        manual_tag_body(name, start, end),
        token,
    )
    .await;
    assert_status_json(response, StatusCode::CREATED).await
}

/// Ingest a single detection and return the stored tag's JSON.
async fn ingest_one(
    pool: &PgPool,
    video_id: DbId,
    token: &str,
    name: &str,
    start: f64,
    end: f64,
) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/videos/{video_id}/tags/detections"),
        serde_json::json!({ "detections": [detection(name, start, end, 90.0)] }),
        token,
    )
    .await;
    let json = assert_status_json(response, StatusCode::CREATED).await;
    json["data"][0].clone()
}

// ---------------------------------------------------------------------------
// Manual placement
// ---------------------------------------------------------------------------

/// A manual tag is born approved with no confidence score.
#[sqlx::test(migrations = "../db/migrations")]
async fn manual_tag_is_born_approved(pool: PgPool) {
    let (_editor, token) = user_with_token(&pool, "editor1", "editor").await;
    let video = create_test_video(&pool).await;

    let tag = place_manual_tag(&pool, video.id, &token, "Red Dress", 10.0, 20.0).await;

    assert_eq!(tag["source"], "manual");
    assert_eq!(tag["status"], "approved");
    assert!(tag["confidence"].is_null());
    assert_eq!(tag["video_id"], video.id);
    assert_eq!(tag["product"]["name"], "Red Dress");
    assert_eq!(tag["position"]["x"], 25.0);
}

/// An inverted time window is rejected with 400 and nothing is stored.
#[sqlx::test(migrations = "../db/migrations")]
async fn inverted_window_rejected(pool: PgPool) {
    let (_editor, token) = user_with_token(&pool, "editor2", "editor").await;
    let video = create_test_video(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/videos/{}/tags", video.id),
        manual_tag_body("Bad", 20.0, 10.0),
        &token,
    )
    .await;
    let json = assert_status_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "INVALID_TIME_WINDOW");

    let app = common::build_test_app(pool);
    let list = body_json(get(app, &format!("/api/v1/videos/{}/tags", video.id)).await).await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}

/// A position outside [0, 100] is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn out_of_bounds_position_rejected(pool: PgPool) {
    let (_editor, token) = user_with_token(&pool, "editor3", "editor").await;
    let video = create_test_video(&pool).await;

    let app = common::build_test_app(pool);
    let mut body = manual_tag_body("Bad", 0.0, 5.0);
    body["position"] = serde_json::json!({ "x": 101.0, "y": 50.0 });
    let response = post_json_auth(
        app,
        &format!("/api/v1/videos/{}/tags", video.id),
        body,
        &token,
    )
    .await;

    let json = assert_status_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "INVALID_POSITION");
}

/// Placing a tag on a nonexistent video returns 404, not an empty success.
#[sqlx::test(migrations = "../db/migrations")]
async fn tag_on_missing_video_is_404(pool: PgPool) {
    let (_editor, token) = user_with_token(&pool, "editor4", "editor").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/videos/999999/tags",
        manual_tag_body("Ghost", 0.0, 5.0),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Manual placement requires at least the editor role.
#[sqlx::test(migrations = "../db/migrations")]
async fn manual_placement_requires_editor(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "viewer1", "user").await;
    let video = create_test_video(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/videos/{}/tags", video.id),
        manual_tag_body("Nope", 0.0, 5.0),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Detector batch ingest
// ---------------------------------------------------------------------------

/// Ingested detections land as pending AI tags.
#[sqlx::test(migrations = "../db/migrations")]
async fn detections_land_as_pending_ai(pool: PgPool) {
    let (_admin, token) = user_with_token(&pool, "admin1", "admin").await;
    let video = create_test_video(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/videos/{}/tags/detections", video.id),
        serde_json::json!({
            "detections": [
                detection("Sunglasses", 5.0, 15.0, 88.5),
                detection("Watch", 10.0, 30.0, 61.0)
            ]
        }),
        &token,
    )
    .await;

    let json = assert_status_json(response, StatusCode::CREATED).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    for tag in data {
        assert_eq!(tag["source"], "ai");
        assert_eq!(tag["status"], "pending");
        assert!(tag["confidence"].is_number());
    }
    assert_eq!(data[0]["product"]["name"], "Sunglasses");
}

/// One invalid candidate rejects the whole batch and nothing is stored.
#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_candidate_rejects_whole_batch(pool: PgPool) {
    let (_admin, admin_token) = user_with_token(&pool, "admin2", "admin").await;
    let (_editor, editor_token) = user_with_token(&pool, "editor5", "editor").await;
    let video = create_test_video(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/videos/{}/tags/detections", video.id),
        serde_json::json!({
            "detections": [
                detection("Good", 0.0, 10.0, 80.0),
                detection("BadWindow", 30.0, 20.0, 80.0),
                detection("AlsoGood", 5.0, 6.0, 80.0)
            ]
        }),
        &admin_token,
    )
    .await;
    let json = assert_status_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "INVALID_BATCH");
    let message = json["error"].as_str().unwrap();
    assert!(
        message.contains("entry 1"),
        "error should point at the failing candidate, got: {message}"
    );

    // Atomicity: the valid candidates must not have been stored.
    let app = common::build_test_app(pool);
    let counts = body_json(
        get_auth(
            app,
            &format!("/api/v1/videos/{}/tags/counts", video.id),
            &editor_token,
        )
        .await,
    )
    .await;
    assert_eq!(counts["ai"], 0);
}

/// A confidence score outside [0, 100] is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn out_of_range_confidence_rejected(pool: PgPool) {
    let (_admin, token) = user_with_token(&pool, "admin3", "admin").await;
    let video = create_test_video(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/videos/{}/tags/detections", video.id),
        serde_json::json!({ "detections": [detection("TooSure", 0.0, 5.0, 101.0)] }),
        &token,
    )
    .await;

    let json = assert_status_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "INVALID_BATCH");
}

/// An empty batch is a harmless no-op.
#[sqlx::test(migrations = "../db/migrations")]
async fn empty_batch_is_noop(pool: PgPool) {
    let (_admin, token) = user_with_token(&pool, "admin4", "admin").await;
    let video = create_test_video(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/videos/{}/tags/detections", video.id),
        serde_json::json!({ "detections": [] }),
        &token,
    )
    .await;

    let json = assert_status_json(response, StatusCode::CREATED).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

/// Ingest is admin-only; an editor gets 403.
#[sqlx::test(migrations = "../db/migrations")]
async fn ingest_requires_admin(pool: PgPool) {
    let (_editor, token) = user_with_token(&pool, "editor6", "editor").await;
    let video = create_test_video(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/videos/{}/tags/detections", video.id),
        serde_json::json!({ "detections": [detection("X", 0.0, 1.0, 50.0)] }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Visibility queries
// ---------------------------------------------------------------------------

/// Public viewers see approved tags inside their window; endpoints inclusive.
#[sqlx::test(migrations = "../db/migrations")]
async fn public_visibility_window_is_inclusive(pool: PgPool) {
    let (_editor, token) = user_with_token(&pool, "editor7", "editor").await;
    let video = create_test_video(&pool).await;
    place_manual_tag(&pool, video.id, &token, "Coat", 10.0, 20.0).await;

    for (t, expected) in [(9.9, 0), (10.0, 1), (15.0, 1), (20.0, 1), (20.1, 0)] {
        let app = common::build_test_app(pool.clone());
        let response = get(
            app,
            &format!("/api/v1/videos/{}/tags/visible?t={t}", video.id),
        )
        .await;
        let json = assert_status_json(response, StatusCode::OK).await;
        assert_eq!(
            json.as_array().unwrap().len(),
            expected,
            "unexpected overlay count at t={t}"
        );
    }
}

/// Pending AI tags are visible to admins but hidden from the public.
#[sqlx::test(migrations = "../db/migrations")]
async fn pending_tags_are_admin_only(pool: PgPool) {
    let (_admin, admin_token) = user_with_token(&pool, "admin5", "admin").await;
    let video = create_test_video(&pool).await;
    ingest_one(&pool, video.id, &admin_token, "Pending Bag", 0.0, 60.0).await;

    let app = common::build_test_app(pool.clone());
    let public = body_json(
        get(app, &format!("/api/v1/videos/{}/tags/visible?t=30", video.id)).await,
    )
    .await;
    assert_eq!(public.as_array().unwrap().len(), 0);

    let app = common::build_test_app(pool);
    let admin_view = body_json(
        get_auth(
            app,
            &format!("/api/v1/videos/{}/tags/visible?t=30", video.id),
            &admin_token,
        )
        .await,
    )
    .await;
    assert_eq!(admin_view.as_array().unwrap().len(), 1);
    assert_eq!(admin_view[0]["status"], "pending");
}

/// A missing or invalid `t` query parameter returns 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn visible_requires_playback_time(pool: PgPool) {
    let video = create_test_video(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/videos/{}/tags/visible", video.id)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/videos/{}/tags/visible?t=-1", video.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Public tag listing hides pending and rejected tags; editors see all.
#[sqlx::test(migrations = "../db/migrations")]
async fn list_is_filtered_by_role(pool: PgPool) {
    let (_admin, admin_token) = user_with_token(&pool, "admin6", "admin").await;
    let video = create_test_video(&pool).await;

    place_manual_tag(&pool, video.id, &admin_token, "Approved Shoe", 0.0, 5.0).await;
    ingest_one(&pool, video.id, &admin_token, "Pending Hat", 0.0, 5.0).await;

    let app = common::build_test_app(pool.clone());
    let public = body_json(get(app, &format!("/api/v1/videos/{}/tags", video.id)).await).await;
    assert_eq!(public.as_array().unwrap().len(), 1);
    assert_eq!(public[0]["product"]["name"], "Approved Shoe");

    let app = common::build_test_app(pool);
    let staff = body_json(
        get_auth(
            app,
            &format!("/api/v1/videos/{}/tags", video.id),
            &admin_token,
        )
        .await,
    )
    .await;
    assert_eq!(staff.as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Moderation
// ---------------------------------------------------------------------------

/// Approving a pending AI tag makes it publicly visible.
#[sqlx::test(migrations = "../db/migrations")]
async fn approval_flips_public_visibility(pool: PgPool) {
    let (_admin, token) = user_with_token(&pool, "admin7", "admin").await;
    let video = create_test_video(&pool).await;
    let tag = ingest_one(&pool, video.id, &token, "Scarf", 0.0, 60.0).await;
    let tag_id = tag["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/tags/{tag_id}/moderate"),
        serde_json::json!({ "decision": "approve" }),
        &token,
    )
    .await;
    let json = assert_status_json(response, StatusCode::OK).await;
    assert_eq!(json["status"], "approved");

    let app = common::build_test_app(pool);
    let public = body_json(
        get(app, &format!("/api/v1/videos/{}/tags/visible?t=30", video.id)).await,
    )
    .await;
    assert_eq!(public.as_array().unwrap().len(), 1);
}

/// A rejected tag is hidden from everyone, including admins.
#[sqlx::test(migrations = "../db/migrations")]
async fn rejected_tag_hidden_from_all(pool: PgPool) {
    let (_admin, token) = user_with_token(&pool, "admin8", "admin").await;
    let video = create_test_video(&pool).await;
    let tag = ingest_one(&pool, video.id, &token, "Blurry Belt", 0.0, 60.0).await;
    let tag_id = tag["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/tags/{tag_id}/moderate"),
        serde_json::json!({ "decision": "reject" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let admin_view = body_json(
        get_auth(
            app,
            &format!("/api/v1/videos/{}/tags/visible?t=30", video.id),
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(admin_view.as_array().unwrap().len(), 0);
}

/// Moderation decisions can be reversed by moderating again.
#[sqlx::test(migrations = "../db/migrations")]
async fn moderation_is_reversible(pool: PgPool) {
    let (_admin, token) = user_with_token(&pool, "admin9", "admin").await;
    let video = create_test_video(&pool).await;
    let tag = ingest_one(&pool, video.id, &token, "Ring", 0.0, 10.0).await;
    let tag_id = tag["id"].as_i64().unwrap();

    for (decision, expected) in [("approve", "approved"), ("reject", "rejected")] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            &format!("/api/v1/tags/{tag_id}/moderate"),
            serde_json::json!({ "decision": decision }),
            &token,
        )
        .await;
        let json = assert_status_json(response, StatusCode::OK).await;
        assert_eq!(json["status"], expected);
    }
}

/// Manual tags are outside the moderation workflow: 409 NOT_MODERABLE.
#[sqlx::test(migrations = "../db/migrations")]
async fn manual_tag_is_not_moderable(pool: PgPool) {
    let (_admin, token) = user_with_token(&pool, "admin10", "admin").await;
    let video = create_test_video(&pool).await;
    let tag = place_manual_tag(&pool, video.id, &token, "Hand Placed", 0.0, 5.0).await;
    let tag_id = tag["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/tags/{tag_id}/moderate"),
        serde_json::json!({ "decision": "approve" }),
        &token,
    )
    .await;

    let json = assert_status_json(response, StatusCode::CONFLICT).await;
    assert_eq!(json["code"], "NOT_MODERABLE");
}

/// Moderating a nonexistent tag returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn moderate_unknown_tag_is_404(pool: PgPool) {
    let (_admin, token) = user_with_token(&pool, "admin11", "admin").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/tags/999999/moderate",
        serde_json::json!({ "decision": "approve" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Edits and deletion
// ---------------------------------------------------------------------------

/// A patch moves the window; omitted fields keep their stored value.
#[sqlx::test(migrations = "../db/migrations")]
async fn patch_moves_window(pool: PgPool) {
    let (_editor, token) = user_with_token(&pool, "editor8", "editor").await;
    let video = create_test_video(&pool).await;
    let tag = place_manual_tag(&pool, video.id, &token, "Jacket", 10.0, 20.0).await;
    let tag_id = tag["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/tags/{tag_id}"),
        serde_json::json!({ "time_start": 12.0, "time_end": 25.0 }),
        &token,
    )
    .await;

    let json = assert_status_json(response, StatusCode::OK).await;
    assert_eq!(json["time_start"], 12.0);
    assert_eq!(json["time_end"], 25.0);
    assert_eq!(json["product"]["name"], "Jacket");
    assert_eq!(json["position"]["x"], 25.0);
}

/// A patch that would invert the merged window is rejected and the stored
/// tag is untouched.
#[sqlx::test(migrations = "../db/migrations")]
async fn patch_validates_merged_window(pool: PgPool) {
    let (_editor, token) = user_with_token(&pool, "editor9", "editor").await;
    let video = create_test_video(&pool).await;
    let tag = place_manual_tag(&pool, video.id, &token, "Boots", 10.0, 20.0).await;
    let tag_id = tag["id"].as_i64().unwrap();

    // time_start 30 against the stored time_end 20 inverts the window.
    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/tags/{tag_id}"),
        serde_json::json!({ "time_start": 30.0 }),
        &token,
    )
    .await;
    let json = assert_status_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "INVALID_TIME_WINDOW");

    let app = common::build_test_app(pool);
    let stored = body_json(
        get_auth(app, &format!("/api/v1/videos/{}/tags", video.id), &token).await,
    )
    .await;
    assert_eq!(stored[0]["time_start"], 10.0);
}

/// Delete returns 204; deleting again (or a bogus id) returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn delete_tag_then_404(pool: PgPool) {
    let (_editor, token) = user_with_token(&pool, "editor10", "editor").await;
    let video = create_test_video(&pool).await;
    let tag = place_manual_tag(&pool, video.id, &token, "Gone Soon", 0.0, 5.0).await;
    let tag_id = tag["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/tags/{tag_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/tags/{tag_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Deleting from an empty collection is also a clean 404.
    let app = common::build_test_app(pool);
    let response = delete_auth(app, "/api/v1/tags/999999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

/// Counts report the moderation queue depth and the source split.
#[sqlx::test(migrations = "../db/migrations")]
async fn counts_track_queue_and_sources(pool: PgPool) {
    let (_admin, token) = user_with_token(&pool, "admin12", "admin").await;
    let video = create_test_video(&pool).await;

    place_manual_tag(&pool, video.id, &token, "Manual One", 0.0, 5.0).await;
    let pending = ingest_one(&pool, video.id, &token, "AI One", 0.0, 5.0).await;
    ingest_one(&pool, video.id, &token, "AI Two", 0.0, 5.0).await;

    let app = common::build_test_app(pool.clone());
    let counts = body_json(
        get_auth(
            app,
            &format!("/api/v1/videos/{}/tags/counts", video.id),
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(counts["pending"], 2);
    assert_eq!(counts["ai"], 2);
    assert_eq!(counts["manual"], 1);

    // Approving one drains the queue but not the source split.
    let tag_id = pending["id"].as_i64().unwrap();
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/tags/{tag_id}/moderate"),
        serde_json::json!({ "decision": "approve" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let counts = body_json(
        get_auth(
            app,
            &format!("/api/v1/videos/{}/tags/counts", video.id),
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(counts["pending"], 1);
    assert_eq!(counts["ai"], 2);
    assert_eq!(counts["manual"], 1);
}

/// Counts are staff-only.
#[sqlx::test(migrations = "../db/migrations")]
async fn counts_require_editor(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "viewer2", "user").await;
    let video = create_test_video(&pool).await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/videos/{}/tags/counts", video.id),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
