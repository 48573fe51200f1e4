//! HTTP-level integration tests for the course catalogue, authoring,
//! enrollment and reviews.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_course, create_user_with_token, delete_auth, get, get_auth, post_auth,
    post_json_auth, put_json_auth,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Authoring and RBAC
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn students_cannot_create_courses(pool: PgPool) {
    let (_, token) = create_user_with_token(&pool, "Sam Student", "student").await;
    let app = common::build_test_app(pool);

    let body = json!({ "title": "Sneaky", "description": "Should never be created." });
    let response = post_json_auth(app, "/api/v1/courses", body, &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_applies_defaults_and_snapshots_instructor_name(pool: PgPool) {
    let (instructor, token) = create_user_with_token(&pool, "Ada Lovelace", "instructor").await;
    let app = common::build_test_app(pool);

    let body = json!({ "title": "  Rust Basics ", "description": "Ownership, borrowing and traits." });
    let response = post_json_auth(app, "/api/v1/courses", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Rust Basics");
    assert_eq!(json["data"]["category"], "Other");
    assert_eq!(json["data"]["level"], "Beginner");
    assert_eq!(json["data"]["instructor_id"], instructor.id);
    assert_eq!(json["data"]["instructor_name"], "Ada Lovelace");
    assert_eq!(json["data"]["enrollment_count"], 0);
    assert_eq!(json["data"]["rating"], 0.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_course_fields_are_rejected(pool: PgPool) {
    let (_, token) = create_user_with_token(&pool, "Ada Lovelace", "instructor").await;
    let app = common::build_test_app(pool);

    let cases = [
        json!({ "title": "Rs", "description": "Long enough description." }),
        json!({ "title": "Rust", "description": "Too short" }),
        json!({ "title": "Rust", "description": "Long enough description.", "category": "Cooking" }),
        json!({ "title": "Rust", "description": "Long enough description.", "price": -1.0 }),
        json!({ "title": "Rust", "description": "Long enough description.", "duration_hours": -2 }),
    ];
    for body in cases {
        let response = post_json_auth(app.clone(), "/api/v1/courses", body.clone(), &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_title_for_same_instructor_is_conflict(pool: PgPool) {
    let (_, ada) = create_user_with_token(&pool, "Ada Lovelace", "instructor").await;
    let (_, bob) = create_user_with_token(&pool, "Bob Mentor", "instructor").await;
    let app = common::build_test_app(pool);
    create_course(app.clone(), &ada, "Rust Basics", 10.0).await;

    let body = json!({ "title": "Rust Basics", "description": "The same title again." });
    let response = post_json_auth(app.clone(), "/api/v1/courses", body.clone(), &ada).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Another instructor may reuse the title.
    let response = post_json_auth(app, "/api/v1/courses", body, &bob).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_owner_or_admin_may_update(pool: PgPool) {
    let (_, ada) = create_user_with_token(&pool, "Ada Lovelace", "instructor").await;
    let (_, bob) = create_user_with_token(&pool, "Bob Mentor", "instructor").await;
    let (_, admin) = create_user_with_token(&pool, "Root Admin", "admin").await;
    let app = common::build_test_app(pool);
    let id = create_course(app.clone(), &ada, "Rust Basics", 10.0).await;
    let uri = format!("/api/v1/courses/{id}");

    let response = put_json_auth(app.clone(), &uri, json!({ "price": 20.0 }), &bob).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(app.clone(), &uri, json!({ "price": 20.0 }), &ada).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["price"], 20.0);

    let response = put_json_auth(app, &uri, json!({ "level": "Advanced" }), &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["level"], "Advanced");
}

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_filters_sorts_and_paginates(pool: PgPool) {
    let (_, token) = create_user_with_token(&pool, "Ada Lovelace", "instructor").await;
    let app = common::build_test_app(pool);
    create_course(app.clone(), &token, "Cheap", 40.0).await;
    create_course(app.clone(), &token, "Middle", 75.0).await;
    create_course(app.clone(), &token, "Pricey", 150.0).await;

    let response = get(app.clone(), "/api/v1/courses?minPrice=50&maxPrice=100").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["title"], "Middle");

    let response = get(app.clone(), "/api/v1/courses?sort=price_high&limit=2&page=1").await;
    let json = body_json(response).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["total"], 3);
    assert_eq!(json["total_pages"], 2);
    assert_eq!(json["current_page"], 1);
    assert_eq!(json["data"][0]["title"], "Pricey");
    assert_eq!(json["data"][1]["title"], "Middle");

    let response = get(app, "/api/v1/courses?minPrice=100&maxPrice=50").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn draft_course_is_hidden_from_public(pool: PgPool) {
    let (_, ada) = create_user_with_token(&pool, "Ada Lovelace", "instructor").await;
    let (_, student) = create_user_with_token(&pool, "Sam Student", "student").await;
    let app = common::build_test_app(pool);
    let id = create_course(app.clone(), &ada, "Draft Course", 10.0).await;
    let uri = format!("/api/v1/courses/{id}");
    put_json_auth(app.clone(), &uri, json!({ "is_published": false }), &ada).await;

    let response = get(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app.clone(), &uri, &ada).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app.clone(), "/api/v1/courses").await).await;
    assert_eq!(json["total"], 0);

    let response = post_auth(app, &format!("{uri}/enroll"), &student).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Enrollment and reviews
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn enrollment_lifecycle(pool: PgPool) {
    let (_, ada) = create_user_with_token(&pool, "Ada Lovelace", "instructor").await;
    let (student, token) = create_user_with_token(&pool, "Sam Student", "student").await;
    let app = common::build_test_app(pool);
    let id = create_course(app.clone(), &ada, "Rust Basics", 10.0).await;

    let response = post_auth(app.clone(), &format!("/api/v1/courses/{id}/enroll"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["enrollment_count"], 1);

    let response = post_auth(app.clone(), &format!("/api/v1/courses/{id}/enroll"), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let detail = body_json(get(app.clone(), &format!("/api/v1/courses/{id}")).await).await;
    assert_eq!(detail["data"]["enrolled_students"], json!([student.id]));
    assert_eq!(detail["data"]["enrollment_count"], 1);

    let enrolled = body_json(get_auth(app.clone(), "/api/v1/courses/student/enrolled", &token).await).await;
    assert_eq!(enrolled["data"][0]["id"], id);

    let response =
        post_auth(app.clone(), &format!("/api/v1/courses/{id}/unenroll"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["enrollment_count"], 0);

    let response = post_auth(app, &format!("/api/v1/courses/{id}/unenroll"), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "NOT_ENROLLED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn instructors_cannot_enroll(pool: PgPool) {
    let (_, ada) = create_user_with_token(&pool, "Ada Lovelace", "instructor").await;
    let app = common::build_test_app(pool);
    let id = create_course(app.clone(), &ada, "Rust Basics", 10.0).await;

    let response = post_auth(app, &format!("/api/v1/courses/{id}/enroll"), &ada).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reviews_require_enrollment_and_update_rating(pool: PgPool) {
    let (_, ada) = create_user_with_token(&pool, "Ada Lovelace", "instructor").await;
    let (_, sam) = create_user_with_token(&pool, "Sam Student", "student").await;
    let (_, kim) = create_user_with_token(&pool, "Kim Student", "student").await;
    let app = common::build_test_app(pool);
    let id = create_course(app.clone(), &ada, "Rust Basics", 10.0).await;
    let reviews_uri = format!("/api/v1/courses/{id}/reviews");

    let response =
        post_json_auth(app.clone(), &reviews_uri, json!({ "rating": 5 }), &sam).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "NOT_ENROLLED");

    for token in [&sam, &kim] {
        post_auth(app.clone(), &format!("/api/v1/courses/{id}/enroll"), token).await;
    }

    let response =
        post_json_auth(app.clone(), &reviews_uri, json!({ "rating": 6 }), &sam).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let review = json!({ "rating": 5, "comment": "Great pace" });
    let response = post_json_auth(app.clone(), &reviews_uri, review, &sam).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["author_name"], "Sam Student");

    let response =
        post_json_auth(app.clone(), &reviews_uri, json!({ "rating": 1 }), &sam).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    post_json_auth(app.clone(), &reviews_uri, json!({ "rating": 3 }), &kim).await;

    let detail = body_json(get(app, &format!("/api/v1/courses/{id}")).await).await;
    assert_eq!(detail["data"]["rating"], 4.0);
    assert_eq!(detail["data"]["reviews"].as_array().map(Vec::len), Some(2));
}

// ---------------------------------------------------------------------------
// Content and deletion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn content_is_replaced_and_listed_in_order(pool: PgPool) {
    let (_, ada) = create_user_with_token(&pool, "Ada Lovelace", "instructor").await;
    let app = common::build_test_app(pool);
    let id = create_course(app.clone(), &ada, "Rust Basics", 10.0).await;
    let uri = format!("/api/v1/courses/{id}/content");

    let body = json!({ "content": [
        { "title": "Traits", "body": "Shared behaviour", "sort_order": 2, "content_type": "video" },
        { "title": "Ownership", "body": "Moves", "sort_order": 1 },
    ]});
    let response = put_json_auth(app.clone(), &uri, body, &ada).await;
    assert_eq!(response.status(), StatusCode::OK);

    let detail = body_json(get(app.clone(), &format!("/api/v1/courses/{id}")).await).await;
    let content = &detail["data"]["content"];
    assert_eq!(content[0]["title"], "Ownership");
    assert_eq!(content[0]["content_type"], "text");
    assert_eq!(content[1]["title"], "Traits");

    let bad = json!({ "content": [{ "title": "Quiz", "body": "?", "sort_order": 1, "content_type": "podcast" }] });
    let response = put_json_auth(app, &uri, bad, &ada).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_course_reports_unenrolled_students(pool: PgPool) {
    let (_, ada) = create_user_with_token(&pool, "Ada Lovelace", "instructor").await;
    let (_, sam) = create_user_with_token(&pool, "Sam Student", "student").await;
    let app = common::build_test_app(pool);
    let id = create_course(app.clone(), &ada, "Rust Basics", 10.0).await;
    post_auth(app.clone(), &format!("/api/v1/courses/{id}/enroll"), &sam).await;

    let uri = format!("/api/v1/courses/{id}");
    let response = delete_auth(app.clone(), &uri, &sam).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &uri, &ada).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["unenrolled_students"], 1);

    assert_eq!(get(app.clone(), &uri).await.status(), StatusCode::NOT_FOUND);
    let enrolled = body_json(get_auth(app.clone(), "/api/v1/courses/student/enrolled", &sam).await).await;
    assert_eq!(enrolled["data"], json!([]));

    let mine = body_json(get_auth(app, "/api/v1/courses/instructor/my-courses", &ada).await).await;
    assert_eq!(mine["data"], json!([]));
}

// ---------------------------------------------------------------------------
// Malformed input
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn mistyped_body_and_query_are_validation_errors(pool: PgPool) {
    let (_, ada) = create_user_with_token(&pool, "Ada Lovelace", "instructor").await;
    let (_, sam) = create_user_with_token(&pool, "Sam Student", "student").await;
    let app = common::build_test_app(pool);
    let id = create_course(app.clone(), &ada, "Rust Basics", 10.0).await;
    post_auth(app.clone(), &format!("/api/v1/courses/{id}/enroll"), &sam).await;

    let reviews_uri = format!("/api/v1/courses/{id}/reviews");
    let response =
        post_json_auth(app.clone(), &reviews_uri, json!({ "rating": 4.5 }), &sam).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response =
        post_json_auth(app.clone(), &reviews_uri, json!({ "rating": "five" }), &sam).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    for uri in ["/api/v1/courses?page=abc", "/api/v1/courses?minPrice=x"] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}
