//! Business registration integration tests.
//!
//! Run with: `cargo test -p bistro-api --test business_test`

mod helpers;

use axum::http::StatusCode;
use axum_test::multipart::MultipartForm;
use helpers::fakes::{FakeContent, FakeStore};
use helpers::fixtures::{business_form, business_json, create_jpeg, create_png, image_part};
use helpers::{setup_test_app, setup_test_app_with};
use serde_json::Value;
use std::sync::Arc;

#[tokio::test]
async fn test_register_without_image() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/business")
        .multipart(business_form(None))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["name"], "Test Business");
    assert_eq!(body["description"], "Test Description");
    assert_eq!(body["email"], "test@example.com");
    assert_eq!(body["phone"], "0123456789");
    assert_eq!(body["address"], "Test Address");
    assert!(body.get("image").is_none());
    assert!(body["id"].as_str().is_some());
    assert_eq!(app.store.records().len(), 1);
}

#[tokio::test]
async fn test_missing_name_is_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/business")
        .multipart(business_form(Some("name")))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["message"].as_str().unwrap().contains("name"));
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(app.store.records().is_empty());
}

#[tokio::test]
async fn test_each_missing_field_is_rejected() {
    let app = setup_test_app().await;

    for field in ["name", "description", "email", "phone", "address"] {
        let response = app
            .client()
            .post("/api/business")
            .json(&business_json(Some(field)))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["message"].as_str().unwrap().contains(field), "field {field}");
    }
    assert!(app.store.records().is_empty());
}

#[tokio::test]
async fn test_empty_field_counts_as_missing() {
    let app = setup_test_app().await;
    let mut body = business_json(None);
    body["email"] = Value::from("");

    let response = app.client().post("/api/business").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_json_submission() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/business")
        .json(&business_json(None))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["name"], "Test Business");
}

#[tokio::test]
async fn test_urlencoded_submission() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/business")
        .form(&helpers::fixtures::FIELDS)
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["address"], "Test Address");
}

#[tokio::test]
async fn test_unsupported_content_type() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/business")
        .text("name=Test Business")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["message"].as_str().is_some());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/business")
        .bytes("{\"name\": ".into())
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_repeated_submission_creates_distinct_records() {
    let app = setup_test_app().await;

    let first: Value = app
        .client()
        .post("/api/business")
        .json(&business_json(None))
        .await
        .json();
    let second: Value = app
        .client()
        .post("/api/business")
        .json(&business_json(None))
        .await
        .json();

    assert_ne!(first["id"], second["id"]);
    assert_eq!(app.store.records().len(), 2);
}

#[tokio::test]
async fn test_wide_image_is_normalized_and_served() {
    let app = setup_test_app().await;

    let form = business_form(None).add_part(
        "image",
        image_part(create_png(1600, 900), "storefront.png", "image/png"),
    );
    let response = app.client().post("/api/business").multipart(form).await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    let image_url = body["image"].as_str().unwrap().to_string();
    assert!(image_url.starts_with("/uploads/"));
    assert!(image_url.ends_with(".webp"));

    let file_name = image_url.trim_start_matches("/uploads/");
    assert_eq!(app.upload_files(), vec![file_name.to_string()]);

    let data = std::fs::read(app.uploads_dir.path().join(file_name)).unwrap();
    assert_eq!(image::guess_format(&data).unwrap(), image::ImageFormat::WebP);
    let derivative = image::load_from_memory(&data).unwrap();
    assert_eq!((derivative.width(), derivative.height()), (800, 450));

    // The temporary original is gone.
    assert!(app.temp_files().is_empty());

    // And the derivative is reachable under its URL.
    let served = app.client().get(&image_url).await;
    served.assert_status_ok();
    assert_eq!(served.as_bytes().as_ref(), data.as_slice());
}

#[tokio::test]
async fn test_narrow_image_is_not_enlarged() {
    let app = setup_test_app().await;

    let form = business_form(None).add_part(
        "image",
        image_part(create_jpeg(320, 240), "logo.jpg", "image/jpeg"),
    );
    let response = app.client().post("/api/business").multipart(form).await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    let file_name = body["image"].as_str().unwrap().trim_start_matches("/uploads/");
    let data = std::fs::read(app.uploads_dir.path().join(file_name)).unwrap();
    let derivative = image::load_from_memory(&data).unwrap();
    assert_eq!((derivative.width(), derivative.height()), (320, 240));
}

#[tokio::test]
async fn test_empty_file_part_counts_as_no_image() {
    let app = setup_test_app().await;

    let form = business_form(None).add_part("image", image_part(Vec::new(), "empty.png", "image/png"));
    let response = app.client().post("/api/business").multipart(form).await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert!(body.get("image").is_none());
    assert!(app.upload_files().is_empty());
    assert!(app.temp_files().is_empty());
}

#[tokio::test]
async fn test_non_image_upload_fails_without_leftovers() {
    let app = setup_test_app().await;

    let form = business_form(None).add_part(
        "image",
        image_part(b"definitely not an image".to_vec(), "notes.png", "image/png"),
    );
    let response = app.client().post("/api/business").multipart(form).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["message"], "Error processing the business registration");
    assert!(body["error"].as_str().is_some());
    assert_eq!(body["code"], "IMAGE_PROCESSING_ERROR");

    assert!(app.store.records().is_empty());
    assert!(app.upload_files().is_empty());
    assert!(app.temp_files().is_empty());
}

#[tokio::test]
async fn test_missing_field_with_image_leaves_no_files() {
    let app = setup_test_app().await;

    let form = business_form(Some("phone")).add_part(
        "image",
        image_part(create_png(200, 200), "a.png", "image/png"),
    );
    let response = app.client().post("/api/business").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(app.upload_files().is_empty());
    assert!(app.temp_files().is_empty());
}

#[tokio::test]
async fn test_second_image_part_is_rejected() {
    let app = setup_test_app().await;

    let form = business_form(None)
        .add_part("image", image_part(create_png(10, 10), "a.png", "image/png"))
        .add_part("image", image_part(create_png(10, 10), "b.png", "image/png"));
    let response = app.client().post("/api/business").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(app.upload_files().is_empty());
    assert!(app.temp_files().is_empty());
}

#[tokio::test]
async fn test_unknown_parts_are_ignored() {
    let app = setup_test_app().await;

    let form = business_form(None).add_text("website", "https://bistro.test");
    let response = app.client().post("/api/business").multipart(form).await;

    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_text_part_named_image_is_ignored() {
    let app = setup_test_app().await;

    let form = business_form(None).add_text("image", "https://example.com/logo.png");
    let response = app.client().post("/api/business").multipart(form).await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert!(body.get("image").is_none());
    assert!(app.upload_files().is_empty());
    assert!(app.temp_files().is_empty());
}

#[tokio::test]
async fn test_store_failure_removes_derivative() {
    let app = setup_test_app_with(
        FakeStore::failing(),
        Arc::new(FakeContent::with_entries(vec![])),
    )
    .await;

    let form = business_form(None).add_part(
        "image",
        image_part(create_png(1000, 500), "storefront.png", "image/png"),
    );
    let response = app.client().post("/api/business").multipart(form).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["message"], "Error processing the business registration");
    assert!(app.upload_files().is_empty());
    assert!(app.temp_files().is_empty());
}

#[tokio::test]
async fn test_body_over_limit_is_rejected() {
    let app = setup_test_app().await;

    // Test config allows 2 MB.
    let form = MultipartForm::new()
        .add_text("name", "Test Business")
        .add_part(
            "image",
            image_part(vec![0u8; 3 * 1024 * 1024], "huge.png", "image/png"),
        );
    let response = app.client().post("/api/business").multipart(form).await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert!(app.upload_files().is_empty());
    assert!(app.temp_files().is_empty());
}
