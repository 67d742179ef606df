use crate::utils::{specials_pdf, spawn_app, spawn_app_without_directory, DIRECTORY_PATH};
use claims::{assert_err, assert_matches, assert_none, assert_some};
use jerseygirl::{
    controllers::ActionOutcome,
    directory_client::RequestError,
    domain::{DocumentFile, Subscriber, ValidationError, MAX_UPLOAD_BYTES, PDF_MEDIA_TYPE},
    service::status_message::StatusLevel,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{any, body_json, method, path},
    Mock, ResponseTemplate,
};

fn ids(subscribers: &[Subscriber]) -> Vec<&str> {
    subscribers.iter().map(|s| s.id_or_placeholder()).collect()
}

#[tokio::test]
async fn activation_loads_the_subscribers_once() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path(DIRECTORY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "1", "email": "test@example.com", "phone": "123-456-7890" },
            { "id": "2", "email": "hello@world.com", "phone": "098-765-4321" },
        ])))
        .expect(1)
        .mount(app.directory_server())
        .await;
    let admin = app.app().admin();

    // Act
    let first = admin.activate().await;
    let second = admin.activate().await;

    // Assert
    assert!(first.is_completed());
    assert_matches!(second, ActionOutcome::Skipped);
    assert_eq!(ids(&admin.subscribers()), vec!["1", "2"]);
    assert_eq!(admin.status().unwrap().level(), StatusLevel::Success);
}

#[tokio::test]
async fn manual_refresh_fetches_again() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path(DIRECTORY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(3)
        .mount(app.directory_server())
        .await;
    let admin = app.app().admin();

    // Act
    admin.activate().await;
    admin.refresh().await;
    admin.refresh().await;

    // Assert
    // Mock will do asserts on drop.
}

#[tokio::test]
async fn failed_refresh_keeps_the_previous_subscribers() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path(DIRECTORY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "1", "email": "a@example.com" },
            { "id": "2", "email": "b@other.com" },
        ])))
        .up_to_n_times(1)
        .mount(app.directory_server())
        .await;
    Mock::given(method("GET"))
        .and(path(DIRECTORY_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(app.directory_server())
        .await;
    let admin = app.app().admin();
    admin.activate().await;
    admin.set_filter("example.com");

    // Act
    let outcome = admin.refresh().await;

    // Assert
    assert_matches!(outcome, ActionOutcome::Failed(ref e) if e.code() == Some(500));
    assert_eq!(ids(&admin.subscribers()), vec!["1", "2"]);
    assert_eq!(ids(&admin.visible_subscribers()), vec!["1"]);
    assert_eq!(admin.status().unwrap().level(), StatusLevel::Error);
}

#[tokio::test]
async fn filter_narrows_the_visible_subscribers() {
    // Arrange
    let app = spawn_app().await;
    app.mock_subscribers(json!([
        { "id": "1", "email": "a@example.com" },
        { "id": "2", "email": "b@other.com" },
        { "id": "3", "phone": "555-123-4567" },
    ]))
    .await;
    let admin = app.app().admin();
    admin.activate().await;

    // Act
    admin.set_filter("example.com");

    // Assert
    assert_eq!(ids(&admin.visible_subscribers()), vec!["1"]);
    assert_eq!(admin.filter(), "example.com");

    admin.set_filter("");
    assert_eq!(ids(&admin.visible_subscribers()), vec!["1", "2", "3"]);
}

#[tokio::test]
async fn non_pdf_documents_are_rejected_without_a_request() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(app.directory_server())
        .await;
    let admin = app.app().admin();

    // Act
    let selected = admin.select_document(DocumentFile::new("menu.png", "image/png", vec![1]));
    let outcome = admin.upload().await;

    // Assert
    assert_eq!(selected, Err(ValidationError::NotPdf));
    assert!(!admin.can_upload());
    assert_matches!(outcome, ActionOutcome::Skipped);
    let status = admin.status().unwrap();
    assert_eq!(status.level(), StatusLevel::Error);
    assert_eq!(status.text(), ValidationError::NotPdf.to_string());
}

#[tokio::test]
async fn oversized_pdf_replaces_a_previously_selected_document() {
    let app = spawn_app().await;
    let admin = app.app().admin();
    admin.select_document(specials_pdf()).unwrap();

    let oversized = DocumentFile::new(
        "specials.pdf",
        PDF_MEDIA_TYPE,
        vec![0u8; MAX_UPLOAD_BYTES as usize + 1],
    );

    assert_err!(admin.select_document(oversized));
    assert_none!(admin.selected_document());
    assert!(!admin.can_upload());
}

#[tokio::test]
async fn successful_upload_clears_the_selected_document() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path(format!("{DIRECTORY_PATH}/upload")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(app.directory_server())
        .await;
    let admin = app.app().admin();
    admin.select_document(specials_pdf()).unwrap();
    assert!(admin.can_upload());

    // Act
    let outcome = admin.upload().await;

    // Assert
    assert!(outcome.is_completed());
    assert_none!(admin.selected_document());
    assert!(!admin.can_upload());
    let status = admin.status().unwrap();
    assert_eq!(status.level(), StatusLevel::Success);
    assert_eq!(status.text(), "PDF uploaded successfully");
}

#[tokio::test]
async fn failed_upload_keeps_the_selected_document() {
    // Arrange
    let app = spawn_app().await;
    app.mock_post(&format!("{DIRECTORY_PATH}/upload"), 503).await;
    let admin = app.app().admin();
    admin.select_document(specials_pdf()).unwrap();

    // Act
    let outcome = admin.upload().await;

    // Assert
    assert_matches!(outcome, ActionOutcome::Failed(_));
    assert_some!(admin.selected_document());
    assert!(admin.can_upload());
    assert!(admin.status().unwrap().is_error());
}

#[tokio::test]
async fn schedule_is_unavailable_without_a_time() {
    let app = spawn_app().await;
    let admin = app.app().admin();

    assert!(!admin.can_schedule());
    assert_matches!(admin.schedule().await, ActionOutcome::Skipped);
    assert_eq!(app.received_request_count().await, 0);
}

#[tokio::test]
async fn schedule_posts_the_time_and_clears_it() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path(format!("{DIRECTORY_PATH}/notifications")))
        .and(body_json(json!({ "scheduledTime": "2024-05-03T17:30" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(app.directory_server())
        .await;
    let admin = app.app().admin();
    admin.set_schedule_time("2024-05-03T17:30");
    assert!(admin.can_schedule());

    // Act
    let outcome = admin.schedule().await;

    // Assert
    assert!(outcome.is_completed());
    assert_eq!(admin.schedule_time(), "");
    assert_eq!(admin.status().unwrap().text(), "Notification scheduled successfully");
}

#[tokio::test]
async fn each_outcome_replaces_the_previous_status() {
    // Arrange
    let app = spawn_app().await;
    app.mock_post(&format!("{DIRECTORY_PATH}/notifications"), 500).await;
    app.mock_post(&format!("{DIRECTORY_PATH}/upload"), 200).await;
    let admin = app.app().admin();

    // Act
    admin.set_schedule_time("2024-05-03T17:30");
    admin.schedule().await;
    let failure = admin.status().unwrap();
    admin.select_document(specials_pdf()).unwrap();
    admin.upload().await;

    // Assert
    assert!(failure.is_error());
    assert_eq!(admin.schedule_time(), "2024-05-03T17:30");
    let status = admin.status().unwrap();
    assert_eq!(status.level(), StatusLevel::Success);
    assert_eq!(status.text(), "PDF uploaded successfully");
}

#[tokio::test]
async fn requests_are_gated_while_one_is_in_flight() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path(format!("{DIRECTORY_PATH}/upload")))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(200)))
        .expect(1)
        .mount(app.directory_server())
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(app.directory_server())
        .await;
    let admin = app.app().admin();
    admin.select_document(specials_pdf()).unwrap();
    admin.set_schedule_time("2024-05-03T17:30");

    // Act
    let (upload, (can_upload, can_schedule, refresh)) = tokio::join!(admin.upload(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        (admin.can_upload(), admin.can_schedule(), admin.refresh().await)
    });

    // Assert
    assert!(upload.is_completed());
    assert!(!can_upload);
    assert!(!can_schedule);
    assert_matches!(refresh, ActionOutcome::Busy);
    assert!(admin.can_schedule());
}

#[tokio::test]
async fn schedule_minimum_is_minute_precision() {
    let app = spawn_app().await;

    let minimum = app.app().admin().schedule_minimum();

    assert_eq!(minimum.len(), "2024-05-03T17:30".len());
    assert_eq!(&minimum[10..11], "T");
}

#[tokio::test]
async fn missing_contact_details_are_tolerated() {
    let app = spawn_app().await;
    app.mock_subscribers(json!([{ "id": 7, "subscribedAt": "2024-05-03T17:30:00Z" }])).await;
    let admin = app.app().admin();

    admin.activate().await;

    let subscribers = admin.subscribers();
    assert_eq!(subscribers[0].id(), Some("7"));
    assert_eq!(subscribers[0].email_or_placeholder(), "—");
    assert_eq!(subscribers[0].phone_or_placeholder(), "—");
}

#[tokio::test]
async fn subscribers_without_ids_are_listed() {
    let app = spawn_app().await;
    app.mock_subscribers(json!([
        { "email": "test@example.com", "phone": "123-456-7890" },
        { "email": "hello@world.com", "phone": "098-765-4321" },
    ]))
    .await;
    let admin = app.app().admin();

    let outcome = admin.activate().await;

    assert!(outcome.is_completed());
    assert_eq!(ids(&admin.subscribers()), vec!["—", "—"]);
    admin.set_filter("world");
    let visible = admin.visible_subscribers();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].email(), Some("hello@world.com"));
}

#[tokio::test]
async fn unreachable_directory_is_reported_as_an_error() {
    // Arrange
    let app = spawn_app_without_directory();
    let admin = app.admin();

    // Act
    let outcome = admin.activate().await;

    // Assert
    assert_matches!(outcome, ActionOutcome::Failed(RequestError::Transport(_)));
    let status = assert_some!(admin.status());
    assert_eq!(status.level(), StatusLevel::Error);
    assert!(status.text().starts_with("Could not load subscribers: "));
    assert!(admin.subscribers().is_empty());
}
