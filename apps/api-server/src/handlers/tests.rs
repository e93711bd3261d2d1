use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use pulse_core::ports::UserRepository;
use pulse_infra::{
    Argon2PasswordService, InMemoryPostRepository, InMemoryUserRepository, OsRngSecretGenerator,
};

use super::configure_routes;
use crate::state::AppState;

fn harness() -> (AppState, Arc<InMemoryUserRepository>) {
    let users = Arc::new(InMemoryUserRepository::new());
    let state = AppState::new(
        users.clone(),
        Arc::new(InMemoryPostRepository::new()),
        Arc::new(Argon2PasswordService::new()),
        Arc::new(OsRngSecretGenerator),
    );
    (state, users)
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

/// Send a request and return the status with the decoded JSON body.
macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

fn register(body: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/users/register")
        .set_json(body)
}

fn login(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({ "email": email, "password": password }))
}

fn create_post(api_key: &str, content: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/posts")
        .set_json(json!({ "apiKey": api_key, "content": content }))
}

fn update_post(id: &str, api_key: &str, content: &str) -> test::TestRequest {
    test::TestRequest::put()
        .uri(&format!("/posts/{id}"))
        .set_json(json!({ "apiKey": api_key, "content": content }))
}

fn ann() -> Value {
    json!({ "userName": "ann", "email": "a@x.com", "password": "pw1" })
}

#[actix_rt::test]
async fn test_session_lifecycle_end_to_end() {
    let (state, _) = harness();
    let app = app!(state);

    let (status, body) = send!(app, register(ann()));
    assert_eq!(status, StatusCode::CREATED);
    let user_id = body["data"]["userId"].as_str().unwrap().to_string();

    let (status, body) = send!(app, login("a@x.com", "pw1"));
    assert_eq!(status, StatusCode::OK);
    let t1 = body["data"]["apiKey"].as_str().unwrap().to_string();
    assert!(t1.starts_with(&format!("mern:{user_id}:a@x.com:")));

    let (status, body) = send!(app, create_post(&t1, "hi"));
    assert_eq!(status, StatusCode::CREATED);
    let post = body["data"].clone();
    let post_id = post["id"].as_str().unwrap().to_string();
    assert_eq!(post["authorUserId"], user_id.as_str());
    assert_eq!(post["createdAt"], post["updatedAt"]);

    let (status, body) = send!(app, login("a@x.com", "pw1"));
    assert_eq!(status, StatusCode::OK);
    let t2 = body["data"]["apiKey"].as_str().unwrap().to_string();
    assert_ne!(t1, t2);

    let (status, body) = send!(app, update_post(&post_id, &t1, "stale"));
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["title"], "Invalid API Key");

    let (status, body) = send!(app, update_post(&post_id, &t2, "edited"));
    assert_eq!(status, StatusCode::OK);
    let updated = &body["data"];
    assert_eq!(updated["content"], "edited");
    assert_eq!(updated["createdAt"], post["createdAt"]);

    let created_at: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(post["createdAt"].clone()).unwrap();
    let updated_at: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(updated["updatedAt"].clone()).unwrap();
    assert!(updated_at > created_at);
}

#[actix_rt::test]
async fn test_duplicate_email_is_rejected() {
    let (state, users) = harness();
    let app = app!(state);

    let (status, _) = send!(app, register(ann()));
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send!(
        app,
        register(json!({ "userName": "other", "email": "a@x.com", "password": "pw2" }))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "Email already exists");
    assert_eq!(users.len().await, 1);
}

#[actix_rt::test]
async fn test_wrong_password_does_not_rotate_secret() {
    let (state, users) = harness();
    let app = app!(state);

    send!(app, register(ann()));
    let (_, body) = send!(app, login("a@x.com", "pw1"));
    let key = body["data"]["apiKey"].as_str().unwrap().to_string();
    let before = users
        .find_by_email("a@x.com")
        .await
        .unwrap()
        .unwrap()
        .session_secret;

    let (status, body) = send!(app, login("a@x.com", "wrong"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.get("data").is_none());

    let after = users
        .find_by_email("a@x.com")
        .await
        .unwrap()
        .unwrap()
        .session_secret;
    assert_eq!(before, after);

    let (status, _) = send!(app, create_post(&key, "still valid"));
    assert_eq!(status, StatusCode::CREATED);
}

#[actix_rt::test]
async fn test_unknown_email_looks_like_wrong_password() {
    let (state, _) = harness();
    let app = app!(state);
    send!(app, register(ann()));

    let (wrong_status, wrong_body) = send!(app, login("a@x.com", "wrong"));
    let (unknown_status, unknown_body) = send!(app, login("nobody@x.com", "pw1"));

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, unknown_status);
    assert_eq!(wrong_body, unknown_body);
}

#[actix_rt::test]
async fn test_missing_fields_are_bad_requests() {
    let (state, _) = harness();
    let app = app!(state);

    let cases = [
        register(json!({ "email": "a@x.com", "password": "pw1" })),
        register(json!({ "userName": "", "email": "a@x.com", "password": "pw1" })),
        login("a@x.com", ""),
        test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({ "content": "hi" })),
        create_post("mern:whatever", ""),
        update_post(&uuid::Uuid::new_v4().to_string(), "", "hi"),
    ];

    for req in cases {
        let (status, body) = send!(app, req);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Missing required fields");
    }
}

#[actix_rt::test]
async fn test_malformed_json_is_bad_request() {
    let (state, _) = harness();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/users/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json");

    let (status, _) = send!(app, req);
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_email_with_delimiter_is_rejected_at_registration() {
    let (state, users) = harness();
    let app = app!(state);

    let (status, _) = send!(
        app,
        register(json!({ "userName": "x", "email": "a:b@x.com", "password": "pw1" }))
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(users.is_empty().await);
}

#[actix_rt::test]
async fn test_forged_and_garbage_keys_are_forbidden() {
    let (state, _) = harness();
    let app = app!(state);

    let (_, body) = send!(app, register(ann()));
    let user_id = body["data"]["userId"].as_str().unwrap().to_string();

    let never_logged_in = format!("mern:{user_id}:a@x.com:guess");
    let wrong_marker = format!("nope:{user_id}:a@x.com:guess");
    for key in [
        "garbage",
        "mern:not-a-uuid:a@x.com:s",
        never_logged_in.as_str(),
        wrong_marker.as_str(),
    ] {
        let (status, body) = send!(app, create_post(key, "hi"));
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body.get("detail").is_none());
    }
}

#[actix_rt::test]
async fn test_update_unknown_or_malformed_post_id() {
    let (state, _) = harness();
    let app = app!(state);

    send!(app, register(ann()));
    let (_, body) = send!(app, login("a@x.com", "pw1"));
    let key = body["data"]["apiKey"].as_str().unwrap().to_string();

    let missing = uuid::Uuid::new_v4().to_string();
    let (status, body) = send!(app, update_post(&missing, &key, "x"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Post not found");

    let (status, _) = send!(app, update_post("not-an-id", &key, "x"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_unknown_endpoint() {
    let (state, _) = harness();
    let app = app!(state);

    let (status, body) = send!(app, test::TestRequest::get().uri("/nope"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Endpoint not found");

    let (status, _) = send!(app, test::TestRequest::post().uri("/users/delete"));
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_health_check() {
    let (state, _) = harness();
    let app = app!(state);

    let (status, body) = send!(app, test::TestRequest::get().uri("/health"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
