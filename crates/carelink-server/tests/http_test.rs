//! End-to-end HTTP tests over an in-memory SurrealDB.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use carelink_auth::AuthConfig;
use carelink_core::HospitalId;
use carelink_core::models::patient::CreatePatient;
use carelink_core::repository::PatientRepository;
use carelink_db::repository::SurrealPatientRepository;
use carelink_server::{AppState, router};
use serde_json::{Value, json};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use tower::ServiceExt;

async fn setup() -> (Router, Surreal<Db>) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    carelink_db::run_migrations(&db).await.unwrap();

    let state = AppState::new(db.clone(), &AuthConfig::new("http-test-secret"), false).unwrap();
    (router(state), db)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, set_cookie, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn register(app: &Router, username: &str, hospital: i64) {
    let (status, _, _) = send(
        app,
        post_json(
            "/staff/create",
            json!({ "username": username, "password": "secret123", "hospital_id": hospital }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn login(app: &Router, username: &str) -> String {
    let (status, _, body) = send(
        app,
        post_json(
            "/staff/login",
            json!({ "username": username, "password": "secret123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

async fn seed_patient(db: &Surreal<Db>, hospital: i64, national_id: &str) {
    SurrealPatientRepository::new(db.clone())
        .create(CreatePatient {
            hospital_id: HospitalId(hospital),
            first_name_en: Some("Somchai".into()),
            national_id: Some(national_id.into()),
            ..Default::default()
        })
        .await
        .unwrap();
}

fn search_with_cookie(query: &str, token: &str) -> Request<Body> {
    Request::get(format!("/patient/search{query}"))
        .header(header::COOKIE, format!("jwt={token}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn ping_reports_pong() {
    let (app, _) = setup().await;
    let (status, _, body) = send(&app, Request::get("/ping").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "pong");
    assert!(body["hostname"].is_string());
}

#[tokio::test]
async fn create_staff_hides_password_hash() {
    let (app, _) = setup().await;
    let (status, _, body) = send(
        &app,
        post_json(
            "/staff/create",
            json!({ "username": "alice", "password": "secret123", "hospital_id": 1 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Created successfully");
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["hospital_id"], 1);
    assert!(body["data"].get("password_hash").is_none());
    assert!(!body.to_string().contains("secret123"));
}

#[tokio::test]
async fn create_staff_validation_and_duplicates() {
    let (app, _) = setup().await;

    let (status, _, _) = send(
        &app,
        post_json(
            "/staff/create",
            json!({ "username": "", "password": "x", "hospital_id": 1 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    register(&app, "alice", 1).await;
    let (status, _, _) = send(
        &app,
        post_json(
            "/staff/create",
            json!({ "username": "alice", "password": "other", "hospital_id": 2 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_sets_credential_cookie() {
    let (app, _) = setup().await;
    register(&app, "alice", 1).await;

    let (status, set_cookie, body) = send(
        &app,
        post_json(
            "/staff/login",
            json!({ "username": "alice", "password": "secret123" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    let token = body["token"].as_str().unwrap();

    let set_cookie = set_cookie.expect("login should set a cookie");
    assert!(set_cookie.starts_with(&format!("jwt={token}")));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=3600"));
}

#[tokio::test]
async fn failed_logins_are_indistinguishable() {
    let (app, _) = setup().await;
    register(&app, "alice", 1).await;

    let (wrong_status, wrong_cookie, wrong_body) = send(
        &app,
        post_json(
            "/staff/login",
            json!({ "username": "alice", "password": "nope" }),
        ),
    )
    .await;
    let (ghost_status, _, ghost_body) = send(
        &app,
        post_json(
            "/staff/login",
            json!({ "username": "bob", "password": "secret123" }),
        ),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(ghost_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, json!({ "error": "unauthorized" }));
    assert_eq!(wrong_body, ghost_body);
    assert!(wrong_cookie.is_none());
}

#[tokio::test]
async fn search_requires_a_valid_credential() {
    let (app, _) = setup().await;

    let (status, _, body) = send(
        &app,
        Request::get("/patient/search").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "unauthorized" }));

    // alg=none, hospital 1, no signature.
    let forged = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.\
                  eyJzdWIiOiJ4Iiwic3RhZmZfbmFtZSI6IngiLCJzdGFmZl9ob3NwaXRhbF9pZCI6MSwi\
                  YXV0aG9yaXplZCI6dHJ1ZSwiaWF0IjowLCJleHAiOjk5OTk5OTk5OTl9.";
    let (status, _, _) = send(&app, search_with_cookie("", forged)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn search_is_confined_to_the_callers_hospital() {
    let (app, db) = setup().await;
    seed_patient(&db, 1, "1100").await;
    seed_patient(&db, 2, "2100").await;
    register(&app, "alice", 1).await;
    let token = login(&app, "alice").await;

    let (status, _, body) = send(&app, search_with_cookie("", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Search successfully.");
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["national_id"], "1100");

    // Asking for another hospital's patient finds nothing.
    let (status, _, body) = send(
        &app,
        search_with_cookie("?hospital_id=2&national_id=2100", &token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No patient found.");
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn bearer_header_is_accepted() {
    let (app, db) = setup().await;
    seed_patient(&db, 3, "3100").await;
    register(&app, "carol", 3).await;
    let token = login(&app, "carol").await;

    let (status, _, body) = send(
        &app,
        Request::get("/patient/search?national_id=3100")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}
