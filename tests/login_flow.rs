//! End-to-end login flow against the assembled router and an in-memory store.

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use secrecy::SecretString;
use serde_json::{json, Value};
use signet::{
    client::{
        logged_in, ClientError, HttpLoginClient, LoginForm, MemoryTokenStorage, TokenStorage,
        ALERT_MESSAGE,
    },
    signet::{
        auth::{hash_password, AuthConfig, AuthState},
        router,
        store::{MemoryUserStore, User, UserStore},
    },
};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "integration-secret-0123456789abcdef";
const EMAIL: &str = "ada@example.com";
const PASSWORD: &str = "hunter22";

async fn app() -> Result<(Router, Arc<AuthState>, Uuid)> {
    let store = Arc::new(MemoryUserStore::new());
    let id = Uuid::new_v4();
    store
        .insert(User {
            id,
            email: EMAIL.to_string(),
            password_hash: hash_password(PASSWORD)?,
            name: "Ada".to_string(),
        })
        .await?;

    let state = Arc::new(AuthState::new(
        AuthConfig::default().with_token_ttl_seconds(60),
        &SecretString::from(SECRET.to_string()),
        store,
    )?);
    Ok((router(state.clone())?, state, id))
}

fn post_json(uri: &str, body: &Value) -> Result<Request<Body>> {
    Ok(Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body)?))?)
}

fn get(uri: &str, token: Option<&str>) -> Result<Request<Body>> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    Ok(builder.body(Body::empty())?)
}

async fn json_body(response: axum::response::Response) -> Result<Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn login_issues_a_token_the_server_accepts() -> Result<()> {
    let (app, state, id) = app().await?;

    let response = app
        .clone()
        .oneshot(post_json(
            "/user/login",
            &json!({ "email": EMAIL, "password": PASSWORD }),
        )?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let body = json_body(response).await?;
    let token = body["token"].as_str().context("token in body")?;
    assert_eq!(state.tokens().verify(token)?, id);
    assert_eq!(body["user"]["email"], EMAIL);
    assert_eq!(body["user"]["name"], "Ada");
    assert!(body["user"].get("password").is_none());

    let response = app.oneshot(get("/user/me", Some(token))?).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await?["id"], id.to_string());
    Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() -> Result<()> {
    let (app, _, _) = app().await?;

    let wrong_password = app
        .clone()
        .oneshot(post_json(
            "/user/login",
            &json!({ "email": EMAIL, "password": "wrong-password" }),
        )?)
        .await?;
    let unknown_email = app
        .oneshot(post_json(
            "/user/login",
            &json!({ "email": "nobody@example.com", "password": PASSWORD }),
        )?)
        .await?;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(wrong_password).await?, json_body(unknown_email).await?);
    Ok(())
}

#[tokio::test]
async fn login_without_payload_is_bad_request() -> Result<()> {
    let (app, _, _) = app().await?;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/user/login")
        .body(Body::empty())?;

    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await?, json!({ "error": "missing payload" }));
    Ok(())
}

#[tokio::test]
async fn protected_route_needs_a_valid_token() -> Result<()> {
    let (app, _, _) = app().await?;

    let response = app.clone().oneshot(get("/user/me", None)?).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.oneshot(get("/user/me", Some("forged.token.value"))?).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn expired_token_is_rejected_by_middleware() -> Result<()> {
    let (app, state, id) = app().await?;

    // Issued two minutes ago with a one minute lifetime.
    let issued_at = jsonwebtoken::get_current_timestamp() - 120;
    let expired = state.tokens().issue_at(id, issued_at)?;
    let response = app.clone().oneshot(get("/user/me", Some(&expired))?).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let fresh = state.tokens().issue(id)?;
    let response = app.oneshot(get("/user/me", Some(&fresh))?).await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn register_then_duplicate() -> Result<()> {
    let (app, _, _) = app().await?;
    let body = json!({ "email": "grace@example.com", "password": "compilers", "name": "Grace" });

    let response = app
        .clone()
        .oneshot(post_json("/user/register", &body)?)
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await?;
    assert!(created["token"].as_str().is_some_and(|t| !t.is_empty()));

    let response = app
        .clone()
        .oneshot(post_json("/user/register", &body)?)
        .await?;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        json_body(response).await?,
        json!({ "error": "email already registered" })
    );

    let response = app
        .oneshot(post_json(
            "/user/login",
            &json!({ "email": "grace@example.com", "password": "compilers" }),
        )?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn health_reports_ok() -> Result<()> {
    let (app, _, _) = app().await?;
    let response = app.oneshot(get("/health", None)?).await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn form_controller_against_live_server() -> Result<()> {
    let (app, _, _) = app().await?;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server = tokio::spawn(async move { axum::serve(listener, app).await });

    let api = HttpLoginClient::new(&format!("http://{addr}"))?;
    let storage = MemoryTokenStorage::new();
    let mut form = LoginForm::new();

    form.set_email(EMAIL);
    form.set_password("wrong-password");
    let err = form
        .submit(&api, &storage)
        .await
        .err()
        .context("wrong password must fail")?;
    assert!(matches!(err, ClientError::Http { status: 401, .. }));
    assert_eq!(form.alert(), Some(ALERT_MESSAGE));
    assert_eq!(form.email(), EMAIL);
    assert!(!logged_in(&storage)?);

    form.dismiss_alert();
    form.set_password(PASSWORD);
    let payload = form.submit(&api, &storage).await?;
    assert_eq!(payload.user.email, EMAIL);
    assert_eq!(form.email(), "");
    assert_eq!(form.alert(), None);
    assert!(logged_in(&storage)?);

    let token = storage.load()?.context("stored token")?;
    let me = api.me(&token).await?;
    assert_eq!(me.email, EMAIL);

    server.abort();
    Ok(())
}
