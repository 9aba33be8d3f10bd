use std::sync::Arc;

use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tower::ServiceExt;

use fragments_model::Fragments;
use fragments_server::api::{self, AppState};
use fragments_server::auth::{AuthProvider, owner_id_for_email};
use fragments_server::config::UserConfig;
use fragments_store::{ByteStore, StoreError, StoreKey};
use fragments_store_memory::{MemoryByteStore, MemoryMetadataStore};

const USER1: (&str, &str) = ("user1@email.com", "password1");
const USER2: (&str, &str) = ("user2@email.com", "password2");

// -- Helpers --------------------------------------------------------------

/// Cheap argon2 parameters keep the suite fast; verification reads the
/// parameters back out of the PHC string.
fn hash(password: &str) -> String {
    let params = Params::new(Params::MIN_M_COST, 1, 1, None).unwrap();
    let argon = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::encode_b64(b"fragments-test-salt").unwrap();
    argon
        .hash_password(password.as_bytes(), &salt)
        .unwrap()
        .to_string()
}

fn build_state(auth: bool, max_body_bytes: usize) -> AppState {
    let provider = auth.then(|| {
        Arc::new(AuthProvider::new(&[
            UserConfig {
                email: USER1.0.to_owned(),
                password_hash: hash(USER1.1),
            },
            UserConfig {
                email: USER2.0.to_owned(),
                password_hash: hash(USER2.1),
            },
        ]))
    });

    AppState {
        fragments: Fragments::new(
            Arc::new(MemoryMetadataStore::new()),
            Arc::new(MemoryByteStore::new()),
        ),
        auth: provider,
        external_url: "http://localhost:8080".to_owned(),
        max_body_bytes,
    }
}

/// Byte store that rejects every write.
struct UnwritableByteStore;

#[async_trait]
impl ByteStore for UnwritableByteStore {
    async fn write(&self, _key: &StoreKey, _data: Bytes) -> Result<(), StoreError> {
        Err(StoreError::Io("bucket unreachable".into()))
    }

    async fn read(&self, key: &StoreKey) -> Result<Bytes, StoreError> {
        Err(StoreError::NotFound(key.canonical()))
    }

    async fn delete(&self, key: &StoreKey) -> Result<(), StoreError> {
        Err(StoreError::NotFound(key.canonical()))
    }
}

fn app() -> Router {
    api::router(build_state(true, 5 * 1024 * 1024))
}

fn basic((email, password): (&str, &str)) -> String {
    format!("Basic {}", STANDARD.encode(format!("{email}:{password}")))
}

struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Reply {
    fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    fn content_type(&self) -> &str {
        self.headers
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
    }
}

async fn send(app: &Router, req: Request<Body>) -> Reply {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    Reply {
        status,
        headers,
        body,
    }
}

fn request(method: Method, uri: &str, user: (&str, &str)) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, basic(user))
}

async fn get(app: &Router, uri: &str, user: (&str, &str)) -> Reply {
    send(app, request(Method::GET, uri, user).body(Body::empty()).unwrap()).await
}

async fn post(app: &Router, user: (&str, &str), content_type: &str, body: &'static [u8]) -> Reply {
    let req = request(Method::POST, "/v1/fragments", user)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    send(app, req).await
}

async fn create(app: &Router, user: (&str, &str), content_type: &str, body: &'static [u8]) -> String {
    let reply = post(app, user, content_type, body).await;
    assert_eq!(reply.status, StatusCode::CREATED);
    reply.json()["fragment"]["id"].as_str().unwrap().to_owned()
}

fn assert_error(reply: &Reply, status: StatusCode) {
    assert_eq!(reply.status, status);
    let body = reply.json();
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["code"], status.as_u16());
    assert!(body["error"]["message"].is_string());
}

// -- Health and auth ------------------------------------------------------

#[tokio::test]
async fn health_is_public() {
    let app = app();
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let reply = send(&app, req).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json()["status"], "ok");
    assert!(reply.json()["version"].is_string());
    assert_eq!(reply.headers.get(header::CACHE_CONTROL).unwrap(), "no-cache");
}

#[tokio::test]
async fn missing_credentials_are_unauthorized() {
    let app = app();
    let req = Request::builder()
        .uri("/v1/fragments")
        .body(Body::empty())
        .unwrap();
    let reply = send(&app, req).await;

    assert_error(&reply, StatusCode::UNAUTHORIZED);
    assert!(reply.headers.contains_key(header::WWW_AUTHENTICATE));
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = app();
    let reply = get(&app, "/v1/fragments", (USER1.0, "nope")).await;
    assert_error(&reply, StatusCode::UNAUTHORIZED);

    let reply = get(&app, "/v1/fragments", ("stranger@email.com", USER1.1)).await;
    assert_error(&reply, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn disabled_auth_trusts_basic_username() {
    let app = api::router(build_state(false, 1024));
    let reply = post(&app, ("dev@email.com", ""), "text/plain", b"dev").await;

    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(
        reply.json()["fragment"]["ownerId"],
        owner_id_for_email("dev@email.com").as_str()
    );
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let app = app();
    let reply = get(&app, "/v2/nothing", USER1).await;
    assert_error(&reply, StatusCode::NOT_FOUND);
}

// -- Create ---------------------------------------------------------------

#[tokio::test]
async fn create_returns_location_and_record() {
    let app = app();
    let reply = post(&app, USER1, "text/plain", b"hello").await;

    assert_eq!(reply.status, StatusCode::CREATED);
    let body = reply.json();
    assert_eq!(body["status"], "ok");

    let fragment = &body["fragment"];
    let id = fragment["id"].as_str().unwrap();
    assert_eq!(fragment["ownerId"], owner_id_for_email(USER1.0).as_str());
    assert_eq!(fragment["type"], "text/plain");
    assert_eq!(fragment["size"], 5);
    assert!(fragment["created"].is_string());
    assert!(fragment["updated"].is_string());

    let location = reply.headers.get(header::LOCATION).unwrap().to_str().unwrap();
    assert_eq!(location, format!("http://localhost:8080/v1/fragments/{id}"));
}

#[tokio::test]
async fn failed_data_write_leaves_no_fragment_behind() {
    let mut state = build_state(true, 5 * 1024 * 1024);
    state.fragments = Fragments::new(
        Arc::new(MemoryMetadataStore::new()),
        Arc::new(UnwritableByteStore),
    );
    let app = api::router(state);

    let reply = post(&app, USER1, "text/plain", b"hello").await;
    assert_error(&reply, StatusCode::INTERNAL_SERVER_ERROR);

    let reply = get(&app, "/v1/fragments?expand=1", USER1).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json()["fragments"], serde_json::json!([]));
}

#[tokio::test]
async fn create_keeps_charset_parameter() {
    let app = app();
    let reply = post(&app, USER1, "text/plain; charset=utf-8", b"hi").await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.json()["fragment"]["type"], "text/plain; charset=utf-8");
}

#[tokio::test]
async fn create_without_content_type_is_bad_request() {
    let app = app();
    let req = request(Method::POST, "/v1/fragments", USER1)
        .body(Body::from("hello"))
        .unwrap();
    let reply = send(&app, req).await;
    assert_error(&reply, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_unsupported_type_is_415() {
    let app = app();
    let reply = post(&app, USER1, "application/pdf", b"%PDF-1.7").await;
    assert_error(&reply, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let listed = get(&app, "/v1/fragments", USER1).await;
    assert_eq!(listed.json()["fragments"], serde_json::json!([]));
}

#[tokio::test]
async fn oversized_body_is_413() {
    let app = api::router(build_state(true, 16));
    let reply = post(&app, USER1, "text/plain", &[b'x'; 64]).await;
    assert_error(&reply, StatusCode::PAYLOAD_TOO_LARGE);
}

// -- Read -----------------------------------------------------------------

#[tokio::test]
async fn fetch_returns_raw_data() {
    let app = app();
    let id = create(&app, USER1, "text/plain; charset=utf-8", b"hello world").await;

    let reply = get(&app, &format!("/v1/fragments/{id}"), USER1).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type(), "text/plain; charset=utf-8");
    assert_eq!(&reply.body[..], b"hello world");
}

#[tokio::test]
async fn fragments_are_private_to_their_owner() {
    let app = app();
    let id = create(&app, USER1, "text/plain", b"mine").await;

    let reply = get(&app, &format!("/v1/fragments/{id}"), USER2).await;
    assert_error(&reply, StatusCode::NOT_FOUND);
    let reply = get(&app, &format!("/v1/fragments/{id}/info"), USER2).await;
    assert_error(&reply, StatusCode::NOT_FOUND);

    let listed = get(&app, "/v1/fragments", USER2).await;
    assert_eq!(listed.json()["fragments"], serde_json::json!([]));
}

#[tokio::test]
async fn missing_fragment_is_404() {
    let app = app();
    let reply = get(&app, "/v1/fragments/does-not-exist", USER1).await;
    assert_error(&reply, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_ids_and_expanded() {
    let app = app();
    let first = create(&app, USER1, "text/plain", b"one").await;
    let second = create(&app, USER1, "application/json", b"{}").await;

    let reply = get(&app, "/v1/fragments", USER1).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        reply.json(),
        serde_json::json!({ "status": "ok", "fragments": [first, second] })
    );

    let reply = get(&app, "/v1/fragments?expand=1", USER1).await;
    let body = reply.json();
    let records = body["fragments"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], first.as_str());
    assert_eq!(records[1]["type"], "application/json");
    assert_eq!(records[1]["size"], 2);
}

#[tokio::test]
async fn info_returns_record_and_formats() {
    let app = app();
    let id = create(&app, USER1, "text/markdown", b"# Title").await;

    let reply = get(&app, &format!("/v1/fragments/{id}/info"), USER1).await;
    assert_eq!(reply.status, StatusCode::OK);
    let body = reply.json();
    assert_eq!(body["fragment"]["id"], id.as_str());
    assert_eq!(body["fragment"]["type"], "text/markdown");
    assert_eq!(body["fragment"]["size"], 7);
    assert_eq!(
        body["formats"],
        serde_json::json!(["text/markdown", "text/html", "text/plain"])
    );
}

// -- Conversion -----------------------------------------------------------

#[tokio::test]
async fn markdown_converts_to_html_and_text() {
    let app = app();
    let id = create(&app, USER1, "text/markdown", b"# Hello\n**bold**").await;

    let reply = get(&app, &format!("/v1/fragments/{id}.html"), USER1).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type(), "text/html");
    let html = std::str::from_utf8(&reply.body).unwrap();
    assert!(html.contains("<h1>Hello</h1>"));
    assert!(html.contains("<strong>bold</strong>"));

    let reply = get(&app, &format!("/v1/fragments/{id}.txt"), USER1).await;
    assert_eq!(reply.content_type(), "text/plain");
    assert_eq!(&reply.body[..], b"# Hello\n**bold**");
}

#[tokio::test]
async fn json_converts_to_yaml() {
    let app = app();
    let id = create(&app, USER1, "application/json", br#"{"name":"John"}"#).await;

    let reply = get(&app, &format!("/v1/fragments/{id}.yaml"), USER1).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type(), "application/yaml");
    let back: serde_json::Value = serde_yaml_ng::from_slice(&reply.body).unwrap();
    assert_eq!(back, serde_json::json!({ "name": "John" }));
}

#[tokio::test]
async fn csv_converts_to_json() {
    let app = app();
    let id = create(&app, USER1, "text/csv", b"name,age\nJohn,30").await;

    let reply = get(&app, &format!("/v1/fragments/{id}.json"), USER1).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type(), "application/json");
    assert_eq!(reply.json(), serde_json::json!([{ "name": "John", "age": "30" }]));
}

#[tokio::test]
async fn unsupported_conversion_is_415() {
    let app = app();
    let id = create(&app, USER1, "text/plain", b"plain").await;

    let reply = get(&app, &format!("/v1/fragments/{id}.html"), USER1).await;
    assert_error(&reply, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn malformed_source_is_400() {
    let app = app();
    let id = create(&app, USER1, "application/json", b"{not json").await;

    let reply = get(&app, &format!("/v1/fragments/{id}.yaml"), USER1).await;
    assert_error(&reply, StatusCode::BAD_REQUEST);

    // Raw fetch never converts, so it still works.
    let reply = get(&app, &format!("/v1/fragments/{id}"), USER1).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(&reply.body[..], b"{not json");
}

// -- Update ---------------------------------------------------------------

fn put(uri: &str, user: (&str, &str), content_type: &str, body: &'static [u8]) -> Request<Body> {
    request(Method::PUT, uri, user)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn update_replaces_data() {
    let app = app();
    let id = create(&app, USER1, "text/plain", b"before").await;
    let uri = format!("/v1/fragments/{id}");

    let reply = send(&app, put(&uri, USER1, "text/plain", b"after!!")).await;
    assert_eq!(reply.status, StatusCode::OK);
    let body = reply.json();
    assert_eq!(body["fragment"]["size"], 7);
    assert_eq!(body["formats"], serde_json::json!(["text/plain"]));

    let reply = get(&app, &uri, USER1).await;
    assert_eq!(&reply.body[..], b"after!!");
}

#[tokio::test]
async fn update_with_other_type_is_400() {
    let app = app();
    let id = create(&app, USER1, "text/plain", b"before").await;
    let uri = format!("/v1/fragments/{id}");

    let reply = send(&app, put(&uri, USER1, "text/markdown", b"# after")).await;
    assert_error(&reply, StatusCode::BAD_REQUEST);

    let reply = get(&app, &uri, USER1).await;
    assert_eq!(&reply.body[..], b"before");
}

#[tokio::test]
async fn update_missing_fragment_is_404() {
    let app = app();
    let reply = send(&app, put("/v1/fragments/nope", USER1, "text/plain", b"x")).await;
    assert_error(&reply, StatusCode::NOT_FOUND);
}

// -- Delete ---------------------------------------------------------------

#[tokio::test]
async fn delete_removes_fragment() {
    let app = app();
    let id = create(&app, USER1, "text/plain", b"bye").await;
    let uri = format!("/v1/fragments/{id}");

    let req = request(Method::DELETE, &uri, USER1).body(Body::empty()).unwrap();
    let reply = send(&app, req).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json(), serde_json::json!({ "status": "ok" }));

    assert_error(&get(&app, &uri, USER1).await, StatusCode::NOT_FOUND);
    let listed = get(&app, "/v1/fragments", USER1).await;
    assert_eq!(listed.json()["fragments"], serde_json::json!([]));

    let req = request(Method::DELETE, &uri, USER1).body(Body::empty()).unwrap();
    assert_error(&send(&app, req).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_by_other_owner_is_404() {
    let app = app();
    let id = create(&app, USER1, "text/plain", b"keep").await;
    let uri = format!("/v1/fragments/{id}");

    let req = request(Method::DELETE, &uri, USER2).body(Body::empty()).unwrap();
    assert_error(&send(&app, req).await, StatusCode::NOT_FOUND);
    assert_eq!(get(&app, &uri, USER1).await.status, StatusCode::OK);
}
