//! End-to-end HTTP tests for the axum router with in-memory repositories.
//!
//! Run with: `cargo test --features "axum_api mocks" --test e2e_axum`

#![cfg(all(feature = "axum_api", feature = "mocks"))]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use teamgate::actions::GrantAdminAction;
use teamgate::api::axum::{AppState, router};
use teamgate::crypto::Argon2Hasher;
use teamgate::jwt::{JwtConfig, JwtService};
use teamgate::teams::MockTeamStore;
use teamgate::MockUserRepository;

const SECRET: &str = "an-integration-test-secret-of-sufficient-length";

struct TestApp {
    app: Router,
    users: MockUserRepository,
}

impl TestApp {
    fn new() -> Self {
        let users = MockUserRepository::new();
        let store = MockTeamStore::with_users(&users);
        let jwt = JwtService::new(JwtConfig::new(SECRET).unwrap());
        let state = AppState::new(users.clone(), store.clone(), store, jwt)
            .with_hasher(Argon2Hasher::new(1024, 1, 1));

        Self {
            app: router(state),
            users,
        }
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    /// Registers and logs in, returning the user id and a bearer token.
    async fn signup(&self, name: &str, email: &str) -> (String, String) {
        let (status, user) = self
            .send(
                "POST",
                "/auth/register",
                None,
                Some(json!({"name": name, "email": email, "password": "password123"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let token = self.login(email).await;
        (user["id"].as_str().unwrap().to_owned(), token)
    }

    async fn login(&self, email: &str) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/auth/login",
                None,
                Some(json!({"email": email, "password": "password123"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_owned()
    }

    /// Registers a user, promotes them to global admin and returns a fresh token.
    async fn admin(&self) -> (String, String) {
        let (id, _) = self.signup("Root", "root@example.com").await;
        GrantAdminAction::new(self.users.clone())
            .bootstrap("root@example.com")
            .await
            .unwrap();
        (id, self.login("root@example.com").await)
    }

    async fn create_team(&self, token: &str, name: &str) -> String {
        let (status, team) = self
            .send("POST", "/teams", Some(token), Some(json!({"name": name})))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        team["id"].as_str().unwrap().to_owned()
    }
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let (status, body) = app.send("GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_register_login_me() {
    let app = TestApp::new();
    let (id, token) = app.signup("Ada", "Ada@Example.com").await;

    let (status, me) = app.send("GET", "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], id.as_str());
    assert_eq!(me["email"], "ada@example.com");
    assert!(me.get("hashed_password").is_none());
}

#[tokio::test]
async fn test_register_duplicate_is_conflict() {
    let app = TestApp::new();
    app.signup("Ada", "ada@example.com").await;

    let (status, body) = app
        .send(
            "POST",
            "/auth/register",
            None,
            Some(json!({"name": "Ada", "email": "ada@example.com", "password": "password123"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();
    app.signup("Ada", "ada@example.com").await;

    let (status, body) = app
        .send(
            "POST",
            "/auth/login",
            None,
            Some(json!({"email": "ada@example.com", "password": "wrong-password"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_team_routes_require_token() {
    let app = TestApp::new();

    let (status, _) = app.send("GET", "/teams", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send("POST", "/teams", None, Some(json!({"name": "Eng"})))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.send("GET", "/teams", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_team_requires_global_admin() {
    let app = TestApp::new();
    let (_, token) = app.signup("Ada", "ada@example.com").await;

    let (status, body) = app
        .send("POST", "/teams", Some(&token), Some(json!({"name": "Eng"})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_create_team_validation() {
    let app = TestApp::new();
    let (_, token) = app.admin().await;

    let (status, body) = app
        .send("POST", "/teams", Some(&token), Some(json!({"name": "   "})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_team_lifecycle() {
    let app = TestApp::new();
    let (admin_id, admin) = app.admin().await;
    let (ada_id, ada) = app.signup("Ada", "ada@example.com").await;

    let team_id = app.create_team(&admin, " QA ").await;
    let team_uri = format!("/teams/{team_id}");
    let members_uri = format!("/teams/{team_id}/members");

    let (status, _) = app.send("GET", &team_uri, Some(&ada), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, membership) = app
        .send(
            "POST",
            &members_uri,
            Some(&admin),
            Some(json!({"user_id": ada_id, "role": "member"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(membership["role"], "member");
    assert_eq!(membership["is_manager"], false);

    let (status, team) = app.send("GET", &team_uri, Some(&ada), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(team["name"], "QA");

    let (status, teams) = app.send("GET", "/teams", Some(&ada), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(teams.as_array().unwrap().len(), 1);

    let (status, members) = app.send("GET", &members_uri, Some(&ada), None).await;
    assert_eq!(status, StatusCode::OK);
    let members = members.as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0]["user_id"], admin_id.as_str());
    assert_eq!(members[0]["role"], "manager");

    // A plain member cannot manage the team.
    let (status, _) = app
        .send("PATCH", &team_uri, Some(&ada), Some(json!({"name": "Mine"})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, updated) = app
        .send(
            "PATCH",
            &team_uri,
            Some(&admin),
            Some(json!({"description": "Quality"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "QA");
    assert_eq!(updated["description"], "Quality");

    let (status, archived) = app.send("DELETE", &team_uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(archived["deleted_at"].is_string());

    let (status, _) = app.send("DELETE", &team_uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send("GET", &team_uri, Some(&ada), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_member_role_change_and_removal() {
    let app = TestApp::new();
    let (_, admin) = app.admin().await;
    let (ada_id, ada) = app.signup("Ada", "ada@example.com").await;
    let (bob_id, _) = app.signup("Bob", "bob@example.com").await;

    let team_id = app.create_team(&admin, "Eng").await;
    let ada_uri = format!("/teams/{team_id}/members/{ada_id}");

    let (status, membership) = app
        .send("PATCH", &ada_uri, Some(&admin), Some(json!({"role": "Manager"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(membership["role"], "manager");
    assert_eq!(membership["is_manager"], true);

    // Ada manages the team now and can add Bob.
    let (status, _) = app
        .send(
            "POST",
            &format!("/teams/{team_id}/members"),
            Some(&ada),
            Some(json!({"userId": bob_id})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .send("PATCH", &ada_uri, Some(&admin), Some(json!({"role": "owner"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, removed) = app.send("DELETE", &ada_uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(removed["deleted_at"].is_string());

    let (status, _) = app.send("DELETE", &ada_uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_member_without_user_id() {
    let app = TestApp::new();
    let (_, admin) = app.admin().await;
    let team_id = app.create_team(&admin, "Eng").await;

    let (status, body) = app
        .send(
            "POST",
            &format!("/teams/{team_id}/members"),
            Some(&admin),
            Some(json!({"role": "member"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_list_roles() {
    let app = TestApp::new();
    let (_, token) = app.signup("Ada", "ada@example.com").await;

    let (status, body) = app.send("GET", "/roles", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["roles"], json!(["member", "manager", "admin"]));

    let (status, _) = app.send("GET", "/roles", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_path_ids_are_validation_errors() {
    let app = TestApp::new();
    let (_, admin) = app.admin().await;
    let team_id = app.create_team(&admin, "Eng").await;

    let (status, body) = app.send("GET", "/teams/not-a-uuid", Some(&admin), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = app
        .send(
            "DELETE",
            &format!("/teams/{team_id}/members/42"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"], "user_id is required");
}
