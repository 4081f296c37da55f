//! Black-box tests over the real HTTP surface: the router is served on an
//! ephemeral port and exercised with a plain HTTP client, cookies and all.

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Value, json};

use kawari_api::app::{build_app_with, services};
use kawari_auth::{AuthConfig, SameSitePolicy, password};
use kawari_domain::User;
use kawari_store::UserStore;

const PASSWORD: &str = "Str0ng!Pass";

fn test_config() -> AuthConfig {
    AuthConfig {
        access_secret: "test-access-secret".into(),
        refresh_secret: "test-refresh-secret".into(),
        access_ttl_secs: 900,
        refresh_ttl_secs: 3600,
        cookie_secure: false,
        cookie_same_site: SameSitePolicy::Lax,
        cookie_max_age_secs: None,
    }
}

struct TestServer {
    base_url: String,
    services: Arc<services::AppServices>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, bound to an ephemeral port.
        let services = Arc::new(services::build_services(test_config()));
        let app = build_app_with(services.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            services,
            handle,
        }
    }

    /// Seed a platform super-admin directly into the store (no HTTP path
    /// creates one).
    fn seed_super_admin(&self, email: &str) {
        let hash = password::hash_password(PASSWORD).expect("hash");
        let user = User::new_super_admin("Operator".into(), email.into(), hash);
        self.services.users.insert(user).expect("seed super admin");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Pull the refresh-token cookie value out of a response's Set-Cookie
/// headers. Cookies are handled manually so tests can replay stale ones.
fn refresh_cookie(res: &reqwest::Response) -> Option<String> {
    res.headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| {
            v.strip_prefix("refresh_token=")
                .and_then(|rest| rest.split(';').next())
                .map(str::to_string)
        })
}

async fn register(
    client: &reqwest::Client,
    base: &str,
    name: &str,
    company: &str,
    email: &str,
) -> reqwest::Response {
    client
        .post(format!("{base}/api/auth/register"))
        .json(&json!({
            "name": name,
            "companyName": company,
            "email": email,
            "password": PASSWORD,
        }))
        .send()
        .await
        .unwrap()
}

async fn login(client: &reqwest::Client, base: &str, email: &str) -> reqwest::Response {
    client
        .post(format!("{base}/api/auth/login"))
        .json(&json!({ "email": email, "password": PASSWORD }))
        .send()
        .await
        .unwrap()
}

/// Register an admin and return `(access_token, user_id)`.
async fn register_admin(client: &reqwest::Client, base: &str, email: &str) -> (String, String) {
    let res = register(client, base, "Admin", "Acme GmbH", email).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    (
        body["token"].as_str().unwrap().to_string(),
        body["user"]["id"].as_str().unwrap().to_string(),
    )
}

/// Create a seller under the admin, log the seller in, return
/// `(access_token, user_id)`.
async fn add_seller(
    client: &reqwest::Client,
    base: &str,
    admin_token: &str,
    email: &str,
) -> (String, String) {
    let res = client
        .post(format!("{base}/api/auth/sellers"))
        .bearer_auth(admin_token)
        .json(&json!({ "name": "Seller", "email": email, "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    let id = created["user"]["id"].as_str().unwrap().to_string();

    let res = login(client, base, email).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    (body["token"].as_str().unwrap().to_string(), id)
}

async fn create_transaction(
    client: &reqwest::Client,
    base: &str,
    token: &str,
    kind: &str,
    amount: i64,
) -> Value {
    let res = client
        .post(format!("{base}/api/transactions"))
        .bearer_auth(token)
        .json(&json!({ "kind": kind, "amount": amount }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

async fn get_stats(client: &reqwest::Client, base: &str, token: &str) -> Value {
    let res = client
        .get(format!("{base}/api/stats"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

// -------------------------
// Authentication
// -------------------------

#[tokio::test]
async fn health_is_public_and_api_requires_auth() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/api/customers", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn register_creates_a_self_rooted_admin() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = register(&client, &srv.base_url, "Alice", "Alice GmbH", "alice@example.com").await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: Value = res.json().await.unwrap();
    let user = &body["user"];
    assert_eq!(user["role"], "admin");
    assert_eq!(user["companyId"], user["id"]);
    assert!(user.get("passwordHash").is_none());

    // The returned access token authenticates immediately.
    let token = body["token"].as_str().unwrap();
    let res = client
        .get(format!("{}/api/auth/me", srv.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let me: Value = res.json().await.unwrap();
    assert_eq!(me["user"]["email"], "alice@example.com");
}

#[tokio::test]
async fn duplicate_email_is_rejected_even_case_folded() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = register(&client, &srv.base_url, "Alice", "A", "alice@example.com").await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = register(&client, &srv.base_url, "Mallory", "B", "  ALICE@Example.com ").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "EMAIL_EXISTS");
}

#[tokio::test]
async fn weak_passwords_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for pw in ["short1!", "nouppercase1!", "NOLOWERCASE1!", "NoDigits!!", "NoSymbol11"] {
        let res = client
            .post(format!("{}/api/auth/register", srv.base_url))
            .json(&json!({
                "name": "Alice",
                "companyName": "A",
                "email": "alice@example.com",
                "password": pw,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "password {pw:?}");
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["error"], "WEAK_PASSWORD", "password {pw:?}");
    }
}

#[tokio::test]
async fn login_failures_are_uniform() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    register_admin(&client, &srv.base_url, "alice@example.com").await;

    let res = client
        .post(format!("{}/api/auth/login", srv.base_url))
        .json(&json!({ "email": "nobody@example.com", "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let unknown_email: Value = res.json().await.unwrap();

    let res = client
        .post(format!("{}/api/auth/login", srv.base_url))
        .json(&json!({ "email": "alice@example.com", "password": "Wr0ng!Pass" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let wrong_password: Value = res.json().await.unwrap();

    // Identical bodies: no account enumeration.
    assert_eq!(unknown_email, wrong_password);
    assert_eq!(unknown_email["error"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn forged_and_expired_access_tokens_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let mint = |secret: &str, exp_offset: i64| {
        let now = chrono::Utc::now().timestamp();
        let claims = json!({
            "sub": uuid::Uuid::now_v7(),
            "email": "ghost@example.com",
            "role": "admin",
            "iat": now - 7200,
            "exp": now + exp_offset,
        });
        jsonwebtoken::encode(
            &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    };

    // Expired (beyond leeway), wrong secret, and valid-but-unknown-subject
    // all answer 401.
    for token in [
        mint("test-access-secret", -3600),
        mint("some-other-secret", 600),
        mint("test-access-secret", 600),
    ] {
        let res = client
            .get(format!("{}/api/whoami", srv.base_url))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}

// -------------------------
// Refresh rotation
// -------------------------

#[tokio::test]
async fn refresh_rotates_and_replay_of_the_old_token_fails() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = register(&client, &srv.base_url, "Alice", "A", "alice@example.com").await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let first = refresh_cookie(&res).expect("register sets the refresh cookie");

    let res = client
        .post(format!("{}/api/auth/refresh", srv.base_url))
        .header(reqwest::header::COOKIE, format!("refresh_token={first}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let second = refresh_cookie(&res).expect("refresh rotates the cookie");
    assert_ne!(first, second);
    let body: Value = res.json().await.unwrap();
    assert!(body["token"].as_str().is_some());

    // The consumed token is dead.
    let res = client
        .post(format!("{}/api/auth/refresh", srv.base_url))
        .header(reqwest::header::COOKIE, format!("refresh_token={first}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // The successor still works.
    let res = client
        .post(format!("{}/api/auth/refresh", srv.base_url))
        .header(reqwest::header::COOKIE, format!("refresh_token={second}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn logout_revokes_the_refresh_token() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = register(&client, &srv.base_url, "Alice", "A", "alice@example.com").await;
    let cookie = refresh_cookie(&res).unwrap();

    let res = client
        .post(format!("{}/api/auth/logout", srv.base_url))
        .header(reqwest::header::COOKIE, format!("refresh_token={cookie}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .post(format!("{}/api/auth/refresh", srv.base_url))
        .header(reqwest::header::COOKIE, format!("refresh_token={cookie}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

// -------------------------
// Scoping
// -------------------------

#[tokio::test]
async fn sellers_see_their_own_records_and_admins_see_the_company() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (admin, _) = register_admin(&client, &srv.base_url, "admin@acme.com").await;
    let (s1, _) = add_seller(&client, &srv.base_url, &admin, "s1@acme.com").await;
    let (s2, _) = add_seller(&client, &srv.base_url, &admin, "s2@acme.com").await;

    create_transaction(&client, &srv.base_url, &s1, "sale", 100).await;
    let s2_txn = create_transaction(&client, &srv.base_url, &s2, "expense", 50).await;

    // S1 lists only its own transaction.
    let res = client
        .get(format!("{}/api/transactions", srv.base_url))
        .bearer_auth(&s1)
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["kind"], "sale");

    // A sibling's record answers like a missing one.
    let res = client
        .get(format!(
            "{}/api/transactions/{}",
            srv.base_url,
            s2_txn["id"].as_str().unwrap()
        ))
        .bearer_auth(&s1)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // The admin sees both.
    let res = client
        .get(format!("{}/api/transactions", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 2);

    // Stats follow the same visibility.
    let admin_stats = get_stats(&client, &srv.base_url, &admin).await;
    assert_eq!(
        admin_stats,
        json!({ "totalSales": 100, "totalExpenses": 50, "balance": 50 })
    );
    let s1_stats = get_stats(&client, &srv.base_url, &s1).await;
    assert_eq!(
        s1_stats,
        json!({ "totalSales": 100, "totalExpenses": 0, "balance": 100 })
    );
}

#[tokio::test]
async fn companies_are_isolated_from_each_other() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (admin_a, _) = register_admin(&client, &srv.base_url, "a@one.com").await;
    let (admin_b, _) = register_admin(&client, &srv.base_url, "b@two.com").await;

    let res = client
        .post(format!("{}/api/customers", srv.base_url))
        .bearer_auth(&admin_a)
        .json(&json!({ "name": "Big Corp" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let customer: Value = res.json().await.unwrap();

    // B sees nothing of A's, by list or by direct id.
    let res = client
        .get(format!("{}/api/customers", srv.base_url))
        .bearer_auth(&admin_b)
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert!(body["items"].as_array().unwrap().is_empty());

    let res = client
        .get(format!(
            "{}/api/customers/{}",
            srv.base_url,
            customer["id"].as_str().unwrap()
        ))
        .bearer_auth(&admin_b)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ownership_is_stamped_server_side() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (admin, admin_id) = register_admin(&client, &srv.base_url, "admin@acme.com").await;
    let (s1, s1_id) = add_seller(&client, &srv.base_url, &admin, "s1@acme.com").await;

    // Client-supplied ownership fields are ignored.
    let res = client
        .post(format!("{}/api/customers", srv.base_url))
        .bearer_auth(&s1)
        .json(&json!({
            "name": "Big Corp",
            "companyId": uuid::Uuid::now_v7(),
            "userId": uuid::Uuid::now_v7(),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let customer: Value = res.json().await.unwrap();
    assert_eq!(customer["companyId"].as_str().unwrap(), admin_id);
    assert_eq!(customer["userId"].as_str().unwrap(), s1_id);
}

#[tokio::test]
async fn malformed_ids_are_a_400_not_a_500() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let (admin, _) = register_admin(&client, &srv.base_url, "admin@acme.com").await;

    let res = client
        .get(format!("{}/api/customers/not-a-uuid", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "INVALID_ID");
}

#[tokio::test]
async fn transaction_patch_can_clear_and_redate() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let (admin, _) = register_admin(&client, &srv.base_url, "admin@acme.com").await;

    let res = client
        .post(format!("{}/api/transactions", srv.base_url))
        .bearer_auth(&admin)
        .json(&json!({ "kind": "sale", "amount": 100, "description": "first sale" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let txn: Value = res.json().await.unwrap();
    let url = format!("{}/api/transactions/{}", srv.base_url, txn["id"].as_str().unwrap());

    // Explicit null clears the description; occurredAt is rewritable.
    let res = client
        .patch(&url)
        .bearer_auth(&admin)
        .json(&json!({ "description": null, "occurredAt": "2026-08-01T12:00:00Z" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["description"], Value::Null);
    assert_eq!(updated["occurredAt"], "2026-08-01T12:00:00Z");

    // An absent field leaves the value alone.
    let res = client
        .patch(&url)
        .bearer_auth(&admin)
        .json(&json!({ "amount": 120 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["amount"], 120);
    assert_eq!(updated["occurredAt"], "2026-08-01T12:00:00Z");
}

// -------------------------
// Seller management
// -------------------------

#[tokio::test]
async fn admins_cannot_delete_themselves_but_can_delete_sellers() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (admin, admin_id) = register_admin(&client, &srv.base_url, "admin@acme.com").await;
    let (seller_token, seller_id) = add_seller(&client, &srv.base_url, &admin, "s@acme.com").await;

    let res = client
        .delete(format!("{}/api/auth/sellers/{admin_id}", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "FORBIDDEN");

    let res = client
        .delete(format!("{}/api/auth/sellers/{seller_id}", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["deleted"], true);

    // The deleted seller's live token stops working.
    let res = client
        .get(format!("{}/api/auth/me", srv.base_url))
        .bearer_auth(&seller_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn sellers_cannot_manage_sellers() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (admin, _) = register_admin(&client, &srv.base_url, "admin@acme.com").await;
    let (s1, _) = add_seller(&client, &srv.base_url, &admin, "s1@acme.com").await;

    let res = client
        .get(format!("{}/api/auth/sellers", srv.base_url))
        .bearer_auth(&s1)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

// -------------------------
// Platform surface
// -------------------------

#[tokio::test]
async fn suspension_blocks_the_whole_company_immediately() {
    let srv = TestServer::spawn().await;
    srv.seed_super_admin("root@platform.com");
    let client = reqwest::Client::new();

    let (admin, admin_id) = register_admin(&client, &srv.base_url, "admin@acme.com").await;
    let (s1, _) = add_seller(&client, &srv.base_url, &admin, "s1@acme.com").await;

    let res = login(&client, &srv.base_url, "root@platform.com").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    let root = body["token"].as_str().unwrap().to_string();

    let res = client
        .post(format!(
            "{}/api/platform/companies/{admin_id}/suspend",
            srv.base_url
        ))
        .bearer_auth(&root)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["company"]["suspended"], true);

    // Already-issued tokens stop working on the very next request, for the
    // admin and every seller under it.
    for token in [&admin, &s1] {
        let res = client
            .get(format!("{}/api/customers", srv.base_url))
            .bearer_auth(token)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    let res = client
        .post(format!(
            "{}/api/platform/companies/{admin_id}/unsuspend",
            srv.base_url
        ))
        .bearer_auth(&root)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/api/customers", srv.base_url))
        .bearer_auth(&s1)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn suspension_blocks_login_and_refresh() {
    let srv = TestServer::spawn().await;
    srv.seed_super_admin("root@platform.com");
    let client = reqwest::Client::new();

    let res = register(&client, &srv.base_url, "Alice", "Acme", "admin@acme.com").await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let cookie = refresh_cookie(&res).unwrap();
    let body: Value = res.json().await.unwrap();
    let admin_id = body["user"]["id"].as_str().unwrap().to_string();

    let res = login(&client, &srv.base_url, "root@platform.com").await;
    let body: Value = res.json().await.unwrap();
    let root = body["token"].as_str().unwrap().to_string();

    let res = client
        .post(format!(
            "{}/api/platform/companies/{admin_id}/suspend",
            srv.base_url
        ))
        .bearer_auth(&root)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // No fresh sessions for a suspended company, by password or by
    // refresh token.
    let res = login(&client, &srv.base_url, "admin@acme.com").await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .post(format!("{}/api/auth/refresh", srv.base_url))
        .header(reqwest::header::COOKIE, format!("refresh_token={cookie}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .post(format!(
            "{}/api/platform/companies/{admin_id}/unsuspend",
            srv.base_url
        ))
        .bearer_auth(&root)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // The untouched refresh token works again after unsuspension.
    let res = client
        .post(format!("{}/api/auth/refresh", srv.base_url))
        .header(reqwest::header::COOKIE, format!("refresh_token={cookie}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn role_gates_sit_behind_the_auth_gate() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Missing credentials answer 401 before any role check answers 403.
    for path in ["/api/stats", "/api/platform/stats", "/api/auth/sellers"] {
        let res = client
            .get(format!("{}{path}", srv.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "path {path}");
    }
}

#[tokio::test]
async fn super_admins_are_barred_from_tenant_records() {
    let srv = TestServer::spawn().await;
    srv.seed_super_admin("root@platform.com");
    let client = reqwest::Client::new();

    let res = login(&client, &srv.base_url, "root@platform.com").await;
    let body: Value = res.json().await.unwrap();
    let root = body["token"].as_str().unwrap();

    for path in ["/api/customers", "/api/transactions", "/api/invoices", "/api/stats"] {
        let res = client
            .get(format!("{}{path}", srv.base_url))
            .bearer_auth(root)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN, "path {path}");
    }
}

#[tokio::test]
async fn platform_stats_count_companies_and_sellers() {
    let srv = TestServer::spawn().await;
    srv.seed_super_admin("root@platform.com");
    let client = reqwest::Client::new();

    let (admin_a, a_id) = register_admin(&client, &srv.base_url, "a@one.com").await;
    register_admin(&client, &srv.base_url, "b@two.com").await;
    add_seller(&client, &srv.base_url, &admin_a, "s1@one.com").await;

    let res = login(&client, &srv.base_url, "root@platform.com").await;
    let body: Value = res.json().await.unwrap();
    let root = body["token"].as_str().unwrap().to_string();

    let res = client
        .post(format!("{}/api/platform/companies/{a_id}/suspend", srv.base_url))
        .bearer_auth(&root)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/api/platform/stats", srv.base_url))
        .bearer_auth(&root)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let stats: Value = res.json().await.unwrap();
    assert_eq!(
        stats,
        json!({ "companies": 2, "suspendedCompanies": 1, "sellers": 1 })
    );

    // Ordinary admins cannot reach the platform surface.
    let res = client
        .get(format!("{}/api/platform/stats", srv.base_url))
        .bearer_auth(&admin_a)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

// -------------------------
// Invoices
// -------------------------

#[tokio::test]
async fn invoice_totals_are_computed_server_side() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let (admin, _) = register_admin(&client, &srv.base_url, "admin@acme.com").await;

    let res = client
        .post(format!("{}/api/invoices", srv.base_url))
        .bearer_auth(&admin)
        .json(&json!({
            "items": [
                { "description": "widget", "quantity": 2, "unitPrice": 150 },
                { "description": "gadget", "quantity": 1, "unitPrice": 700 },
            ],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let invoice: Value = res.json().await.unwrap();
    assert_eq!(invoice["total"], 1000);
    assert_eq!(invoice["status"], "draft");

    // Empty invoices are rejected.
    let res = client
        .post(format!("{}/api/invoices", srv.base_url))
        .bearer_auth(&admin)
        .json(&json!({ "items": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Replacing the lines recomputes the total.
    let res = client
        .patch(format!(
            "{}/api/invoices/{}",
            srv.base_url,
            invoice["id"].as_str().unwrap()
        ))
        .bearer_auth(&admin)
        .json(&json!({
            "status": "issued",
            "items": [{ "description": "widget", "quantity": 3, "unitPrice": 100 }],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["total"], 300);
    assert_eq!(updated["status"], "issued");
}

// -------------------------
// Notifications
// -------------------------

#[tokio::test]
async fn seller_transactions_notify_the_admin() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (admin, _) = register_admin(&client, &srv.base_url, "admin@acme.com").await;
    let (s1, _) = add_seller(&client, &srv.base_url, &admin, "s1@acme.com").await;

    create_transaction(&client, &srv.base_url, &s1, "sale", 100).await;

    let res = client
        .get(format!("{}/api/notifications", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["read"], false);
    assert!(items[0]["message"].as_str().unwrap().contains("sale"));

    // Mark read.
    let res = client
        .post(format!(
            "{}/api/notifications/{}/read",
            srv.base_url,
            items[0]["id"].as_str().unwrap()
        ))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let note: Value = res.json().await.unwrap();
    assert_eq!(note["read"], true);
}
