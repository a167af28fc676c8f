#![allow(dead_code)]

use recipehub::config::{auth::AuthConfig, database, jwt::JwtConfig};
use recipehub::models::{member, MemberRole};
use recipehub::storage::{LocalBlobStore, SharedBlobStore};
use recipehub::utils::jwt::TokenService;
use recipehub::{create_app, AppServices};
use reqwest::Client;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection, Set, Statement,
};
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Once,
};

static INIT: Once = Once::new();
static MEMBER_COUNTER: AtomicUsize = AtomicUsize::new(0);
static APP_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub const TEST_PASSWORD: &str = "test_password_123";
pub const TEST_MAX_UPLOAD_BYTES: usize = 64 * 1024;

fn init_env() {
    INIT.call_once(|| {
        dotenv::dotenv().ok();
        std::env::set_var(
            "JWT_SECRET",
            "integration_test_secret_that_is_at_least_32_characters_long",
        );
        std::env::set_var("RATE_LIMIT_ENABLED", "false");
        std::env::set_var("BCRYPT_COST", "4");
        std::env::set_var("UPLOAD_MAX_BYTES", TEST_MAX_UPLOAD_BYTES.to_string());
    });
}

pub struct TestApp {
    pub addr: String,
    pub db: DatabaseConnection,
    pub client: Client,
    pub upload_dir: PathBuf,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.addr, path)
    }
}

/// Start the app on a random port. Each app gets its own in-memory SQLite database
/// unless `TEST_DATABASE_URL` points somewhere shared.
pub async fn spawn_app() -> TestApp {
    init_env();

    let db = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => {
            let db = database::connect(&url, 5, 1)
                .await
                .expect("Failed to connect to test database");
            recipehub::migration::Migrator::up(&db, None)
                .await
                .expect("Failed to run migrations");
            cleanup_tables(&db).await;
            db
        }
        Err(_) => {
            // One connection, otherwise every pooled connection sees its own empty database
            let db = database::connect("sqlite::memory:", 1, 1)
                .await
                .expect("Failed to open in-memory database");
            recipehub::migration::Migrator::up(&db, None)
                .await
                .expect("Failed to run migrations");
            db
        }
    };

    let upload_dir = std::env::temp_dir().join(format!(
        "recipehub-test-uploads-{}-{}",
        std::process::id(),
        APP_COUNTER.fetch_add(1, Ordering::SeqCst)
    ));
    std::fs::create_dir_all(&upload_dir).expect("Failed to create upload dir");

    let jwt_config = JwtConfig::from_env().expect("JWT config");
    let blobs: SharedBlobStore = Arc::new(LocalBlobStore::new(
        upload_dir.clone(),
        TEST_MAX_UPLOAD_BYTES,
    ));
    let services = AppServices {
        db: db.clone(),
        tokens: TokenService::new(&jwt_config),
        auth: AuthConfig::from_env(),
        blobs,
    };
    let app = create_app(services, &upload_dir.to_string_lossy());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    TestApp {
        addr: format!("http://{}", addr),
        db,
        client: Client::new(),
        upload_dir,
    }
}

async fn cleanup_tables(db: &DatabaseConnection) {
    if db.get_database_backend() != DatabaseBackend::Postgres {
        return;
    }

    let tables = [
        "user_sanctions",
        "reports",
        "recipe_comments",
        "follows",
        "ratings",
        "recipe_likes",
        "recipe_tags",
        "tags",
        "recipe_ingredients",
        "ingredients",
        "recipe_steps",
        "recipes",
        "members",
    ];

    for table in tables {
        let sql = format!("TRUNCATE TABLE {} RESTART IDENTITY CASCADE", table);
        let _ = db
            .execute(Statement::from_string(DatabaseBackend::Postgres, sql))
            .await;
    }
}

/// Sign up a member and log in. Returns (member_id, token).
pub async fn create_test_member(app: &TestApp, prefix: &str) -> (i32, String) {
    let counter = MEMBER_COUNTER.fetch_add(1, Ordering::SeqCst);
    let login_id = format!("{}_{}", prefix, counter);

    let resp = app
        .client
        .post(app.url("/auth/signup"))
        .json(&json!({
            "login_id": login_id,
            "password": TEST_PASSWORD,
            "name": format!("{} cook", prefix),
        }))
        .send()
        .await
        .expect("Failed to sign up");
    let status = resp.status();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(status, 201, "signup for '{}' failed: {}", login_id, body);

    let member_id = body["data"]["member_id"]
        .as_i64()
        .unwrap_or_else(|| panic!("signup response missing member_id: {}", body))
        as i32;

    let token = login(app, &login_id, TEST_PASSWORD).await;
    (member_id, token)
}

pub async fn login(app: &TestApp, login_id: &str, password: &str) -> String {
    let resp = app
        .client
        .post(app.url("/auth/login"))
        .json(&json!({ "login_id": login_id, "password": password }))
        .send()
        .await
        .expect("Failed to log in");
    let status = resp.status();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(status, 200, "login for '{}' failed: {}", login_id, body);

    body["data"]["token"]
        .as_str()
        .unwrap_or_else(|| panic!("login response missing token: {}", body))
        .to_string()
}

/// Promote a member straight in the database. The role is read per request, so
/// existing tokens pick it up.
pub async fn make_admin(app: &TestApp, member_id: i32) {
    let active = member::ActiveModel {
        id: Set(member_id),
        role: Set(MemberRole::Admin),
        ..Default::default()
    };
    active.update(&app.db).await.expect("Failed to promote member");
}

/// Admin member ready to use. Returns (member_id, token).
pub async fn create_admin(app: &TestApp) -> (i32, String) {
    let (id, token) = create_test_member(app, "admin").await;
    make_admin(app, id).await;
    (id, token)
}

/// Create a tag as `admin_token` and return its id.
pub async fn create_tag(app: &TestApp, admin_token: &str, name: &str) -> i32 {
    let resp = app
        .client
        .post(app.url("/admin/tags"))
        .bearer_auth(admin_token)
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to create tag");
    let status = resp.status();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(status, 201, "tag creation failed: {}", body);
    body["data"]["tag_id"].as_i64().unwrap() as i32
}

/// Create a minimal recipe and return its id.
pub async fn create_recipe(app: &TestApp, token: &str, title: &str) -> i32 {
    let resp = app
        .client
        .post(app.url("/recipes"))
        .bearer_auth(token)
        .json(&json!({
            "title": title,
            "description": format!("How to make {}", title),
            "cooking_time": 30,
            "ingredients": [
                { "name": "flour", "amount": "200g" },
                { "name": "water", "amount": "120ml" },
            ],
            "steps": [
                { "step_order": 1, "content": "Mix everything" },
                { "step_order": 2, "content": "Bake" },
            ],
        }))
        .send()
        .await
        .expect("Failed to create recipe");
    let status = resp.status();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(status, 201, "recipe creation failed: {}", body);
    body["data"]["recipe_id"].as_i64().unwrap() as i32
}

/// Post a top-level comment and return its id.
pub async fn create_comment(app: &TestApp, token: &str, recipe_id: i32, content: &str) -> i32 {
    let resp = app
        .client
        .post(app.url(&format!("/recipes/{}/comments", recipe_id)))
        .bearer_auth(token)
        .json(&json!({ "content": content }))
        .send()
        .await
        .expect("Failed to create comment");
    let status = resp.status();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(status, 201, "comment creation failed: {}", body);
    body["data"]["comment_id"].as_i64().unwrap() as i32
}

/// Spawn every request at once and collect the responses in order.
pub async fn send_all<F>(futs: impl Iterator<Item = F>) -> Vec<reqwest::Response>
where
    F: std::future::Future<Output = reqwest::Result<reqwest::Response>> + Send + 'static,
{
    let handles: Vec<_> = futs.map(tokio::spawn).collect();
    let mut out = Vec::new();
    for handle in handles {
        out.push(handle.await.unwrap().unwrap());
    }
    out
}
