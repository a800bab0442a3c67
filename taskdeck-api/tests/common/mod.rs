/// Common test utilities for integration tests
///
/// Provides a `TestContext` holding a fresh database connection, the router,
/// a seeded user/category, and a valid bearer token.
///
/// These tests require a running PostgreSQL database; `DATABASE_URL` and
/// `JWT_SECRET` must be set (a `.env` file works).

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use sqlx::PgPool;
use taskdeck_api::app::{build_router, AppState};
use taskdeck_api::config::Config;
use taskdeck_shared::auth::jwt::{create_token, Claims};
use taskdeck_shared::models::category::{Category, CreateCategory};
use taskdeck_shared::models::user::{CreateUser, User};
use tower::Service as _;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    pub user: User,
    pub category: Category,
    pub token: String,
}

impl TestContext {
    /// Creates a new test context with a migrated database and one seeded
    /// user and category
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;

        // Path relative to the taskdeck-api crate directory
        sqlx::migrate!("../migrations").run(&db).await?;

        let user = User::create(
            &db,
            CreateUser {
                username: format!("test-{}", Uuid::new_v4()),
                email: format!("test-{}@example.com", Uuid::new_v4()),
                password_hash: taskdeck_shared::auth::password::hash_password("Testpass123")?,
            },
        )
        .await?;

        let category = Category::create(
            &db,
            CreateCategory {
                name: format!("test-category-{}", Uuid::new_v4()),
                description: None,
            },
        )
        .await?;

        let claims = Claims::new(user.id, user.email.clone(), config.token_lifetime());
        let token = create_token(&claims, &config.jwt.secret)?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            config,
            user,
            category,
            token,
        })
    }

    /// Returns the Authorization header value for the seeded user
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Sends a JSON request through the router
    pub async fn request(
        &mut self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
        authed: bool,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);

        if authed {
            builder = builder.header("authorization", self.auth_header());
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.app.call(request).await.unwrap()
    }

    /// Removes the rows this context created
    ///
    /// Deleting the user cascades to its tasks, which unblocks the
    /// restrict FK on the category.
    pub async fn cleanup(self) -> anyhow::Result<()> {
        User::delete(&self.db, self.user.id).await?;
        Category::delete(&self.db, self.category.id).await?;
        Ok(())
    }
}

/// Reads a response body as JSON, asserting the expected status first
pub async fn json_body(response: Response<Body>, expected: StatusCode) -> serde_json::Value {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    if status != expected {
        panic!(
            "Expected {}, got {}: {}",
            expected,
            status,
            String::from_utf8_lossy(&bytes)
        );
    }

    if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    }
}
