//! Database seed script
//!
//! Inserts a demo user, three categories and five tasks so a fresh
//! installation has something to show.
//!
//! ```bash
//! cargo run -p taskdeck-api --bin taskdeck-seed
//! ```

use chrono::{Duration, Utc};
use taskdeck_api::config::Config;
use taskdeck_shared::{
    auth::password::hash_password,
    db::{
        migrations::run_migrations,
        pool::{create_pool, DatabaseConfig},
    },
    models::{
        category::{Category, CreateCategory},
        task::{CreateTask, Task},
        user::{CreateUser, User},
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Seeding database...");

    let config = Config::from_env()?;
    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let password_hash = hash_password("test123")?;
    let user = User::create(
        &pool,
        CreateUser {
            username: "demo".to_string(),
            email: "demo@example.com".to_string(),
            password_hash,
        },
    )
    .await?;
    tracing::info!("Inserted user: {}", user.username);

    let mut categories = Vec::new();
    for (name, description) in [
        (
            "Development",
            "Tasks related to coding and software development",
        ),
        ("Design", "UI/UX and visual tasks"),
        ("Study", "Assignments and revision tasks"),
    ] {
        let category = Category::create(
            &pool,
            CreateCategory {
                name: name.to_string(),
                description: Some(description.to_string()),
            },
        )
        .await?;
        categories.push(category);
    }
    tracing::info!("Inserted categories: Development, Design, Study");

    let now = Utc::now();
    let tasks = [
        (
            "Build login page",
            0usize,
            Some("Implement login form with validation"),
            Some(now + Duration::days(2)),
        ),
        (
            "Fix navbar bugs",
            0,
            Some("Navbar links not aligning correctly"),
            Some(now + Duration::days(4)),
        ),
        (
            "Redesign task cards",
            1,
            Some("Make task cards match brand colors"),
            Some(now - Duration::days(1)),
        ),
        (
            "Revise software engineering notes",
            2,
            Some("Go over UML and architecture slides"),
            Some(now + Duration::days(3)),
        ),
        (
            "Write report introduction",
            2,
            Some("First draft of the final report"),
            Some(now),
        ),
    ];

    for (title, category_idx, description, due_date) in tasks {
        Task::create(
            &pool,
            CreateTask {
                title: title.to_string(),
                user_id: user.id,
                category_id: categories[category_idx].id,
                description: description.map(str::to_string),
                due_date,
            },
        )
        .await?;
    }
    tracing::info!("Inserted {} tasks", tasks.len());

    tracing::info!("Database seeded successfully");
    Ok(())
}
