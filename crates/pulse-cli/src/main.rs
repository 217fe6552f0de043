//! Pulse service demo entry point
//!
//! Run with:
//! ```bash
//! cargo run -p pulse-cli
//! ```
//!
//! Wires the configured record store into the service layer, seeds demo
//! data on the memory backend, and walks through the core operations:
//! follow, feed composition, like toggling, and notification grouping.
//!
//! This binary is the composition root: services and stores are constructed
//! exactly once, here, and handed their dependencies explicitly. The "first
//! user is the signed-in profile" stand-in also lives only here.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use pulse_common::{try_init_tracing, AppConfig, StoreBackend, TracingConfig};
use pulse_core::{RecordId, User, UserRepository};
use pulse_service::dto::{CreateNotificationRequest, CreatePostRequest};
use pulse_service::{
    FeedService, FollowService, NotificationService, PostService, ServiceContext,
    ServiceContextBuilder,
};
use pulse_store::store::HttpStoreConfig;
use pulse_store::{
    HttpRecordStore, InMemoryFollowGraph, MemoryRecordStore, SharedRecordStore,
    StoreCommentRepository, StoreConversationRepository, StoreCounterRepository,
    StoreMessageRepository, StoreNotificationRepository, StorePostRepository, StoreUserRepository,
};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing(TracingConfig::default()) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Demo run failed");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    info!("Starting pulse demo...");

    let config = AppConfig::from_env()?;
    info!(env = ?config.app.env, backend = ?config.store.backend, "Configuration loaded");

    let store = build_store(&config)?;
    let seed = config.store.backend == StoreBackend::Memory;
    let ctx = build_context(&config, store)?;

    if seed {
        seed_demo_data(&ctx).await?;
    }

    walkthrough(&ctx).await?;

    Ok(())
}

fn build_store(config: &AppConfig) -> anyhow::Result<SharedRecordStore> {
    Ok(match config.store.backend {
        StoreBackend::Memory => {
            let latency = Duration::from_millis(config.store.simulated_latency_ms);
            Arc::new(MemoryRecordStore::with_latency(latency))
        }
        StoreBackend::Http => Arc::new(HttpRecordStore::new(HttpStoreConfig {
            base_url: config
                .store
                .base_url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("http backend requires STORE_BASE_URL"))?,
            project_id: config.store.project_id.clone(),
            api_key: config
                .store
                .api_key
                .clone()
                .ok_or_else(|| anyhow::anyhow!("http backend requires STORE_API_KEY"))?,
            request_timeout: Duration::from_secs(config.store.request_timeout_secs),
        })?),
    })
}

fn build_context(config: &AppConfig, store: SharedRecordStore) -> anyhow::Result<ServiceContext> {
    ServiceContextBuilder::new()
        .user_repo(Arc::new(StoreUserRepository::new(Arc::clone(&store))))
        .post_repo(Arc::new(StorePostRepository::new(Arc::clone(&store))))
        .comment_repo(Arc::new(StoreCommentRepository::new(Arc::clone(&store))))
        .notification_repo(Arc::new(StoreNotificationRepository::new(Arc::clone(&store))))
        .conversation_repo(Arc::new(StoreConversationRepository::new(Arc::clone(&store))))
        .message_repo(Arc::new(StoreMessageRepository::new(Arc::clone(&store))))
        .follow_store(Arc::new(InMemoryFollowGraph::new()))
        .counter_store(Arc::new(StoreCounterRepository::new(store)))
        .feed_config(config.feed.clone())
        .build()
        .map_err(|e| anyhow::anyhow!(e.to_string()))
}

/// Seed a handful of profiles, posts, and notifications
async fn seed_demo_data(ctx: &ServiceContext) -> anyhow::Result<()> {
    let profiles = [
        ("aria", "Aria Chen", "chasing golden hour"),
        ("marcus", "Marcus Webb", "street photography + coffee"),
        ("sol", "Sol Duarte", "plants, mostly"),
    ];

    let mut users = Vec::new();
    for (username, display_name, bio) in profiles {
        let mut user = User::new(
            RecordId::default(),
            username.to_string(),
            display_name.to_string(),
        );
        user.bio = Some(bio.to_string());
        users.push(ctx.user_repo().create(&user).await?);
    }

    let posts = PostService::new(ctx);
    for (author, content) in [
        (&users[1], "Morning light over the river market"),
        (&users[1], "New zine is at the printer!"),
        (&users[2], "The monstera finally unfurled"),
        (&users[2], "Propagation station update: chaos"),
    ] {
        posts
            .create(
                author.id,
                CreatePostRequest {
                    content: content.to_string(),
                    media_urls: Vec::new(),
                },
            )
            .await?;
    }

    let notifications = NotificationService::new(ctx);
    notifications
        .create(CreateNotificationRequest {
            kind: "follow".to_string(),
            target_id: users[0].id,
            actor_id: Some(users[1].id),
            post_id: None,
            comment_id: None,
            conversation_id: None,
            content: None,
        })
        .await?;
    notifications
        .create(CreateNotificationRequest {
            kind: "like".to_string(),
            target_id: users[0].id,
            actor_id: Some(users[2].id),
            post_id: None,
            comment_id: None,
            conversation_id: None,
            content: Some("Morning light over the river market".to_string()),
        })
        .await?;

    info!(users = users.len(), "Demo data seeded");
    Ok(())
}

/// Exercise the core operations and print their results
async fn walkthrough(ctx: &ServiceContext) -> anyhow::Result<()> {
    // Demo stand-in for the authenticated profile
    let me = ctx
        .user_repo()
        .first()
        .await?
        .ok_or_else(|| anyhow::anyhow!("store has no users"))?;
    info!(user = %me.handle(), "Acting as");

    let follows = FollowService::new(ctx);
    let others = ctx.user_repo().list().await?;
    for user in others.iter().filter(|user| user.id != me.id).take(2) {
        follows.follow(me.id, user.id).await?;
    }

    let feed = FeedService::new(ctx).compose_feed(me.id, 1, 10).await?;
    println!("── home feed ({} posts)", feed.len());
    println!("{}", serde_json::to_string_pretty(&feed)?);

    if let Some(first) = feed.first() {
        let liked = PostService::new(ctx)
            .toggle_like(RecordId::parse(&first.id)?)
            .await?;
        println!("── liked post {} (likes: {})", liked.id, liked.like_count);
    }

    let grouped = NotificationService::new(ctx).grouped(me.id).await?;
    println!("── notifications ({} total)", grouped.total());
    println!("{}", serde_json::to_string_pretty(&grouped)?);

    Ok(())
}
