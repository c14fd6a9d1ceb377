//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::ServeArgs;
use crate::commands::seed::seed_demo_users;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::MemoryStore;

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    // The user store lives for the process lifetime
    let store = Arc::new(MemoryStore::new());

    if args.seed {
        seed_demo_users(store.as_ref()).await?;
        tracing::info!("Demo users seeded");
    }

    let app_state = AppState::from_store(store, &config);

    // Build router
    let app = create_router(app_state);

    // Start server
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
