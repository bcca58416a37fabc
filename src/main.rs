use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::{error, info, warn};

use finance_rest_api::{
    config::Config,
    db::Database,
    handlers::{
        health_check,
        transactions::{
            create_transaction, delete_transaction, get_all_transactions, get_transaction_by_id,
            update_transaction,
        },
    },
    middleware::{create_middleware_stack, init_tracing},
};

#[tokio::main]
async fn main() {
    // Load configuration first; the environment decides the log format
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize structured logging
    if let Err(e) = init_tracing(&config.environment) {
        eprintln!("Failed to initialize tracing: {}", e);
        std::process::exit(1);
    }
    info!("Configuration loaded successfully");

    // Build the connection pool to the hosted database
    let database = match Database::new(config.database.clone()).await {
        Ok(db) => {
            info!("Database connection pool created");
            Arc::new(db)
        }
        Err(e) => {
            error!("Failed to set up database connection pool: {}", e);
            std::process::exit(1);
        }
    };

    // Startup connectivity check. An unreachable database is not fatal:
    // the server still boots and /health reports "disconnected".
    match database.check_connection().await {
        Ok(()) => {
            info!("Database connection successful");

            if let Err(e) = database.migrate().await {
                warn!("Database migration failed: {}", e);
            }
        }
        Err(e) => {
            warn!("Database connection failed at startup: {}", e);
        }
    }

    // Create the Axum router with all endpoints
    let app = create_router(database);

    // Create socket address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Starting server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            info!("Server listening on {}", addr);
            info!("API available at http://localhost:{}/api", config.port);
            info!("Health check at http://localhost:{}/health", config.port);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    // Start the server with graceful shutdown handling
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

/// Create the Axum router with all endpoints and middleware
fn create_router(database: Arc<Database>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Transaction management endpoints
        .route("/api/transactions", post(create_transaction))
        .route("/api/transactions", get(get_all_transactions))
        .route("/api/transactions/:id", get(get_transaction_by_id))
        .route("/api/transactions/:id", put(update_transaction))
        .route("/api/transactions/:id", delete(delete_transaction))
        // Add shared state (database connection)
        .with_state(database)
        // Apply middleware stack
        .layer(create_middleware_stack())
}

/// Graceful shutdown signal handler
/// Listens for SIGTERM and SIGINT signals
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, initiating graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM signal, initiating graceful shutdown");
        },
    }
}
