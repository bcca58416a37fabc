// Transaction handlers
// HTTP handlers for the transaction CRUD operations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::{
    db::Database,
    error::ApiError,
    models::transaction::{CreateTransactionRequest, TransactionType, UpdateTransactionRequest},
};

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    pub category: Option<String>,
    pub transaction_type: Option<String>,
}

/// Create a new transaction
/// POST /api/transactions
pub async fn create_transaction(
    State(db): State<Arc<Database>>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!(
        "Creating new {} transaction in category: {}",
        request.transaction_type, request.category
    );

    let transaction = db.create_transaction(request).await?;

    info!("Successfully created transaction with id: {}", transaction.id);
    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Get transaction by ID
/// GET /api/transactions/:id
pub async fn get_transaction_by_id(
    State(db): State<Arc<Database>>,
    Path(transaction_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Fetching transaction with id: {}", transaction_id);

    let transaction = db.get_transaction_by_id(&transaction_id).await?;

    Ok((StatusCode::OK, Json(transaction)))
}

/// Get all transactions, optionally filtered by category and/or type
/// GET /api/transactions?category=<name>&transaction_type=<income|expense>
pub async fn get_all_transactions(
    State(db): State<Arc<Database>>,
    Query(params): Query<ListTransactionsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let transaction_type = match params.transaction_type.as_deref() {
        Some(raw) => Some(raw.parse::<TransactionType>().map_err(ApiError::Validation)?),
        None => None,
    };

    if let Some(ref category) = params.category {
        info!("Fetching transactions in category: {}", category);
    } else {
        info!("Fetching all transactions");
    }

    let transactions = db
        .get_all_transactions(params.category.as_deref(), transaction_type)
        .await?;

    info!("Retrieved {} transactions", transactions.len());
    Ok((StatusCode::OK, Json(transactions)))
}

/// Update transaction by ID
/// PUT /api/transactions/:id
pub async fn update_transaction(
    State(db): State<Arc<Database>>,
    Path(transaction_id): Path<String>,
    Json(request): Json<UpdateTransactionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Updating transaction with id: {}", transaction_id);

    let transaction = db.update_transaction(&transaction_id, request).await?;

    info!("Successfully updated transaction with id: {}", transaction_id);
    Ok((StatusCode::OK, Json(transaction)))
}

/// Delete transaction by ID
/// DELETE /api/transactions/:id
pub async fn delete_transaction(
    State(db): State<Arc<Database>>,
    Path(transaction_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Deleting transaction with id: {}", transaction_id);

    db.delete_transaction(&transaction_id).await?;

    info!("Successfully deleted transaction with id: {}", transaction_id);
    Ok(StatusCode::NO_CONTENT)
}
