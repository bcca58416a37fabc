// Models module

pub mod transaction;

// Re-export commonly used types
pub use transaction::{Transaction, TransactionType, CreateTransactionRequest, UpdateTransactionRequest};
