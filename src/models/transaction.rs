use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A single finance transaction row as stored in the hosted database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub transaction_type: TransactionType,
    pub transaction_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Whether a transaction adds to or draws from the balance.
/// Stored as lowercase text in the `transaction_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

/// Request payload for creating a transaction.
/// `transaction_type` is accepted as a raw string so validation can report
/// unknown values instead of failing at the deserialization layer.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub transaction_type: String,
    pub transaction_date: Option<NaiveDate>,
}

/// Request payload for updating a transaction.
/// Fields left as `None` are not touched.
#[derive(Debug, Deserialize)]
pub struct UpdateTransactionRequest {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub transaction_type: Option<String>,
    pub transaction_date: Option<NaiveDate>,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!(
                "Invalid transaction type '{}'. Must be 'income' or 'expense'",
                other
            )),
        }
    }
}

impl Transaction {
    /// Create a new transaction with a generated ID and current timestamps.
    pub fn new(
        description: String,
        amount: Decimal,
        category: String,
        transaction_type: TransactionType,
        transaction_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();

        Transaction {
            id: Uuid::new_v4(),
            description,
            amount,
            category,
            transaction_type,
            transaction_date,
            created_at: now,
            updated_at: now,
        }
    }
}

impl CreateTransactionRequest {
    /// Validate the business rules for a new transaction.
    pub fn validate(&self) -> Result<(), String> {
        if self.description.trim().is_empty() {
            return Err("Description cannot be empty".to_string());
        }

        if self.description.len() > 500 {
            return Err("Description cannot exceed 500 characters".to_string());
        }

        if self.amount <= Decimal::ZERO {
            return Err("Amount must be greater than zero".to_string());
        }

        if self.category.trim().is_empty() {
            return Err("Category cannot be empty".to_string());
        }

        if self.category.len() > 100 {
            return Err("Category cannot exceed 100 characters".to_string());
        }

        self.transaction_type.parse::<TransactionType>()?;

        Ok(())
    }

    /// Convert the request into a domain model, trimming text fields.
    /// Missing `transaction_date` falls back to today (UTC).
    pub fn into_transaction(self) -> Result<Transaction, String> {
        let transaction_type = self.transaction_type.parse::<TransactionType>()?;
        let transaction_date = self
            .transaction_date
            .unwrap_or_else(|| Utc::now().date_naive());

        Ok(Transaction::new(
            self.description.trim().to_string(),
            self.amount,
            self.category.trim().to_lowercase(),
            transaction_type,
            transaction_date,
        ))
    }
}

impl UpdateTransactionRequest {
    /// At least one field must be provided; provided fields follow the same
    /// rules as creation.
    pub fn validate(&self) -> Result<(), String> {
        if self.description.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.transaction_type.is_none()
            && self.transaction_date.is_none()
        {
            return Err("At least one field must be provided for update".to_string());
        }

        if let Some(ref description) = self.description {
            if description.trim().is_empty() {
                return Err("Description cannot be empty".to_string());
            }

            if description.len() > 500 {
                return Err("Description cannot exceed 500 characters".to_string());
            }
        }

        if let Some(amount) = self.amount {
            if amount <= Decimal::ZERO {
                return Err("Amount must be greater than zero".to_string());
            }
        }

        if let Some(ref category) = self.category {
            if category.trim().is_empty() {
                return Err("Category cannot be empty".to_string());
            }

            if category.len() > 100 {
                return Err("Category cannot exceed 100 characters".to_string());
            }
        }

        if let Some(ref transaction_type) = self.transaction_type {
            transaction_type.parse::<TransactionType>()?;
        }

        Ok(())
    }

    pub fn get_normalized_description(&self) -> Option<String> {
        self.description.as_ref().map(|d| d.trim().to_string())
    }

    pub fn get_normalized_category(&self) -> Option<String> {
        self.category.as_ref().map(|c| c.trim().to_lowercase())
    }

    pub fn get_transaction_type(&self) -> Option<TransactionType> {
        self.transaction_type
            .as_ref()
            .and_then(|t| t.parse::<TransactionType>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_transaction_creation() {
        let transaction = Transaction::new(
            "Lunch order".to_string(),
            decimal("12.50"),
            "food".to_string(),
            TransactionType::Expense,
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        );

        assert_ne!(transaction.id, Uuid::nil());
        assert_eq!(transaction.description, "Lunch order");
        assert_eq!(transaction.amount, decimal("12.50"));
        assert_eq!(transaction.transaction_type, TransactionType::Expense);
        assert_eq!(transaction.created_at, transaction.updated_at);
    }

    #[test]
    fn test_transaction_type_parsing() {
        assert_eq!("income".parse::<TransactionType>().unwrap(), TransactionType::Income);
        assert_eq!("Expense".parse::<TransactionType>().unwrap(), TransactionType::Expense);
        assert_eq!(" INCOME ".parse::<TransactionType>().unwrap(), TransactionType::Income);

        assert!("transfer".parse::<TransactionType>().is_err());
        assert!("".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_create_request_validation() {
        let valid = CreateTransactionRequest {
            description: "Canteen stock purchase".to_string(),
            amount: decimal("250.00"),
            category: "Inventory".to_string(),
            transaction_type: "expense".to_string(),
            transaction_date: None,
        };
        assert!(valid.validate().is_ok());

        let empty_description = CreateTransactionRequest {
            description: "  ".to_string(),
            amount: decimal("250.00"),
            category: "Inventory".to_string(),
            transaction_type: "expense".to_string(),
            transaction_date: None,
        };
        assert!(empty_description.validate().is_err());

        let zero_amount = CreateTransactionRequest {
            description: "Refund".to_string(),
            amount: Decimal::ZERO,
            category: "misc".to_string(),
            transaction_type: "income".to_string(),
            transaction_date: None,
        };
        assert!(zero_amount.validate().is_err());

        let negative_amount = CreateTransactionRequest {
            description: "Refund".to_string(),
            amount: decimal("-5"),
            category: "misc".to_string(),
            transaction_type: "income".to_string(),
            transaction_date: None,
        };
        assert!(negative_amount.validate().is_err());

        let bad_type = CreateTransactionRequest {
            description: "Refund".to_string(),
            amount: decimal("5"),
            category: "misc".to_string(),
            transaction_type: "transfer".to_string(),
            transaction_date: None,
        };
        assert!(bad_type.validate().is_err());
    }

    #[test]
    fn test_into_transaction_normalizes_fields() {
        let request = CreateTransactionRequest {
            description: "  Vendor payment  ".to_string(),
            amount: decimal("99.99"),
            category: "  Supplies ".to_string(),
            transaction_type: "expense".to_string(),
            transaction_date: Some(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
        };

        let transaction = request.into_transaction().unwrap();

        assert_eq!(transaction.description, "Vendor payment");
        assert_eq!(transaction.category, "supplies");
        assert_eq!(transaction.transaction_date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn test_update_request_validation() {
        let valid = UpdateTransactionRequest {
            description: Some("Adjusted entry".to_string()),
            amount: None,
            category: None,
            transaction_type: None,
            transaction_date: None,
        };
        assert!(valid.validate().is_ok());

        let empty = UpdateTransactionRequest {
            description: None,
            amount: None,
            category: None,
            transaction_type: None,
            transaction_date: None,
        };
        assert!(empty.validate().is_err());

        let bad_type = UpdateTransactionRequest {
            description: None,
            amount: None,
            category: None,
            transaction_type: Some("loan".to_string()),
            transaction_date: None,
        };
        assert!(bad_type.validate().is_err());
    }

    #[test]
    fn test_transaction_serialization_shape() {
        let transaction = Transaction {
            id: Uuid::parse_str("123e4567-e89b-12d3-a456-426614174000").unwrap(),
            description: "Lunch order".to_string(),
            amount: decimal("12.50"),
            category: "food".to_string(),
            transaction_type: TransactionType::Expense,
            transaction_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            created_at: DateTime::parse_from_rfc3339("2024-03-15T10:00:00Z").unwrap().with_timezone(&Utc),
            updated_at: DateTime::parse_from_rfc3339("2024-03-15T10:00:00Z").unwrap().with_timezone(&Utc),
        };

        let json = serde_json::to_value(&transaction).expect("Failed to serialize transaction");

        assert_eq!(json["id"], "123e4567-e89b-12d3-a456-426614174000");
        assert_eq!(json["transaction_type"], "expense");
        assert_eq!(json["transaction_date"], "2024-03-15");
        assert_eq!(json["amount"], "12.50");
    }

    #[test]
    fn test_create_request_deserialization() {
        let json = r#"{"description":"Gas refill","amount":"45.00","category":"utilities","transaction_type":"expense"}"#;

        let request: CreateTransactionRequest =
            serde_json::from_str(json).expect("Failed to deserialize CreateTransactionRequest");

        assert_eq!(request.description, "Gas refill");
        assert_eq!(request.amount, decimal("45.00"));
        assert_eq!(request.transaction_date, None);
    }
}
