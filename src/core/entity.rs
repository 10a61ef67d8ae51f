//! Public entity shapes exposed by the query API
//!
//! All entities are immutable value snapshots built from backend records at
//! resolution time and owned by the response being assembled.

use crate::core::service::{AccountRecord, ProductRecord};
use serde::{Deserialize, Serialize};

/// An account, as owned by the account service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
}

/// A product, as owned by the catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
}

/// An order whose relationship fields are resolved lazily
///
/// Orders are produced elsewhere in the query engine; the resolvers only
/// read `account_id` to follow the relationship into the account service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub account_id: String,
}

impl Order {
    pub fn new(id: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            account_id: account_id.into(),
        }
    }
}

impl From<AccountRecord> for Account {
    fn from(record: AccountRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
        }
    }
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            price: record.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_from_record() {
        let account = Account::from(AccountRecord::new("42", "Ada"));
        assert_eq!(
            account,
            Account {
                id: "42".to_string(),
                name: "Ada".to_string()
            }
        );
    }

    #[test]
    fn test_product_from_record() {
        let product = Product::from(ProductRecord::new("p1", "Lamp", "Desk lamp", 19.5));
        assert_eq!(product.id, "p1");
        assert_eq!(product.name, "Lamp");
        assert_eq!(product.description, "Desk lamp");
        assert_eq!(product.price, 19.5);
    }

    #[test]
    fn test_order_serializes_foreign_key() {
        let order = Order::new("o1", "7");
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["account_id"], "7");
    }
}
