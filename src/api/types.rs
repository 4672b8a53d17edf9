// Backend API record types.
// The cached domain records and their identity and search contracts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::Entity;

/// Inventory catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub code: String,
    pub barcode: Option<String>,
    pub unit_price: f64,
    pub stock: i64,
    pub supplier_id: Option<u64>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Product {
    fn id(&self) -> u64 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.code.as_str()];
        if let Some(barcode) = &self.barcode {
            fields.push(barcode);
        }
        fields
    }
}

/// Delivery-personnel roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Courier {
    pub id: u64,
    pub name: String,
    pub employee_code: String,
    pub national_id: Option<String>,
    pub phone: Option<String>,
    pub active: bool,
}

impl Entity for Courier {
    fn id(&self) -> u64 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.employee_code.as_str()];
        if let Some(national_id) = &self.national_id {
            fields.push(national_id);
        }
        fields
    }
}
