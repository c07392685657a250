//! Products received during a reception.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    #[serde(rename = "электроника")]
    Electronics,
    #[serde(rename = "одежда")]
    Clothes,
    #[serde(rename = "обувь")]
    Shoes,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [
        ProductType::Electronics,
        ProductType::Clothes,
        ProductType::Shoes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProductType::Electronics => "электроника",
            ProductType::Clothes => "одежда",
            ProductType::Shoes => "обувь",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::Validation("invalid product type".into()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DbId,
    pub date_time: Timestamp,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub reception_id: DbId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_types_round_trip() {
        for t in ProductType::ALL {
            assert_eq!(t.as_str().parse::<ProductType>().unwrap(), t);
        }
        assert!("мебель".parse::<ProductType>().is_err());
    }

    #[test]
    fn product_serializes_type_field() {
        let product = Product {
            id: uuid::Uuid::nil(),
            date_time: chrono::Utc::now(),
            product_type: ProductType::Shoes,
            reception_id: uuid::Uuid::nil(),
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["type"], "обувь");
        assert!(json["receptionId"].is_string());
        assert!(json["dateTime"].is_string());
    }
}
