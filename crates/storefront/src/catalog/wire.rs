//! Wire-format normalization for the remote catalog.
//!
//! The reference deployment has served more than one field naming over its
//! life (`price` vs `precio`, `title` vs `producto`, numbers as strings).
//! Everything is normalized to the canonical [`Product`] schema here, at
//! the service boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, de};

use tuhogar_core::{Price, ProductId};

use crate::models::Product;

/// Raw catalog payload accepting every historical field spelling.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductPayload {
    #[serde(deserialize_with = "de_flexible_string")]
    id: String,
    #[serde(default, alias = "producto", alias = "name")]
    title: Option<String>,
    #[serde(default, alias = "precio", deserialize_with = "de_flexible_price")]
    price: Option<Price>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "categoria")]
    category: Option<String>,
    #[serde(default, deserialize_with = "de_flexible_u32")]
    stock: Option<u32>,
    #[serde(default, alias = "imagen")]
    image: Option<String>,
}

impl ProductPayload {
    /// Normalize to the canonical schema. Absent fields default to empty
    /// strings, a zero price, and zero stock.
    pub(crate) fn into_product(self) -> Product {
        Product {
            id: ProductId::new(self.id),
            title: self.title.unwrap_or_default(),
            price: self.price.unwrap_or(Price::ZERO),
            description: self.description.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            stock: self.stock.unwrap_or(0),
            image: self.image.unwrap_or_default(),
        }
    }
}

/// Accept a string or a bare number as an id.
fn de_flexible_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Integer(n) => n.to_string(),
    })
}

/// Accept a number or a numeric string as a price; rejects negatives.
fn de_flexible_price<'de, D>(deserializer: D) -> Result<Option<Price>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    let amount = match Option::<Raw>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Raw::Number(n)) => Decimal::try_from(n).map_err(de::Error::custom)?,
        Some(Raw::Text(s)) => s.trim().parse::<Decimal>().map_err(de::Error::custom)?,
    };

    Price::new(amount).map(Some).map_err(de::Error::custom)
}

/// Accept an integer, a float, or a numeric string as a stock count;
/// negatives floor at zero.
fn de_flexible_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Integer(i64),
        Number(f64),
        Text(String),
    }

    let value = match Option::<Raw>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Raw::Integer(n)) => n,
        #[allow(clippy::cast_possible_truncation)]
        Some(Raw::Number(n)) => n.trunc() as i64,
        Some(Raw::Text(s)) => s.trim().parse::<i64>().map_err(de::Error::custom)?,
    };

    Ok(Some(u32::try_from(value).unwrap_or(0)))
}
