use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(PropertyId);

/// A listing as stored by the backend. The client only ever holds transient copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub address: String,
    pub price: f64,
    pub size: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

/// Body of create/update requests.
///
/// Numeric fields that failed to coerce are serialized as `null` so the backend
/// reports them through its own validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PropertyId>,
    pub address: String,
    pub price: Option<f64>,
    pub size: Option<f64>,
    pub description: String,
}

impl PropertyInput {
    /// Builds an input from raw form text, coercing the numeric fields.
    pub fn from_form(address: &str, price: &str, size: &str, description: &str) -> Self {
        Self {
            id: None,
            address: address.to_string(),
            price: coerce_number(price),
            size: coerce_number(size),
            description: description.to_string(),
        }
    }

    pub fn with_id(mut self, id: PropertyId) -> Self {
        self.id = Some(id);
        self
    }
}

impl From<&Property> for PropertyInput {
    fn from(value: &Property) -> Self {
        Self {
            id: Some(value.id),
            address: value.address.clone(),
            price: Some(value.price),
            size: Some(value.size),
            description: value.description.clone(),
        }
    }
}

/// Parses form text as a finite number. Blank or non-numeric text yields `None`.
pub fn coerce_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
