// Response envelopes and shape normalization.
//
// The serverless handlers are inconsistent: lists arrive bare or keyed,
// saved rows arrive under the singular name or under `item`. Everything
// is folded into the typed shapes below before a caller sees it.
// Mutation bodies must carry a boolean `success` discriminant.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::endpoint::Endpoint;
use crate::error::Error;

/// Normalized list response: always the object-with-named-key shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    /// Collection key the items belong to (e.g. `"appointments"`).
    pub key: &'static str,
    pub items: Vec<T>,
}

/// A row returned by a successful create or update.
#[derive(Debug, Clone, PartialEq)]
pub struct Saved<T> {
    pub item: T,
    pub message: Option<String>,
}

/// Acknowledgement of a single delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deleted {
    pub id: i64,
    pub message: Option<String>,
}

/// Result of a bulk mutation, applied per item on the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOutcome {
    /// Ids the mutation was applied to.
    #[serde(default)]
    pub affected: Vec<i64>,
    /// Ids that did not exist (or were already deleted).
    #[serde(default)]
    pub missing: Vec<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `{ error, code }` body returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

// ── Normalization ───────────────────────────────────────────────────

pub(crate) fn listing<T: DeserializeOwned>(
    endpoint: &Endpoint,
    body: Value,
    raw: &str,
) -> Result<Listing<T>, Error> {
    let items = match body {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => match map.remove(endpoint.collection_key) {
            Some(items @ Value::Array(_)) => items,
            Some(_) => {
                return Err(unexpected(format!(
                    "`{}` is not an array",
                    endpoint.collection_key
                )));
            }
            None => {
                return Err(unexpected(format!(
                    "missing `{}` collection",
                    endpoint.collection_key
                )));
            }
        },
        other => {
            return Err(unexpected(format!(
                "expected array or object, got {}",
                kind_of(&other)
            )));
        }
    };

    Ok(Listing {
        key: endpoint.collection_key,
        items: decode(items, raw)?,
    })
}

pub(crate) fn saved<T: DeserializeOwned>(
    endpoint: &Endpoint,
    body: Value,
    raw: &str,
) -> Result<Saved<T>, Error> {
    let mut map = acknowledged(body)?;
    let item = map
        .remove(endpoint.item_key)
        .or_else(|| map.remove("item"))
        .filter(|v| !v.is_null())
        .ok_or_else(|| unexpected(format!("missing `{}` in response", endpoint.item_key)))?;

    Ok(Saved {
        item: decode(item, raw)?,
        message: message_of(&map),
    })
}

pub(crate) fn deleted(requested: i64, body: Value) -> Result<Deleted, Error> {
    let map = acknowledged(body)?;
    let id = map.get("id").and_then(Value::as_i64).unwrap_or(requested);
    if id != requested {
        return Err(unexpected(format!(
            "delete acknowledged id {id}, requested {requested}"
        )));
    }

    Ok(Deleted {
        id,
        message: message_of(&map),
    })
}

pub(crate) fn bulk(body: Value, raw: &str) -> Result<BulkOutcome, Error> {
    let map = acknowledged(body)?;
    decode(Value::Object(map), raw)
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Enforce the `success` discriminant and hand back the remaining object.
fn acknowledged(body: Value) -> Result<Map<String, Value>, Error> {
    let Value::Object(map) = body else {
        return Err(unexpected(format!(
            "expected object, got {}",
            kind_of(&body)
        )));
    };

    match map.get("success") {
        Some(Value::Bool(true)) => Ok(map),
        Some(Value::Bool(false)) => Err(Error::Rejected {
            message: map
                .get("error")
                .or_else(|| map.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("backend reported failure")
                .to_owned(),
        }),
        Some(_) => Err(unexpected("`success` is not a boolean".into())),
        None => Err(unexpected("missing `success` discriminant".into())),
    }
}

fn decode<T: DeserializeOwned>(value: Value, raw: &str) -> Result<T, Error> {
    serde_json::from_value(value).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: raw.to_owned(),
    })
}

fn message_of(map: &Map<String, Value>) -> Option<String> {
    map.get("message").and_then(Value::as_str).map(str::to_owned)
}

fn unexpected(message: String) -> Error {
    Error::UnexpectedResponse { message }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
