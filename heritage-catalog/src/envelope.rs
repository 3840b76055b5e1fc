//! Wire format of the remote catalog.
//!
//! The service wraps its payload in a gateway envelope whose `body` field is
//! itself a JSON-encoded string:
//!
//! ```text
//! { "body": "[{\"id\":1,\"name\":\"Virupaksha\",\"location\":\"Hampi\"}]" }
//! ```
//!
//! Decoding is therefore two-stage: the outer object first, then the string
//! held in `body`. Both stages are part of the external contract.

use crate::error::{CatalogError, CatalogResult};
use crate::types::HeritageModel;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[derive(Debug, Deserialize, Serialize)]
struct Envelope {
    body: serde_json::Value,
}

/// Decode a raw response body into the ordered list of models.
pub fn decode_catalog(bytes: &[u8]) -> CatalogResult<Vec<HeritageModel>> {
    let envelope: Envelope = serde_json::from_slice(bytes).map_err(|e| {
        debug!("Outer envelope is not valid JSON: {}", e);
        CatalogError::Envelope(e.to_string())
    })?;

    let body = match envelope.body {
        serde_json::Value::String(body) => body,
        other => {
            return Err(CatalogError::Envelope(format!(
                "expected `body` to be a JSON-encoded string, found {}",
                json_type_name(&other)
            )))
        }
    };
    trace!("Envelope body is {} bytes", body.len());

    let models: Vec<HeritageModel> = serde_json::from_str(&body).map_err(CatalogError::Body)?;
    debug!("Decoded {} heritage models", models.len());
    Ok(models)
}

/// Encode models in the same envelope shape the service produces.
pub fn encode_catalog(models: &[HeritageModel]) -> CatalogResult<String> {
    let body = serde_json::to_string(models).map_err(CatalogError::Body)?;
    let envelope = Envelope {
        body: serde_json::Value::String(body),
    };
    serde_json::to_string(&envelope).map_err(CatalogError::Body)
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
