//! Catalog records and the per-invocation query result.

use crate::error::CatalogError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Message used when a failure carries no text of its own.
const GENERIC_FAILURE_MESSAGE: &str = "Failed to load 3D models";

/// Opaque model identifier. The service emits either numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelId::Number(n) => write!(f, "{n}"),
            ModelId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ModelId {
    fn from(n: i64) -> Self {
        ModelId::Number(n)
    }
}

impl From<i32> for ModelId {
    fn from(n: i32) -> Self {
        ModelId::Number(i64::from(n))
    }
}

impl From<&str> for ModelId {
    fn from(s: &str) -> Self {
        ModelId::Text(s.to_string())
    }
}

/// A visitor review attached to a model. Only the count is displayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_rating"
    )]
    pub rating: Option<f64>,
}

impl Review {
    /// Interpret one entry of a `reviews` array. Bare strings are taken as
    /// the comment; anything unreadable still counts as a review.
    fn from_value(value: Value) -> Self {
        match value {
            Value::String(comment) => Review {
                comment: Some(comment),
                ..Review::default()
            },
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Review::default(),
        }
    }
}

/// A 3D heritage model record as returned by the remote catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeritageModel {
    pub id: ModelId,
    pub name: String,
    pub location: String,
    /// Locator of the 3D asset handed to the viewer widget; not validated here.
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_reviews"
    )]
    pub reviews: Option<Vec<Review>>,
}

impl HeritageModel {
    /// Build a model with only the required fields set.
    pub fn new(id: impl Into<ModelId>, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: location.into(),
            url: String::new(),
            rating: 0.0,
            description: String::new(),
            reviews: None,
        }
    }

    /// Number of reviews, zero when the field is absent.
    pub fn review_count(&self) -> usize {
        self.reviews.as_ref().map_or(0, Vec::len)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Numbers and numeric strings; anything else reads as no rating.
fn rating_from_value(value: &Value) -> Option<f64> {
    let rating = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    rating.filter(|r| r.is_finite())
}

fn lenient_rating<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_rating(deserializer)?.unwrap_or_default())
}

fn lenient_optional_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(rating_from_value(&value))
}

/// An array of review entries of any shape; a non-array reads as absent.
fn lenient_reviews<'de, D>(deserializer: D) -> Result<Option<Vec<Review>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(entries) => Ok(Some(entries.into_iter().map(Review::from_value).collect())),
        _ => Ok(None),
    }
}

/// Lifecycle of one load invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

impl fmt::Display for CatalogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CatalogStatus::Idle => "idle",
            CatalogStatus::Loading => "loading",
            CatalogStatus::Ready => "ready",
            CatalogStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Snapshot of a load invocation: status, items and error.
///
/// Fields are private so that items and error can never be populated at the
/// same time. Items are only present when the status is `Ready`; the error is
/// only present (and never empty) when the status is `Failed`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CatalogQueryResult {
    status: CatalogStatus,
    items: Vec<HeritageModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl CatalogQueryResult {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn loading() -> Self {
        Self {
            status: CatalogStatus::Loading,
            ..Self::default()
        }
    }

    /// A successful result. An empty sequence is a valid, non-error outcome.
    pub fn ready(items: Vec<HeritageModel>) -> Self {
        Self {
            status: CatalogStatus::Ready,
            items,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = GENERIC_FAILURE_MESSAGE.to_string();
        }
        Self {
            status: CatalogStatus::Failed,
            items: Vec::new(),
            error: Some(message),
        }
    }

    /// Fold a fetch outcome into a terminal result.
    pub fn from_outcome(outcome: Result<Vec<HeritageModel>, CatalogError>) -> Self {
        match outcome {
            Ok(items) => Self::ready(items),
            Err(e) => Self::failed(e.to_string()),
        }
    }

    pub fn status(&self) -> CatalogStatus {
        self.status
    }

    pub fn items(&self) -> &[HeritageModel] {
        &self.items
    }

    pub fn into_items(self) -> Vec<HeritageModel> {
        self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.status == CatalogStatus::Loading
    }

    pub fn is_ready(&self) -> bool {
        self.status == CatalogStatus::Ready
    }

    pub fn is_failed(&self) -> bool {
        self.status == CatalogStatus::Failed
    }

    /// True once the invocation reached `Ready` or `Failed`.
    pub fn is_settled(&self) -> bool {
        self.is_ready() || self.is_failed()
    }
}
