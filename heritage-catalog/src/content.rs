//! Static heritage directory: states, their temples and temple details.
//!
//! The directory ships embedded in the binary as YAML. Slugs are the route
//! keys used by the pages (`/states/:slug`, `/temple/:slug`); entries that do
//! not declare one get a slug derived from their display name.

use crate::error::ContentError;
use crate::query::CatalogQuery;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const BUILTIN_DIRECTORY: &str = include_str!("../data/heritage.yaml");

/// A state listed on the states page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSummary {
    pub name: String,
    #[serde(default)]
    pub slug: String,
    pub image: String,
    pub temple_count: u32,
    pub description: String,
    /// Location substring selecting this state's 3D models, if it has any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_location: Option<String>,
}

/// A temple card on a state's temples page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempleSummary {
    pub name: String,
    #[serde(default)]
    pub slug: String,
    pub description: String,
    pub image: String,
    pub rating: f64,
    pub visit_time: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

/// Full content of a temple detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempleDetail {
    pub slug: String,
    pub name: String,
    pub full_name: String,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub rating: f64,
    pub visit_time: String,
    pub best_time: String,
    pub location: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    pub history: String,
    pub architecture: String,
    pub significance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_location: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StateEntry {
    #[serde(flatten)]
    summary: StateSummary,
    #[serde(default)]
    temples: Vec<TempleSummary>,
}

#[derive(Debug, Deserialize)]
struct RawDirectory {
    states: Vec<StateEntry>,
    #[serde(default)]
    temples: Vec<TempleDetail>,
}

/// Read-only index over the heritage content.
#[derive(Debug, Clone)]
pub struct HeritageDirectory {
    states: Vec<StateSummary>,
    temples: Vec<Vec<TempleSummary>>,
    details: Vec<TempleDetail>,
}

impl HeritageDirectory {
    /// Parse the directory embedded in this crate.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_yaml(BUILTIN_DIRECTORY)
    }

    pub fn from_yaml(source: &str) -> Result<Self, ContentError> {
        let raw: RawDirectory = serde_yaml_ng::from_str(source)?;

        let mut seen = HashSet::new();
        let mut states = Vec::with_capacity(raw.states.len());
        let mut temples = Vec::with_capacity(raw.states.len());
        for entry in raw.states {
            let mut summary = entry.summary;
            if summary.slug.is_empty() {
                summary.slug = slugify(&summary.name);
            }
            if !seen.insert(summary.slug.clone()) {
                return Err(ContentError::DuplicateSlug {
                    section: "state",
                    slug: summary.slug,
                });
            }
            let cards = entry
                .temples
                .into_iter()
                .map(|mut t| {
                    if t.slug.is_empty() {
                        t.slug = slugify(&t.name);
                    }
                    t
                })
                .collect();
            states.push(summary);
            temples.push(cards);
        }

        let mut seen = HashSet::new();
        for detail in &raw.temples {
            if !seen.insert(detail.slug.as_str()) {
                return Err(ContentError::DuplicateSlug {
                    section: "temple",
                    slug: detail.slug.clone(),
                });
            }
        }

        Ok(Self {
            states,
            temples,
            details: raw.temples,
        })
    }

    pub fn states(&self) -> &[StateSummary] {
        &self.states
    }

    /// Look up a state by slug or display name.
    pub fn state(&self, key: &str) -> Option<&StateSummary> {
        self.state_index(key).map(|i| &self.states[i])
    }

    /// Temples of a state; empty for unknown states.
    pub fn temples(&self, key: &str) -> &[TempleSummary] {
        self.state_index(key)
            .map(|i| self.temples[i].as_slice())
            .unwrap_or(&[])
    }

    pub fn temple(&self, key: &str) -> Option<&TempleDetail> {
        let slug = slugify(key);
        self.details.iter().find(|d| d.slug == slug)
    }

    pub fn temple_details(&self) -> &[TempleDetail] {
        &self.details
    }

    fn state_index(&self, key: &str) -> Option<usize> {
        let slug = slugify(key);
        self.states.iter().position(|s| s.slug == slug)
    }
}

impl StateSummary {
    /// Query selecting this state's 3D models, if it has any.
    pub fn model_query(&self) -> Option<CatalogQuery> {
        self.model_location
            .as_deref()
            .map(|loc| CatalogQuery::all().with_location(loc))
    }
}

impl TempleDetail {
    pub fn model_query(&self) -> Option<CatalogQuery> {
        self.model_location
            .as_deref()
            .map(|loc| CatalogQuery::all().with_location(loc))
    }
}

/// Route slug for a display name: lowercase, runs of non-alphanumerics
/// collapsed to a single `-`, no leading or trailing dash.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.trim().chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
