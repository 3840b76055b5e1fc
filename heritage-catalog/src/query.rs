//! Caller-supplied selection applied to a decoded catalog.

use crate::types::HeritageModel;
use std::fmt;
use std::sync::Arc;

type Predicate = dyn Fn(&HeritageModel) -> bool + Send + Sync;

/// A pure predicate over heritage models.
///
/// Cloning is cheap; the predicate is shared so that a reload reuses the
/// exact filter of the first load.
#[derive(Clone)]
pub struct ModelFilter {
    label: String,
    predicate: Arc<Predicate>,
}

impl ModelFilter {
    /// Wrap an arbitrary predicate. It must not have side effects.
    pub fn new<F>(label: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&HeritageModel) -> bool + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Case-insensitive substring match on `location`.
    ///
    /// An empty needle matches every model.
    pub fn location_contains(needle: impl AsRef<str>) -> Self {
        let needle = needle.as_ref().to_lowercase();
        let label = format!("location contains '{needle}'");
        Self::new(label, move |model| {
            model.location.to_lowercase().contains(&needle)
        })
    }

    pub fn matches(&self, model: &HeritageModel) -> bool {
        (self.predicate)(model)
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for ModelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelFilter")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Optional filter followed by an optional limit.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub filter: Option<ModelFilter>,
    pub limit: Option<usize>,
}

impl CatalogQuery {
    /// The whole catalog, unfiltered and unlimited.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: ModelFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_location(self, needle: impl AsRef<str>) -> Self {
        self.with_filter(ModelFilter::location_contains(needle))
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Stable filter, then keep the first `limit` survivors.
    pub fn apply(&self, models: Vec<HeritageModel>) -> Vec<HeritageModel> {
        let filtered = models
            .into_iter()
            .filter(|m| self.filter.as_ref().is_none_or(|f| f.matches(m)));
        match self.limit {
            Some(limit) => filtered.take(limit).collect(),
            None => filtered.collect(),
        }
    }
}
