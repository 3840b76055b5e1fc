//! Page view-models.
//!
//! Each page owns one [`ModelCatalogLoader`] built from a shared
//! [`CatalogClient`] and exposes what a renderer needs: static content from
//! the [`HeritageDirectory`] and a [`DisplayState`] derived from the
//! loader's current result. Pages that load on display do so in `open()`.

use crate::client::CatalogClient;
use crate::content::{HeritageDirectory, StateSummary, TempleDetail, TempleSummary};
use crate::loader::{LoadHandle, ModelCatalogLoader};
use crate::query::CatalogQuery;
use crate::types::{CatalogQueryResult, CatalogStatus, HeritageModel};
use std::sync::Arc;

/// Number of models featured on the landing page.
pub const FEATURED_MODEL_COUNT: usize = 3;

/// Location substring of the models shown by the 3D showcase.
pub const SHOWCASE_LOCATION: &str = "hampi";

/// What a renderer should show for a catalog result.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayState {
    /// Nothing requested yet; offer a load button.
    Prompt,
    Loading,
    /// Loaded successfully but nothing matched.
    Empty,
    Models(Vec<HeritageModel>),
    /// Load failed; show the message with a retry control.
    Error(String),
}

impl DisplayState {
    pub fn from_result(result: &CatalogQueryResult) -> Self {
        match result.status() {
            CatalogStatus::Idle => DisplayState::Prompt,
            CatalogStatus::Loading => DisplayState::Loading,
            CatalogStatus::Ready if result.items().is_empty() => DisplayState::Empty,
            CatalogStatus::Ready => DisplayState::Models(result.items().to_vec()),
            CatalogStatus::Failed => {
                DisplayState::Error(result.error().unwrap_or_default().to_string())
            }
        }
    }

    pub fn offers_retry(&self) -> bool {
        matches!(self, DisplayState::Error(_))
    }
}

/// Rotating index over the featured models.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Carousel {
    current: usize,
}

impl Carousel {
    pub fn current(&self) -> usize {
        self.current
    }

    /// Move to the next slide, wrapping over at most `FEATURED_MODEL_COUNT`.
    pub fn advance(&mut self, len: usize) -> usize {
        let slides = len.min(FEATURED_MODEL_COUNT);
        self.current = if slides == 0 {
            0
        } else {
            (self.current + 1) % slides
        };
        self.current
    }
}

/// Landing page: the first few models of the unfiltered catalog.
#[derive(Debug)]
pub struct LandingPage {
    loader: ModelCatalogLoader,
    carousel: Carousel,
}

impl LandingPage {
    pub fn new(client: Arc<CatalogClient>) -> Self {
        Self {
            loader: ModelCatalogLoader::new(
                client,
                CatalogQuery::all().with_limit(FEATURED_MODEL_COUNT),
            ),
            carousel: Carousel::default(),
        }
    }

    pub fn open(&self) -> LoadHandle {
        self.loader.load()
    }

    pub fn featured(&self) -> Vec<HeritageModel> {
        self.loader.result().into_items()
    }

    /// Advance the carousel over the currently loaded models.
    pub fn advance(&mut self) -> usize {
        let len = self.loader.item_count();
        self.carousel.advance(len)
    }

    pub fn carousel(&self) -> Carousel {
        self.carousel
    }

    pub fn display(&self) -> DisplayState {
        DisplayState::from_result(&self.loader.result())
    }

    pub fn loader(&self) -> &ModelCatalogLoader {
        &self.loader
    }
}

/// Temples of one state, plus that state's 3D models when it has any.
#[derive(Debug)]
pub struct TemplesPage {
    state: Option<StateSummary>,
    temples: Vec<TempleSummary>,
    loader: Option<ModelCatalogLoader>,
}

impl TemplesPage {
    /// Unknown states render an empty temple list and load nothing.
    pub fn new(client: Arc<CatalogClient>, directory: &HeritageDirectory, state_slug: &str) -> Self {
        let state = directory.state(state_slug).cloned();
        let loader = state
            .as_ref()
            .and_then(StateSummary::model_query)
            .map(|query| ModelCatalogLoader::new(client, query));
        Self {
            temples: directory.temples(state_slug).to_vec(),
            state,
            loader,
        }
    }

    /// Start the model load if this state has models.
    pub fn open(&self) -> Option<LoadHandle> {
        self.loader.as_ref().map(ModelCatalogLoader::load)
    }

    pub fn state(&self) -> Option<&StateSummary> {
        self.state.as_ref()
    }

    pub fn temples(&self) -> &[TempleSummary] {
        &self.temples
    }

    /// `None` when the state has no 3D models section.
    pub fn display(&self) -> Option<DisplayState> {
        self.loader
            .as_ref()
            .map(|l| DisplayState::from_result(&l.result()))
    }

    pub fn loader(&self) -> Option<&ModelCatalogLoader> {
        self.loader.as_ref()
    }
}

/// Detail page of a single temple.
#[derive(Debug)]
pub struct TempleDetailPage {
    temple: TempleDetail,
    loader: Option<ModelCatalogLoader>,
    image_index: usize,
}

impl TempleDetailPage {
    /// Returns `None` for temples without a detail entry.
    pub fn new(
        client: Arc<CatalogClient>,
        directory: &HeritageDirectory,
        temple_slug: &str,
    ) -> Option<Self> {
        let temple = directory.temple(temple_slug)?.clone();
        let loader = temple
            .model_query()
            .map(|query| ModelCatalogLoader::new(client, query));
        Some(Self {
            temple,
            loader,
            image_index: 0,
        })
    }

    pub fn open(&self) -> Option<LoadHandle> {
        self.loader.as_ref().map(ModelCatalogLoader::load)
    }

    pub fn temple(&self) -> &TempleDetail {
        &self.temple
    }

    /// Select a gallery image. Out-of-range indices clamp to the last image.
    pub fn select_image(&mut self, index: usize) -> usize {
        self.image_index = index.min(self.temple.images.len().saturating_sub(1));
        self.image_index
    }

    pub fn image_index(&self) -> usize {
        self.image_index
    }

    /// The selected gallery image, `None` when the temple has no images.
    pub fn current_image(&self) -> Option<&str> {
        self.temple.images.get(self.image_index).map(String::as_str)
    }

    pub fn display(&self) -> Option<DisplayState> {
        self.loader
            .as_ref()
            .map(|l| DisplayState::from_result(&l.result()))
    }

    pub fn loader(&self) -> Option<&ModelCatalogLoader> {
        self.loader.as_ref()
    }
}

/// Interactive 3D showcase. Loads only on request and offers retry.
#[derive(Debug)]
pub struct ShowcasePage {
    loader: ModelCatalogLoader,
}

impl ShowcasePage {
    pub fn new(client: Arc<CatalogClient>) -> Self {
        Self {
            loader: ModelCatalogLoader::new(
                client,
                CatalogQuery::all().with_location(SHOWCASE_LOCATION),
            ),
        }
    }

    pub fn load(&self) -> LoadHandle {
        self.loader.load()
    }

    pub fn retry(&self) -> LoadHandle {
        self.loader.reload()
    }

    pub fn display(&self) -> DisplayState {
        DisplayState::from_result(&self.loader.result())
    }

    pub fn loader(&self) -> &ModelCatalogLoader {
        &self.loader
    }
}
