//! Command handlers for the heritage CLI.
//!
//! Handlers write their primary output to `out` and return the process exit
//! code. Load failures are reported on stderr with a retry hint.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use heritage_catalog::pages::{LandingPage, TempleDetailPage, TemplesPage};
use heritage_catalog::{
    encode_catalog, CatalogClient, CatalogConfig, CatalogQuery, CatalogQueryResult,
    DisplayState, HeritageDirectory, ModelCatalogLoader,
};
use serde_json::json;

use crate::cli::Commands;
use crate::render;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
/// Unknown state or temple.
pub const EXIT_NOT_FOUND: i32 = 2;

const RETRY_HINT: &str = "Run the command again to retry.";

/// Shared client and static content for one CLI invocation.
pub struct Context {
    client: Arc<CatalogClient>,
    directory: HeritageDirectory,
}

impl Context {
    pub fn new(client: Arc<CatalogClient>, directory: HeritageDirectory) -> Self {
        Self { client, directory }
    }

    /// Resolve configuration, apply command-line overrides and build the client.
    pub fn from_options(
        config_path: Option<&Path>,
        endpoint: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => CatalogConfig::load_from(path)?,
            None => CatalogConfig::load()?,
        };
        if let Some(endpoint) = endpoint {
            config = config.with_endpoint(endpoint);
        }
        if let Some(secs) = timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config.validate()?;
        tracing::debug!(endpoint = %config.endpoint, "Using catalog endpoint");

        let client = CatalogClient::new(&config)?;
        let directory =
            HeritageDirectory::builtin().context("Failed to load built-in heritage content")?;
        Ok(Self::new(Arc::new(client), directory))
    }

    pub fn client(&self) -> Arc<CatalogClient> {
        Arc::clone(&self.client)
    }

    pub fn directory(&self) -> &HeritageDirectory {
        &self.directory
    }
}

/// Run one subcommand to completion.
pub async fn run(ctx: &Context, command: Commands, out: &mut dyn Write) -> Result<i32> {
    match command {
        Commands::Models {
            location,
            limit,
            json,
        } => {
            let mut query = CatalogQuery::all();
            if let Some(location) = location {
                query = query.with_location(location);
            }
            if let Some(limit) = limit {
                query = query.with_limit(limit);
            }
            run_models(ctx, query, json, out).await
        }
        Commands::Featured { json } => run_featured(ctx, json, out).await,
        Commands::States { json } => run_states(ctx, json, out),
        Commands::Temples { state, json } => run_temples(ctx, &state, json, out).await,
        Commands::Temple { name, json } => run_temple(ctx, &name, json, out).await,
        Commands::Dump => run_dump(ctx, out).await,
    }
}

pub async fn run_models(
    ctx: &Context,
    query: CatalogQuery,
    json: bool,
    out: &mut dyn Write,
) -> Result<i32> {
    let loader = ModelCatalogLoader::new(ctx.client(), query);
    let result = loader.load_and_wait().await;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
    } else {
        write_models_section(out, &result)?;
    }
    Ok(settle(&result))
}

pub async fn run_featured(ctx: &Context, json: bool, out: &mut dyn Write) -> Result<i32> {
    let page = LandingPage::new(ctx.client());
    page.open().wait().await;
    let result = page.loader().result();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
    } else {
        writeln!(out, "Featured 3D Models")?;
        writeln!(out, "{}", render::display_state(&page.display()))?;
    }
    Ok(settle(&result))
}

pub fn run_states(ctx: &Context, json: bool, out: &mut dyn Write) -> Result<i32> {
    let states = ctx.directory.states();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(states)?)?;
    } else {
        writeln!(out, "{}", render::states_table(states))?;
    }
    Ok(EXIT_SUCCESS)
}

pub async fn run_temples(
    ctx: &Context,
    state: &str,
    json: bool,
    out: &mut dyn Write,
) -> Result<i32> {
    let Some(summary) = ctx.directory.state(state) else {
        eprintln!("Error: unknown state '{state}'. Run `heritage states` to list states.");
        return Ok(EXIT_NOT_FOUND);
    };

    let page = TemplesPage::new(ctx.client(), &ctx.directory, &summary.slug);
    if let Some(handle) = page.open() {
        handle.wait().await;
    }
    let models = page.loader().map(ModelCatalogLoader::result);

    if json {
        let value = json!({
            "state": summary,
            "temples": page.temples(),
            "models": models,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
    } else {
        writeln!(out, "Temples of {}", summary.name)?;
        writeln!(out, "{}", render::temples_table(page.temples()))?;
        if let Some(result) = &models {
            writeln!(out, "\n3D Models from {}", summary.name)?;
            write_models_section(out, result)?;
        }
    }
    Ok(models.as_ref().map_or(EXIT_SUCCESS, settle))
}

pub async fn run_temple(ctx: &Context, name: &str, json: bool, out: &mut dyn Write) -> Result<i32> {
    let Some(page) = TempleDetailPage::new(ctx.client(), &ctx.directory, name) else {
        eprintln!("Error: unknown temple '{name}'.");
        return Ok(EXIT_NOT_FOUND);
    };
    if let Some(handle) = page.open() {
        handle.wait().await;
    }
    let models = page.loader().map(ModelCatalogLoader::result);

    if json {
        let value = json!({
            "temple": page.temple(),
            "models": models,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
    } else {
        write!(out, "{}", render::temple_detail(page.temple()))?;
        if let Some(result) = &models {
            writeln!(out, "\n3D Models")?;
            write_models_section(out, result)?;
        }
    }
    Ok(models.as_ref().map_or(EXIT_SUCCESS, settle))
}

/// Fetch the unfiltered catalog and print it re-encoded as a wire envelope.
pub async fn run_dump(ctx: &Context, out: &mut dyn Write) -> Result<i32> {
    match ctx.client.fetch_catalog().await {
        Ok(models) => {
            writeln!(out, "{}", encode_catalog(&models)?)?;
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{RETRY_HINT}");
            Ok(EXIT_FAILURE)
        }
    }
}

fn write_models_section(out: &mut dyn Write, result: &CatalogQueryResult) -> Result<()> {
    writeln!(out, "{}", render::display_state(&DisplayState::from_result(result)))?;
    Ok(())
}

/// Exit code for a settled result, with the retry hint on failure.
fn settle(result: &CatalogQueryResult) -> i32 {
    if result.is_failed() {
        eprintln!("{RETRY_HINT}");
        EXIT_FAILURE
    } else {
        EXIT_SUCCESS
    }
}
