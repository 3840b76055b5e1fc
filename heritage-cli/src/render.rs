//! Table and text rendering for catalog results and directory content.

use comfy_table::{presets::UTF8_FULL, Table};
use heritage_catalog::{DisplayState, HeritageModel, StateSummary, TempleDetail, TempleSummary};

/// Maximum length for descriptions in table display before truncation.
const MAX_DESCRIPTION_LENGTH: usize = 50;

pub fn models_table(models: &[HeritageModel]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Name", "Location", "Rating", "Reviews", "Model URL"]);
    for m in models {
        table.add_row(vec![
            m.id.to_string(),
            m.name.clone(),
            m.location.clone(),
            format!("{:.1}", m.rating),
            m.review_count().to_string(),
            m.url.clone(),
        ]);
    }
    table
}

pub fn states_table(states: &[StateSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Slug", "State", "Temples", "3D Models", "Description"]);
    for s in states {
        let models = if s.model_location.is_some() { "yes" } else { "" };
        table.add_row(vec![
            s.slug.clone(),
            s.name.clone(),
            s.temple_count.to_string(),
            models.to_string(),
            truncate_description(&s.description, MAX_DESCRIPTION_LENGTH),
        ]);
    }
    table
}

pub fn temples_table(temples: &[TempleSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Temple", "Rating", "Visit Time", "Highlights"]);
    for t in temples {
        table.add_row(vec![
            t.name.clone(),
            format!("{:.1}", t.rating),
            t.visit_time.clone(),
            t.highlights.join(", "),
        ]);
    }
    table
}

/// Plain-text detail section for a temple.
pub fn temple_detail(temple: &TempleDetail) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", temple.full_name));
    out.push_str(&format!("{}\n\n", temple.location));
    out.push_str(&format!(
        "Rating {:.1} | Visit {} | Best time {}\n\n",
        temple.rating, temple.visit_time, temple.best_time
    ));
    out.push_str(&format!("{}\n\n", temple.description));
    out.push_str("Highlights:\n");
    for h in &temple.highlights {
        out.push_str(&format!("  - {h}\n"));
    }
    out.push_str(&format!("\nHistory:\n  {}\n", temple.history));
    out.push_str(&format!("\nArchitecture:\n  {}\n", temple.architecture));
    out.push_str(&format!("\nSignificance:\n  {}\n", temple.significance));
    out
}

/// Text for a models section. Empty and error states read differently.
pub fn display_state(state: &DisplayState) -> String {
    match state {
        DisplayState::Prompt => "3D models not loaded yet.".to_string(),
        DisplayState::Loading => "Loading 3D models...".to_string(),
        DisplayState::Empty => "No 3D models found.".to_string(),
        DisplayState::Models(models) => {
            format!("{}\n{} model(s) found", models_table(models), models.len())
        }
        DisplayState::Error(message) => format!("Error: {message}"),
    }
}

/// Truncate to `max_len` characters with an ellipsis.
fn truncate_description(desc: &str, max_len: usize) -> String {
    if desc.chars().count() <= max_len {
        desc.to_string()
    } else {
        let head: String = desc.chars().take(max_len.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
