//! Command-line interface for pokedex.
//!
//! Provides commands for serving the catalog page, listing the catalog from
//! the terminal, previewing mutations and inspecting configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::adapters::PokeApiClient;
use crate::config;
use crate::core::{apply_mutation, load_page};
use crate::domain::state::{
    FIELD_INTENT, FIELD_POKEMON_ID, PARAM_CAPTURED, PARAM_FILTER_NAME, PARAM_FILTER_TYPE,
};
use crate::domain::CatalogEntry;
use crate::server::{self, AppState};

/// pokedex - Creature catalog with URL-persisted captures
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind to (defaults to config / POKEDEX_ADDRESS)
        #[arg(short, long)]
        address: Option<String>,
    },

    /// Fetch the catalog and print the displayed and captured lists
    List {
        /// Captured ids as a JSON array, e.g. "[1,4]"
        #[arg(short, long)]
        captured: Option<String>,

        /// Name substring filter
        #[arg(short, long)]
        name: Option<String>,

        /// Exact type filter
        #[arg(short = 't', long = "type")]
        type_name: Option<String>,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply an intent to a query string and print the redirect target
    Apply {
        /// Current query string (without the leading '?')
        #[arg(short, long, default_value = "")]
        query: String,

        /// Intent to apply
        #[arg(short, long, value_enum)]
        intent: IntentArg,

        /// Entry id for capture/release
        #[arg(short, long)]
        pokemon_id: Option<String>,

        /// Name filter for the filter intent
        #[arg(long)]
        filter_name: Option<String>,

        /// Type filter for the filter intent
        #[arg(long)]
        filter_type: Option<String>,
    },

    /// Show resolved configuration
    Config,
}

/// Intent names accepted by `apply` (same values as the HTML forms)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum IntentArg {
    Capture,
    Release,
    Filter,
}

impl IntentArg {
    fn as_str(self) -> &'static str {
        match self {
            IntentArg::Capture => "capture",
            IntentArg::Release => "release",
            IntentArg::Filter => "filter",
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve { address } => serve(address).await,
            Commands::List {
                captured,
                name,
                type_name,
                json,
            } => list(captured, name, type_name, json).await,
            Commands::Apply {
                query,
                intent,
                pokemon_id,
                filter_name,
                filter_type,
            } => apply(&query, intent, pokemon_id, filter_name, filter_type),
            Commands::Config => show_config(),
        }
    }
}

/// Start HTTP server
async fn serve(address: Option<String>) -> Result<()> {
    let config = config::config()?;
    let client = PokeApiClient::from_settings(&config.upstream)
        .context("Failed to create upstream client")?;
    let state = Arc::new(AppState::new(Arc::new(client), config.upstream.clone()));

    let address = address.unwrap_or_else(|| config.address.clone());
    server::serve(&address, state).await
}

/// Build the query string the server would see for these filters
fn list_query(
    captured: Option<String>,
    name: Option<String>,
    type_name: Option<String>,
) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    let params = [
        (PARAM_CAPTURED, captured),
        (PARAM_FILTER_NAME, name),
        (PARAM_FILTER_TYPE, type_name),
    ];
    for (key, value) in params {
        if let Some(value) = value {
            serializer.append_pair(key, &value);
        }
    }
    serializer.finish()
}

/// Fetch and print the catalog page
async fn list(
    captured: Option<String>,
    name: Option<String>,
    type_name: Option<String>,
    json: bool,
) -> Result<()> {
    let config = config::config()?;
    let client = PokeApiClient::from_settings(&config.upstream)
        .context("Failed to create upstream client")?;

    let query = list_query(captured, name, type_name);
    let view = load_page(&client, &config.upstream, Some(&query)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("Displayed ({} of {}):", view.displayed.len(), view.all.len());
    print_entries(&view.displayed);
    println!("\nCaptured ({}):", view.captured.len());
    print_entries(&view.captured);

    Ok(())
}

fn print_entries(entries: &[CatalogEntry]) {
    if entries.is_empty() {
        println!("  (none)");
        return;
    }

    println!("{:<6} {:<20} {:<20}", "ID", "NAME", "TYPES");
    println!("{}", "-".repeat(48));
    for entry in entries {
        println!("{:<6} {:<20} {:<20}", entry.id, entry.name, entry.types.join(", "));
    }
}

/// Assemble the form fields a browser would submit for this intent
fn intent_form(
    intent: IntentArg,
    pokemon_id: Option<String>,
    filter_name: Option<String>,
    filter_type: Option<String>,
) -> Vec<(String, String)> {
    let mut form = vec![(FIELD_INTENT.to_string(), intent.as_str().to_string())];

    let fields = [
        (FIELD_POKEMON_ID, pokemon_id),
        (PARAM_FILTER_NAME, filter_name),
        (PARAM_FILTER_TYPE, filter_type),
    ];
    for (key, value) in fields {
        if let Some(value) = value {
            form.push((key.to_string(), value));
        }
    }
    form
}

/// Preview a mutation without a server
fn apply(
    query: &str,
    intent: IntentArg,
    pokemon_id: Option<String>,
    filter_name: Option<String>,
    filter_type: Option<String>,
) -> Result<()> {
    let form = intent_form(intent, pokemon_id, filter_name, filter_type);
    let query = query.trim_start_matches('?');
    let mutation = apply_mutation("/", Some(query), &form)?;

    println!("{}", mutation.location);
    Ok(())
}

/// Show resolved configuration
fn show_config() -> Result<()> {
    let config = config::config()?;

    println!("Pokedex Configuration");
    println!("=====================\n");

    match &config.config_file {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (none, using defaults)"),
    }

    println!("\nUpstream:");
    println!("  base_url:        {}", config.upstream.base_url);
    println!("  page_limit:      {}", config.upstream.page_limit);
    println!("  page_offset:     {}", config.upstream.page_offset);
    println!("  timeout_seconds: {}", config.upstream.timeout_seconds);

    println!("\nServer:");
    println!("  address:         {}", config.address);

    Ok(())
}
