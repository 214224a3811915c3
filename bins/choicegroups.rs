//! Catalog → Conflict Graph → Choice Groups → Names CLI
//!
//! Usage:
//!   choicegroups mock --output data/catalog.jsonl --seed 7
//!   choicegroups groups --config config/choicegroups.toml
//!   choicegroups name --config config/choicegroups.toml
//!   choicegroups run-all --config config/choicegroups.toml --catalog data/catalog.jsonl

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;

use choicegroups::catalog::{generate_mock_catalog, load_catalog, write_catalog_jsonl, Product};
use choicegroups::config::Config;
use choicegroups::discriminators::{reduce, SelectionConfig};
use choicegroups::naming::{ChoiceNames, NamedChoices};
use choicegroups::outputs::{
    load_choice_groups_jsonl, write_choice_groups_jsonl, write_named_choices_json, FamilyReport,
};

#[derive(Parser)]
#[command(name = "choicegroups")]
#[command(about = "Discover mutually-exclusive choice groups in a product catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a synthetic catalog
    Mock {
        #[arg(long, default_value = "data/catalog.jsonl")]
        output: String,
        #[arg(long, default_value = "7")]
        seed: u64,
    },
    /// Compute choice groups per product family
    Groups {
        #[arg(long, default_value = "config/choicegroups.toml")]
        config: String,
        /// Catalog file or directory, overrides the config
        #[arg(long)]
        catalog: Option<String>,
        #[arg(long)]
        output_dir: Option<String>,
    },
    /// Name previously computed choice groups
    Name {
        #[arg(long, default_value = "config/choicegroups.toml")]
        config: String,
        #[arg(long)]
        output_dir: Option<String>,
    },
    /// Run groups and name
    RunAll {
        #[arg(long, default_value = "config/choicegroups.toml")]
        config: String,
        #[arg(long)]
        catalog: Option<String>,
        #[arg(long)]
        output_dir: Option<String>,
    },
}

fn load_config(
    path: &str,
    catalog: Option<String>,
    output_dir: Option<String>,
) -> Result<Config> {
    let mut config = Config::load(path)?;
    if let Some(catalog) = catalog {
        config.catalog_path = catalog;
    }
    if let Some(output_dir) = output_dir {
        config.output_dir = output_dir;
    }
    Ok(config)
}

fn run_mock_command(output: &str, seed: u64) -> Result<()> {
    let products = generate_mock_catalog(seed);
    write_catalog_jsonl(output, &products)?;
    println!("Wrote {} mock products to {}", products.len(), output);
    Ok(())
}

async fn run_groups_command(config: &Config) -> Result<Vec<FamilyReport>> {
    tracing::info!("Computing choice groups for catalog {}", config.catalog_path);

    let catalog = Arc::new(load_catalog(&config.catalog_path)?);
    let selection: Arc<SelectionConfig> = Arc::new(config.selection_config());

    // Families share no state, so each one runs on its own blocking worker
    let mut handles = Vec::new();
    for (base_name, products) in catalog.group_by_base_name() {
        let base_name = base_name.to_string();
        let products: Vec<Product> = products.into_iter().cloned().collect();
        let catalog = Arc::clone(&catalog);
        let selection = Arc::clone(&selection);

        handles.push(tokio::task::spawn_blocking(move || {
            reduce(&products, catalog.as_ref(), &selection)
                .map(|selections| FamilyReport::new(&base_name, products.len(), selections))
                .with_context(|| format!("Failed to find choice groups for {}", base_name))
        }));
    }

    let mut reports = Vec::with_capacity(handles.len());
    for handle in handles {
        reports.push(handle.await??);
    }

    let total: usize = reports.iter().map(|r| r.choice_sets.len()).sum();
    tracing::info!("Found {} choice sets across {} families", total, reports.len());

    write_choice_groups_jsonl(&config.output_dir, &reports)?;

    for report in &reports {
        for record in &report.choice_sets {
            let members: Vec<&str> = record
                .members
                .iter()
                .map(|m| m.as_deref().unwrap_or("<none>"))
                .collect();
            println!("{} | {} | {:?} | {}", report.base_name, record.id, record.rule, members.join(", "));
        }
    }

    Ok(reports)
}

fn run_name_command(config: &Config) -> Result<NamedChoices> {
    tracing::info!("Naming choice groups in {}", config.output_dir);

    let reports = load_choice_groups_jsonl(&config.output_dir)?;
    let names = ChoiceNames::load(&config.choice_names_path)?;

    let mut named = NamedChoices::new();
    for report in &reports {
        for record in &report.choice_sets {
            named
                .add(&names, &record.members)
                .with_context(|| format!("Failed to name choice set of {}", report.base_name))?;
        }
    }

    write_named_choices_json(&config.output_dir, &named)?;

    for (name, discriminators) in named.iter() {
        let members: Vec<&str> = discriminators.iter().map(String::as_str).collect();
        println!("{}: {}", name, members.join(", "));
    }

    Ok(named)
}

async fn run_all_command(config: &Config) -> Result<()> {
    let reports = run_groups_command(config).await?;
    let named = run_name_command(config)?;

    println!("\n=== Pipeline Summary ===");
    println!("Catalog: {}", config.catalog_path);
    println!("Families: {}", reports.len());
    println!(
        "Choice sets: {}",
        reports.iter().map(|r| r.choice_sets.len()).sum::<usize>()
    );
    println!("Named choices: {}", named.len());

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Mock { output, seed } => {
            run_mock_command(&output, seed)?;
        }
        Commands::Groups { config, catalog, output_dir } => {
            let config = load_config(&config, catalog, output_dir)?;
            run_groups_command(&config).await?;
        }
        Commands::Name { config, output_dir } => {
            let config = load_config(&config, None, output_dir)?;
            run_name_command(&config)?;
        }
        Commands::RunAll { config, catalog, output_dir } => {
            let config = load_config(&config, catalog, output_dir)?;
            run_all_command(&config).await?;
        }
    }

    Ok(())
}
