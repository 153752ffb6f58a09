// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use sitechat::utils::logging::{format_info, format_success, format_warning};
use sitechat::{
    Config, IndexBuilder, JsonExporter, LinkResolver, ManifestGenerator, Responder, SiteIndex,
    SiteSource, Validator, WELCOME_MESSAGE,
};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "sitechat")]
#[command(version)]
#[command(about = "Answers visitor questions from the pages of a static website", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Site to index: an http(s) base URL or a local directory
    #[arg(short, long, value_name = "URL|DIR", global = true)]
    site: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the content manifest for a local site directory
    Manifest {
        #[arg(long, value_name = "DIR")]
        root: PathBuf,

        /// Defaults to the configured manifest path under the root
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Fetch every page, build the index and save a snapshot
    Build {
        #[arg(short, long, default_value = "./exports/index.json")]
        output: PathBuf,

        #[arg(short, long)]
        pretty: bool,
    },

    /// Answer a single question
    Ask {
        query: String,

        #[arg(long, value_name = "FILE")]
        snapshot: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// List the best matching pages for a query
    Search {
        query: String,

        #[arg(short, long, default_value_t = 5)]
        limit: usize,

        #[arg(long, value_name = "FILE")]
        snapshot: Option<PathBuf>,
    },

    /// Interactive question loop on stdin
    Chat {
        #[arg(long, value_name = "FILE")]
        snapshot: Option<PathBuf>,
    },

    /// Index statistics
    Stats {
        #[arg(long, value_name = "FILE")]
        snapshot: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    sitechat::utils::logging::init_logger(cli.color, cli.verbose);
    colored::control::set_override(cli.color);

    info!("Loading configuration from: {}", cli.config.display());

    let mut config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::default_config()
    };

    if let Some(site) = &cli.site {
        config.override_site(site);
        config.validate().context("Invalid --site value")?;
    }

    match cli.command {
        Commands::Manifest { root, output } => {
            cmd_manifest(&config, &root, output)?;
        }
        Commands::Build { output, pretty } => {
            cmd_build(&config, &output, pretty, cli.color).await?;
        }
        Commands::Ask {
            query,
            snapshot,
            json,
        } => {
            cmd_ask(&config, &query, snapshot.as_deref(), json).await?;
        }
        Commands::Search {
            query,
            limit,
            snapshot,
        } => {
            cmd_search(&config, &query, limit, snapshot.as_deref()).await?;
        }
        Commands::Chat { snapshot } => {
            cmd_chat(&config, snapshot.as_deref()).await?;
        }
        Commands::Stats { snapshot } => {
            cmd_stats(&config, snapshot.as_deref()).await?;
        }
    }

    Ok(())
}

/// Loads a saved snapshot when one is given, otherwise fetches the live site.
async fn load_index(config: &Config, snapshot: Option<&Path>) -> Result<(SiteIndex, LinkResolver)> {
    if let Some(path) = snapshot {
        let snapshot = JsonExporter::load(path)
            .with_context(|| format!("Failed to load snapshot {}", path.display()))?;
        let resolver = if snapshot.base_url.is_empty() {
            LinkResolver::default()
        } else {
            LinkResolver::from_base_url(&snapshot.base_url)?
        };
        return Ok((snapshot.into_index(), resolver));
    }

    let source = SiteSource::from_config(config).context("Failed to open site source")?;
    let (index, _) = IndexBuilder::new(config)
        .build(&source)
        .await
        .context("Failed to build site index")?;
    Ok((index, source.resolver().clone()))
}

fn cmd_manifest(config: &Config, root: &Path, output: Option<PathBuf>) -> Result<()> {
    Validator::validate_directory(root)?;
    let output = output.unwrap_or_else(|| root.join(&config.site.manifest_path));

    let manifest = ManifestGenerator::default()
        .write_manifest(root, &output)
        .context("Failed to write manifest")?;

    println!(
        "{}",
        format_success(&format!(
            "Wrote {} pages to {}",
            manifest.len(),
            output.display()
        ))
    );
    Ok(())
}

async fn cmd_build(config: &Config, output: &Path, pretty: bool, color: bool) -> Result<()> {
    info!("Building site index");

    let source = SiteSource::from_config(config).context("Failed to open site source")?;
    let (index, stats) = IndexBuilder::new(config)
        .with_progress(true, color)
        .build(&source)
        .await
        .context("Failed to build site index")?;

    if index.is_empty() {
        println!("{}", format_warning("No pages were indexed"));
    }

    let exporter = JsonExporter::new(output)?;
    let base_url = source
        .resolver()
        .base()
        .map(|u| u.to_string())
        .unwrap_or_default();
    let snapshot = exporter.export(&index, &base_url, pretty)?;

    println!("{}", format_info(&stats.format_summary()));
    println!(
        "{}",
        format_success(&format!(
            "Saved {} pages to {}",
            snapshot.total_pages,
            exporter.output_path().display()
        ))
    );
    Ok(())
}

async fn cmd_ask(config: &Config, query: &str, snapshot: Option<&Path>, json: bool) -> Result<()> {
    Validator::validate_query(query)?;
    let (index, resolver) = load_index(config, snapshot).await?;

    let reply = Responder::new(&index, &resolver, config).respond(query);

    if json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
    } else {
        println!("{}", reply.render());
    }
    Ok(())
}

async fn cmd_search(
    config: &Config,
    query: &str,
    limit: usize,
    snapshot: Option<&Path>,
) -> Result<()> {
    Validator::validate_query(query)?;
    info!("Searching for: {}", query);
    let (index, _) = load_index(config, snapshot).await?;

    let results = index.search(query, limit, config.retrieval.snippet_chars);

    if results.is_empty() {
        println!("\nNo results found for query: \"{}\"\n", query);
        println!("Try:");
        println!("  - Using different search terms");
        println!("  - Checking that the manifest lists the page");
        return Ok(());
    }

    println!("\nSearch Results for: \"{}\"\n", query);
    println!("Found {} result(s)\n", results.len());
    println!("{}", "=".repeat(80));

    for (idx, result) in results.iter().enumerate() {
        println!("\n{}. {}", idx + 1, result.format_summary(300).trim_end());
    }

    println!("\n{}", "=".repeat(80));
    info!("Search complete");
    Ok(())
}

async fn cmd_chat(config: &Config, snapshot: Option<&Path>) -> Result<()> {
    let (index, resolver) = load_index(config, snapshot).await?;
    let responder = Responder::new(&index, &resolver, config);

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}\n", WELCOME_MESSAGE);
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if matches!(query, "exit" | "quit") {
            break;
        }

        if let Err(e) = Validator::validate_query(query) {
            println!("{}\n", format_warning(&e.to_string()));
            continue;
        }

        println!("{}\n", responder.respond(query).render());
    }

    Ok(())
}

async fn cmd_stats(config: &Config, snapshot: Option<&Path>) -> Result<()> {
    info!("Gathering statistics");
    let (index, _) = load_index(config, snapshot).await?;

    println!("Pages indexed: {}", index.doc_count());
    println!("Distinct terms: {}", index.vocabulary_size());

    println!("\nMost common terms:");
    for (term, df) in index.top_terms(10) {
        println!("  {:<20} {} pages", term, df);
    }

    println!("\nPages:");
    for page in index.pages() {
        println!(
            "  {} | {} ({} chars)",
            page.path,
            Validator::truncate_text(&page.title, 60),
            page.text.chars().count()
        );
    }

    Ok(())
}
