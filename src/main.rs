use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use pastpapers::config::{find_config_file, load_config, write_default_config, Config};
use pastpapers::models::{LinkType, PaperDetail, PaperStub};
use pastpapers::PastPapersSource;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// pastpapers - Search and download past exam papers from pastpapers.wiki
#[derive(Parser, Debug)]
#[command(name = "pastpapers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search and download past exam papers from pastpapers.wiki", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Json)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for papers by query string
    #[command(alias = "s")]
    Search {
        /// Search query string
        query: String,

        /// Listing page number
        #[arg(long, short, default_value_t = 1)]
        page: u32,
    },

    /// List the most recent papers
    Recent {
        /// Listing page number
        #[arg(long, short, default_value_t = 1)]
        page: u32,
    },

    /// Show title, description, download links and images of a paper page
    #[command(alias = "d")]
    Details {
        /// Paper page URL (absolute or site-relative)
        url: String,
    },

    /// Download a file into the downloads directory
    Download {
        /// File URL (absolute or site-relative)
        url: String,

        /// Filename to use when the server doesn't send one
        #[arg(long, short)]
        name: Option<String>,
    },

    /// Search, show details of the first results and download a link from each
    /// (the first PDF when there is one)
    Fetch {
        /// Search query string
        query: String,

        /// Number of results to process
        #[arg(long, short, default_value_t = 3)]
        limit: usize,
    },

    /// Show the effective configuration, or write a default config file
    Config {
        /// Write a default config file to this path
        #[arg(long)]
        init: Option<PathBuf>,
    },
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_stubs(stubs: &[PaperStub], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(stubs),
        OutputFormat::Plain => {
            for (i, stub) in stubs.iter().enumerate() {
                println!("{}. {}", i + 1, stub.title);
                println!("   {}", stub.url);
            }
            Ok(())
        }
    }
}

fn print_detail(detail: Option<&PaperDetail>, format: OutputFormat) -> Result<()> {
    match (format, detail) {
        (OutputFormat::Json, detail) => print_json(&detail),
        (OutputFormat::Plain, None) => {
            println!("No details available");
            Ok(())
        }
        (OutputFormat::Plain, Some(detail)) => {
            println!("{}", detail.title);
            if !detail.description.is_empty() {
                println!("\n{}", detail.description);
            }
            println!("\nDownload links:");
            for (i, link) in detail.download_links.iter().enumerate() {
                println!(" {}. {} ({}) {}", i + 1, link.text, link.link_type, link.url);
            }
            if !detail.images.is_empty() {
                println!("\nImages:");
                for image in &detail.images {
                    println!("  {}", image);
                }
            }
            Ok(())
        }
    }
}

fn load_effective_config(cli: &Cli) -> Result<Config> {
    let config_path = cli.config.clone().or_else(find_config_file);
    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    // Environment overrides apply with or without a file
    let mut config = load_config(config_path.as_deref())?;

    if let Some(timeout) = cli.timeout {
        config.site.timeout_secs = timeout;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("pastpapers={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_effective_config(&cli)?;

    match cli.command {
        Commands::Config { init: Some(path) } => {
            write_default_config(&path)?;
            if !cli.quiet {
                eprintln!("Wrote default configuration to {}", path.display());
            }
        }

        Commands::Config { init: None } => {
            println!("{}", toml::to_string_pretty(&config)?);
        }

        Commands::Search { query, page } => {
            let source = PastPapersSource::from_config(&config)?;
            let stubs = source.search(&query, page).await;
            if !cli.quiet {
                eprintln!("Found {} papers", stubs.len());
            }
            print_stubs(&stubs, cli.output)?;
        }

        Commands::Recent { page } => {
            let source = PastPapersSource::from_config(&config)?;
            let stubs = source.recent(page).await;
            print_stubs(&stubs, cli.output)?;
        }

        Commands::Details { url } => {
            let source = PastPapersSource::from_config(&config)?;
            let detail = source.get_details(&url).await;
            print_detail(detail.as_ref(), cli.output)?;
        }

        Commands::Download { url, name } => {
            let source = PastPapersSource::from_config(&config)?;
            let result = source.download(&url, name.as_deref()).await?;
            match cli.output {
                OutputFormat::Json => print_json(&result)?,
                OutputFormat::Plain => println!("{}", result.file_path.display()),
            }
        }

        Commands::Fetch { query, limit } => {
            let source = PastPapersSource::from_config(&config)?;
            let stubs = source.search(&query, 1).await;
            println!("Found {} papers", stubs.len());

            for stub in stubs.iter().take(limit) {
                println!("\n{}", stub.title);
                println!("{}", stub.url);

                let Some(detail) = source.get_details(&stub.url).await else {
                    continue;
                };

                if !detail.has_downloads() {
                    println!("No download links");
                    continue;
                }

                println!("Download links:");
                for (i, link) in detail.download_links.iter().enumerate() {
                    println!(" {}. {} ({})", i + 1, link.text, link.link_type);
                }

                let preferred = detail
                    .first_of_type(LinkType::Pdf)
                    .or_else(|| detail.download_links.first());
                if let Some(link) = preferred {
                    println!("Downloading: {}", link.url);
                    match source.download(&link.url, None).await {
                        Ok(result) => println!("Saved to: {}", result.file_path.display()),
                        Err(e) => eprintln!("Download failed: {}", e),
                    }
                }
            }
        }
    }

    Ok(())
}
