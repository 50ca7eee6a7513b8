use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use colored::Colorize;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};

use podsite::{
    EpisodeStore, FeedNormalizer, NoopReporter, NormalizeOptions, ProgressEvent,
    ProgressReporter, ProxyState, ReqwestClient, SharedProgressReporter, SiteBuild, SiteConfig,
    SiteTemplates, build_site, fetch_store, proxy, update_site,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static PAGE: Emoji<'_, '_> = Emoji("📄 ", "[p] ");
static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "[+] ");
static FAILURE: Emoji<'_, '_> = Emoji("❌ ", "[!] ");
static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "[?] ");
static PARTY: Emoji<'_, '_> = Emoji("🎉 ", "[*] ");
static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "");
static GLOBE: Emoji<'_, '_> = Emoji("🌐 ", "");

/// Build the podcast website from its RSS feed
#[derive(Parser, Debug)]
#[command(name = "podsite")]
#[command(about = "Build a static podcast website from an RSS feed")]
#[command(version)]
struct Args {
    /// Site configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Quiet mode - suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize the feed and save the episode store
    Fetch {
        #[command(flatten)]
        store: StoreArgs,
        #[command(flatten)]
        feed: FeedArgs,
    },
    /// Generate list page, episode pages and sitemap from the episode store
    Build {
        #[command(flatten)]
        store: StoreArgs,
        #[command(flatten)]
        site: SiteArgs,
    },
    /// Fetch, then build
    Update {
        #[command(flatten)]
        store: StoreArgs,
        #[command(flatten)]
        feed: FeedArgs,
        #[command(flatten)]
        site: SiteArgs,
    },
    /// Serve the live feed proxy
    Serve {
        #[command(flatten)]
        feed: FeedArgs,

        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8888")]
        addr: SocketAddr,

        /// Request path of the proxy (defaults to the configured endpoint)
        #[arg(long)]
        path: Option<String>,
    },
}

#[derive(ClapArgs, Debug)]
struct StoreArgs {
    /// Episode store JSON (defaults to the configured local store path)
    #[arg(long)]
    store: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct FeedArgs {
    /// RSS feed URL or path to local RSS file (defaults to the configured feed)
    #[arg(long)]
    feed: Option<String>,

    /// Maximum number of feed items to keep
    #[arg(long, default_value_t = podsite::DEFAULT_MAX_ITEMS)]
    max_items: usize,

    /// Feed request timeout in seconds
    #[arg(long, default_value_t = podsite::DEFAULT_FETCH_TIMEOUT.as_secs())]
    timeout: u64,
}

#[derive(ClapArgs, Debug)]
struct SiteArgs {
    /// Template of the episode list page
    #[arg(long, default_value = "templates/episoden.html")]
    list_template: PathBuf,

    /// Template of a single episode page
    #[arg(long, default_value = "templates/episode.html")]
    episode_template: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    out: PathBuf,
}

impl StoreArgs {
    fn resolve(&self, config: &SiteConfig) -> EpisodeStore {
        let path = self
            .store
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.local_store_path));
        EpisodeStore::new(path)
    }
}

impl FeedArgs {
    fn source(&self, config: &SiteConfig) -> String {
        self.feed.clone().unwrap_or_else(|| config.feed_url.clone())
    }

    fn normalizer(&self) -> FeedNormalizer<ReqwestClient> {
        FeedNormalizer::new(
            ReqwestClient::new(),
            NormalizeOptions {
                max_items: self.max_items,
                timeout: Duration::from_secs(self.timeout),
            },
        )
    }
}

impl SiteArgs {
    fn load_templates(&self) -> Result<SiteTemplates> {
        SiteTemplates::load(&self.list_template, &self.episode_template)
            .context("Failed to load templates")
    }
}

/// Progress reporter using an indicatif spinner for terminal output
struct ConsoleReporter {
    spinner: ProgressBar,
}

impl ConsoleReporter {
    fn new() -> Self {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {wide_msg}")
            .unwrap();

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.enable_steady_tick(Duration::from_millis(100));

        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for ConsoleReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::FetchingFeed { url } => {
                self.spinner
                    .set_message(format!("{SEARCH}Fetching feed: {}", url.cyan()));
            }

            ProgressEvent::ParsingFeed { source } => {
                self.spinner
                    .set_message(format!("{SEARCH}Parsing feed: {}", source.cyan()));
            }

            ProgressEvent::FeedParsed {
                podcast_title,
                total_items,
                kept_items,
            } => {
                self.spinner.println(format!(
                    "{HEADPHONES}{} • {} items, {} kept",
                    podcast_title.bold().green(),
                    total_items.to_string().cyan(),
                    kept_items.to_string().cyan()
                ));
            }

            ProgressEvent::StoreWritten { path, episodes } => {
                self.spinner.println(format!(
                    "{SUCCESS}Saved {} episodes to {}",
                    episodes.to_string().green().bold(),
                    path.display().to_string().cyan()
                ));
            }

            ProgressEvent::TemplatesValidated => {
                self.spinner.set_message("Templates complete".to_string());
            }

            ProgressEvent::EpisodeDegraded {
                episode_title,
                reason,
            } => {
                self.spinner.println(format!(
                    "{WARNING}{} - {}",
                    episode_title.yellow(),
                    reason.dimmed()
                ));
            }

            ProgressEvent::SlugCollision {
                slug,
                episode_title,
            } => {
                self.spinner.println(format!(
                    "{WARNING}{} overwrites the page for slug {}",
                    episode_title.yellow(),
                    slug.yellow().bold()
                ));
            }

            ProgressEvent::PageWritten { path } => {
                self.spinner
                    .set_message(format!("{PAGE}{}", path.display().to_string().dimmed()));
            }

            ProgressEvent::SitemapWritten { path, entries } => {
                self.spinner.println(format!(
                    "{SUCCESS}Sitemap with {} entries: {}",
                    entries.to_string().cyan(),
                    path.display().to_string().cyan()
                ));
            }

            ProgressEvent::StalePagesDetected { paths } => {
                self.spinner.println(format!(
                    "{WARNING}{} episode pages no longer match an episode (left in place):",
                    paths.len().to_string().yellow().bold()
                ));
                for path in paths {
                    self.spinner
                        .println(format!("    {}", path.display().to_string().dimmed()));
                }
            }

            ProgressEvent::BuildCompleted {
                episode_pages,
                list_cards,
            } => {
                self.spinner.println(format!(
                    "\n{PARTY}{} {} episode pages, {} list cards",
                    "Build complete:".bold().green(),
                    episode_pages.to_string().green().bold(),
                    list_cards.to_string().green()
                ));
            }

            ProgressEvent::ProxyServed { items } => {
                self.spinner.println(format!(
                    "{SUCCESS}Served feed with {} items",
                    items.to_string().cyan()
                ));
            }

            ProgressEvent::ProxyFailed { error } => {
                self.spinner
                    .println(format!("{FAILURE}{}", error.red()));
            }

            ProgressEvent::EpisodeSourceFailed { stage, error } => {
                self.spinner.println(format!(
                    "{WARNING}{} source failed: {}",
                    stage.yellow(),
                    error.dimmed()
                ));
            }

            ProgressEvent::EpisodesLoaded { origin, episodes } => {
                self.spinner.println(format!(
                    "{SUCCESS}{} episodes from {}",
                    episodes.to_string().green(),
                    origin.cyan()
                ));
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<SiteConfig> {
    match path {
        Some(path) => SiteConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(SiteConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    if !args.quiet {
        println!(
            "\n{}{} {}\n",
            MICROPHONE,
            "podsite".bold().magenta(),
            format!("- {}", config.podcast_name).dimmed()
        );
    }

    let console = (!args.quiet).then(|| Arc::new(ConsoleReporter::new()));
    let reporter: SharedProgressReporter = match &console {
        Some(console) => console.clone() as SharedProgressReporter,
        None => NoopReporter::shared(),
    };

    let result = run(args.command, &config, &reporter, args.quiet).await;

    if let Some(console) = &console {
        console.finish();
    }

    if !args.quiet
        && let Err(e) = &result
    {
        eprintln!("\n{FAILURE}{}", format!("{e:#}").red());
    }

    result
}

async fn run(
    command: Command,
    config: &SiteConfig,
    reporter: &SharedProgressReporter,
    quiet: bool,
) -> Result<()> {
    let today = chrono::Local::now().date_naive();

    match command {
        Command::Fetch { store, feed } => {
            let store = store.resolve(config);
            fetch_store(&feed.normalizer(), &feed.source(config), &store, reporter)
                .await
                .context("Failed to fetch feed")?;
        }

        Command::Build { store, site } => {
            let templates = site.load_templates()?;
            build_site(
                &store.resolve(config),
                &templates,
                &site.out,
                config,
                today,
                reporter,
            )
            .context("Failed to build site")?;
            if !quiet {
                println!("\n{FOLDER}Output: {}\n", site.out.display().to_string().cyan());
            }
        }

        Command::Update { store, feed, site } => {
            let templates = site.load_templates()?;
            let build = SiteBuild {
                templates: &templates,
                output_dir: &site.out,
                config,
                generated_on: today,
            };
            update_site(
                &feed.normalizer(),
                &feed.source(config),
                &store.resolve(config),
                &build,
                reporter,
            )
            .await
            .context("Failed to update site")?;
            if !quiet {
                println!("\n{FOLDER}Output: {}\n", site.out.display().to_string().cyan());
            }
        }

        Command::Serve { feed, addr, path } => {
            let path = path.unwrap_or_else(|| config.live_endpoint.clone());
            let state = Arc::new(ProxyState {
                normalizer: feed.normalizer(),
                feed_url: feed.source(config),
                reporter: reporter.clone(),
            });

            let (bound, server) =
                proxy::bind(addr, &path, state).context("Failed to start feed proxy")?;
            println!(
                "{GLOBE}Feed proxy listening on {}",
                format!("http://{bound}{path}").cyan()
            );
            server.await;
        }
    }

    Ok(())
}
