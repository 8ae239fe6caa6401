//! Contest Linker CLI
//!
//! Local execution entry point.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use contest_linker::{
    error::{AppError, Result},
    models::{Config, Contest, ContestStatus, Platform},
    pipeline::{self, SmartMatchReport},
    services::{self, ContestFilter, PlatformApiSource, VideoSource, YouTubeClient},
    storage::{BookmarkStore, KeyValueStore, LocalStorage, MemoryStorage, SolutionLinkStore},
};

/// Contest Linker - match contests to solution videos
#[derive(Parser, Debug)]
#[command(
    name = "contest-linker",
    version,
    about = "Links programming contests to YouTube solution videos"
)]
struct Cli {
    /// Path to storage directory holding config and saved links
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Path to config file (default: {storage_dir}/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// YouTube Data API key, overrides the config file
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the round identifier extracted from contest titles
    Extract {
        /// Contest titles
        #[arg(required = true)]
        titles: Vec<String>,
    },

    /// List the videos of a platform's solution playlist
    Videos {
        /// codeforces, codechef or leetcode
        #[arg(short, long)]
        platform: Platform,
    },

    /// Find the solution link for one contest
    Find {
        #[arg(short, long)]
        platform: Platform,

        /// Contest name, e.g. "Codeforces Round 930 (Div. 1)"
        name: String,
    },

    /// List contests from the platform APIs with their solution links
    Contests {
        /// Only these platforms (repeatable)
        #[arg(short, long)]
        platform: Vec<Platform>,

        /// Only contests with this status: upcoming, ongoing or past
        #[arg(long)]
        status: Option<ContestStatus>,

        /// Only bookmarked contests
        #[arg(long)]
        bookmarked: bool,
    },

    /// Match past contests to playlist videos and save the links
    Match {
        /// JSON array of contests (default: fetch from the platform APIs)
        #[arg(long)]
        contests: Option<PathBuf>,

        /// Run matching without saving links
        #[arg(long)]
        dry_run: bool,
    },

    /// Manage saved solution links
    Links {
        #[command(subcommand)]
        command: LinksCommand,
    },

    /// Manage bookmarked contests
    Bookmarks {
        #[command(subcommand)]
        command: BookmarksCommand,
    },

    /// Validate configuration file
    Validate,
}

#[derive(Subcommand, Debug)]
enum LinksCommand {
    /// Show all saved links
    List,

    /// Save a link for a contest
    Set { contest_id: String, url: String },

    /// Delete the saved link of a contest
    Remove { contest_id: String },
}

#[derive(Subcommand, Debug)]
enum BookmarksCommand {
    /// Show bookmarked contest IDs
    List,

    /// Bookmark a contest, or remove its bookmark
    Toggle { contest_id: String },

    /// Remove all bookmarks
    Clear,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.storage_dir.join("config.toml"));
    let mut config = Config::load_or_default(&config_path);
    if let Some(key) = cli.api_key {
        config.youtube.api_key = Some(key);
    }

    log::debug!("Loaded configuration from {}", config_path.display());

    let storage = LocalStorage::new(&cli.storage_dir);
    let links = SolutionLinkStore::new(&storage);
    let bookmarks = BookmarkStore::new(&storage);

    match cli.command {
        Command::Extract { titles } => {
            for title in &titles {
                let platform = services::classify_title(title)
                    .map(|p| p.display_name())
                    .unwrap_or("unknown");
                let round = services::extract_round_number(title);
                println!("{}\t{}\t{}", platform, round.as_deref().unwrap_or("-"), title);
            }
        }

        Command::Videos { platform } => {
            let api_key = require_api_key(&config)?;
            let playlist_url = config.playlists.url_for(platform).ok_or_else(|| {
                AppError::config(format!("No playlist configured for {platform}"))
            })?;

            let client = YouTubeClient::new(&config.http, &config.youtube)?;
            let videos = client.playlist_videos(playlist_url, api_key).await?;
            for video in &videos {
                println!(
                    "{}\t{}\t{}",
                    video.published_at.format("%Y-%m-%d"),
                    video.watch_url(),
                    video.title
                );
            }
            log::info!("{} videos in {} playlist", videos.len(), platform.display_name());
        }

        Command::Find { platform, name } => {
            let client = YouTubeClient::new(&config.http, &config.youtube)?;
            match pipeline::find_video_for_contest(&config, &client, &name, platform).await {
                Some(link) => println!("{link}"),
                None => log::warn!(
                    "No lookup possible for {}: API key or playlist missing",
                    platform.display_name()
                ),
            }
        }

        Command::Contests {
            platform,
            status,
            bookmarked,
        } => {
            let filter = ContestFilter {
                platforms: platform,
                status,
                bookmarked_only: bookmarked,
            };
            let saved_bookmarks = bookmarks.get().await?;
            let mut contests = filter.apply(fetch_contests(&config).await?, &saved_bookmarks);
            let saved = links.get().await?;
            services::apply_solution_links(&mut contests, &saved, &config.playlists);

            for contest in &contests {
                let mark = if saved_bookmarks.contains(&contest.id) { "*" } else { " " };
                println!(
                    "{}\t{}\t{:?}\t{}\t{}\t{}",
                    mark,
                    contest.platform,
                    contest.status,
                    contest.start_time.format("%Y-%m-%d %H:%M"),
                    contest.name,
                    contest.solution_link.as_deref().unwrap_or("-")
                );
            }
            log::info!("{} contests", contests.len());
        }

        Command::Match { contests, dry_run } => {
            let contests = match contests {
                Some(path) => load_contests(&path).await?,
                None => fetch_contests(&config).await?,
            };
            let client = YouTubeClient::new(&config.http, &config.youtube)?;

            let report = if dry_run {
                // Match against a scratch copy of the saved links.
                let scratch = MemoryStorage::new();
                let scratch_links = SolutionLinkStore::new(&scratch);
                scratch_links.replace_all(&links.get().await?).await?;
                pipeline::run_smart_match(&config, &client, &scratch_links, &contests).await?
            } else {
                pipeline::run_smart_match(&config, &client, &links, &contests).await?
            };

            log_report(&report);
            if let Some(error) = report.stats.error {
                return Err(AppError::config(error));
            }
            if dry_run {
                log::info!("Dry run: links were not saved");
            }
        }

        Command::Links { command } => match command {
            LinksCommand::List => {
                let saved = links.get().await?;
                for (contest_id, url) in &saved {
                    println!("{contest_id}\t{url}");
                }
                log::info!("{} saved links", saved.len());
            }
            LinksCommand::Set { contest_id, url } => {
                links.set(&contest_id, &url).await?;
            }
            LinksCommand::Remove { contest_id } => {
                if !links.remove(&contest_id).await? {
                    log::warn!("No saved link for contest {}", contest_id);
                }
            }
        },

        Command::Bookmarks { command } => match command {
            BookmarksCommand::List => {
                let ids = bookmarks.get().await?;
                for id in &ids {
                    println!("{id}");
                }
                log::info!("{} bookmarks", ids.len());
            }
            BookmarksCommand::Toggle { contest_id } => {
                bookmarks.toggle(&contest_id).await?;
            }
            BookmarksCommand::Clear => {
                bookmarks.clear().await?;
                log::info!("Bookmarks cleared");
            }
        },

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
            log::info!("Storage directory: {}", storage.root_dir().display());

            match storage.get(contest_linker::storage::SOLUTION_LINKS_KEY).await? {
                Some(_) => log::info!("✓ Saved links: {}", links.get().await?.len()),
                None => log::info!("No saved links yet."),
            }
            if config.youtube.api_key().is_none() {
                log::warn!("No YouTube API key configured; matching is unavailable");
            }

            log::info!("All validations passed!");
        }
    }

    Ok(())
}

fn require_api_key(config: &Config) -> Result<&str> {
    config
        .youtube
        .api_key()
        .ok_or_else(|| AppError::config(pipeline::MISSING_API_KEY))
}

async fn load_contests(path: &Path) -> Result<Vec<Contest>> {
    let content = tokio::fs::read_to_string(path).await?;
    let contests: Vec<Contest> = serde_json::from_str(&content)?;
    log::info!("Loaded {} contests from {}", contests.len(), path.display());
    Ok(contests)
}

async fn fetch_contests(config: &Config) -> Result<Vec<Contest>> {
    let source = PlatformApiSource::new(&config.http, &config.sources)?;
    Ok(services::fetch_all_contests(&source).await)
}

fn log_report(report: &SmartMatchReport) {
    for (platform, stats) in &report.stats.platforms {
        match &stats.error {
            Some(error) => log::warn!("{}: {}", platform.display_name(), error),
            None => log::info!(
                "{}: {}/{} matched, {} skipped ({:.1}%)",
                platform.display_name(),
                stats.matched,
                stats.total,
                stats.skipped,
                stats.match_rate()
            ),
        }
    }
    log::info!(
        "Matched {} of {} contests ({} skipped, {:.1}% match rate)",
        report.total_matched,
        report.total_contests,
        report.total_skipped,
        report.stats.match_rate
    );
}
