//! ghcard CLI
//!
//! Runs the stats card server, or renders a single card to disk.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ghcard_analyzer::{aggregate, synthetic_heatmap, synthetic_monthly_series};
use ghcard_api::{create_router, AppState};
use ghcard_card::{
    build_layout, CardRenderer, Canvas, ChartKind, LayoutOptions, SvgRenderer, Theme,
};
use ghcard_collector::{CollectorConfig, GithubCollector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "ghcard")]
#[command(about = "ghcard - GitHub stats card generator")]
#[command(version)]
struct Cli {
    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = ghcard_collector::DEFAULT_API_BASE)]
    api_url: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Address to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,

        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = 3000)]
        port: u16,

        /// Answer failures with a rendered error card instead of text
        #[arg(long)]
        error_image: bool,

        /// Skip loading system fonts (text will not be drawn)
        #[arg(long)]
        no_system_fonts: bool,
    },

    /// Render one user's card to a PNG file
    Render {
        /// GitHub login
        username: String,

        /// Output file
        #[arg(short, long, default_value = "card.png")]
        output: PathBuf,

        /// Theme name (dark, light, neon)
        #[arg(long, default_value = "dark")]
        theme: String,

        /// Chart style (bars, area)
        #[arg(long, default_value = "bars")]
        chart: String,

        /// Include the activity heatmap
        #[arg(long)]
        heatmap: bool,

        /// Leave out the stars / repositories / followers row
        #[arg(long)]
        no_footer: bool,

        /// Seed for the synthetic chart data
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print aggregated statistics for a user
    Stats {
        /// GitHub login
        username: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    let config = CollectorConfig::default().with_api_base(cli.api_url);
    let collector = GithubCollector::new(config)?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            error_image,
            no_system_fonts,
        } => {
            serve(
                collector,
                SocketAddr::new(host, port),
                error_image,
                no_system_fonts,
            )
            .await?;
        }
        Commands::Render {
            username,
            output,
            theme,
            chart,
            heatmap,
            no_footer,
            seed,
        } => {
            let options = RenderOptions {
                theme: Theme::parse(Some(&theme)),
                chart: ChartKind::parse(Some(&chart)),
                heatmap,
                footer: !no_footer,
                seed,
            };
            render(&collector, &username, &output, options).await?;
        }
        Commands::Stats { username } => {
            stats(&collector, &username).await?;
        }
    }

    Ok(())
}

async fn serve(
    collector: GithubCollector,
    bind: SocketAddr,
    error_image: bool,
    no_system_fonts: bool,
) -> Result<()> {
    let renderer = if no_system_fonts {
        SvgRenderer::new()
    } else {
        tokio::task::spawn_blocking(SvgRenderer::with_system_fonts).await?
    };
    warn_if_fontless(&renderer);

    let state = AppState::new(collector, Arc::new(renderer)).with_error_image(error_image);
    let router = create_router(Arc::new(state));

    info!("Starting ghcard server on {}", bind);
    info!("Cards available at http://{}/stats/<username>", bind);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

struct RenderOptions {
    theme: Theme,
    chart: ChartKind,
    heatmap: bool,
    footer: bool,
    seed: Option<u64>,
}

async fn render(
    collector: &GithubCollector,
    username: &str,
    output: &Path,
    options: RenderOptions,
) -> Result<()> {
    let (user, repos) = collector.fetch_profile(username).await?;
    let stats = aggregate(&user, &repos)?;

    let seed = options.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);
    let monthly = synthetic_monthly_series(&mut rng);
    let heatmap = options.heatmap.then(|| synthetic_heatmap(&mut rng));

    let layout_options = LayoutOptions {
        theme: options.theme,
        chart: options.chart,
        heatmap,
        footer: options.footer,
    };
    let layout = build_layout(&stats, &monthly, &layout_options, Canvas::CARD)?;

    let renderer = SvgRenderer::with_system_fonts();
    warn_if_fontless(&renderer);
    let png = renderer.render(&layout)?;
    std::fs::write(output, &png)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Rendered {} ({} bytes) to {}",
        stats.username,
        png.len(),
        output.display()
    );
    if options.seed.is_none() {
        println!("Synthetic chart data used seed {}", seed);
    }
    Ok(())
}

fn warn_if_fontless(renderer: &SvgRenderer) {
    if renderer.font_faces() == 0 {
        warn!("No fonts loaded, card text will not be drawn");
    }
}

async fn stats(collector: &GithubCollector, username: &str) -> Result<()> {
    let (user, repos) = collector.fetch_profile(username).await?;
    let stats = aggregate(&user, &repos)?;

    println!("User: {} (@{})", stats.display_name, stats.username);
    println!(
        "Followers: {}  Following: {}  Public repos: {}",
        stats.followers, stats.following, stats.public_repo_count
    );
    println!("Stars: {}  Forks: {}", stats.total_stars, stats.total_forks);
    println!();

    println!("{:<20} {:<8}", "LANGUAGE", "REPOS");
    println!("{}", "-".repeat(28));
    for (lang, count) in stats.top_languages(10) {
        println!("{:<20} {:<8}", lang, count);
    }
    if stats.language_histogram.is_empty() {
        println!("(no languages reported)");
    }
    println!();

    println!("Recent repositories:");
    for repo in &stats.recent_repos {
        println!(
            "  {} - ⭐{} 🍴{} {}",
            repo.name,
            repo.stargazers_count,
            repo.forks_count,
            repo.language.as_deref().unwrap_or("-")
        );
    }
    println!();

    println!("Estimated commits (heuristic, 15 per public repo):");
    println!("  Total:         {}", stats.estimated_total_commits);
    println!("  Avg per month: {}", stats.estimated_avg_commits_per_month);
    println!("  Peak month:    {}", stats.estimated_peak_month_commits);

    Ok(())
}
