use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, LevelFilter};
use social_share::{
    logging::init_logger,
    proxy::{CheckerConfig, ProxyChecker, ProxyPool, ProxyType},
    share::{parse_flag, Network, ShareMeta},
    CounterConfig, ShareCounter,
};
use std::path::PathBuf;
use std::time::Duration;

/// Share links and share counters for social networks
#[derive(Parser)]
#[command(name = "social-share")]
#[command(about = "Share links and share counters for social networks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level
    #[arg(long, value_enum, default_value = "warn", global = true)]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the share link of a network
    Share {
        /// Network (twitter, facebook, vk, ok, moymir, pocket)
        network: String,
        /// URL to share
        url: String,
        /// Post title (vk, moymir)
        #[arg(long)]
        title: Option<String>,
        /// Post description (vk, moymir)
        #[arg(long)]
        description: Option<String>,
        /// Image URL (vk, moymir)
        #[arg(long)]
        image: Option<String>,
        /// Tweet text (twitter)
        #[arg(long)]
        text: Option<String>,
        /// Account to credit (twitter)
        #[arg(long)]
        via: Option<String>,
        /// Comma separated hashtags (twitter)
        #[arg(long)]
        hashtags: Option<String>,
        /// Let VK use title, description and image instead of scraping the page
        #[arg(long, default_value = "false")]
        noparse: String,
    },
    /// Fetch share counters for a URL
    Count {
        /// URL to look up
        url: String,
        /// Networks to query (defaults to every network with a counter)
        #[arg(short, long)]
        network: Vec<String>,
        /// Proxy list used when Facebook blocks direct requests
        #[arg(short, long)]
        proxies: Option<PathBuf>,
        /// Type for proxy list entries without a scheme
        #[arg(short = 't', long, default_value = "http")]
        proxy_type: String,
        /// Drop proxies that fail a health check before using them
        #[arg(long)]
        check_proxies: bool,
        /// Timeout in seconds for direct requests
        #[arg(long, default_value = "10")]
        timeout: u64,
        /// Timeout in seconds for proxied requests
        #[arg(long, default_value = "5")]
        proxy_timeout: u64,
        /// Maximum proxied Facebook attempts
        #[arg(long, default_value = "15")]
        attempts: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_level.into())?;

    match cli.command {
        Commands::Share {
            network,
            url,
            title,
            description,
            image,
            text,
            via,
            hashtags,
            noparse,
        } => {
            let network = parse_network(&network)?;
            let meta = ShareMeta {
                title,
                description,
                image,
                text,
                via,
                hashtags,
                noparse: parse_flag(&noparse),
            };
            println!("{}", network.share_url(&url, &meta));
        }
        Commands::Count {
            url,
            network,
            proxies,
            proxy_type,
            check_proxies,
            timeout,
            proxy_timeout,
            attempts,
        } => {
            let networks = if network.is_empty() {
                Network::with_counters().collect()
            } else {
                network
                    .iter()
                    .map(|name| parse_network(name))
                    .collect::<Result<Vec<_>>>()?
            };

            let mut pool = match proxies {
                Some(path) => {
                    let ptype: ProxyType = proxy_type.parse()?;
                    ProxyPool::from_file(&path, ptype)?
                }
                None => ProxyPool::empty(),
            };

            if check_proxies && !pool.is_empty() {
                let checker = ProxyChecker::with_config(
                    CheckerConfig::new().with_timeout(Duration::from_secs(proxy_timeout)),
                );
                pool = pool.retain_working(&checker).await;
            }

            let config = CounterConfig::new()
                .with_timeout(Duration::from_secs(timeout))
                .with_proxy_timeout(Duration::from_secs(proxy_timeout))
                .with_max_proxy_attempts(attempts);
            let counter = ShareCounter::with_config(config)?;

            info!("Fetching {} counters for {}", networks.len(), url);
            for network in networks {
                match counter.count(network, &url, &pool).await {
                    Ok(count) => println!("{network}: {count}"),
                    Err(e) => println!("{network}: failed: {e}"),
                }
            }
        }
    }

    Ok(())
}

fn parse_network(name: &str) -> Result<Network> {
    name.parse().map_err(|e: String| anyhow!(e))
}
