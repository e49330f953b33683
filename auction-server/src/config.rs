use {
    clap::{
        crate_authors,
        crate_description,
        crate_name,
        crate_version,
        Args,
        Parser,
    },
    humantime_serde::re::humantime,
    std::time::Duration,
};

mod server;

pub const DEFAULT_AUCTION_INTERVAL: Duration = Duration::from_secs(5 * 60);
// Stored timestamps keep whole microseconds.
const MIN_AUCTION_INTERVAL: Duration = Duration::from_millis(1);
const DEFAULT_MAX_CONCURRENT_AUCTIONS: &str = "50";

// `Options` is a structup definition to provide clean command-line args for the auction server.
#[derive(Parser, Debug)]
#[command(name = crate_name!())]
#[command(author = crate_authors!())]
#[command(about = crate_description!())]
#[command(version = crate_version!())]
#[allow(clippy::large_enum_variant)]
pub enum Options {
    /// Run the auction server service.
    Run(RunOptions),
}

#[derive(Args, Clone, Debug)]
pub struct RunOptions {
    /// Server Options
    #[command(flatten)]
    pub server: server::Options,

    #[command(flatten)]
    pub auction: AuctionOptions,

    /// Bearer token that grants access to the admin routes.
    #[arg(long = "secret-key")]
    #[arg(env = "SECRET_KEY")]
    pub secret_key: String,
}

#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "Auction Options")]
#[group(id = "Auction")]
pub struct AuctionOptions {
    /// How long an auction stays open for bidding, e.g. `30s`, `5m` or `2h30m`.
    /// Invalid values fall back to 5 minutes.
    #[arg(long = "auction-interval")]
    #[arg(env = "AUCTION_INTERVAL")]
    #[arg(default_value = "5m")]
    pub auction_interval: String,

    /// Maximum number of auctions that can be open at the same time.
    #[arg(long = "max-concurrent-auctions")]
    #[arg(env = "MAX_CONCURRENT_AUCTIONS")]
    #[arg(default_value = DEFAULT_MAX_CONCURRENT_AUCTIONS)]
    pub max_concurrent_auctions: usize,
}

impl AuctionOptions {
    pub fn auction_duration(&self) -> Duration {
        parse_auction_interval(&self.auction_interval)
    }
}

/// Parses the auction interval, substituting the default for anything unusable.
pub fn parse_auction_interval(interval: &str) -> Duration {
    match humantime::parse_duration(interval.trim()) {
        Ok(duration) if duration >= MIN_AUCTION_INTERVAL => duration,
        Ok(_) => {
            tracing::warn!(
                interval,
                min = ?MIN_AUCTION_INTERVAL,
                default = ?DEFAULT_AUCTION_INTERVAL,
                "Auction interval is below the minimum, using default"
            );
            DEFAULT_AUCTION_INTERVAL
        }
        Err(err) => {
            tracing::warn!(
                interval,
                error = %err,
                default = ?DEFAULT_AUCTION_INTERVAL,
                "Failed to parse auction interval, using default"
            );
            DEFAULT_AUCTION_INTERVAL
        }
    }
}
