//! CLI mode implementation
//!
//! Command-line interface for the tienda search service

use crate::catalog::SortBy;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;

/// Tienda CLI
#[derive(Parser)]
#[command(name = "tienda")]
#[command(about = "Product catalog search and autocomplete service", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Base URL of the catalog API
    #[arg(
        long,
        global = true,
        env = "TIENDA_CATALOG_URL",
        default_value = "http://localhost:5000/api/products"
    )]
    pub catalog_url: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the search endpoint over HTTP
    Serve(ServeArgs),
    /// Run one ranked query against the catalog
    Search(SearchArgs),
    /// Interactive autocomplete against a running search endpoint
    Suggest(SuggestArgs),
    /// Print the homepage feed (three best + latest)
    Feed(FeedArgs),
}

/// Serve command arguments
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind the endpoint on
    #[arg(short, long, env = "TIENDA_BIND", default_value = "127.0.0.1:4000")]
    pub bind: SocketAddr,

    /// Catalog cache TTL in seconds (0 disables caching)
    #[arg(long, default_value_t = 60)]
    pub cache_ttl: u64,
}

/// Search command arguments
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search terms (case- and accent-insensitive)
    pub query: String,

    /// Maximum number of results
    #[arg(short = 'l', long)]
    pub limit: Option<usize>,

    /// Only include products at or above this price
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Only include products at or below this price
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Only include products with at least this much stock
    #[arg(long)]
    pub min_stock: Option<u32>,

    /// Only include products whose rating rounds down to this value (0-5)
    #[arg(long)]
    pub rating: Option<u8>,

    /// Sort order for the results
    #[arg(long, value_enum, default_value_t = SortBy::Relevance)]
    pub sort: SortBy,
}

/// Suggest command arguments
#[derive(Parser, Debug)]
pub struct SuggestArgs {
    /// URL of the search endpoint
    #[arg(
        long,
        env = "TIENDA_SEARCH_URL",
        default_value = "http://localhost:4000/api/products/search"
    )]
    pub endpoint: String,

    /// Debounce delay between keystrokes and query, in milliseconds
    #[arg(long, default_value_t = 300)]
    pub debounce_ms: u64,

    /// Maximum suggestions shown per input
    #[arg(short = 'l', long, default_value_t = 7)]
    pub limit: usize,
}

/// Feed command arguments
#[derive(Parser, Debug)]
pub struct FeedArgs {
    /// Number of products in the "latest" section
    #[arg(short = 'n', long, default_value_t = 20)]
    pub latest: usize,
}

impl SearchArgs {
    /// The filter options implied by the command-line flags.
    pub fn filter_options(&self) -> crate::catalog::FilterOptions {
        crate::catalog::FilterOptions {
            min_price: self.min_price,
            max_price: self.max_price,
            min_stock: self.min_stock,
            rating: self.rating,
            sort_by: self.sort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_args_parse() {
        let cli = Cli::parse_from(["tienda", "search", "zapatos", "--min-price", "10"]);
        match cli.command {
            Some(Commands::Search(args)) => {
                assert_eq!(args.query, "zapatos");
                assert_eq!(args.min_price, Some(10.0));
                assert_eq!(args.sort, SortBy::Relevance);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_serve_args_defaults() {
        let cli = Cli::parse_from(["tienda", "serve"]);
        match cli.command {
            Some(Commands::Serve(args)) => {
                assert_eq!(args.bind.port(), 4000);
                assert_eq!(args.cache_ttl, 60);
            }
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn test_filter_options_from_flags() {
        let cli = Cli::parse_from([
            "tienda", "search", "gorra", "--max-price", "25.5", "--sort", "price-asc",
        ]);
        match cli.command {
            Some(Commands::Search(args)) => {
                let options = args.filter_options();
                assert_eq!(options.max_price, Some(25.5));
                assert_eq!(options.sort_by, SortBy::PriceAsc);
            }
            _ => panic!("expected search command"),
        }
    }
}
