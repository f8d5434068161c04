//! tienda search service (Rust)
//!
//! Dual-mode application:
//! - `serve`: HTTP search endpoint for the storefront (ranked product
//!   search, catalog listing, homepage feed)
//! - `search` / `feed`: command-line utilities for direct queries against
//!   the configured catalog

mod autocomplete;
mod catalog;
mod cli;
mod error;
mod http;
mod search;
mod server;

use anyhow::Result;
use catalog::{CachedCatalog, HttpCatalog, Product, ProductRepository};
use clap::Parser;
use cli::{Cli, Commands};
use error::AppError;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Request timeout for catalog fetches issued by the CLI and server
const CATALOG_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    let result = match cli.command {
        Some(Commands::Serve(args)) => run_serve(&cli.catalog_url, args).await,
        Some(Commands::Search(args)) => run_search(&cli.catalog_url, args).await,
        Some(Commands::Suggest(args)) => run_suggest(args).await,
        Some(Commands::Feed(args)) => run_feed(&cli.catalog_url, args).await,
        None => {
            eprintln!("Error: No command specified. Use --help for usage information.");
            std::process::exit(1);
        }
    };

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

fn build_catalog(catalog_url: &str, cache_ttl: u64) -> Arc<dyn ProductRepository> {
    let http_catalog: Arc<dyn ProductRepository> =
        Arc::new(HttpCatalog::new(catalog_url, CATALOG_TIMEOUT));

    if cache_ttl == 0 {
        http_catalog
    } else {
        Arc::new(CachedCatalog::new(
            http_catalog,
            Duration::from_secs(cache_ttl),
        ))
    }
}

/// Run the search endpoint server
async fn run_serve(catalog_url: &str, args: cli::ServeArgs) -> Result<String> {
    info!("Starting tienda search endpoint against {}", catalog_url);

    let catalog = build_catalog(catalog_url, args.cache_ttl);
    server::serve(args.bind, catalog).await?;

    Ok(String::new())
}

/// Execute one ranked query in CLI mode
async fn run_search(catalog_url: &str, args: cli::SearchArgs) -> Result<String> {
    use tokio::time::timeout;

    error::validate_query(&args.query).map_err(|e| anyhow::anyhow!(e))?;

    let catalog = HttpCatalog::new(catalog_url, CATALOG_TIMEOUT);
    let products = timeout(Duration::from_secs(120), catalog.list_all())
        .await
        .map_err(|_| anyhow::Error::from(AppError::Timeout(
            "Catalog fetch exceeded 120 second timeout".to_string(),
        )))?
        .map_err(anyhow::Error::from)?;

    let mut results = args.filter_options().apply(search::rank(&products, &args.query));
    if let Some(limit) = args.limit {
        results.truncate(limit);
    }

    Ok(format_results(&results))
}

/// Interactive autocomplete session in CLI mode
///
/// Each stdin line is treated as the current input box contents; the
/// session debounces, queries the endpoint, and the top suggestions are
/// printed. An empty line closes the panel, a lone `!` submits the
/// current query and prints the navigation target. EOF ends the session.
async fn run_suggest(args: cli::SuggestArgs) -> Result<String> {
    use autocomplete::{AutocompleteSession, HttpSearchEndpoint, DEFAULT_REQUEST_TIMEOUT};
    use tokio::io::AsyncBufReadExt;

    let endpoint = Arc::new(HttpSearchEndpoint::new(&args.endpoint, CATALOG_TIMEOUT));
    let mut session = AutocompleteSession::with_timing(
        endpoint,
        Duration::from_millis(args.debounce_ms),
        DEFAULT_REQUEST_TIMEOUT,
    );

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "!" {
            match session.submit() {
                Some(target) => println!("  -> {}", target),
                None => println!("  (nothing to submit)"),
            }
            continue;
        }

        session.handle_input(&line);
        if !line.trim().is_empty() {
            // Debounce elapses, then the query resolves
            session.next_event().await;
            session.next_event().await;
        }

        let state = session.snapshot();
        if state.is_open {
            for product in state.results.iter().take(args.limit) {
                println!("  {} (${:.2})", product.name, product.price);
            }
        } else if !line.trim().is_empty() {
            println!("  (no matches)");
        }
    }

    Ok(String::new())
}

/// Print the homepage feed in CLI mode
async fn run_feed(catalog_url: &str, args: cli::FeedArgs) -> Result<String> {
    use tokio::time::timeout;

    let catalog = HttpCatalog::new(catalog_url, CATALOG_TIMEOUT);
    let products = timeout(Duration::from_secs(120), catalog.list_all())
        .await
        .map_err(|_| anyhow::Error::from(AppError::Timeout(
            "Catalog fetch exceeded 120 second timeout".to_string(),
        )))?
        .map_err(anyhow::Error::from)?;

    let feed = catalog::feed(&products, args.latest);

    let mut output = String::from("Top rated:\n");
    output.push_str(&format_results(&feed.three_best));
    output.push_str("\nLatest:\n");
    output.push_str(&format_results(&feed.latest));

    Ok(output)
}

/// Render a product listing for stdout
fn format_results(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products matched.\n".to_string();
    }

    let mut output = String::new();
    for product in products {
        let rating = product
            .rating
            .map(|r| format!("{:.1}★", r))
            .unwrap_or_else(|| "—".to_string());
        output.push_str(&format!(
            "  {:<40} ${:>8.2}  stock {:>4}  {}\n",
            product.name, product.price, product.stock, rating
        ));
    }
    output
}

/// Map AppError to exit code
fn get_exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<AppError>() {
        Some(AppError::InvalidInput(_)) => 1,
        Some(AppError::CatalogFetchFailed(_)) | Some(AppError::CatalogParseFailed(_)) => 2,
        Some(AppError::Timeout(_)) => 4,
        _ => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, rating: Option<f32>) -> Product {
        Product {
            id: name.to_string(),
            name: name.to_string(),
            description: String::new(),
            price: 19.99,
            image: String::new(),
            stock: 3,
            rating,
            created_at: None,
        }
    }

    #[test]
    fn test_format_results_empty() {
        assert_eq!(format_results(&[]), "No products matched.\n");
    }

    #[test]
    fn test_format_results_lists_each_product() {
        let output = format_results(&[product("Zapatos", Some(4.5)), product("Gorra", None)]);
        assert!(output.contains("Zapatos"));
        assert!(output.contains("4.5★"));
        assert!(output.contains("Gorra"));
        assert!(output.contains("—"));
    }

    #[test]
    fn test_exit_codes() {
        let err = anyhow::Error::from(AppError::Timeout("slow".to_string()));
        assert_eq!(get_exit_code(&err), 4);
        let err = anyhow::Error::from(AppError::CatalogFetchFailed("down".to_string()));
        assert_eq!(get_exit_code(&err), 2);
        let err = anyhow::anyhow!("something else");
        assert_eq!(get_exit_code(&err), 5);
    }

    #[test]
    fn test_build_catalog_zero_ttl_disables_cache() {
        // Only checks construction; behavior is covered in catalog::cache
        let _uncached = build_catalog("http://localhost:5000/api/products", 0);
        let _cached = build_catalog("http://localhost:5000/api/products", 60);
    }
}
