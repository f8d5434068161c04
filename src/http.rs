//! HTTP client utilities
//!
//! Provides a reqwest::Client configured with timeouts and a service user-agent

use reqwest::Client;
use std::time::Duration;

/// Build a reqwest Client with the given request timeout.
///
/// All outbound catalog and search-endpoint traffic goes through a client
/// built here, so the timeout bound applies uniformly.
pub fn client_with_timeout(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .user_agent(concat!("tienda/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to create HTTP client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds() {
        let _client = client_with_timeout(Duration::from_secs(30));
    }
}
