//! Proxy command - forward one query and print the response body

use crate::{
    ScatchError,
    api::{ImageProxy, ProxyQuery},
    config::ScatchConfig,
};

type Result<T> = std::result::Result<T, ScatchError>;

/// Execute the proxy command
///
/// Prints the JSON body (the upstream answer, or `{"error": ...}`) and
/// reports the HTTP status the proxy would answer with.
///
/// # Errors
/// Returns an error if the proxy cannot be built or the call failed.
pub fn execute(config: &ScatchConfig, query: ProxyQuery, quiet: bool) -> Result<()> {
    let proxy = ImageProxy::from_config(config)?;
    let response = proxy.handle(&query);

    let body = serde_json::to_string_pretty(&response.body)
        .map_err(|e| ScatchError::InvalidInput(format!("Unprintable response: {e}")))?;
    if !quiet {
        eprintln!("HTTP {}", response.status);
    }
    println!("{body}");

    if response.is_success() {
        Ok(())
    } else {
        Err(ScatchError::InvalidInput(format!(
            "Proxy answered with status {}",
            response.status
        )))
    }
}
