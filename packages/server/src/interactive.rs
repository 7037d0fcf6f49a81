//! Interactive mode for the server.
//!
//! Prompts the user for bind address and port before starting the server.

use crime_dashboard_config::DashboardConfig;
use crime_dashboard_dataset::Dataset;
use dialoguer::{Confirm, Input};

use crate::ServerError;

/// Runs the server in interactive mode, prompting for configuration.
///
/// Asks for a bind address and port, defaulting to the values in
/// `config`, then delegates to [`super::serve`].
///
/// # Errors
///
/// Returns [`ServerError`] if the underlying server fails to start.
#[allow(clippy::future_not_send)]
pub async fn run(dataset: Dataset, mut config: DashboardConfig) -> Result<(), ServerError> {
    println!("Crime Dashboard Server");
    println!();

    let default_addr = config.server.bind_addr.clone();
    config.server.bind_addr = Input::new()
        .with_prompt("Bind address")
        .default(default_addr.clone())
        .interact_text()
        .unwrap_or(default_addr);

    let default_port = config.server.port;
    config.server.port = Input::new()
        .with_prompt("Port")
        .default(default_port)
        .interact_text()
        .unwrap_or(default_port);

    let addr = format!("{}:{}", config.server.bind_addr, config.server.port);
    if !Confirm::new()
        .with_prompt(format!("Start server on {addr}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::serve(dataset, config).await
}
