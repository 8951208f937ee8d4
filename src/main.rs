use std::env;
use std::sync::Arc;

use colored::Colorize;
use serde_json::json;

use composio_toolkit_sdk::components::YoutubeComponent;
use composio_toolkit_sdk::composio::{
    CachedCapabilitySource, ComposioBase, ComposioClient, ComposioConfig, ComposioToolProvider,
    ToolkitComponent,
};
use composio_toolkit_sdk::logging;
use composio_toolkit_sdk::tools::ToolRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging system
    let _log_guard = logging::init_logging()?;

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let as_json = args.iter().any(|a| a == "--json");
    let user_id = args
        .iter()
        .position(|a| a == "--user")
        .and_then(|i| args.get(i + 1).cloned())
        .or_else(|| env::var("COMPOSIO_USER_ID").ok())
        .unwrap_or_else(|| "default".to_string());

    tracing::info!("=== Composio toolkit setup (user: {}) ===", user_id);

    let config = ComposioConfig::from_env()?;
    let client = ComposioClient::new(config.clone())?;
    let source = Arc::new(CachedCapabilitySource::new(client, &config));

    // Construct and run the tool-selection hook
    let mut youtube = YoutubeComponent::new(ComposioBase::new(source, user_id.clone()));
    youtube.set_default_tools().await?;

    let connection = youtube.base().connection(youtube.metadata().app_name).await?;

    let mut registry = ToolRegistry::new();
    registry
        .add_provider(Arc::new(ComposioToolProvider::from_component(&youtube)?))
        .await?;

    tracing::info!("Registered {} tools", registry.len());

    let meta = youtube.metadata();

    if as_json {
        let report = json!({
            "component": meta,
            "user_id": user_id,
            "connected_account": connection.as_ref().map(|a| a.id.clone()),
            "generated_at": chrono::Utc::now(),
            "tools": registry.get_definitions(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} ({})",
        meta.display_name.bold(),
        format!("[{}]", meta.app_name).dimmed(),
        meta.documentation
    );

    match &connection {
        Some(account) => println!("{} connected account {}", "✓".green(), account.id),
        None => println!(
            "{} no active {} connection for user '{}'",
            "!".yellow(),
            meta.display_name,
            user_id
        ),
    }

    println!("{} tools available:", registry.len().to_string().cyan());
    for definition in registry.get_definitions() {
        println!(
            "  {} {}",
            definition.name.green(),
            definition.description.unwrap_or_default().dimmed()
        );
    }

    Ok(())
}
