use std::time::Duration;

use anyhow::Context;
use communitea_client::prelude::*;
use tracing_subscriber::EnvFilter;

// Configuration - update these to match your local replica
const REPLICA_HOST: &str = "http://127.0.0.1:4943";
const CANISTER_ID: &str = "rrkah-fqaaa-aaaaa-aaaaq-cai";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging, e.g. RUST_LOG=communitea_client=debug
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let names: Vec<String> = std::env::args().skip(1).collect();
    let names = if names.is_empty() {
        vec!["World".to_string()]
    } else {
        names
    };

    println!("🚀 communitea greeting demo\n");

    // Step 1: Create the agent and actor once
    let agent = AgentConfig::new(REPLICA_HOST)
        .with_timeout(Duration::from_secs(10));
    let config = GreetingConfig::new(CANISTER_ID.parse()?).with_agent(agent);
    let client = GreetingClient::initialize(config).context("cannot set up the agent")?;

    println!("✓ Client configured for: {CANISTER_ID} at {REPLICA_HOST}\n");

    // Step 2: Simulate one click per name on an in-memory page
    let page = MemoryDocument::new()
        .with_input("name", "")
        .with_text("greeting", "");

    for name in &names {
        page.set_input("name", name.as_str())?;

        println!("💬 Clicking with name {name:?}...");
        match client.handle_click(&page).await {
            Ok(ClickOutcome::Rendered { seq, greeting }) => {
                println!("✓ #{seq}: {greeting}");
            }
            Ok(ClickOutcome::Superseded { seq, displayed }) => {
                println!("  #{seq} dropped, #{displayed} is newer");
            }
            Err(e) => {
                eprintln!(
                    r#"✗ Greeting failed: {e}

    Note: Make sure REPLICA_HOST points to a running replica with the communitea canister"#
                );
                return Ok(());
            }
        }
    }

    println!(
        "\n📝 Page now shows: {}",
        page.text("greeting").unwrap_or_default()
    );

    Ok(())
}
