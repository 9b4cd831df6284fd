//! Single Replurk Run Script
//!
//! Runs one search/replurk cycle against Plurk with the same configuration
//! the service uses, then exits. Pass `--dry-run` to only search and print
//! the ids that would be replurked.

use replurker::{run_replurk_cycle, search_plurks, PlurkConfig, ReplurkContext, ReplurkOutcome};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let _ = dotenvy::dotenv();
    env_logger::init();

    let dry_run = std::env::args().skip(1).any(|arg| arg == "--dry-run");

    let config = PlurkConfig::from_env();
    println!("🔍 Query: '{}'", config.search_query);
    let ctx = ReplurkContext::from_config(config)?;

    if dry_run {
        let ids = search_plurks(&ctx).await;
        if ids.is_empty() {
            println!("❌ No plurks found");
        } else {
            println!("✅ Would replurk {} plurks: {:?}", ids.len(), ids);
        }
        return Ok(());
    }

    let report = run_replurk_cycle(&ctx).await;
    println!("📊 Plurks found: {}", report.found);
    match report.outcome {
        ReplurkOutcome::Skipped => println!("ℹ️  Nothing to replurk"),
        ReplurkOutcome::Completed(response) => {
            println!("✅ Replurk response:\n{}", serde_json::to_string_pretty(&response)?)
        }
        ReplurkOutcome::Failed(e) => {
            println!("❌ Replurk failed: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
