use confkeep::config::SchemaCheckConfig;
use confkeep::schema::{SchemaDocument, document::send_validated};
use mimalloc::MiMalloc;
use serde_json::json;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cfg = match SchemaCheckConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let payload = json!({"key": "feature_x", "value": "true", "type": "boolean"});
    println!("✅ With payload: {payload}");

    let client = reqwest::Client::new();
    let document = match SchemaDocument::fetch(&client, &cfg.base_url).await {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut names: Vec<&String> = document.models().keys().collect();
    names.sort();
    println!("✅ Models: {names:?}");

    let validated = match document.validate_arguments(&cfg.endpoint, &cfg.method, &payload) {
        Ok(v) => {
            println!("✅ Request is valid!");
            v
        }
        Err(e) => {
            eprintln!("❌ Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match send_validated(&client, &cfg.base_url, &cfg.endpoint, &cfg.method, &validated).await {
        Ok(response) => {
            println!("✅ Response: {response}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Error: {e}");
            ExitCode::FAILURE
        }
    }
}
