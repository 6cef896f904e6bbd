use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bloodbank_core::config::{
    credential_scheme_from_env_value, data_dir_from_env_value, storage_key_from_env_value,
};
use bloodbank_core::{CoreConfig, DataService, Store};

/// Entry point for the blood bank runner
///
/// Resolves configuration from the environment, opens the file-backed store, seeds it on
/// first run and prints the admin overview as JSON.
///
/// # Environment Variables
/// - `BANK_DATA_DIR`: Directory for the document (default: "bank_data")
/// - `BANK_STORAGE_KEY`: Document name within the directory (default: "blood_bank")
/// - `BANK_CREDENTIAL_SCHEME`: `argon2` or `plaintext` (default: "argon2")
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bloodbank_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Arc::new(CoreConfig::new(
        data_dir_from_env_value(std::env::var("BANK_DATA_DIR").ok()),
        storage_key_from_env_value(std::env::var("BANK_STORAGE_KEY").ok())?,
        credential_scheme_from_env_value(std::env::var("BANK_CREDENTIAL_SCHEME").ok())?,
    )?);

    tracing::info!(
        "++ Opening blood bank document at {} ({})",
        cfg.document_path().display(),
        cfg.credential_scheme()
    );

    let store = Arc::new(Store::open(cfg));
    if store.initialise()? {
        tracing::info!("++ Wrote seed document");
    }

    let service = DataService::new(store);
    let overview = service.admin_dashboard();
    tracing::info!(
        "++ {} users, {} donors, {} pending requests",
        overview.stats.total_users,
        overview.stats.total_donors,
        overview.stats.pending_requests
    );

    println!("{}", serde_json::to_string_pretty(&overview)?);
    Ok(())
}
