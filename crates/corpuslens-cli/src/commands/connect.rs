//! Connect command implementation.

use crate::cli::ConnectArgs;
use crate::config::{Config, Profile};
use crate::error::Result;
use crate::output::Formatter;
use corpuslens_domain::DEFAULT_BASE_URL;
use corpuslens_sdk::CorpusClient;
use tracing::debug;

/// Execute the connect command.
///
/// Returns the validated client; the caller decides where it lives.
pub async fn execute_connect(
    args: ConnectArgs,
    api_key: Option<&str>,
    config: &mut Config,
    formatter: &Formatter,
) -> Result<CorpusClient> {
    let profile = resolve_profile(&args, config);
    let connection = profile.connection(api_key)?;
    debug!(base_url = %connection.base_url(), corpus = %connection.corpus_id(), "connecting");

    let client = CorpusClient::connect(connection, config.settings.timeout()).await?;
    println!(
        "{}",
        formatter.connection_info(client.connection().base_url(), client.connection().corpus_id())
    );

    // Save as profile if requested
    if let Some(profile_name) = args.save_as {
        let api_key = if args.store_key {
            Some(client.connection().api_key().to_string())
        } else {
            profile.api_key.clone()
        };
        let profile = Profile { api_key, ..profile };
        config.set_profile(profile_name.clone(), profile);
        config.save()?;
        println!(
            "{}",
            formatter.success(&format!("Profile '{}' saved", profile_name))
        );
    }

    Ok(client)
}

/// Start from the active profile (if any) and apply the flags on top.
fn resolve_profile(args: &ConnectArgs, config: &Config) -> Profile {
    let base = config.get_active_profile().ok().cloned().unwrap_or(Profile {
        customer_id: String::new(),
        corpus_id: String::new(),
        base_url: DEFAULT_BASE_URL.to_string(),
        api_key: None,
    });

    Profile {
        customer_id: args.customer_id.clone().unwrap_or(base.customer_id),
        corpus_id: args.corpus_id.clone().unwrap_or(base.corpus_id),
        base_url: args.base_url.clone().unwrap_or(base.base_url),
        api_key: base.api_key,
    }
}
