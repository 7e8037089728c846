//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::{Config, Profile};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use corpuslens_domain::DEFAULT_BASE_URL;

/// Execute the profile command.
pub fn execute_profile(args: ProfileArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => switch_profile(config, name, formatter),
        ProfileAction::Set {
            name,
            customer_id,
            corpus_id,
            base_url,
        } => set_profile(config, name, customer_id, corpus_id, base_url, formatter),
        ProfileAction::Delete { name } => delete_profile(config, name, formatter),
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    let mut names: Vec<&String> = config.profiles.keys().collect();
    names.sort();

    println!("Available profiles:");
    for name in names {
        let profile = &config.profiles[name];
        if name == &config.active_profile {
            println!("* {}", formatter.success(name));
        } else {
            println!("  {}", name);
        }
        print_profile(profile, "    ");
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    print_profile(profile, "  ");

    Ok(())
}

fn print_profile(profile: &Profile, indent: &str) {
    println!("{}Customer: {}", indent, profile.customer_id);
    println!("{}Corpus: {}", indent, profile.corpus_id);
    println!("{}URL: {}", indent, profile.base_url);
    println!(
        "{}API key: {}",
        indent,
        if profile.api_key.is_some() { "stored" } else { "not stored" }
    );
}

/// Switch to a different profile.
fn switch_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    config.switch_profile(name.clone())?;
    config.save()?;
    println!(
        "{}",
        formatter.success(&format!("Switched to profile '{}'", name))
    );
    Ok(())
}

/// Create or update a profile. A stored API key survives the update.
fn set_profile(
    config: &mut Config,
    name: String,
    customer_id: String,
    corpus_id: String,
    base_url: Option<String>,
    formatter: &Formatter,
) -> Result<()> {
    let existing = config.profiles.get(&name);
    let action = if existing.is_some() { "Updated" } else { "Created" };

    let profile = Profile {
        customer_id,
        corpus_id,
        base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        api_key: existing.and_then(|p| p.api_key.clone()),
    };

    config.set_profile(name.clone(), profile);
    config.save()?;

    println!(
        "{}",
        formatter.success(&format!("{} profile '{}'", action, name))
    );

    Ok(())
}

/// Delete a profile.
fn delete_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    if name == config.active_profile {
        return Err(CliError::NotPermitted(
            "Cannot delete the active profile".to_string(),
        ));
    }

    if config.profiles.remove(&name).is_some() {
        config.save()?;
        println!(
            "{}",
            formatter.success(&format!("Deleted profile '{}'", name))
        );
    } else {
        println!(
            "{}",
            formatter.warning(&format!("Profile '{}' does not exist", name))
        );
    }

    Ok(())
}
