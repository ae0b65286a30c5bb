//! `mechbot onboard` — initialize configuration.
//!
//! Creates `~/.mechbot/config.json` with defaults and points the user at
//! the credential they still need to set.

use anyhow::Result;
use colored::Colorize;

use mechbot_core::config::{load_config, save_config};
use mechbot_core::utils::get_data_path;

/// Run the onboard command.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔧 Mechbot — Setup".cyan().bold());
    println!();

    let config_path = get_data_path().join("config.json");

    // 1. Create config if it doesn't exist
    if config_path.exists() {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    } else {
        let config = load_config(None); // defaults + env
        save_config(&config, Some(&config_path))?;
        println!(
            "  {} created config at {}",
            "✓".green(),
            config_path.display()
        );
    }

    // 2. Credential hint
    let config = load_config(None);
    if config.provider.is_configured() {
        println!("  {} provider API key is set", "✓".green());
    } else {
        println!(
            "  {} no provider API key — set {} or {} in the config",
            "!".yellow(),
            "GROQ_API_KEY".bold(),
            "provider.apiKey".bold()
        );
    }

    println!();
    println!("  Next: {}", "mechbot serve".bold());
    println!();

    Ok(())
}
