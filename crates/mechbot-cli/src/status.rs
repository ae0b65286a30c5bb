//! `mechbot status` — show configuration and provider status.

use anyhow::Result;
use colored::Colorize;

use mechbot_core::config::load_config;
use mechbot_core::utils::get_data_path;
use mechbot_providers::http_provider::DEFAULT_API_BASE;

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_data_path().join("config.json");

    println!();
    println!("{}", "🔧 Mechbot Status".cyan().bold());
    println!();

    // Config
    let config_exists = config_path.exists();
    println!(
        "  {:<14} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_exists {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    // Server
    println!(
        "  {:<14} {}:{}",
        "Listen:".bold(),
        config.server.host,
        config.server.port
    );

    // Model + parameters
    println!("  {:<14} {}", "Model:".bold(), config.provider.model);
    println!(
        "  {:<14} {} | max_tokens: {}",
        "Parameters:".bold(),
        format!("temp: {}", config.provider.temperature).dimmed(),
        format!("{}", config.provider.max_tokens).dimmed(),
    );

    // Provider endpoint + credential
    println!(
        "  {:<14} {}",
        "API base:".bold(),
        config.provider.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    );
    let key_status = if config.provider.is_configured() {
        format!("{} (key set)", "✓".green())
    } else {
        format!("{}", "· not configured".dimmed())
    };
    println!("  {:<14} {}", "API key:".bold(), key_status);

    // Sessions
    println!(
        "  {:<14} max {} | idle timeout {}m | sweep every {}s",
        "Sessions:".bold(),
        config.sessions.max_sessions,
        config.sessions.idle_timeout_minutes,
        config.sessions.sweep_interval_seconds
    );

    println!();

    Ok(())
}
