//! Shared CLI helpers.

use colored::Colorize;

/// Print the banner shown when a command starts.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!("{}  v{}", "🔧 Mechbot".cyan().bold(), version.dimmed());
}
