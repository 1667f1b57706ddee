//! Config validation CLI tool
//!
//! Validates a focusd configuration file and reports any errors.

use focus_util::default_config_path;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let config_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_config_path();
            eprintln!("Usage: validate-config [config-file]");
            eprintln!();
            eprintln!("Validates a focusd configuration file.");
            eprintln!();
            eprintln!("If no path is provided, uses: {}", default_path.display());
            return ExitCode::from(2);
        }
    };

    if !config_path.exists() {
        eprintln!(
            "Error: Configuration file not found: {}",
            config_path.display()
        );
        return ExitCode::from(1);
    }

    match focus_config::load_config(&config_path) {
        Ok(settings) => {
            println!("✓ Configuration is valid");
            println!();
            println!("Summary:");
            println!(
                "  Config version: {}",
                focus_config::CURRENT_CONFIG_VERSION
            );
            println!("  Data dir: {}", settings.data_dir.display());
            println!("  Audit log: {}", settings.audit_log_path.display());
            println!(
                "  Cooldown: {}s",
                settings.engine.cooldown_window.as_secs()
            );
            println!(
                "  Excluded apps: {}",
                settings.engine.excluded_apps.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Configuration is invalid:");
            eprintln!();
            eprintln!("{e}");
            ExitCode::from(1)
        }
    }
}
