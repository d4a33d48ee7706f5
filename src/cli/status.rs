//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::{AuthMode, Config};
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "CONS3RT Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;

    match Config::load_at(opts.config_ref()) {
        Ok(config) => {
            println!("Config file: {}", config_path.display().to_string().cyan());
            println!("Site: {}", config.api_url.cyan());
            println!();

            match config.auth_mode() {
                Ok(AuthMode::Token(_)) => {
                    println!("{} Project token configured", "✓".green());
                }
                Ok(AuthMode::Certificate(path)) => {
                    if path.is_file() {
                        println!(
                            "{} Client certificate configured: {}",
                            "✓".green(),
                            path.display()
                        );
                    } else {
                        println!(
                            "{} Client certificate configured but not found: {}",
                            "✗".red(),
                            path.display()
                        );
                    }
                }
                Err(err) => {
                    println!("{} {}", "✗".red(), err);
                    println!("  → Run 'cons3rt init' to configure");
                }
            }

            match &config.project {
                Some(project) => {
                    println!("{} Default project: {}", "✓".green(), project);
                }
                None => {
                    println!("{} No default project set", "○".dimmed());
                    println!("  → Pass --project or set one in the config file");
                }
            }

            println!();
            println!(
                "Retries: {} attempts, {}ms base delay; request timeout {}s",
                config.preferences.max_attempts,
                config.preferences.base_delay_ms,
                config.preferences.timeout_secs
            );
        }
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            println!();
            println!(
                "Run {} to create a configuration file.",
                "cons3rt init".cyan()
            );
        }
    }

    println!();
    Ok(())
}
