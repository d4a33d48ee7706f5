//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, Select, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::config::{Config, SITE_CHOICES};
use crate::error::{ConfigError, Result};

/// Run the init command: interactive setup of the config file.
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to CONS3RT!".bold().green());
    println!("Let's set up your CONS3RT configuration.\n");

    // Site selection, with a custom-URL escape hatch
    let mut site_names: Vec<String> = SITE_CHOICES
        .iter()
        .map(|(name, url)| format!("{} ({})", name, url))
        .collect();
    site_names.push("other (enter a URL)".to_string());

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select your CONS3RT site")
        .items(&site_names)
        .default(0)
        .interact()?;

    let api_url = if selection < SITE_CHOICES.len() {
        SITE_CHOICES[selection].1.to_string()
    } else {
        Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Site ReST API base URL")
            .interact_text()?
    };

    // Credential: project token or client certificate, never both
    let auth_selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Credential type")
        .items(&["Project ReST token", "Client certificate (PEM)"])
        .default(0)
        .interact()?;

    let mut config = Config {
        api_url,
        ..Config::default()
    };

    if auth_selection == 0 {
        let token: String = Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Enter your project ReST API token")
            .interact()?;
        config.token = Some(token);
    } else {
        let cert_path: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Path to your client certificate (PEM)")
            .interact_text()?;
        if !std::path::Path::new(&cert_path).is_file() {
            return Err(ConfigError::Invalid(format!(
                "Client certificate not found: {}",
                cert_path
            ))
            .into());
        }
        config.cert = Some(cert_path.into());
    }

    let project: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Your CONS3RT project name")
        .allow_empty(true)
        .interact_text()?;
    if !project.is_empty() {
        config.project = Some(project);
    }

    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "cons3rt status".cyan());
    println!("  {} - List clouds", "cons3rt cloud list".cyan());
    println!(
        "  {} - Validate an asset directory",
        "cons3rt asset validate --asset-dir <DIR>".cyan()
    );

    Ok(())
}
