use anyhow::Result;

use crate::cli::output::{OutputFormat, OutputOptions};
use crate::core::config::AppConfig;

pub fn init(_opts: &OutputOptions) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() {
        eprintln!("Config file already exists at {}", path.display());
        eprintln!("Remove it first if you want to regenerate.");
        return Ok(());
    }

    match AppConfig::default().save() {
        Ok(path) => {
            println!("Generated config at {}", path.display());
            println!("  Set api.api_key there or export OPENROUTER_API_KEY.");
        }
        Err(e) => {
            eprintln!("Failed to generate config: {}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}

pub fn check(_opts: &OutputOptions) -> Result<()> {
    let path = AppConfig::config_path();
    if !path.exists() {
        eprintln!("No config file found at {}", path.display());
        eprintln!("Run `blogsmith config init` to create one.");
        return Ok(());
    }

    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let issues = config.validate();
    if issues.is_empty() {
        println!("Config is valid: {}", path.display());
        println!(
            "  Model: {}, tone: {}, length: {} words",
            config.generation.model, config.generation.tone, config.generation.length
        );
        println!(
            "  API key: {}",
            if config.api.api_key.is_some() {
                "set in config"
            } else {
                "from OPENROUTER_API_KEY or --api-key"
            }
        );
        for warning in config.warnings() {
            eprintln!("  warning: {}", warning);
        }
    } else {
        eprintln!("Config issues found in {}:", path.display());
        for issue in &issues {
            eprintln!("  - {}", issue);
        }
        std::process::exit(1);
    }
    Ok(())
}

pub fn path(opts: &OutputOptions) -> Result<()> {
    let path = AppConfig::config_path();
    match opts.format {
        OutputFormat::Text => println!("{}", path.display()),
        OutputFormat::Json => println!(
            "{}",
            opts.to_json(&serde_json::json!({
                "path": path,
                "exists": path.exists(),
            }))?
        ),
    }
    Ok(())
}
