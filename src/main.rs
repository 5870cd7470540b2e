// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Version | Options | List | Info | Enable | Disable | Apply
//! ```

use std::process::ExitCode;

use pwml_rs::cli::global::GlobalOptions;
use pwml_rs::cli::{self, Command};
use pwml_rs::cmd::apply::run_apply_command;
use pwml_rs::cmd::config::run_options_command;
use pwml_rs::cmd::mods::{run_info_command, run_list_command, run_toggle_command};
use pwml_rs::config::Config;
use pwml_rs::config::loader::ConfigLoader;
use pwml_rs::error::Result;
use pwml_rs::logging::{LogConfig, init_logging};
use pwml_rs::manager::ModManager;
use tracing::debug;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEFAULT_CONFIG_FILE: &str = "pwml.toml";
const ENV_PREFIX: &str = "PWML";

fn main() -> ExitCode {
    let cli = cli::parse();

    if let Some(Command::Version) = cli.command {
        handle_version_command();
        return ExitCode::SUCCESS;
    }

    let loader = match build_config_loader(&cli.global) {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    let sources = loader.sources().to_vec();
    let config = match loader.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&LogConfig::from(&config.global)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };
    for (index, source) in sources.iter().enumerate() {
        debug!("config source {}: {source}", index + 1);
    }

    dispatch_command(&cli, &config)
}

fn dispatch_command(cli: &cli::Cli, config: &Config) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::List(args)) => {
            ModManager::open(config).map(|manager| run_list_command(args, &manager))
        }
        Some(Command::Info(args)) => {
            ModManager::open(config).and_then(|mut manager| run_info_command(args, &mut manager))
        }
        Some(Command::Enable(args)) => ModManager::open(config)
            .and_then(|mut manager| run_toggle_command(args, &mut manager, true)),
        Some(Command::Disable(args)) => ModManager::open(config)
            .and_then(|mut manager| run_toggle_command(args, &mut manager, false)),
        Some(Command::Apply) => {
            ModManager::open(config).and_then(|manager| run_apply_command(&manager))
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(DEFAULT_CONFIG_FILE);
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for option in global.to_config_overrides() {
        loader = loader.set_option(&option)?;
    }
    Ok(loader)
}
