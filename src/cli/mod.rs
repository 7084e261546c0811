// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Command line interface.

mod build;
mod config;

use crate::{Config, PKG_NAME, PKG_VERSION};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use simplelog::{
    ColorChoice, ConfigBuilder as LogConfigBuilder, TermLogger, TerminalMode,
};
use std::borrow::Cow;
use std::path::PathBuf;
use xdg::BaseDirectories;

/// Command line Arguments.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Command to run
    #[command(subcommand)]
    command: Commands,
    /// Path to configuration file.
    #[arg(short, long, required = false)]
    config_path: Option<PathBuf>,
    /// Show debug information.
    #[arg(short, long)]
    verbose: bool,
}

/// Supported CLI Commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the playlist trees for a collection.
    Build(build::Args),
    /// Show your current configuration.
    Config(config::Args),
}

/// Main entry point.
///
/// # Errors
///
/// Can return errors if the command line arguments are incorrect or the executed commands lead
/// to an error.
///
/// # Panics
///
/// May panic if logging cannot be initialized.
pub fn main() -> crate::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        log_level,
        LogConfigBuilder::new().build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .expect("Failed to initialize logging");
    log::info!("Started {PKG_NAME} {PKG_VERSION}");

    // Load configuration
    let base_dirs = BaseDirectories::with_prefix(PKG_NAME);
    let config_paths = base_dirs
        .find_config_files("config.toml")
        .map(Cow::from)
        .chain(args.config_path.iter().map(Cow::from));
    let config = Config::load_from_paths(config_paths)?;

    match args.command {
        Commands::Build(cmd_args) => build::run(&config, cmd_args),
        Commands::Config(cmd_args) => config::run(&config, cmd_args),
    }
}
