// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Module for the `config` CLI subcommand.

use crate::Config;
use clap::Parser;

/// Command line arguments for the `config` CLI command.
#[derive(Parser, Debug)]
pub struct Args {
    /// Print the built-in defaults instead of the resolved configuration.
    #[arg(long)]
    default: bool,
}

/// Run the `config` command.
///
/// # Errors
///
/// Returns an error if the built-in default configuration cannot be loaded.
#[expect(clippy::needless_pass_by_value)]
pub fn run(config: &Config, args: Args) -> crate::Result<()> {
    let config = if args.default {
        Config::load_default()?
    } else {
        config.clone()
    };
    let toml_string = toml::to_string_pretty(&config).expect("Failed to serialize configuration");
    println!("{toml_string}");

    Ok(())
}
