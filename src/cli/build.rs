// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Module for the `build` CLI subcommand.

use crate::builder;
use crate::{CollectionLike, Config, JsonCollection, PlaylistSpec};
use chrono::NaiveDate;
use clap::Parser;
use handlebars::Handlebars;
use std::path::PathBuf;

/// Command line arguments for the `build` CLI command.
#[derive(Parser, Debug)]
pub struct Args {
    /// Path to the collection file.
    collection: PathBuf,
    /// Path to the playlist spec file.
    spec: PathBuf,
    /// Where to write the updated collection (defaults to rewriting the collection in place).
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Reference date for relative date selectors (defaults to today).
    #[arg(long, value_name = "YYYY-MM-DD")]
    as_of: Option<NaiveDate>,
}

/// Run the `build` command.
///
/// # Errors
///
/// Returns an error if the collection or spec cannot be loaded, if the spec is invalid, or if
/// the build itself fails (see [`builder::build`]).
#[expect(clippy::needless_pass_by_value)]
pub fn run(config: &Config, args: Args) -> crate::Result<()> {
    let mut collection = JsonCollection::load_from_path(&args.collection)?;
    log::info!(
        "Loaded collection from {} ({} tracks)",
        args.collection.display(),
        collection.tracks().count()
    );

    let spec_text = std::fs::read_to_string(&args.spec)?;
    let rendered = render_spec_template(&spec_text, config)?;
    let spec = PlaylistSpec::load_from_str(&rendered)?;

    let as_of = args
        .as_of
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    builder::build(&mut collection, &spec, config, as_of)?;

    let output = args.output.as_deref().unwrap_or(&args.collection);
    collection.serialize(output)?;
    log::info!("Wrote collection to {}", output.display());
    Ok(())
}

/// Render the spec text as a template, interpolating the values from `[spec] values`.
fn render_spec_template(text: &str, config: &Config) -> crate::Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars
        .register_template_string("spec", text)
        .map_err(Box::new)?;
    let values = config.spec.values.clone().unwrap_or_default();
    let rendered = handlebars.render("spec", &values)?;
    Ok(rendered)
}
