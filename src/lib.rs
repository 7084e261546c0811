// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Playlist building library.

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::missing_docs_in_private_items)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]
#![deny(warnings)]
#![deny(absolute_paths_not_starting_with_crate)]
#![deny(elided_lifetimes_in_paths)]
#![deny(explicit_outlives_requirements)]
#![deny(keyword_idents)]
#![deny(let_underscore_drop)]
#![deny(macro_use_extern_crate)]
#![deny(meta_variable_misuse)]
#![deny(missing_abi)]
#![deny(missing_copy_implementations)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![deny(non_ascii_idents)]
#![deny(noop_method_call)]
#![deny(rust_2021_incompatible_closure_captures)]
#![deny(rust_2021_incompatible_or_patterns)]
#![deny(rust_2021_prefixes_incompatible_syntax)]
#![deny(rust_2021_prelude_collisions)]
#![deny(single_use_lifetimes)]
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
#![deny(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(unstable_features)]
#![deny(unused_extern_crates)]
#![deny(unused_import_braces)]
#![deny(unused_lifetimes)]
#![deny(unused_macro_rules)]
#![deny(unused_qualifications)]
#![deny(unused_results)]
#![deny(variant_size_differences)]

pub mod builder;
pub mod cli;
mod collection;
mod config;
mod error;
pub mod expression;
pub mod filter;
mod playlist;
mod spec;
mod tagindex;
mod track;
mod util;

pub use collection::{CollectionLike, JsonCollection};
pub use config::{Config, ConfigError, RemainderPolicy};
pub use error::{ErrorType, Result};
pub use expression::{Expression, ExpressionError};
pub use playlist::Playlist;
pub use spec::{ExpressionLeaf, PlaylistSpec, SpecError, SpecFolder, SpecLeafRecord, SpecNode, TagLeaf};
pub use tagindex::TagIndex;
pub use track::{Track, TrackId};
pub use util::PatternError;

/// This crate's name.
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
/// This crate's version.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the root folder that the built playlist trees are attached to.
pub const ROOT_FOLDER_NAME: &str = "PLAYLIST_BUILDER";
