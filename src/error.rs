// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Error and result types.

use std::io;
use thiserror::Error;

/// Main error type.
#[derive(Error, Debug)]
pub enum ErrorType {
    /// Configuration error.
    #[error("Configuration Error ({0})")]
    Config(#[from] crate::config::ConfigError),
    /// The playlist spec document is malformed.
    #[error("Spec Error ({0})")]
    Spec(#[from] crate::spec::SpecError),
    /// A combiner expression failed to tokenize or parse.
    #[error("Expression Error ({0})")]
    Expression(#[from] crate::expression::ExpressionError),
    /// A combiner expression references a playlist that was never built.
    #[error("Unknown playlist: {0:?}")]
    UnknownPlaylist(String),
    /// A wildcard pattern could not be compiled.
    #[error("Pattern Error ({0})")]
    Pattern(#[from] crate::util::PatternError),
    /// I/O Error.
    #[error("Input/Output error ({:?})", .0)]
    Io(#[from] io::Error),
    /// The collection file could not be read or written.
    #[error("Collection (de)serialization failed ({0})")]
    Collection(#[from] serde_json::Error),
    /// XDG BaseDirectories error.
    #[error("BaseDirectories error ({:?})", .0)]
    BaseDirectoriesError(#[from] xdg::BaseDirectoriesError),
    /// The spec template failed to compile.
    #[error("Spec template is invalid: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),
    /// The spec template failed to render.
    #[error("Spec template rendering failed: {0}")]
    TemplateRender(#[from] handlebars::RenderError),
}

impl ErrorType {
    /// Map this error onto the process exit code contract.
    ///
    /// Spec validation failures exit with `2`, expression parse failures with `3`, unknown
    /// playlist references with `4`, collection (de)serialization failures with `5` and
    /// everything else with `1`.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            ErrorType::Spec(_) => 2,
            ErrorType::Expression(_) => 3,
            ErrorType::UnknownPlaylist(_) => 4,
            ErrorType::Collection(_) => 5,
            _ => 1,
        }
    }
}

/// Convenience type.
pub type Result<T> = std::result::Result<T, ErrorType>;
