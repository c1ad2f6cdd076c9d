// Copyright 2026 the Letterpress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use thiserror::Error;

/// Failure inside the shaping service.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// The face's font tables could not be read.
    #[error("font face tables could not be read")]
    InvalidFace,
}

/// Fatal typesetting failure. A failed call commits no partial output.
///
/// Font lookup misses and fallback-chain exhaustion are not errors; they are
/// reported through `Option` returns and tolerated empty runs respectively.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum TypesetError {
    #[error("shaping failed: {0}")]
    Shape(#[from] ShapeError),
    #[error("typesetting invariant violated: {0}")]
    Invariant(&'static str),
}
