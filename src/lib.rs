// Copyright 2026 the Letterpress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Letterpress is a paragraph typesetter.
//!
//! Given a [`TextBlock`] (UTF-16 text plus ranged font/size/language
//! attributes) and a horizontal width, it produces a sequence of
//! [`TypesetLine`]s containing visually ordered runs of positioned glyphs.
//!
//! Some key types are:
//! - [`FontContext`] is the font registry: it resolves PostScript names to
//!   faces and provides font fallback chains. It should be shared globally
//!   (or at coarse-grained boundaries).
//! - [`TextBlock`] holds the text and its attribute intervals. It is created
//!   by the caller and lives across many typesetting calls.
//! - [`Typesetter`] owns the reusable shaping and segmentation scratch state
//!   and performs the actual work. One instance is single-threaded; create
//!   one per thread.
//!
//! ```no_run
//! use letterpress::{FontContext, TextBlock, Typesetter};
//!
//! let mut fonts = FontContext::new();
//! let font = fonts
//!     .descriptor_from_postscript_name("SourceSansPro-Regular")
//!     .expect("font is installed");
//!
//! let mut block = TextBlock::new(font, 13.0);
//! block.set_text("abcdefghijklmnopqr abcdefghijklmnopqr");
//!
//! let mut typesetter = Typesetter::new();
//! let lines = typesetter.position_glyphs(&mut fonts, &block, 200.0).unwrap();
//! for line in &lines {
//!     for run in &line.runs {
//!         // feed run.glyphs to a renderer
//!     }
//! }
//! ```

// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]

mod analysis;
mod block;
mod draw;
mod error;
mod font;
mod language;
mod language_data;
mod layout;
mod newline;
mod script;
mod script_data;
mod shape;
mod split;
mod tag;
mod typeset;
mod utf;

#[cfg(test)]
mod tests;

pub use block::{AttributeRun, Attributes, TextBlock};
pub use draw::{GlyphPlacement, RenderContext};
pub use error::{ShapeError, TypesetError};
pub use font::{
    Face, FaceMetrics, FamilyClass, FontContext, FontDescriptor, FontRegistry, SystemFace,
};
pub use language::Language;
pub use layout::{Glyph, TypesetLine, TypesetRun};
pub use shape::{Direction, ShapeRequest, ShapeScratch, ShapedGlyph};
pub use tag::Tag;
pub use typeset::Typesetter;
