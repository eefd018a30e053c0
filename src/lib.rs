//! Lorepot - gettext round-trip pipeline for game JSON content
//!
//! Lorepot is a CLI tool and library for funneling a game's JSON content
//! through a standard gettext translation workflow. It extracts translatable
//! strings into a candidate catalog (POT), and re-injects compiled
//! translations (MO/PO) back into the game's native JSON shapes. External
//! gettext tooling handles merging, editing, and compiling catalogs.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, dispatch, reporting)
//! - `config`: Configuration file loading and parsing
//! - `document`: Consolidated document representation and transforms
//! - `extract`: Content-tree extraction stage
//! - `catalog`: Candidate catalog generation stage
//! - `inject`: Translation reinjection stage
//! - `pointer`, `walk`: JSON Pointer addressing and value traversal
//! - `error`: Pipeline error taxonomy

pub mod catalog;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod inject;
pub mod pointer;
pub mod translation;
pub mod walk;
