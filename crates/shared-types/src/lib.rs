//! # Shared Types Crate
//!
//! This crate contains the domain entities and cross-domain ports shared
//! across the ReqForge coordination crates.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-domain types are defined here.
//! - **Referenced, not owned**: `Requirement` rows live in the document
//!   model; the coordination layer only reads them.
//! - **Explicit UI marshalling**: `UiExecutor` makes the UI-thread hop a
//!   collaborator call instead of an ambient global dispatcher.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod entities;
pub mod ui_executor;

pub use entities::{Analysis, Requirement, RequirementKey};
pub use ui_executor::{InlineUiExecutor, UiExecutor, UiTask};
