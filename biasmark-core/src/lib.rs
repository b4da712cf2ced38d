//! # biasmark-core
//!
//! Core types shared by the biasmark crates.
//!
//! This crate provides:
//! - **Input**: `Annotation`, `OffsetUnit`, and the `Category` registry
//! - **Output**: `Segment`
//! - **Errors**: `Error`, `Result`
//!
//! The engine and the CLI both depend on `biasmark-core` so that annotation
//! files and segment output stay type-compatible across the workspace.

pub mod annotation;
pub mod error;
pub mod segment;

pub use annotation::{Annotation, Category, OffsetUnit};
pub use error::{Error, Result};
pub use segment::Segment;
