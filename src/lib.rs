#![doc = "stock-barcodes: Code 128 barcode rendering and catalog mirroring."]

//! Library surface behind the `stock-barcodes` binary.
//!
//! The two pieces worth reusing are [`encode`] (single-identifier barcode
//! rendering, no catalog knowledge) and [`synchronise`] (the batch fold over
//! a [`catalog::CatalogReader`]). Everything else is the plumbing around
//! them: configuration, the Supabase client and the CLI.

pub mod catalog;
pub mod cli;
pub mod code128;
pub mod config;
pub mod encode;
pub mod font;
pub mod synchronise;

pub use cli::{run, Cli, Commands};
