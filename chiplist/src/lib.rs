//! # chiplist
//!
//! Bounded, position-addressed catalog of processor specifications.
//!
//! chiplist keeps a small, fixed number of processor records in one
//! contiguous buffer and exposes list-style positional operations over it:
//! append, insert at a position or at the front, remove, update and look up
//! by position. The catalog can be dumped to, echoed from and restored from
//! a human-readable text file.
//!
//! **Status**: This crate is in early development. The API is not yet stable.
//!
//! ## Key Properties
//!
//! - Capacity is fixed at creation; a full store rejects inserts instead of growing
//! - Records stay contiguous and ordered; positions are 1-based
//! - Every rejection is a typed error, nothing panics
//! - No background threads, no hidden allocation after creation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chiplist::{Catalog, CatalogConfig, Processor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut catalog = Catalog::open(CatalogConfig::default())?;
//!
//! catalog.append(Processor {
//!     name: "Ryzen 7 5800X".to_string(),
//!     cores: 8,
//!     threads: 16,
//!     node_nm: 7,
//!     base_clock_ghz: 3.8,
//!     boost_clock_ghz: 4.7,
//!     tdp_watts: 105,
//!     integrated_graphics: false,
//! })?;
//!
//! for (position, cpu) in catalog.records()? {
//!     println!("{position}: {}", cpu.name);
//! }
//!
//! // Write catalog.txt
//! catalog.save()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`store`]: The bounded record store and its positional operations
//! - [`catalog`]: Session wrapper owning an optional store and the dump path
//! - [`record`]: The processor record and its validation
//! - [`dump`]: Flat-text dump writer, reader and parser
//! - [`config`]: Catalog configuration
//! - [`error`]: Error types

pub mod catalog;
pub mod config;
pub mod dump;
pub mod error;
pub mod record;
pub mod store;

// Re-export primary API types at crate root for convenience.
pub use catalog::Catalog;
pub use config::CatalogConfig;
pub use error::{ChiplistError, Result};
pub use record::Processor;
pub use store::RecordStore;
