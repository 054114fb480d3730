//! # strongtypes_codegen
//!
//! The generation pipeline behind `#[strong_ids]` and `#[strong_keys]`.
//!
//! ```text
//! source files / macro input
//!     ↓
//! SourceScanner (marked declarations + lexical scopes)
//!     ↓
//! extract (normalised, hashable GenerationRequest)
//!     ↓
//! ChangeDetectionCache (skip requests equal to the last observation)
//!     ↓
//! emit (deterministic wrapper, configurator and registration code)
//!     ↓
//! Generator (writes changed units and an include index)
//! ```
//!
//! The proc-macro crate uses [`extract`] and [`emit`] directly; build scripts
//! drive the whole pipeline through [`Generator`]:
//!
//! ```rust,ignore
//! // build.rs
//! use strongtypes_codegen::{Generator, GeneratorConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GeneratorConfig::builder()
//!         .out_dir(std::env::var("OUT_DIR")?)
//!         .build();
//!     let mut generator = Generator::new(config)?;
//!     generator.add_crate_sources("src")?;
//!     generator.run()?;
//!     Ok(())
//! }
//! ```

pub mod attributes;
pub mod cache;
pub mod config;
pub mod constant;
pub mod declaration;
pub mod emit;
pub mod error;
pub mod extract;
pub mod generator;
pub mod namespace;
pub mod request;
pub mod scan;
pub mod sequence;

pub use cache::{ChangeDetectionCache, Observation, PassReport};
pub use config::GeneratorConfig;
pub use emit::{EmitOptions, GeneratedUnit};
pub use error::{CodegenError, CodegenResult};
pub use extract::ExtractOptions;
pub use generator::Generator;
pub use request::{Category, GenerationRequest, IdRequest, KeyRequest, KeySpec};
pub use sequence::EquatableSeq;
