//! # provider-gen
//!
//! **provider-gen** generates Kubernetes-style API type definitions and
//! controller scaffolding for one cloud-service resource family, driven by
//! the service model the vendor publishes (an API description plus
//! documentation metadata).
//!
//! ## Architecture
//!
//! - **[`provision`]** - Parses `--service` and stages the model documents in a temp directory
//! - **[`model`]** - Reads the staged documents and derives resources, shared types and enums
//! - **[`generator`]** - The generator handle: read operations plus template rendering
//! - **[`codegen`]** - Ordered, fail-fast generation chains and the orchestrator
//! - **[`config`]** - Explicit defaults and the optional generator configuration file
//! - **[`error`]** - Error taxonomy, wrapped at every component boundary
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - Command-line surface of the `provider-gen` binary
//!
//! ### Generation Flow
//!
//! ```text
//! --service ecr/2015-09-21 --version v1alpha1
//!   → ServiceArg::parse                     (rejects malformed input, no I/O yet)
//!   → stage_schema                          (<tmp>/models/apis/ecr/2015-09-21/{api-2,doc-2}.json)
//!   → Generation::generate
//!       → ServiceDocuments::load            (SchemaResolution)
//!       → TemplateGenerator::new            (HandleConstruction)
//!       → prepare_output_dir × 2            (OutputPrep)
//!       → api_chain        → ./apis/ecr/v1alpha1/
//!       → controller_chain → ./pkg/controller/ecr/
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,no_run
//! use provider_gen::codegen::{Generation, GenerationRequest};
//! use provider_gen::provision::{stage_schema, HttpSchemaSource, ServiceArg};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = ServiceArg::parse("ecr/2015-09-21")?;
//! let source = HttpSchemaSource::new(provider_gen::config::DEFAULT_SCHEMA_BASE_URL)?;
//! let staged = stage_schema(&source, provider_gen::config::DEFAULT_SDK_REVISION, &service)?;
//! let request = GenerationRequest::new(service, "v1alpha1", ".", staged.root(), "template");
//! let report = Generation::new(request).generate()?;
//! println!("wrote {} files", report.total());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod codegen;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod model;
pub mod provision;

pub use codegen::{Generation, GenerationReport, GenerationRequest};
pub use error::{CodegenError, Result};
