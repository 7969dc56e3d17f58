//! # CLI Module
//!
//! Command-line entry point of the `provider-gen` binary.
//!
//! ## Usage
//!
//! ```bash
//! provider-gen --service ecr/2015-09-21 --version v1alpha1
//! ```
//!
//! Options:
//! - `--service, -s <SERVICE>` - Service and model version date, `<service>/<version-date>` (required)
//! - `--version, -v <VERSION>` - API version of the generated types (required)
//! - `--sdk-revision <REV>` - SDK revision the models are pulled from (default: `v1.34.32`)
//! - `--provider-dir, -o <DIR>` - Provider checkout to write into (default: `.`)
//! - `--template-dir, -t <DIR>` - Template directory (default: `template`)
//! - `--generator-config <FILE>` - Optional generator configuration (YAML)
//! - `--schema-base-url <URL>` - Raw-content host the models are fetched from
//! - `--keep-staging` - Keep the downloaded schema directory
//! - `--log-level <LEVEL>`, `--log-format <pretty|json>`
//!
//! Every option can also be set through an environment variable named after
//! the flag in upper case (`SERVICE`, `VERSION`, `PROVIDER_DIR`, ...).
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use provider_gen::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! run_cli(Cli::parse())?;
//! ```

mod commands;


pub use commands::{run_cli, run_with_source, Cli};
