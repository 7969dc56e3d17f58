use crate::codegen::{Generation, GenerationReport, GenerationRequest};
use crate::config::{
    DEFAULT_PROVIDER_DIR, DEFAULT_SCHEMA_BASE_URL, DEFAULT_SDK_REVISION, DEFAULT_TEMPLATE_DIR,
};
use crate::logging::{LogConfig, LogFormat};
use crate::provision::{stage_schema, HttpSchemaSource, SchemaSource, ServiceArg};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Generates API types and controller scaffolding for one cloud service
#[derive(Parser, Debug)]
#[command(name = "provider-gen")]
#[command(about = "Provider Generator.", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// The service to generate a controller for, in the form ecr/2015-09-21
    #[arg(short, long, env = "SERVICE")]
    pub service: String,

    /// The revision of the SDK the service models are pulled from
    #[arg(long, env = "SDK_REVISION", default_value = DEFAULT_SDK_REVISION)]
    pub sdk_revision: String,

    /// The version for the generated API types, e.g. v1alpha1
    #[arg(short, long, env = "VERSION")]
    pub version: String,

    /// The directory of the provider
    #[arg(short = 'o', long, env = "PROVIDER_DIR", default_value = DEFAULT_PROVIDER_DIR)]
    pub provider_dir: PathBuf,

    /// The directory of the templates to use
    #[arg(short, long, env = "TEMPLATE_DIR", default_value = DEFAULT_TEMPLATE_DIR)]
    pub template_dir: PathBuf,

    /// Generator configuration file (YAML)
    #[arg(long, env = "GENERATOR_CONFIG")]
    pub generator_config: Option<PathBuf>,

    /// Raw-content base URL the service models are downloaded from
    #[arg(long, env = "SCHEMA_BASE_URL", default_value = DEFAULT_SCHEMA_BASE_URL)]
    pub schema_base_url: String,

    /// Keep the downloaded schema directory instead of removing it
    #[arg(long, env = "KEEP_STAGING", default_value_t = false)]
    pub keep_staging: bool,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Cli {
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            log_level: self.log_level.clone(),
            format: self.log_format,
        }
    }
}

/// Run a generation for the parsed command line, downloading the models over HTTP.
///
/// # Errors
///
/// Returns the first failure of any stage, with context describing it.
pub fn run_cli(cli: Cli) -> anyhow::Result<GenerationReport> {
    // Validate before touching the network.
    ServiceArg::parse(&cli.service)?;
    let source = HttpSchemaSource::new(&cli.schema_base_url)?;
    run_with_source(&cli, &source)
}

/// Run a generation, fetching the schema documents from `source`.
///
/// # Errors
///
/// Returns the first failure of any stage, with context describing it.
pub fn run_with_source(cli: &Cli, source: &dyn SchemaSource) -> anyhow::Result<GenerationReport> {
    let service = ServiceArg::parse(&cli.service)?;
    let staged = stage_schema(source, &cli.sdk_revision, &service)?;

    let mut request = GenerationRequest::new(
        service,
        cli.version.clone(),
        cli.provider_dir.clone(),
        staged.root(),
        cli.template_dir.clone(),
    );
    if let Some(path) = &cli.generator_config {
        request = request.with_generator_config_path(path);
    }

    let result = Generation::new(request)
        .generate()
        .context("api could not be generated");

    if cli.keep_staging {
        let kept = staged.keep();
        info!(staging_dir = %kept.display(), "Kept schema staging directory");
    }

    let report = result?;
    info!(
        api_files = report.api_files.len(),
        controller_files = report.controller_files.len(),
        "Generation complete"
    );
    Ok(report)
}
