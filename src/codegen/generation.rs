//! The orchestrator: resolves the staged schema, builds the generator handle,
//! prepares the output directories and runs both chains.

use super::api::api_chain;
use super::chain::GeneratorChain;
use super::controller::controller_chain;
use super::output::prepare_output_dir;
use crate::config::GeneratorConfig;
use crate::error::{CodegenError, Result};
use crate::generator::{Generator, TemplateGenerator};
use crate::model::ServiceDocuments;
use crate::provision::ServiceArg;
use std::path::{Path, PathBuf};
use tracing::info;

/// Inputs of one generation run. Fully determines where output lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub service: ServiceArg,
    /// Version token used verbatim in the API output path, e.g. `v1alpha1`
    pub api_version: String,
    pub provider_dir: PathBuf,
    /// Root the schema documents were staged under
    pub schema_staging_dir: PathBuf,
    pub template_dir: PathBuf,
    pub generator_config_path: Option<PathBuf>,
}

impl GenerationRequest {
    pub fn new(
        service: ServiceArg,
        api_version: impl Into<String>,
        provider_dir: impl Into<PathBuf>,
        schema_staging_dir: impl Into<PathBuf>,
        template_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            service,
            api_version: api_version.into(),
            provider_dir: provider_dir.into(),
            schema_staging_dir: schema_staging_dir.into(),
            template_dir: template_dir.into(),
            generator_config_path: None,
        }
    }

    /// Use a generator configuration file
    pub fn with_generator_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.generator_config_path = Some(path.into());
        self
    }

    /// `<provider>/apis/<service>/<api version>`
    pub fn api_path(&self) -> PathBuf {
        self.provider_dir
            .join("apis")
            .join(&self.service.group)
            .join(&self.api_version)
    }

    /// `<provider>/pkg/controller/<service>`
    pub fn controller_path(&self) -> PathBuf {
        self.provider_dir
            .join("pkg")
            .join("controller")
            .join(&self.service.group)
    }
}

/// Files written by a successful run, per chain, in write order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub api_files: Vec<PathBuf>,
    pub controller_files: Vec<PathBuf>,
}

impl GenerationReport {
    pub fn total(&self) -> usize {
        self.api_files.len() + self.controller_files.len()
    }
}

/// One generation: a request plus the two chains run against it
#[derive(Debug)]
pub struct Generation {
    request: GenerationRequest,
    apis: GeneratorChain,
    controller: GeneratorChain,
}

impl Generation {
    pub fn new(request: GenerationRequest) -> Self {
        Self {
            request,
            apis: api_chain(),
            controller: controller_chain(),
        }
    }

    /// Build the generator handle for this request.
    ///
    /// # Errors
    ///
    /// [`CodegenError::SchemaResolution`] if the staged documents cannot be
    /// read, [`CodegenError::HandleConstruction`] for a bad api version,
    /// generator config or template directory.
    pub fn build_generator(&self) -> Result<TemplateGenerator> {
        let req = &self.request;
        let documents = ServiceDocuments::load(&req.schema_staging_dir, &req.service)?;

        validate_api_version(&req.api_version)?;
        let config = GeneratorConfig::load(req.generator_config_path.as_deref())?;
        let model = documents.derive(&config)?;
        TemplateGenerator::new(
            model,
            &req.api_version,
            config.api_group(&req.service.group),
            &req.template_dir,
        )
    }

    /// Run the whole pipeline.
    ///
    /// Nothing is rolled back on failure: files written by completed steps
    /// stay, and re-running overwrites them.
    ///
    /// # Errors
    ///
    /// See [`Generation::build_generator`] and [`Generation::run_chains`].
    pub fn generate(&self) -> Result<GenerationReport> {
        info!(
            service = %self.request.service,
            api_version = %self.request.api_version,
            provider_dir = %self.request.provider_dir.display(),
            "Generating provider files"
        );
        let generator = self.build_generator()?;
        self.run_chains(&generator)
    }

    /// Prepare the output directories and run the API chain, then the
    /// controller chain, against an already built handle.
    ///
    /// # Errors
    ///
    /// [`CodegenError::OutputPrep`] if a directory cannot be created,
    /// [`CodegenError::ApiGeneration`] / [`CodegenError::ControllerGeneration`]
    /// naming the first step that failed.
    pub fn run_chains(&self, generator: &dyn Generator) -> Result<GenerationReport> {
        let api_path = self.request.api_path();
        let controller_path = self.request.controller_path();
        for path in [&api_path, &controller_path] {
            prepare_output_dir(path)?;
        }

        let api_files = self
            .apis
            .run(generator, &api_path)
            .map_err(|f| CodegenError::ApiGeneration {
                step: f.step,
                source: Box::new(f.source),
            })?;
        info!(path = %api_path.display(), files = api_files.len(), "Generated API files");

        let controller_files = self
            .controller
            .run(generator, &controller_path)
            .map_err(|f| CodegenError::ControllerGeneration {
                step: f.step,
                source: Box::new(f.source),
            })?;
        info!(
            path = %controller_path.display(),
            files = controller_files.len(),
            "Generated controller files"
        );

        Ok(GenerationReport {
            api_files,
            controller_files,
        })
    }
}

fn validate_api_version(version: &str) -> Result<()> {
    let path = Path::new(version);
    let single_component = path.components().count() == 1
        && matches!(path.components().next(), Some(std::path::Component::Normal(_)));
    if version.trim().is_empty() || !single_component {
        return Err(CodegenError::handle(
            format!("invalid api version '{version}'"),
            "api version must be a single non-empty path component",
        ));
    }
    Ok(())
}
