//! # Error Module
//!
//! Every failure a generation run can hit is a [`CodegenError`]. Errors are
//! wrapped as they cross a component boundary (step → chain → orchestrator →
//! CLI) and keep the originating cause reachable through
//! [`std::error::Error::source`], so the CLI can print the full chain.
//!
//! Nothing is retried or recovered internally. The first failure aborts the
//! run and files already written by earlier steps stay on disk.

use std::fmt;
use std::path::PathBuf;

/// Boxed cause carried by wrapping variants
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Error raised anywhere in a generation run
#[derive(Debug)]
pub enum CodegenError {
    /// Network or filesystem failure while staging the schema documents
    SchemaProvisioning {
        /// What was being done when it failed
        context: String,
        /// Underlying cause
        source: BoxError,
    },
    /// `--service` did not have the `<service>/<version-date>` shape
    ServiceArgumentFormat {
        /// The rejected value
        value: String,
    },
    /// The staged schema could not be located or parsed
    SchemaResolution {
        /// What was being resolved
        context: String,
        /// Underlying cause
        source: BoxError,
    },
    /// The generator handle could not be built (bad config, missing templates)
    HandleConstruction {
        /// What was being constructed
        context: String,
        /// Underlying cause
        source: BoxError,
    },
    /// An output directory could not be created
    OutputPrep {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying cause
        source: std::io::Error,
    },
    /// A step of the API file chain failed
    ApiGeneration {
        /// Name of the failing step
        step: &'static str,
        /// Step error
        source: Box<CodegenError>,
    },
    /// A step of the controller file chain failed
    ControllerGeneration {
        /// Name of the failing step
        step: &'static str,
        /// Step error
        source: Box<CodegenError>,
    },
    /// Resource definitions could not be enumerated from the handle
    ResourceEnumeration {
        /// Underlying cause
        source: BoxError,
    },
    /// A template could not be rendered
    Render {
        /// Template or target being rendered
        target: String,
        /// Underlying cause
        source: BoxError,
    },
    /// A generated file could not be written
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying cause
        source: std::io::Error,
    },
}

impl CodegenError {
    /// Wrap a cause as a [`CodegenError::SchemaProvisioning`]
    pub fn provisioning(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        CodegenError::SchemaProvisioning {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Wrap a cause as a [`CodegenError::SchemaResolution`]
    pub fn resolution(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        CodegenError::SchemaResolution {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Wrap a cause as a [`CodegenError::HandleConstruction`]
    pub fn handle(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        CodegenError::HandleConstruction {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Wrap a cause as a [`CodegenError::Render`]
    pub fn render(target: impl Into<String>, source: impl Into<BoxError>) -> Self {
        CodegenError::Render {
            target: target.into(),
            source: source.into(),
        }
    }

    /// Name of the chain step that failed, if this error came out of a chain
    pub fn failed_step(&self) -> Option<&'static str> {
        match self {
            CodegenError::ApiGeneration { step, .. }
            | CodegenError::ControllerGeneration { step, .. } => Some(step),
            _ => None,
        }
    }
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodegenError::SchemaProvisioning { context, .. } => {
                write!(f, "cannot prepare sdk files: {context}")
            }
            CodegenError::ServiceArgumentFormat { value } => write!(
                f,
                "service argument '{value}' does not conform the format <service name>/<service version date>"
            ),
            CodegenError::SchemaResolution { context, .. } => {
                write!(f, "cannot get the API model for service: {context}")
            }
            CodegenError::HandleConstruction { context, .. } => {
                write!(f, "cannot create a new generator: {context}")
            }
            CodegenError::OutputPrep { path, .. } => {
                write!(f, "cannot create output folder {}", path.display())
            }
            CodegenError::ApiGeneration { step, .. } => {
                write!(f, "cannot generate API files: step '{step}' failed")
            }
            CodegenError::ControllerGeneration { step, .. } => {
                write!(f, "cannot generate controller files: step '{step}' failed")
            }
            CodegenError::ResourceEnumeration { .. } => {
                write!(f, "cannot enumerate resource definitions")
            }
            CodegenError::Render { target, .. } => write!(f, "cannot render {target}"),
            CodegenError::Write { path, .. } => write!(f, "cannot write {}", path.display()),
        }
    }
}

impl std::error::Error for CodegenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodegenError::SchemaProvisioning { source, .. }
            | CodegenError::SchemaResolution { source, .. }
            | CodegenError::HandleConstruction { source, .. }
            | CodegenError::ResourceEnumeration { source }
            | CodegenError::Render { source, .. } => Some(source.as_ref()),
            CodegenError::OutputPrep { source, .. } | CodegenError::Write { source, .. } => {
                Some(source)
            }
            CodegenError::ApiGeneration { source, .. }
            | CodegenError::ControllerGeneration { source, .. } => Some(source.as_ref()),
            CodegenError::ServiceArgumentFormat { .. } => None,
        }
    }
}
