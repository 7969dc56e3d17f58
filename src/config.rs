//! # Configuration Module
//!
//! Process-wide defaults are plain constants handed to the orchestration entry
//! point rather than ambient state, and the optional generator configuration
//! file narrows or renames what gets generated.
//!
//! ## Generator configuration file
//!
//! ```yaml
//! ignore:
//!   resource_names:
//!     - Repository
//!   shape_names:
//!     - ImageScanningConfiguration
//! resources:
//!   LifecyclePolicy:
//!     kind: Policy
//! api_group_suffix: aws.crossplane.io
//! ```

use crate::error::{CodegenError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// SDK revision models are pulled from when `--sdk-revision` is not given
pub const DEFAULT_SDK_REVISION: &str = "v1.34.32";

/// Raw-content base the schema documents are fetched from
pub const DEFAULT_SCHEMA_BASE_URL: &str = "https://raw.githubusercontent.com/aws/aws-sdk-go";

/// Provider checkout the generated files land in
pub const DEFAULT_PROVIDER_DIR: &str = ".";

/// Directory the render templates are read from
pub const DEFAULT_TEMPLATE_DIR: &str = "template";

/// Suffix appended to the service group to form the API group
pub const DEFAULT_API_GROUP_SUFFIX: &str = "aws.crossplane.io";

static GO_IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9]*$").expect("Go identifier regex should be valid")
});

/// Optional generator configuration (`--generator-config`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Resources and shapes to leave out entirely
    pub ignore: IgnoreSpec,
    /// Per-resource overrides keyed by the resource's original name
    pub resources: BTreeMap<String, ResourceConfig>,
    /// API group suffix, `aws.crossplane.io` when unset
    pub api_group_suffix: Option<String>,
}

/// Names excluded from generation
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IgnoreSpec {
    /// Resource names (as derived from `Create<Name>` operations)
    pub resource_names: Vec<String>,
    /// Shape names dropped from shared type and enum enumeration
    pub shape_names: Vec<String>,
}

/// Overrides for a single resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Kind to generate instead of the original resource name
    pub kind: Option<String>,
}

impl GeneratorConfig {
    /// Load the configuration file, or the empty configuration when no path is given.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::HandleConstruction`] if the file cannot be read
    /// or is not valid YAML for this shape.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path).map_err(|e| {
            CodegenError::handle(format!("cannot read generator config {}", path.display()), e)
        })?;
        let config = Self::from_yaml(&content).map_err(|e| {
            CodegenError::handle(format!("cannot parse generator config {}", path.display()), e)
        })?;
        config.validate().map_err(|reason| {
            CodegenError::handle(format!("invalid generator config {}", path.display()), reason)
        })?;
        Ok(config)
    }

    /// Check that every kind override is a plain Go identifier. Kinds name
    /// both Go types and generated files.
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (name, resource) in &self.resources {
            if let Some(kind) = &resource.kind {
                if !GO_IDENTIFIER.is_match(kind) {
                    return Err(format!(
                        "kind '{kind}' of resource {name} is not a Go identifier"
                    ));
                }
            }
        }
        Ok(())
    }

    /// Parse a configuration document. An empty document is the empty configuration.
    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Whether a resource is excluded
    pub fn is_resource_ignored(&self, name: &str) -> bool {
        self.ignore.resource_names.iter().any(|n| n == name)
    }

    /// Whether a shape is excluded
    pub fn is_shape_ignored(&self, name: &str) -> bool {
        self.ignore.shape_names.iter().any(|n| n == name)
    }

    /// API group of `service`, e.g. `ecr.aws.crossplane.io`
    pub fn api_group(&self, service: &str) -> String {
        let suffix = self
            .api_group_suffix
            .as_deref()
            .unwrap_or(DEFAULT_API_GROUP_SUFFIX);
        format!("{service}.{suffix}")
    }

    /// Kind override for a resource, if configured
    pub fn kind_override(&self, name: &str) -> Option<&str> {
        self.resources.get(name).and_then(|r| r.kind.as_deref())
    }
}
