//! # Schema Provisioning
//!
//! Fetches the two service-model documents (`api-2.json`, `doc-2.json`) for a
//! service at a pinned SDK revision and stages them in a temporary directory
//! laid out as `<tmp>/models/apis/<service>/<version-date>/`.
//!
//! The staging directory is owned by the returned [`StagedSchema`] and removed
//! when it is dropped, including on every error path, unless
//! [`StagedSchema::keep`] is called.

use crate::error::{CodegenError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Documents every service model consists of
pub const SCHEMA_FILES: [&str; 2] = ["api-2.json", "doc-2.json"];

/// A parsed `--service` value: `<service>/<version-date>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceArg {
    /// Service group, e.g. `ecr`
    pub group: String,
    /// Model version date, e.g. `2015-09-21`
    pub version_date: String,
}

impl ServiceArg {
    /// Parse `<service>/<version-date>`.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::ServiceArgumentFormat`] unless the value has
    /// exactly two non-empty `/`-delimited segments. Each segment must be a
    /// plain path component (not `.` or `..`, no `\\`).
    pub fn parse(value: &str) -> Result<Self> {
        let plain = |s: &str| {
            let s = s.trim();
            !s.is_empty() && s != "." && s != ".." && !s.contains('\\')
        };
        let parts: Vec<&str> = value.split('/').collect();
        match parts.as_slice() {
            [group, date] if plain(*group) && plain(*date) => Ok(Self {
                group: group.trim().to_string(),
                version_date: date.trim().to_string(),
            }),
            _ => Err(CodegenError::ServiceArgumentFormat {
                value: value.to_string(),
            }),
        }
    }

    /// Relative model path under `models/apis/`
    pub fn model_path(&self) -> PathBuf {
        Path::new(&self.group).join(&self.version_date)
    }
}

impl fmt::Display for ServiceArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.version_date)
    }
}

/// Where schema documents come from
pub trait SchemaSource {
    /// Fetch one schema document of `service` at `revision`.
    fn fetch(&self, revision: &str, service: &ServiceArg, file: &str) -> Result<Vec<u8>>;
}

/// Fetches schema documents from a raw-content host over HTTP
pub struct HttpSchemaSource {
    base: Url,
    client: reqwest::blocking::Client,
}

impl HttpSchemaSource {
    /// Build a source rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::SchemaProvisioning`] if the URL is invalid or
    /// the HTTP client cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| CodegenError::provisioning(format!("invalid schema base url {base_url}"), e))?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| CodegenError::provisioning("cannot build http client", e))?;
        Ok(Self { base, client })
    }

    /// URL of one schema document
    pub fn document_url(&self, revision: &str, service: &ServiceArg, file: &str) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                CodegenError::provisioning(
                    format!("schema base url {} cannot carry a path", self.base),
                    "cannot-be-a-base url",
                )
            })?
            .pop_if_empty()
            .extend([
                revision,
                "models",
                "apis",
                service.group.as_str(),
                service.version_date.as_str(),
                file,
            ]);
        Ok(url)
    }
}

impl SchemaSource for HttpSchemaSource {
    fn fetch(&self, revision: &str, service: &ServiceArg, file: &str) -> Result<Vec<u8>> {
        let url = self.document_url(revision, service, file)?;
        debug!(url = %url, "Downloading schema document");
        let resp = self
            .client
            .get(url.clone())
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| CodegenError::provisioning(format!("cannot download {url}"), e))?;
        let body = resp
            .bytes()
            .map_err(|e| CodegenError::provisioning(format!("cannot read body of {url}"), e))?;
        Ok(body.to_vec())
    }
}

/// Schema documents staged on disk for one generation run
#[derive(Debug)]
pub struct StagedSchema {
    dir: tempfile::TempDir,
    service: ServiceArg,
}

impl StagedSchema {
    /// Root handed to the model loader (contains `models/apis/...`)
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Directory holding the staged documents
    pub fn model_dir(&self) -> PathBuf {
        model_dir(self.root(), &self.service)
    }

    /// Keep the staging directory on disk and return its path.
    pub fn keep(self) -> PathBuf {
        self.dir.keep()
    }
}

/// Directory the documents of `service` live in under a staging root
pub fn model_dir(root: &Path, service: &ServiceArg) -> PathBuf {
    root.join("models").join("apis").join(service.model_path())
}

/// Download both schema documents and stage them in a fresh temp directory.
///
/// # Errors
///
/// Returns [`CodegenError::SchemaProvisioning`] on any network or filesystem
/// failure. The partially populated directory is removed before returning.
pub fn stage_schema(
    source: &dyn SchemaSource,
    revision: &str,
    service: &ServiceArg,
) -> Result<StagedSchema> {
    let dir = tempfile::Builder::new()
        .prefix("provider-gen")
        .tempdir()
        .map_err(|e| CodegenError::provisioning("cannot create a temp directory", e))?;
    let staged = StagedSchema {
        dir,
        service: service.clone(),
    };
    let json_dir = staged.model_dir();
    std::fs::create_dir_all(&json_dir)
        .map_err(|e| CodegenError::provisioning("cannot create folders in temp directory", e))?;

    for file in SCHEMA_FILES {
        let body = source.fetch(revision, service, file)?;
        let path = json_dir.join(file);
        std::fs::write(&path, &body).map_err(|e| {
            CodegenError::provisioning(format!("cannot write {}", path.display()), e)
        })?;
    }
    info!(
        service = %service,
        revision,
        staging_dir = %staged.root().display(),
        "Staged service model"
    );
    Ok(staged)
}
