//! # Generator Module
//!
//! The generator handle is the one object every generation step works
//! against. It exposes read operations over the derived service model and
//! render operations that turn a named template into file content.
//!
//! ## Templates
//!
//! Templates are [minijinja](https://docs.rs/minijinja) files read from the
//! template directory when the handle is built:
//!
//! ```text
//! template/
//! ├── apis/
//! │   ├── crd.go.tpl                 # one per resource
//! │   ├── types.go.tpl               # shared structure types
//! │   ├── enums.go.tpl               # shared enums
//! │   ├── groupversion_info.go.tpl   # group/version descriptor
//! │   └── doc.go.tpl                 # package documentation
//! └── pkg/
//!     └── resource/
//!         ├── manager.go.tpl         # controller scaffold
//!         └── sdk.go.tpl             # conversion scaffold
//! ```
//!
//! Every template is required, even ones a given service never renders, so
//! a broken template directory fails before any output is written.

mod templates;

pub use templates::{TemplateGenerator, REQUIRED_TEMPLATES};

use crate::error::Result;
use crate::model::{EnumDef, ResourceDef, TypeDef};
use std::fmt;

/// Kind of per-resource package file rendered under the controller directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldCategory {
    /// Runtime-manager style controller code
    Manager,
    /// SDK conversion functions
    Sdk,
}

impl ScaffoldCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ScaffoldCategory::Manager => "manager",
            ScaffoldCategory::Sdk => "sdk",
        }
    }
}

impl fmt::Display for ScaffoldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read and render operations generation steps use.
///
/// Implementations are read-only after construction; steps never mutate the
/// handle, they only write the files they own.
pub trait Generator {
    /// Resource definitions, ordered by name
    fn resources(&self) -> Result<Vec<ResourceDef>>;

    /// Shared (non-resource) structure types, ordered by name
    fn type_defs(&self) -> Result<Vec<TypeDef>>;

    /// Enum definitions, ordered by name
    fn enum_defs(&self) -> Result<Vec<EnumDef>>;

    /// Render the API type file of one resource
    fn render_resource_file(&self, resource: &ResourceDef) -> Result<Vec<u8>>;

    /// Render a package-level API file (`types`, `enums`, `groupversion_info`, `doc`)
    fn render_api_file(&self, name: &str) -> Result<Vec<u8>>;

    /// Render a per-resource controller package file of the given category
    fn render_resource_package_file(
        &self,
        resource: &ResourceDef,
        category: ScaffoldCategory,
    ) -> Result<Vec<u8>>;
}
