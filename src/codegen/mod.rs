//! # Codegen Module
//!
//! Generation is two ordered chains of steps run against one generator
//! handle:
//!
//! ```text
//! API chain (apis/<service>/<version>/)      controller chain (pkg/controller/<service>/)
//!   crd-files               <kind>.go          controller-files   <resource>.go
//!   types-file              types.go?          conversion-files   <resource>_conversions.go
//!   enums-file              enums.go?
//!   groupversion-info-file  groupversion_info.go
//!   doc-file                doc.go
//! ```
//!
//! Each chain stops at the first failing step. The orchestrator
//! ([`Generation`]) runs the API chain first and only starts the controller
//! chain once it succeeded.
//!
//! Steps overwrite their files unconditionally, so running the same request
//! twice leaves byte-identical output.

mod api;
mod chain;
mod controller;
mod generation;
mod output;
#[cfg(test)]
pub(crate) mod testing;

pub use api::{
    api_chain, generate_crd_files, generate_doc_file, generate_enums_file,
    generate_group_version_info_file, generate_types_file, DOC_FILE, ENUMS_FILE,
    GROUP_VERSION_INFO_FILE, TYPES_FILE,
};
pub use chain::{FnStep, GenerationStep, GeneratorChain, StepFailure, StepFn};
pub use controller::{controller_chain, generate_controller, generate_conversions};
pub use generation::{Generation, GenerationReport, GenerationRequest};
pub use output::{prepare_output_dir, write_generated_file, GO_EXT};

use crate::error::{CodegenError, Result};
use crate::generator::Generator;
use crate::model::ResourceDef;

/// Enumerate resources, reporting any failure as a resource enumeration error
fn resources(g: &dyn Generator) -> Result<Vec<ResourceDef>> {
    g.resources().map_err(|e| match e {
        e @ CodegenError::ResourceEnumeration { .. } => e,
        other => CodegenError::ResourceEnumeration {
            source: other.into(),
        },
    })
}
