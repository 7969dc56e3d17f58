//! Steps that write the controller package: a runtime-manager scaffold and a
//! conversion scaffold for every resource.

use super::chain::{FnStep, GeneratorChain};
use super::output::{write_generated_file, GO_EXT};
use super::resources;
use crate::error::Result;
use crate::generator::{Generator, ScaffoldCategory};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The controller file chain in its fixed order
pub fn controller_chain() -> GeneratorChain {
    GeneratorChain::new()
        .with_step(FnStep::new("controller-files", generate_controller))
        .with_step(FnStep::new("conversion-files", generate_conversions))
}

/// Write `<snake>.go` for every resource.
pub fn generate_controller(g: &dyn Generator, controller_path: &Path) -> Result<Vec<PathBuf>> {
    write_scaffolds(g, controller_path, ScaffoldCategory::Manager, "")
}

/// Write `<snake>_conversions.go` for every resource.
pub fn generate_conversions(g: &dyn Generator, controller_path: &Path) -> Result<Vec<PathBuf>> {
    write_scaffolds(g, controller_path, ScaffoldCategory::Sdk, "_conversions")
}

fn write_scaffolds(
    g: &dyn Generator,
    controller_path: &Path,
    category: ScaffoldCategory,
    suffix: &str,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for crd in resources(g)? {
        let content = g.render_resource_package_file(&crd, category)?;
        let path = controller_path.join(format!("{}{suffix}.{GO_EXT}", crd.names.snake));
        write_generated_file(&path, &content)?;
        debug!(path = %path.display(), %category, "Wrote controller scaffold");
        written.push(path);
    }
    Ok(written)
}
