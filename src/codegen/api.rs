//! Steps that write the API package: one type file per resource, the shared
//! types and enums files when there is anything to put in them, the
//! group/version descriptor and the package doc.

use super::chain::{FnStep, GeneratorChain};
use super::output::{write_generated_file, GO_EXT};
use super::resources;
use crate::error::Result;
use crate::generator::Generator;
use crate::model::to_snake_case;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const TYPES_FILE: &str = "types";
pub const ENUMS_FILE: &str = "enums";
pub const GROUP_VERSION_INFO_FILE: &str = "groupversion_info";
pub const DOC_FILE: &str = "doc";

/// The API file chain in its fixed order
pub fn api_chain() -> GeneratorChain {
    GeneratorChain::new()
        .with_step(FnStep::new("crd-files", generate_crd_files))
        .with_step(FnStep::new("types-file", generate_types_file))
        .with_step(FnStep::new("enums-file", generate_enums_file))
        .with_step(FnStep::new(
            "groupversion-info-file",
            generate_group_version_info_file,
        ))
        .with_step(FnStep::new("doc-file", generate_doc_file))
}

/// Write one type file per resource, named after its kind in snake case.
pub fn generate_crd_files(g: &dyn Generator, api_path: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for crd in resources(g)? {
        let content = g.render_resource_file(&crd)?;
        let path = api_path.join(format!("{}.{GO_EXT}", to_snake_case(&crd.kind)));
        write_generated_file(&path, &content)?;
        debug!(path = %path.display(), kind = %crd.kind, "Wrote resource type file");
        written.push(path);
    }
    Ok(written)
}

/// Write the shared types file; nothing is written without shared types.
pub fn generate_types_file(g: &dyn Generator, api_path: &Path) -> Result<Vec<PathBuf>> {
    if g.type_defs()?.is_empty() {
        debug!("No shared type definitions, skipping types file");
        return Ok(Vec::new());
    }
    write_api_file(g, api_path, TYPES_FILE)
}

/// Write the shared enums file; nothing is written without enums.
pub fn generate_enums_file(g: &dyn Generator, api_path: &Path) -> Result<Vec<PathBuf>> {
    if g.enum_defs()?.is_empty() {
        debug!("No enum definitions, skipping enums file");
        return Ok(Vec::new());
    }
    write_api_file(g, api_path, ENUMS_FILE)
}

pub fn generate_group_version_info_file(
    g: &dyn Generator,
    api_path: &Path,
) -> Result<Vec<PathBuf>> {
    write_api_file(g, api_path, GROUP_VERSION_INFO_FILE)
}

pub fn generate_doc_file(g: &dyn Generator, api_path: &Path) -> Result<Vec<PathBuf>> {
    write_api_file(g, api_path, DOC_FILE)
}

fn write_api_file(g: &dyn Generator, api_path: &Path, name: &str) -> Result<Vec<PathBuf>> {
    let content = g.render_api_file(name)?;
    let path = api_path.join(format!("{name}.{GO_EXT}"));
    write_generated_file(&path, &content)?;
    debug!(path = %path.display(), "Wrote API file");
    Ok(vec![path])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::testing::{resource, StubGenerator};
    use crate::error::CodegenError;
    use crate::model::{EnumDef, TypeDef};

    fn files(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_chain_order() {
        assert_eq!(
            api_chain().step_names(),
            vec![
                "crd-files",
                "types-file",
                "enums-file",
                "groupversion-info-file",
                "doc-file"
            ]
        );
    }

    #[test]
    fn test_one_type_file_per_resource() {
        let dir = tempfile::tempdir().unwrap();
        let g = StubGenerator {
            resources: vec![resource("Repository"), resource("LifecyclePolicy")],
            ..Default::default()
        };
        let written = api_chain().run(&g, dir.path()).unwrap();
        assert_eq!(written.len(), 4);
        assert_eq!(
            files(dir.path()),
            vec!["doc.go", "groupversion_info.go", "lifecycle_policy.go", "repository.go"]
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("lifecycle_policy.go")).unwrap(),
            "resource LifecyclePolicy\n"
        );
    }

    #[test]
    fn test_zero_resources_still_writes_metadata() {
        let dir = tempfile::tempdir().unwrap();
        api_chain().run(&StubGenerator::default(), dir.path()).unwrap();
        assert_eq!(files(dir.path()), vec!["doc.go", "groupversion_info.go"]);
    }

    #[test]
    fn test_shared_types_and_enums_written_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let g = StubGenerator {
            type_defs: vec![TypeDef {
                name: "Tag".to_string(),
                fields: vec![],
                doc: None,
            }],
            enum_defs: vec![EnumDef {
                name: "Mutability".to_string(),
                values: vec![],
                doc: None,
            }],
            ..Default::default()
        };
        api_chain().run(&g, dir.path()).unwrap();
        assert_eq!(
            files(dir.path()),
            vec!["doc.go", "enums.go", "groupversion_info.go", "types.go"]
        );
    }

    #[test]
    fn test_render_failure_stops_chain() {
        let dir = tempfile::tempdir().unwrap();
        let g = StubGenerator {
            resources: vec![resource("Repository")],
            fail_render: Some("groupversion_info".to_string()),
            ..Default::default()
        };
        let failure = api_chain().run(&g, dir.path()).unwrap_err();
        assert_eq!(failure.step, "groupversion-info-file");
        assert!(matches!(failure.source, CodegenError::Render { .. }));
        // Earlier step committed, later step never ran.
        assert_eq!(files(dir.path()), vec!["repository.go"]);
    }

    #[test]
    fn test_enumeration_failure() {
        let dir = tempfile::tempdir().unwrap();
        let g = StubGenerator {
            fail_enumeration: true,
            ..Default::default()
        };
        let failure = api_chain().run(&g, dir.path()).unwrap_err();
        assert_eq!(failure.step, "crd-files");
        assert!(matches!(
            failure.source,
            CodegenError::ResourceEnumeration { .. }
        ));
        assert!(files(dir.path()).is_empty());
    }
}
