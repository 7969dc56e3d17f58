#![allow(dead_code)]

use provider_gen::error::{CodegenError, Result};
use provider_gen::provision::{ServiceArg, SchemaSource};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Root of the pre-staged fixture models (`models/apis/<group>/<date>/`)
pub fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// The template tree shipped with the crate
pub fn template_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("template")
}

/// Every file under `dir`, keyed by its path relative to `dir`
pub fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut files = BTreeMap::new();
    collect(dir, dir, &mut files);
    files
}

fn collect(root: &Path, dir: &Path, files: &mut BTreeMap<PathBuf, Vec<u8>>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect(root, &path, files);
        } else {
            let rel = path.strip_prefix(root).unwrap().to_path_buf();
            files.insert(rel, fs::read(&path).unwrap());
        }
    }
}

/// Serves schema documents from the fixture tree instead of the network
pub struct FixtureSource;

impl SchemaSource for FixtureSource {
    fn fetch(&self, _revision: &str, service: &ServiceArg, file: &str) -> Result<Vec<u8>> {
        let path = fixture_root()
            .join("models")
            .join("apis")
            .join(service.model_path())
            .join(file);
        fs::read(&path).map_err(|e| {
            CodegenError::provisioning(format!("cannot read fixture {}", path.display()), e)
        })
    }
}
