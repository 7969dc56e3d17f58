mod common;

use common::{fixture_root, snapshot, template_dir};
use provider_gen::error::CodegenError;
use provider_gen::provision::ServiceArg;
use provider_gen::{Generation, GenerationRequest};
use std::fs;
use std::path::PathBuf;

fn ecr_request(provider_dir: &std::path::Path) -> GenerationRequest {
    GenerationRequest::new(
        ServiceArg::parse("ecr/2015-09-21").unwrap(),
        "v1alpha1",
        provider_dir,
        fixture_root(),
        template_dir(),
    )
}

#[test]
fn test_generate_ecr_layout() {
    let out = tempfile::tempdir().unwrap();
    let report = Generation::new(ecr_request(out.path())).generate().unwrap();

    let files: Vec<PathBuf> = snapshot(out.path()).into_keys().collect();
    let expected: Vec<PathBuf> = [
        "apis/ecr/v1alpha1/doc.go",
        "apis/ecr/v1alpha1/enums.go",
        "apis/ecr/v1alpha1/groupversion_info.go",
        "apis/ecr/v1alpha1/repository.go",
        "apis/ecr/v1alpha1/types.go",
        "pkg/controller/ecr/repository.go",
        "pkg/controller/ecr/repository_conversions.go",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();
    assert_eq!(files, expected);
    assert_eq!(report.api_files.len(), 5);
    assert_eq!(report.controller_files.len(), 2);
    assert_eq!(report.total(), 7);
}

#[test]
fn test_generated_contents() {
    let out = tempfile::tempdir().unwrap();
    Generation::new(ecr_request(out.path())).generate().unwrap();
    let api = out.path().join("apis/ecr/v1alpha1");

    let crd = fs::read_to_string(api.join("repository.go")).unwrap();
    assert!(crd.starts_with("// Code generated by provider-gen. DO NOT EDIT."));
    assert!(crd.contains("package v1alpha1"));
    assert!(crd.contains("type RepositoryParameters struct"));
    assert!(crd.contains("RepositoryName *string `json:\"repositoryName\"`"));
    assert!(crd.contains("Tags []*Tag `json:\"tags,omitempty\"`"));
    assert!(crd.contains("RepositoryUri *string"));
    assert!(crd.contains("CreatedAt *metav1.Time"));
    assert!(crd.contains("// The name to use for the repository."));

    let doc = fs::read_to_string(api.join("doc.go")).unwrap();
    assert!(doc.contains("// Generated from the Amazon EC2 Container Registry service model (2015-09-21)."));
    assert!(doc.contains("// +groupName=ecr.aws.crossplane.io"));

    let gv = fs::read_to_string(api.join("groupversion_info.go")).unwrap();
    assert!(gv.contains("CRDGroup   = \"ecr.aws.crossplane.io\""));
    assert!(gv.contains("CRDVersion = \"v1alpha1\""));

    let types = fs::read_to_string(api.join("types.go")).unwrap();
    for name in ["EncryptionConfiguration", "ImageScanningConfiguration", "Tag"] {
        assert!(types.contains(&format!("type {name} struct")), "missing {name}");
    }
    assert!(!types.contains("type Repository struct"));

    let enums = fs::read_to_string(api.join("enums.go")).unwrap();
    assert!(enums.contains("type ImageTagMutability string"));
    assert!(enums.contains("= \"IMMUTABLE\""));
    assert!(enums.contains("type EncryptionType string"));

    let controller = out.path().join("pkg/controller/ecr");
    let manager = fs::read_to_string(controller.join("repository.go")).unwrap();
    assert!(manager.contains("package ecr"));
    assert!(manager.contains("func SetupRepository("));
    assert!(manager.contains("svcsdkapi.ECRAPI"));
    let sdk = fs::read_to_string(controller.join("repository_conversions.go")).unwrap();
    assert!(sdk.contains("func GenerateCreateRepositoryInput("));
    assert!(sdk.contains("res.SetRepositoryName(*cr.Spec.ForProvider.RepositoryName)"));
}

#[test]
fn test_regeneration_is_byte_identical() {
    let out = tempfile::tempdir().unwrap();
    Generation::new(ecr_request(out.path())).generate().unwrap();
    let first = snapshot(out.path());

    // Stale content is overwritten, not appended to.
    fs::write(out.path().join("apis/ecr/v1alpha1/types.go"), "stale").unwrap();
    Generation::new(ecr_request(out.path())).generate().unwrap();
    assert_eq!(snapshot(out.path()), first);
}

#[test]
fn test_unrelated_files_are_kept() {
    let out = tempfile::tempdir().unwrap();
    let api = out.path().join("apis/ecr/v1alpha1");
    fs::create_dir_all(&api).unwrap();
    fs::write(api.join("custom.go"), "package v1alpha1\n").unwrap();

    Generation::new(ecr_request(out.path())).generate().unwrap();
    assert_eq!(fs::read_to_string(api.join("custom.go")).unwrap(), "package v1alpha1\n");
}

#[test]
fn test_service_without_resources() {
    let out = tempfile::tempdir().unwrap();
    let request = GenerationRequest::new(
        ServiceArg::parse("demo/2020-01-01").unwrap(),
        "v1alpha1",
        out.path(),
        fixture_root(),
        template_dir(),
    );
    let report = Generation::new(request).generate().unwrap();

    assert!(report.controller_files.is_empty());
    let files: Vec<PathBuf> = snapshot(out.path()).into_keys().collect();
    assert_eq!(
        files,
        vec![
            PathBuf::from("apis/demo/v1alpha1/doc.go"),
            PathBuf::from("apis/demo/v1alpha1/groupversion_info.go"),
        ]
    );
    assert!(out.path().join("pkg/controller/demo").is_dir());
}

#[test]
fn test_generator_config_applies() {
    let out = tempfile::tempdir().unwrap();
    let config = out.path().join("generator.yaml");
    fs::write(
        &config,
        "resources:\n  Repository:\n    kind: Registry\napi_group_suffix: example.org\n",
    )
    .unwrap();

    let request = ecr_request(&out.path().join("provider")).with_generator_config_path(&config);
    Generation::new(request).generate().unwrap();

    let api = out.path().join("provider/apis/ecr/v1alpha1");
    assert!(api.join("registry.go").is_file());
    assert!(!api.join("repository.go").exists());
    let gv = fs::read_to_string(api.join("groupversion_info.go")).unwrap();
    assert!(gv.contains("\"ecr.example.org\""));
    // Controller files keep the original resource name.
    assert!(out.path().join("provider/pkg/controller/ecr/repository.go").is_file());
}

#[test]
fn test_ignored_resources_produce_no_crd() {
    let out = tempfile::tempdir().unwrap();
    let config = out.path().join("generator.yaml");
    fs::write(&config, "ignore:\n  resource_names: [Repository]\n").unwrap();

    let request = ecr_request(&out.path().join("provider")).with_generator_config_path(&config);
    let report = Generation::new(request).generate().unwrap();

    assert!(report.controller_files.is_empty());
    assert!(!out.path().join("provider/apis/ecr/v1alpha1/repository.go").exists());
    assert!(!out.path().join("provider/apis/ecr/v1alpha1/types.go").exists());
}

#[test]
fn test_missing_model_is_resolution_error() {
    let out = tempfile::tempdir().unwrap();
    let request = GenerationRequest::new(
        ServiceArg::parse("nosuch/2020-01-01").unwrap(),
        "v1alpha1",
        out.path(),
        fixture_root(),
        template_dir(),
    );
    let err = Generation::new(request).generate().unwrap_err();
    assert!(matches!(err, CodegenError::SchemaResolution { .. }), "{err:?}");
    assert!(snapshot(out.path()).is_empty());
}

#[test]
fn test_unwritable_output_dir_is_output_prep_error() {
    let out = tempfile::tempdir().unwrap();
    fs::write(out.path().join("pkg"), "a file, not a directory").unwrap();

    let err = Generation::new(ecr_request(out.path())).generate().unwrap_err();
    assert!(matches!(err, CodegenError::OutputPrep { .. }), "{err:?}");
    assert_eq!(err.failed_step(), None);
    // The API directory was prepared but no chain wrote into it.
    assert!(snapshot(&out.path().join("apis")).is_empty());
    assert_eq!(fs::read_to_string(out.path().join("pkg")).unwrap(), "a file, not a directory");
}

#[test]
fn test_path_like_kind_override_writes_nothing() {
    let out = tempfile::tempdir().unwrap();
    let target = out.path().join("outside");
    let config = out.path().join("generator.yaml");
    fs::write(
        &config,
        format!("resources:\n  Repository:\n    kind: \"{}\"\n", target.display()),
    )
    .unwrap();

    let request = ecr_request(&out.path().join("provider")).with_generator_config_path(&config);
    let err = Generation::new(request).generate().unwrap_err();
    assert!(matches!(err, CodegenError::HandleConstruction { .. }), "{err:?}");
    assert!(!out.path().join("outside.go").exists());
    assert!(!out.path().join("provider").exists());
}

#[test]
fn test_invalid_api_version_is_handle_error() {
    for version in ["", "../escape", "v1/alpha"] {
        let out = tempfile::tempdir().unwrap();
        let request = GenerationRequest::new(
            ServiceArg::parse("ecr/2015-09-21").unwrap(),
            version,
            out.path().join("provider"),
            fixture_root(),
            template_dir(),
        );
        let err = Generation::new(request).generate().unwrap_err();
        assert!(matches!(err, CodegenError::HandleConstruction { .. }), "{version:?}: {err:?}");
        assert!(!out.path().join("provider").exists());
    }
}

#[test]
fn test_missing_templates_create_no_output() {
    let out = tempfile::tempdir().unwrap();
    let templates = tempfile::tempdir().unwrap();
    let request = GenerationRequest::new(
        ServiceArg::parse("ecr/2015-09-21").unwrap(),
        "v1alpha1",
        out.path().join("provider"),
        fixture_root(),
        templates.path(),
    );
    let err = Generation::new(request).generate().unwrap_err();
    assert!(matches!(err, CodegenError::HandleConstruction { .. }), "{err:?}");
    assert!(!out.path().join("provider").exists());
}

#[test]
fn test_broken_template_fails_named_step() {
    let out = tempfile::tempdir().unwrap();
    let templates = tempfile::tempdir().unwrap();
    for name in provider_gen::generator::REQUIRED_TEMPLATES {
        let src = template_dir().join(name);
        let dst = templates.path().join(name);
        fs::create_dir_all(dst.parent().unwrap()).unwrap();
        fs::copy(&src, &dst).unwrap();
    }
    // Compiles, but fails at render time on an unknown variable.
    fs::write(templates.path().join("apis/types.go.tpl"), "{{ no_such_value }}\n").unwrap();

    let request = GenerationRequest::new(
        ServiceArg::parse("ecr/2015-09-21").unwrap(),
        "v1alpha1",
        out.path(),
        fixture_root(),
        templates.path(),
    );
    let err = Generation::new(request).generate().unwrap_err();
    assert!(matches!(err, CodegenError::ApiGeneration { .. }), "{err:?}");
    assert_eq!(err.failed_step(), Some("types-file"));
    // Steps before the failure already wrote their files; the controller chain never ran.
    assert!(out.path().join("apis/ecr/v1alpha1/repository.go").is_file());
    assert!(snapshot(&out.path().join("pkg/controller/ecr")).is_empty());
}
