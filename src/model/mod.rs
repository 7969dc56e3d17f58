//! # Service Model
//!
//! Reads the staged service-model documents and derives the definitions the
//! generator renders from: one resource per `Create<Name>` operation, the
//! shared structure types those resources reference, and the enum shapes.
//!
//! Every collection is ordered by name so rendering the same model twice
//! produces byte-identical output.

mod names;
pub mod sdk;

pub use names::{enum_value_ident, to_exported, to_lower_camel, to_snake_case, Names};

use crate::config::GeneratorConfig;
use crate::error::{CodegenError, Result};
use crate::provision::{model_dir, ServiceArg};
use sdk::{ApiDocument, DocDocument, Shape};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::path::Path;
use tracing::debug;

const CREATE_PREFIX: &str = "Create";

/// A field of a generated Go struct
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDef {
    /// Exported Go field name
    pub name: String,
    /// JSON tag
    pub json_name: String,
    /// Go type expression
    pub go_type: String,
    /// Shape the field points at in the model
    pub shape: String,
    pub required: bool,
    pub doc: Option<String>,
}

/// A top-level resource, one generated type/controller pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceDef {
    pub names: Names,
    /// Generated kind, the resource name unless overridden in the config
    pub kind: String,
    /// Operation the resource was derived from
    pub create_operation: String,
    pub spec_fields: Vec<FieldDef>,
    pub status_fields: Vec<FieldDef>,
    pub doc: Option<String>,
}

/// A shared (non-resource) structure type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDef {
    pub name: String,
    pub fields: Vec<FieldDef>,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValue {
    /// Go constant suffix
    pub name: String,
    pub value: String,
}

/// A string shape restricted to a fixed set of values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDef {
    pub name: String,
    pub values: Vec<EnumValue>,
    pub doc: Option<String>,
}

/// Everything derived from one service model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceModel {
    /// Service group, e.g. `ecr`
    pub service: String,
    /// Model version date, e.g. `2015-09-21`
    pub version_date: String,
    pub service_full_name: String,
    pub service_id: String,
    pub doc: Option<String>,
    pub resources: Vec<ResourceDef>,
    pub type_defs: Vec<TypeDef>,
    pub enum_defs: Vec<EnumDef>,
}

/// The two parsed documents of one service model
#[derive(Debug, Clone)]
pub struct ServiceDocuments {
    pub service: ServiceArg,
    pub api: ApiDocument,
    pub docs: DocDocument,
}

impl ServiceDocuments {
    /// Read and parse the staged documents of `service` below `root`.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::SchemaResolution`] if either document is
    /// missing or cannot be parsed.
    pub fn load(root: &Path, service: &ServiceArg) -> Result<Self> {
        let dir = model_dir(root, service);
        Ok(Self {
            service: service.clone(),
            api: read_document(&dir.join("api-2.json"))?,
            docs: read_document(&dir.join("doc-2.json"))?,
        })
    }

    /// Derive the model, honouring the ignore lists and overrides of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::HandleConstruction`] if two resources would be
    /// written to the same file.
    pub fn derive(&self, config: &GeneratorConfig) -> Result<ServiceModel> {
        let model = derive_model(&self.service, &self.api, &self.docs, config);
        check_file_names(&model.resources)?;
        debug!(
            service = %self.service,
            resources = model.resources.len(),
            type_defs = model.type_defs.len(),
            enum_defs = model.enum_defs.len(),
            "Derived service model"
        );
        Ok(model)
    }
}

/// Every resource owns `<snake kind>.go` in the API package and
/// `<snake name>.go` in the controller package; neither may be shared.
fn check_file_names(resources: &[ResourceDef]) -> Result<()> {
    let mut kinds: BTreeMap<String, &str> = BTreeMap::new();
    let mut names: BTreeMap<&str, &str> = BTreeMap::new();
    for r in resources {
        let original = r.names.original.as_str();
        let kind_file = to_snake_case(&r.kind);
        if let Some(other) = kinds.insert(kind_file.clone(), original) {
            return Err(CodegenError::handle(
                format!("resources {other} and {original} both generate {kind_file}.go"),
                format!("duplicate resource kind '{}'", r.kind),
            ));
        }
        if let Some(other) = names.insert(r.names.snake.as_str(), original) {
            return Err(CodegenError::handle(
                format!("resources {other} and {original} both generate controller {}.go", r.names.snake),
                "duplicate resource name",
            ));
        }
    }
    Ok(())
}

fn read_document<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CodegenError::resolution(format!("cannot read {}", path.display()), e))?;
    serde_json::from_str(&content)
        .map_err(|e| CodegenError::resolution(format!("cannot parse {}", path.display()), e))
}

/// Derive resources, shared types and enums from parsed documents.
pub fn derive_model(
    service: &ServiceArg,
    api: &ApiDocument,
    docs: &DocDocument,
    config: &GeneratorConfig,
) -> ServiceModel {
    let resources = derive_resources(api, docs, config);

    let mut io_shapes = BTreeSet::new();
    for op in api.operations.values() {
        io_shapes.extend(op.input.iter().map(|r| r.shape.clone()));
        io_shapes.extend(op.output.iter().map(|r| r.shape.clone()));
    }

    let mut queue: VecDeque<String> = resources
        .iter()
        .flat_map(|r| r.spec_fields.iter().chain(r.status_fields.iter()))
        .map(|f| f.shape.clone())
        .collect();
    let mut seen = BTreeSet::new();
    let mut shared = BTreeSet::new();
    while let Some(name) = queue.pop_front() {
        if !seen.insert(name.clone()) {
            continue;
        }
        let Some(shape) = api.shapes.get(&name) else {
            continue;
        };
        match shape.shape_type.as_str() {
            "structure" => {
                if !io_shapes.contains(&name) && !config.is_shape_ignored(&name) {
                    shared.insert(name.clone());
                }
                queue.extend(shape.members.values().map(|m| m.shape.clone()));
            }
            "list" => queue.extend(shape.member.iter().map(|m| m.shape.clone())),
            "map" => queue.extend(shape.value.iter().map(|m| m.shape.clone())),
            _ => {}
        }
    }

    let type_defs = shared
        .into_iter()
        .filter_map(|name| {
            let shape = api.shapes.get(&name)?;
            Some(TypeDef {
                fields: struct_fields(api, docs, &name, shape),
                doc: docs.shape_doc(&name).map(str::to_string),
                name,
            })
        })
        .collect();

    let enum_defs = api
        .shapes
        .iter()
        .filter(|(name, shape)| {
            shape.shape_type == "string"
                && !shape.enum_values.is_empty()
                && !config.is_shape_ignored(name)
        })
        .map(|(name, shape)| EnumDef {
            name: to_exported(name),
            values: shape
                .enum_values
                .iter()
                .map(|v| EnumValue {
                    name: enum_value_ident(v),
                    value: v.clone(),
                })
                .collect(),
            doc: docs.shape_doc(name).map(str::to_string),
        })
        .collect();

    ServiceModel {
        service: service.group.clone(),
        version_date: service.version_date.clone(),
        service_full_name: api.metadata.service_full_name.clone(),
        service_id: api
            .metadata
            .service_id
            .clone()
            .or_else(|| api.metadata.service_abbreviation.clone())
            .unwrap_or_else(|| service.group.to_uppercase()),
        doc: docs.service.clone(),
        resources,
        type_defs,
        enum_defs,
    }
}

fn derive_resources(
    api: &ApiDocument,
    docs: &DocDocument,
    config: &GeneratorConfig,
) -> Vec<ResourceDef> {
    let mut resources = Vec::new();
    for (op_name, op) in &api.operations {
        let Some(name) = op_name.strip_prefix(CREATE_PREFIX) else {
            continue;
        };
        if name.is_empty() || config.is_resource_ignored(name) {
            continue;
        }

        let spec_fields = op
            .input
            .as_ref()
            .and_then(|r| api.shapes.get(&r.shape).map(|s| struct_fields(api, docs, &r.shape, s)))
            .unwrap_or_default();

        let spec_names: BTreeSet<&str> = spec_fields.iter().map(|f| f.json_name.as_str()).collect();
        let status_fields = op
            .output
            .as_ref()
            .map(|r| output_fields(api, docs, &r.shape))
            .unwrap_or_default()
            .into_iter()
            .filter(|f| !spec_names.contains(f.json_name.as_str()))
            .collect();

        let names = Names::new(name);
        resources.push(ResourceDef {
            kind: config
                .kind_override(name)
                .map(str::to_string)
                .unwrap_or_else(|| names.camel.clone()),
            names,
            create_operation: op.name.clone(),
            spec_fields,
            status_fields,
            doc: docs.operations.get(op_name).cloned().flatten(),
        });
    }
    resources
}

/// Members of the output shape. A single structure member wrapping the
/// created object (`{"repository": {...}}`) is unwrapped.
fn output_fields(api: &ApiDocument, docs: &DocDocument, output: &str) -> Vec<FieldDef> {
    let Some(shape) = api.shapes.get(output) else {
        return Vec::new();
    };
    if shape.members.len() == 1 {
        if let Some(inner_ref) = shape.members.values().next() {
            if let Some(inner) = api.shapes.get(&inner_ref.shape) {
                if inner.shape_type == "structure" {
                    return struct_fields(api, docs, &inner_ref.shape, inner);
                }
            }
        }
    }
    struct_fields(api, docs, output, shape)
}

fn struct_fields(api: &ApiDocument, docs: &DocDocument, parent: &str, shape: &Shape) -> Vec<FieldDef> {
    shape
        .members
        .iter()
        .map(|(member, r)| FieldDef {
            name: to_exported(member),
            json_name: to_lower_camel(member),
            go_type: go_type(api, &r.shape),
            shape: r.shape.clone(),
            required: shape.required.iter().any(|m| m == member),
            doc: docs.member_doc(&r.shape, parent, member).map(str::to_string),
        })
        .collect()
}

/// Go type expression for a field pointing at `shape`.
pub fn go_type(api: &ApiDocument, shape: &str) -> String {
    go_type_at(api, shape, 0)
}

fn go_type_at(api: &ApiDocument, name: &str, depth: usize) -> String {
    // Containers nest a handful of levels at most; deeper means a cycle.
    if depth > 16 {
        return "interface{}".to_string();
    }
    let Some(shape) = api.shapes.get(name) else {
        return "*string".to_string();
    };
    match shape.shape_type.as_str() {
        "string" => "*string".to_string(),
        "integer" | "long" => "*int64".to_string(),
        "boolean" => "*bool".to_string(),
        "double" | "float" => "*float64".to_string(),
        "timestamp" => "*metav1.Time".to_string(),
        "blob" => "[]byte".to_string(),
        "list" => match &shape.member {
            Some(m) => format!("[]{}", go_type_at(api, &m.shape, depth + 1)),
            None => "[]*string".to_string(),
        },
        "map" => match &shape.value {
            Some(v) => format!("map[string]{}", go_type_at(api, &v.shape, depth + 1)),
            None => "map[string]*string".to_string(),
        },
        "structure" => format!("*{}", to_exported(name)),
        _ => "*string".to_string(),
    }
}
