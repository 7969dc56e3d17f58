//! Serde view of the two service-model documents.
//!
//! Only the parts generation reads are modelled; unknown keys are ignored so
//! newer document revisions still load.

use serde::Deserialize;
use std::collections::BTreeMap;

/// `api-2.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiDocument {
    pub metadata: Metadata,
    #[serde(default)]
    pub operations: BTreeMap<String, Operation>,
    #[serde(default)]
    pub shapes: BTreeMap<String, Shape>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    pub service_full_name: String,
    pub service_id: Option<String>,
    pub service_abbreviation: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub input: Option<ShapeRef>,
    #[serde(default)]
    pub output: Option<ShapeRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShapeRef {
    pub shape: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub shape_type: String,
    #[serde(default)]
    pub members: BTreeMap<String, ShapeRef>,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub member: Option<ShapeRef>,
    #[serde(default)]
    pub value: Option<ShapeRef>,
    #[serde(rename = "enum", default)]
    pub enum_values: Vec<String>,
}

/// `doc-2.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocDocument {
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub operations: BTreeMap<String, Option<String>>,
    #[serde(default)]
    pub shapes: BTreeMap<String, ShapeDoc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShapeDoc {
    pub base: Option<String>,
    pub refs: BTreeMap<String, Option<String>>,
}

impl DocDocument {
    /// Documentation of a shape
    pub fn shape_doc(&self, shape: &str) -> Option<&str> {
        self.shapes.get(shape).and_then(|d| d.base.as_deref())
    }

    /// Documentation of `member` as used inside `parent`, falling back to the
    /// member shape's own documentation.
    pub fn member_doc(&self, member_shape: &str, parent: &str, member: &str) -> Option<&str> {
        let key = format!("{parent}${member}");
        self.shapes
            .get(member_shape)
            .and_then(|d| d.refs.get(&key))
            .and_then(|d| d.as_deref())
            .or_else(|| self.shape_doc(member_shape))
    }
}
