use super::{Generator, ScaffoldCategory};
use crate::error::{CodegenError, Result};
use crate::model::{to_snake_case, EnumDef, ResourceDef, ServiceModel, TypeDef};
use minijinja::{Environment, UndefinedBehavior};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Templates that must exist in the template directory, relative to it
pub const REQUIRED_TEMPLATES: [&str; 7] = [
    "apis/crd.go.tpl",
    "apis/types.go.tpl",
    "apis/enums.go.tpl",
    "apis/groupversion_info.go.tpl",
    "apis/doc.go.tpl",
    "pkg/resource/manager.go.tpl",
    "pkg/resource/sdk.go.tpl",
];

const RESOURCE_TEMPLATE: &str = "apis/crd.go.tpl";

/// Column generated doc comments are wrapped at
const DOC_WIDTH: usize = 77;

static HTML_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("HTML tag regex should be valid"));

/// Values every template sees
#[derive(Serialize)]
struct PackageContext<'a> {
    service: &'a str,
    service_full_name: &'a str,
    service_id: &'a str,
    version_date: &'a str,
    api_version: &'a str,
    api_group: &'a str,
    doc: Option<&'a str>,
    resources: &'a [ResourceDef],
    type_defs: &'a [TypeDef],
    enum_defs: &'a [EnumDef],
}

/// Values a per-resource template sees
#[derive(Serialize)]
struct ResourceContext<'a> {
    #[serde(flatten)]
    package: PackageContext<'a>,
    resource: &'a ResourceDef,
    category: Option<&'static str>,
}

/// Generator handle backed by a service model and a directory of minijinja templates
pub struct TemplateGenerator {
    env: Environment<'static>,
    model: ServiceModel,
    api_version: String,
    api_group: String,
}

impl std::fmt::Debug for TemplateGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateGenerator")
            .field("service", &self.model.service)
            .field("api_version", &self.api_version)
            .field("api_group", &self.api_group)
            .finish_non_exhaustive()
    }
}

impl TemplateGenerator {
    /// Build a handle, loading and compiling every required template.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::HandleConstruction`] if `api_version` is empty
    /// or a required template is missing or does not compile.
    pub fn new(
        model: ServiceModel,
        api_version: &str,
        api_group: String,
        template_dir: &Path,
    ) -> Result<Self> {
        if api_version.trim().is_empty() {
            return Err(CodegenError::handle(
                "api version must not be empty",
                "empty api version",
            ));
        }

        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.add_filter("go_doc", go_doc);
        env.add_filter("snake", |s: String| to_snake_case(&s));

        for name in REQUIRED_TEMPLATES {
            let path = template_dir.join(name);
            let source = fs::read_to_string(&path).map_err(|e| {
                CodegenError::handle(format!("missing template {}", path.display()), e)
            })?;
            env.add_template_owned(name, source)
                .map_err(|e| CodegenError::handle(format!("cannot compile template {name}"), e))?;
        }
        debug!(template_dir = %template_dir.display(), "Loaded templates");

        Ok(Self {
            env,
            model,
            api_version: api_version.to_string(),
            api_group,
        })
    }

    fn package_context(&self) -> PackageContext<'_> {
        PackageContext {
            service: &self.model.service,
            service_full_name: &self.model.service_full_name,
            service_id: &self.model.service_id,
            version_date: &self.model.version_date,
            api_version: &self.api_version,
            api_group: &self.api_group,
            doc: self.model.doc.as_deref(),
            resources: &self.model.resources,
            type_defs: &self.model.type_defs,
            enum_defs: &self.model.enum_defs,
        }
    }

    fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Vec<u8>> {
        let tmpl = self
            .env
            .get_template(name)
            .map_err(|e| CodegenError::render(format!("template {name}"), e))?;
        let out = tmpl
            .render(ctx)
            .map_err(|e| CodegenError::render(format!("template {name}"), e))?;
        Ok(out.into_bytes())
    }
}

impl Generator for TemplateGenerator {
    fn resources(&self) -> Result<Vec<ResourceDef>> {
        Ok(self.model.resources.clone())
    }

    fn type_defs(&self) -> Result<Vec<TypeDef>> {
        Ok(self.model.type_defs.clone())
    }

    fn enum_defs(&self) -> Result<Vec<EnumDef>> {
        Ok(self.model.enum_defs.clone())
    }

    fn render_resource_file(&self, resource: &ResourceDef) -> Result<Vec<u8>> {
        self.render(
            RESOURCE_TEMPLATE,
            ResourceContext {
                package: self.package_context(),
                resource,
                category: None,
            },
        )
    }

    fn render_api_file(&self, name: &str) -> Result<Vec<u8>> {
        self.render(&format!("apis/{name}.go.tpl"), self.package_context())
    }

    fn render_resource_package_file(
        &self,
        resource: &ResourceDef,
        category: ScaffoldCategory,
    ) -> Result<Vec<u8>> {
        self.render(
            &format!("pkg/resource/{category}.go.tpl"),
            ResourceContext {
                package: self.package_context(),
                resource,
                category: Some(category.as_str()),
            },
        )
    }
}

/// Turn model documentation (HTML fragments) into wrapped `//` comment lines,
/// each prefixed with `indent`.
fn go_doc(value: Option<String>, indent: Option<String>) -> String {
    let indent = indent.unwrap_or_default();
    let Some(text) = value else {
        return String::new();
    };
    let plain = HTML_TAG.replace_all(&text, " ");
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in plain.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > DOC_WIDTH {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
        .iter()
        .map(|l| format!("{indent}// {l}"))
        .collect::<Vec<_>>()
        .join("\n")
}
