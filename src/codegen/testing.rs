//! In-memory generator handle for chain and orchestrator tests.

use crate::error::{CodegenError, Result};
use crate::generator::{Generator, ScaffoldCategory};
use crate::model::{EnumDef, Names, ResourceDef, TypeDef};

pub(crate) fn resource(name: &str) -> ResourceDef {
    let names = Names::new(name);
    ResourceDef {
        kind: names.camel.clone(),
        create_operation: format!("Create{name}"),
        names,
        spec_fields: vec![],
        status_fields: vec![],
        doc: None,
    }
}

/// Renders `<target> <name>\n`. `fail_render` names a render target that
/// fails: an API file name, a resource snake name, or `<category>:<snake>`.
#[derive(Default)]
pub(crate) struct StubGenerator {
    pub resources: Vec<ResourceDef>,
    pub type_defs: Vec<TypeDef>,
    pub enum_defs: Vec<EnumDef>,
    pub fail_enumeration: bool,
    pub fail_render: Option<String>,
}

impl StubGenerator {
    fn check(&self, target: &str) -> Result<()> {
        if self.fail_render.as_deref() == Some(target) {
            return Err(CodegenError::render(target, "stub render failure"));
        }
        Ok(())
    }
}

impl Generator for StubGenerator {
    fn resources(&self) -> Result<Vec<ResourceDef>> {
        if self.fail_enumeration {
            return Err(CodegenError::ResourceEnumeration {
                source: "stub enumeration failure".into(),
            });
        }
        Ok(self.resources.clone())
    }

    fn type_defs(&self) -> Result<Vec<TypeDef>> {
        Ok(self.type_defs.clone())
    }

    fn enum_defs(&self) -> Result<Vec<EnumDef>> {
        Ok(self.enum_defs.clone())
    }

    fn render_resource_file(&self, resource: &ResourceDef) -> Result<Vec<u8>> {
        self.check(&resource.names.snake)?;
        Ok(format!("resource {}\n", resource.kind).into_bytes())
    }

    fn render_api_file(&self, name: &str) -> Result<Vec<u8>> {
        self.check(name)?;
        Ok(format!("api {name}\n").into_bytes())
    }

    fn render_resource_package_file(
        &self,
        resource: &ResourceDef,
        category: ScaffoldCategory,
    ) -> Result<Vec<u8>> {
        self.check(&format!("{category}:{}", resource.names.snake))?;
        Ok(format!("{category} {}\n", resource.names.original).into_bytes())
    }
}
