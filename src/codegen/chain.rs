//! Ordered, fail-fast chains of generation steps.

use crate::error::{CodegenError, Result};
use crate::generator::Generator;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Signature of a step implemented as a plain function
pub type StepFn = fn(&dyn Generator, &Path) -> Result<Vec<PathBuf>>;

/// One generation step.
///
/// A step only reads from the handle and writes exactly the files it owns
/// into `dir`. It returns the paths it wrote.
pub trait GenerationStep {
    /// Stable identifier used in error messages and logs
    fn name(&self) -> &'static str;

    /// Run the step against `dir`
    fn execute(&self, generator: &dyn Generator, dir: &Path) -> Result<Vec<PathBuf>>;
}

/// A named function used as a step
#[derive(Clone, Copy)]
pub struct FnStep {
    name: &'static str,
    f: StepFn,
}

impl FnStep {
    pub const fn new(name: &'static str, f: StepFn) -> Self {
        Self { name, f }
    }
}

impl fmt::Debug for FnStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnStep").field(&self.name).finish()
    }
}

impl GenerationStep for FnStep {
    fn name(&self) -> &'static str {
        self.name
    }

    fn execute(&self, generator: &dyn Generator, dir: &Path) -> Result<Vec<PathBuf>> {
        (self.f)(generator, dir)
    }
}

/// The step a chain stopped at, with its error
#[derive(Debug)]
pub struct StepFailure {
    pub step: &'static str,
    pub source: CodegenError,
}

/// Steps evaluated left to right; the first failure stops the chain.
///
/// Chains hold no per-run state and can be run any number of times.
#[derive(Default)]
pub struct GeneratorChain {
    steps: Vec<Box<dyn GenerationStep>>,
}

impl GeneratorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step
    pub fn with_step(mut self, step: impl GenerationStep + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Step names in execution order
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run every step against `dir`, returning all files written.
    ///
    /// # Errors
    ///
    /// Returns the first failing step. Steps after it do not run; files
    /// written by steps before it are left in place.
    pub fn run(
        &self,
        generator: &dyn Generator,
        dir: &Path,
    ) -> std::result::Result<Vec<PathBuf>, StepFailure> {
        let mut written = Vec::new();
        for step in &self.steps {
            let files = step.execute(generator, dir).map_err(|source| StepFailure {
                step: step.name(),
                source,
            })?;
            debug!(step = step.name(), files = files.len(), "Step completed");
            written.extend(files);
        }
        Ok(written)
    }
}

impl fmt::Debug for GeneratorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.step_names()).finish()
    }
}
