//! Copier - executes copy specs from a source tree into a destination tree
//!
//! ## Logging Ownership
//!
//! The copier owns lifecycle logging for a copy run:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Compilation and traversal below it only use `tracing::debug!()`.

use pointer_path_core::operation::{Arguments, CopySpec, CopySpecDecorator, NodeFilter};
use pointer_path_core::{log_op_end, log_op_error, log_op_start};
use pointer_path_core::{EngineConfig, PathCompiler, Result, TreeNode};

/// Applies a fixed list of copy specs
///
/// Every path is compiled and verified when the copier is created, so a
/// malformed spec never reaches a copy run.
pub struct Copier<N> {
    specs: Vec<CopySpecDecorator<N>>,
}

impl<N: TreeNode + 'static> Copier<N> {
    /// Copier over `specs` using the shared default compiler
    ///
    /// # Errors
    ///
    /// Returns `SpecValidation` naming the first spec with a malformed path.
    pub fn new(specs: Vec<CopySpec<N>>) -> Result<Self> {
        Self::with_compiler(PathCompiler::default(), specs)
    }

    /// Copier using the cache and descent settings of `config`
    ///
    /// Also initializes logging with the configured profile.
    ///
    /// # Errors
    ///
    /// As [`Copier::new`].
    pub fn from_config(config: &EngineConfig, specs: Vec<CopySpec<N>>) -> Result<Self> {
        config.init_logging();
        Self::with_compiler(PathCompiler::from_config(config), specs)
    }

    /// # Errors
    ///
    /// As [`Copier::new`].
    pub fn with_compiler(compiler: PathCompiler, specs: Vec<CopySpec<N>>) -> Result<Self> {
        let specs: Vec<_> = specs
            .into_iter()
            .map(|spec| CopySpecDecorator::new(spec, compiler.clone()))
            .collect();
        for spec in &specs {
            spec.verify()?;
        }
        tracing::debug!(spec_count = specs.len(), "copier ready");
        Ok(Self { specs })
    }

    pub fn spec_count(&self) -> usize {
        self.specs.len()
    }

    /// Reinitialize every resettable transform from `arguments`
    pub fn reset_transforms(&mut self, arguments: &Arguments) {
        for spec in &mut self.specs {
            spec.reset_transforms(arguments);
        }
    }

    /// Reset transforms with `arguments`, then copy
    ///
    /// # Errors
    ///
    /// As [`Copier::copy`].
    pub fn copy_with(&mut self, arguments: &Arguments, from: &N, into: &mut N) -> Result<()> {
        self.reset_transforms(arguments);
        self.copy(from, into)
    }

    /// Run every spec in declaration order
    ///
    /// For each source record, every match is copied through each include,
    /// then each exclude is removed from the destination and each transform
    /// is applied there. A record filter that rejects a match skips that match.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` when a destination location cannot hold a
    /// copied value, `MissingParent` when a transform target has no parent, or
    /// any error raised by a transform.
    pub fn copy(&self, from: &N, into: &mut N) -> Result<()> {
        log_op_start!("copy", spec_count = self.specs.len());
        let start = std::time::Instant::now();

        self.copy_impl(from, into).map_err(|e| {
            log_op_error!(
                "copy",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!("copy", duration_ms = start.elapsed().as_millis() as u64);
        Ok(())
    }

    fn copy_impl(&self, from: &N, into: &mut N) -> Result<()> {
        for spec in &self.specs {
            let compiled = spec.compiled()?;
            let into_node = compiled.into.object_at(into)?;

            for (record, pointers) in spec.froms()? {
                let matches = pointers.from.all_at(from);
                tracing::debug!(path = record.path(), match_count = matches.len(), "copy source");

                for value in matches {
                    if let Some(filter) = record.filter() {
                        if !filter.test(value) {
                            continue;
                        }
                    }

                    let includes = record.includes().into_iter().zip(&pointers.includes);
                    for ((_, filter), pointer) in includes {
                        let filter = filter.map(|f| &**f as &dyn NodeFilter<N>);
                        pointer.copy_filtered(value, into_node, filter)?;
                    }

                    for pointer in &pointers.excludes {
                        pointer.remove(into_node);
                    }

                    for ((_, transform), pointer) in record.transforms().zip(&pointers.transforms) {
                        pointer.apply(into_node, transform)?;
                    }
                }
            }
        }
        Ok(())
    }
}
