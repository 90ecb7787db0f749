//! Builder - places literal and looked-up values into a destination tree
//!
//! Lifecycle logging follows the same ownership rule as the copier: `build`
//! logs start/end/error, everything below logs at debug.

use std::marker::PhantomData;

use pointer_path_core::operation::{BuildSpec, BuildSpecDecorator, PutMode};
use pointer_path_core::types::{CoercionType, Scalar};
use pointer_path_core::{log_op_end, log_op_error, log_op_start};
use pointer_path_core::{EngineConfig, PathCompiler, Result, TreeNode};

/// Applies a fixed list of build specs to trees of type `N`
pub struct Builder<N> {
    specs: Vec<BuildSpecDecorator>,
    _node: PhantomData<fn() -> N>,
}

impl<N: TreeNode> Builder<N> {
    /// # Errors
    ///
    /// Returns `SpecValidation` naming the first spec with a malformed path.
    pub fn new(specs: Vec<BuildSpec>) -> Result<Self> {
        Self::with_compiler(PathCompiler::default(), specs)
    }

    /// Builder using the cache and descent settings of `config`
    ///
    /// Also initializes logging with the configured profile.
    ///
    /// # Errors
    ///
    /// As [`Builder::new`].
    pub fn from_config(config: &EngineConfig, specs: Vec<BuildSpec>) -> Result<Self> {
        config.init_logging();
        Self::with_compiler(PathCompiler::from_config(config), specs)
    }

    /// # Errors
    ///
    /// As [`Builder::new`].
    pub fn with_compiler(compiler: PathCompiler, specs: Vec<BuildSpec>) -> Result<Self> {
        let specs: Vec<_> = specs
            .into_iter()
            .map(|spec| BuildSpecDecorator::new(spec, compiler.clone()))
            .collect();
        for spec in &specs {
            spec.verify()?;
        }
        Ok(Self {
            specs,
            _node: PhantomData,
        })
    }

    pub fn spec_count(&self) -> usize {
        self.specs.len()
    }

    /// Place every literal, then every looked-up value
    ///
    /// `lookup` receives an entry's key and the type it will be coerced to.
    /// A `None` or null result skips the entry.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` when a destination cannot be created or
    /// appended to, or `UnsupportedCoercion` when a value cannot take the
    /// requested type.
    pub fn build<F>(&self, lookup: F, into: &mut N) -> Result<()>
    where
        F: Fn(&str, &CoercionType) -> Option<Scalar>,
    {
        log_op_start!("build", spec_count = self.specs.len());
        let start = std::time::Instant::now();

        self.build_literals(into)
            .and_then(|()| self.build_nodes(&lookup, into))
            .map_err(|e| {
                log_op_error!(
                    "build",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                e
            })?;

        log_op_end!("build", duration_ms = start.elapsed().as_millis() as u64);
        Ok(())
    }

    /// Place only the literal entries
    ///
    /// A spec without literals leaves `into` untouched, including its target.
    ///
    /// # Errors
    ///
    /// As [`Builder::build`].
    pub fn build_literals(&self, into: &mut N) -> Result<()> {
        for spec in &self.specs {
            if spec.spec().literals().is_empty() {
                continue;
            }
            let node = spec.compiled()?.into.object_at(into)?;
            for (literal, pointer) in spec.literals()? {
                let value = N::coerce(literal.value.clone(), &CoercionType::Native)?;
                pointer.set(node, value)?;
            }
        }
        Ok(())
    }

    /// Place only the looked-up entries
    ///
    /// # Errors
    ///
    /// As [`Builder::build`].
    pub fn build_nodes<F>(&self, lookup: F, into: &mut N) -> Result<()>
    where
        F: Fn(&str, &CoercionType) -> Option<Scalar>,
    {
        for spec in &self.specs {
            let node = spec.compiled()?.into.object_at(into)?;
            for (entry, pointer) in spec.puts()? {
                let as_type = spec.spec().type_of(entry);
                let Some(value) = lookup(entry.from.as_str(), &as_type).filter(|v| !v.is_null()) else {
                    tracing::debug!(key = %entry.from, "no value for build entry");
                    continue;
                };

                let value = N::coerce(value, &as_type)?;
                match entry.mode {
                    PutMode::Put => pointer.set(node, value)?,
                    PutMode::Add => pointer.add(node, value)?,
                }
            }
        }
        Ok(())
    }
}
