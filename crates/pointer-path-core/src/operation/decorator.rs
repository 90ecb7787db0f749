//! Compiled forms of copy and build specs
//!
//! A decorator owns its spec and compiles every path the spec references the
//! first time it is asked for a pointer. The outcome, success or failure, is
//! kept for the decorator's lifetime. `verify` forces that compilation and
//! names the owning spec in any error it reports.

use std::sync::OnceLock;

use crate::errors::{PointerError, Result};
use crate::operation::build_spec::{BuildSpec, LiteralEntry, PutEntry};
use crate::operation::copy_spec::{CopySpec, FromRecord};
use crate::operation::transform::Arguments;
use crate::path::{NestedPointer, PathCompiler, Pointer};

/// Compiled pointers of one [`FromRecord`], parallel to its effective lists
#[derive(Debug, Clone)]
pub struct CompiledFrom {
    pub from: NestedPointer,
    pub includes: Vec<NestedPointer>,
    pub excludes: Vec<NestedPointer>,
    pub transforms: Vec<NestedPointer>,
}

#[derive(Debug, Clone)]
pub struct CompiledCopy {
    /// Destination; never a nested path
    pub into: Pointer,
    pub froms: Vec<CompiledFrom>,
}

pub struct CopySpecDecorator<N> {
    spec: CopySpec<N>,
    compiler: PathCompiler,
    compiled: OnceLock<Result<CompiledCopy>>,
}

impl<N> CopySpecDecorator<N> {
    pub fn new(spec: CopySpec<N>, compiler: PathCompiler) -> Self {
        Self {
            spec,
            compiler,
            compiled: OnceLock::new(),
        }
    }

    pub fn spec(&self) -> &CopySpec<N> {
        &self.spec
    }

    /// Compile every referenced path now
    ///
    /// # Errors
    ///
    /// Returns `SpecValidation` naming this spec if any path is malformed.
    pub fn verify(&self) -> Result<()> {
        self.compiled().map(|_| ())
    }

    /// The compiled pointers, compiling on first use
    ///
    /// # Errors
    ///
    /// As [`CopySpecDecorator::verify`].
    pub fn compiled(&self) -> Result<&CompiledCopy> {
        self.compiled
            .get_or_init(|| {
                compile_copy(&self.spec, &self.compiler).map_err(|source| {
                    PointerError::SpecValidation {
                        spec: self.spec.to_string(),
                        source: Box::new(source),
                    }
                })
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Each source record paired with its compiled pointers
    ///
    /// # Errors
    ///
    /// As [`CopySpecDecorator::verify`].
    pub fn froms(&self) -> Result<impl Iterator<Item = (&FromRecord<N>, &CompiledFrom)>> {
        let compiled = self.compiled()?;
        Ok(self.spec.froms().iter().zip(compiled.froms.iter()))
    }

    pub fn reset_transforms(&mut self, arguments: &Arguments) {
        self.spec.reset_transforms(arguments);
    }
}

fn compile_copy<N>(spec: &CopySpec<N>, compiler: &PathCompiler) -> Result<CompiledCopy> {
    let into = compiler.compile(spec.target())?;
    let mut froms = Vec::with_capacity(spec.froms().len());

    for record in spec.froms() {
        let includes = record
            .includes()
            .into_iter()
            .map(|(path, _)| compiler.compile_nested(path))
            .collect::<Result<Vec<_>>>()?;
        let excludes = record
            .excludes()
            .iter()
            .map(|path| compiler.compile_nested(path))
            .collect::<Result<Vec<_>>>()?;
        let transforms = record
            .transforms()
            .map(|(path, _)| compiler.compile_nested(path))
            .collect::<Result<Vec<_>>>()?;

        froms.push(CompiledFrom {
            from: compiler.compile_nested(record.path())?,
            includes,
            excludes,
            transforms,
        });
    }

    tracing::debug!(spec = %spec, froms = froms.len(), "compiled copy spec");
    Ok(CompiledCopy { into, froms })
}

#[derive(Debug, Clone)]
pub struct CompiledBuild {
    pub into: Pointer,
    pub literals: Vec<Pointer>,
    pub puts: Vec<Pointer>,
}

#[derive(Debug)]
pub struct BuildSpecDecorator {
    spec: BuildSpec,
    compiler: PathCompiler,
    compiled: OnceLock<Result<CompiledBuild>>,
}

impl BuildSpecDecorator {
    pub fn new(spec: BuildSpec, compiler: PathCompiler) -> Self {
        Self {
            spec,
            compiler,
            compiled: OnceLock::new(),
        }
    }

    pub fn spec(&self) -> &BuildSpec {
        &self.spec
    }

    /// # Errors
    ///
    /// Returns `SpecValidation` naming this spec if any path is malformed.
    pub fn verify(&self) -> Result<()> {
        self.compiled().map(|_| ())
    }

    /// # Errors
    ///
    /// As [`BuildSpecDecorator::verify`].
    pub fn compiled(&self) -> Result<&CompiledBuild> {
        self.compiled
            .get_or_init(|| {
                compile_build(&self.spec, &self.compiler).map_err(|source| {
                    PointerError::SpecValidation {
                        spec: self.spec.to_string(),
                        source: Box::new(source),
                    }
                })
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Literal entries paired with their destination pointers
    ///
    /// # Errors
    ///
    /// As [`BuildSpecDecorator::verify`].
    pub fn literals(&self) -> Result<impl Iterator<Item = (&LiteralEntry, &Pointer)>> {
        let compiled = self.compiled()?;
        Ok(self.spec.literals().iter().zip(compiled.literals.iter()))
    }

    /// Lookup entries paired with their destination pointers
    ///
    /// # Errors
    ///
    /// As [`BuildSpecDecorator::verify`].
    pub fn puts(&self) -> Result<impl Iterator<Item = (&PutEntry, &Pointer)>> {
        let compiled = self.compiled()?;
        Ok(self.spec.puts().iter().zip(compiled.puts.iter()))
    }
}

fn compile_build(spec: &BuildSpec, compiler: &PathCompiler) -> Result<CompiledBuild> {
    let into = compiler.compile(spec.target())?;
    let literals = spec
        .literals()
        .iter()
        .map(|literal| compiler.compile(&literal.into))
        .collect::<Result<Vec<_>>>()?;
    let puts = spec
        .puts()
        .iter()
        .map(|put| compiler.compile(&put.into))
        .collect::<Result<Vec<_>>>()?;

    Ok(CompiledBuild {
        into,
        literals,
        puts,
    })
}
