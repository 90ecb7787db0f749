//! Path compiler
//!
//! Entry point that turns path strings into [`Pointer`]s and
//! [`NestedPointer`]s. Compilation is the only place a path can fail to
//! parse; traversal afterwards only ever reports absence.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::errors::Result;
use crate::path::resolver::build_chain;
use crate::path::{NestedPointer, Pointer, PointerCache};

#[derive(Debug, Clone)]
pub struct PathCompiler {
    cache: Arc<PointerCache>,
    descent_fast_path: bool,
}

impl Default for PathCompiler {
    fn default() -> Self {
        Self::with_cache(PointerCache::global())
    }
}

impl PathCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile with a caller-owned pointer cache
    pub fn with_cache(cache: Arc<PointerCache>) -> Self {
        Self {
            cache,
            descent_fast_path: true,
        }
    }

    /// A compiler with a private cache sized by `config`
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            cache: Arc::new(PointerCache::new(config.cache_capacity)),
            descent_fast_path: config.descent_fast_path,
        }
    }

    pub fn with_descent_fast_path(mut self, enabled: bool) -> Self {
        self.descent_fast_path = enabled;
        self
    }

    pub fn cache(&self) -> &Arc<PointerCache> {
        &self.cache
    }

    /// Compile a concrete path
    ///
    /// # Errors
    ///
    /// Returns `MalformedPath` if the path is unparseable or contains `*`/`**`.
    pub fn compile(&self, path: &str) -> Result<Pointer> {
        Pointer::parse(path)
    }

    /// Compile a path that may contain `*` and `**` segments
    ///
    /// # Errors
    ///
    /// Returns `MalformedPath` if the path is unparseable.
    pub fn compile_nested(&self, path: &str) -> Result<NestedPointer> {
        let stages = build_chain(path)?;
        tracing::debug!(path = path, stages = stages.len(), "compiled nested pointer");
        Ok(NestedPointer::new(
            path,
            stages,
            Arc::clone(&self.cache),
            self.descent_fast_path,
        ))
    }
}
