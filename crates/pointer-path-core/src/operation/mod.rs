//! Declarative copy/build specs and the pieces they are assembled from
//!
//! - [`CopySpec`] / [`BuildSpec`]: what to move where
//! - [`CopySpecDecorator`] / [`BuildSpecDecorator`]: the same specs with every
//!   path compiled once and memoized
//! - [`NodeFilter`] and [`Transform`]: per-match predicates and rewrites

pub mod build_spec;
pub mod copy_spec;
pub mod decorator;
pub mod filter;
pub mod transform;

pub use build_spec::{BuildSpec, LiteralEntry, PutEntry, PutMode};
pub use copy_spec::{CopySpec, CopySpecBuilder, FromRecord, SharedFilter, ROOT};
pub use decorator::{
    BuildSpecDecorator, CompiledBuild, CompiledCopy, CompiledFrom, CopySpecDecorator,
};
pub use filter::{Comparison, Negate, NodeFilter, PointerFilter};
pub use transform::{Arguments, Transform};
