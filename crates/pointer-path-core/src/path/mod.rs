//! Path compilation and addressing
//!
//! - [`Pointer`]: one concrete location
//! - [`NestedPointer`]: a path with `*`/`**` segments, interpreted by the resolver chain
//! - [`PathCompiler`]: turns strings into either
//! - [`PointerCache`]: bounded memo of single-segment pointers used during fan-out

pub mod cache;
pub mod compiler;
pub mod nested;
pub mod pointer;
pub mod resolver;
pub mod segment;

pub use cache::{PointerCache, DEFAULT_CACHE_CAPACITY};
pub use compiler::PathCompiler;
pub use nested::NestedPointer;
pub use pointer::Pointer;
pub use resolver::Stage;
pub use segment::Segment;
