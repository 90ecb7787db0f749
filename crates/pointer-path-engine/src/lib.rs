//! Pointer Path Engine - Orchestration layer
//!
//! Executes compiled copy and build specs against trees:
//! - [`Copier`]: moves matched subtrees from a source tree into a destination
//! - [`Builder`]: places literal and looked-up values into a destination
//!
//! Both verify every spec path when they are constructed.

pub mod builder;
pub mod copier;
pub mod json;

pub use builder::Builder;
pub use copier::Copier;
