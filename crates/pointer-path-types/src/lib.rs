//! Shared vocabulary for the pointer-path crates
//!
//! This crate provides the small set of types used by both the core path
//! engine and the orchestration engines:
//!
//! - **Node kinds**: `NodeKind` (Array, Map, Value)
//! - **External values**: `Scalar` and the `CoercionType` it is converted with
//! - **Schema constants**: Canonical field keys and event names for logging

pub mod kind;
pub mod scalar;
pub mod schema;

pub use kind::NodeKind;
pub use scalar::{CoercionType, Scalar};
