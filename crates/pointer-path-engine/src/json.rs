//! Engines over `serde_json::Value` trees

use serde_json::Value;

use crate::builder::Builder;
use crate::copier::Copier;

pub type JsonCopier = Copier<Value>;
pub type JsonBuilder = Builder<Value>;
