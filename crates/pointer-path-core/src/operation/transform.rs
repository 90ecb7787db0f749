//! Value transforms applied at matched locations

use std::collections::HashMap;

use crate::errors::Result;
use crate::types::Scalar;

/// Per-run arguments handed to resettable transforms
pub type Arguments = HashMap<String, Scalar>;

/// A function over one matched value
///
/// A resettable transform reinitializes its replacement value from the run's
/// [`Arguments`] before each orchestration run, so one compiled spec can be
/// replayed with different external parameters.
pub trait Transform<N>: Send + Sync {
    /// # Errors
    ///
    /// Implementations fail when the value does not have the shape they expect.
    fn apply(&self, node: &N) -> Result<N>;

    fn is_resettable(&self) -> bool {
        false
    }

    fn reset(&mut self, _arguments: &Arguments) {}
}

impl<N, F> Transform<N> for F
where
    F: Fn(&N) -> N + Send + Sync,
{
    fn apply(&self, node: &N) -> Result<N> {
        Ok(self(node))
    }
}
