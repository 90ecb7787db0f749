//! Declarative copy specification
//!
//! A [`CopySpec`] names a destination (`target`, the root by default) and any
//! number of source paths. Each distinct source path owns exactly one
//! [`FromRecord`]; every builder call naming the same source augments that
//! record instead of replacing it.
//!
//! Specs are assembled with [`CopySpecBuilder`] and frozen by
//! [`CopySpecBuilder::build`], which reports the first declaration mistake.
//!
//! ```
//! use pointer_path_core::operation::CopySpec;
//! use serde_json::Value;
//!
//! let spec = CopySpec::<Value>::builder()
//!     .from_include("/person", &["/firstName", "/age"])
//!     .from_exclude("/person", &["/ssn"])
//!     .build()
//!     .unwrap();
//! assert_eq!(spec.froms().len(), 1);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::errors::{PointerError, Result};
use crate::operation::filter::NodeFilter;
use crate::operation::transform::{Arguments, Transform};

/// The document root path
pub const ROOT: &str = "";

pub type SharedFilter<N> = Arc<dyn NodeFilter<N>>;

/// Everything declared against one source path
pub struct FromRecord<N> {
    path: String,
    filter: Option<SharedFilter<N>>,
    includes: Vec<(String, Option<SharedFilter<N>>)>,
    excludes: Vec<String>,
    transforms: Vec<(String, Box<dyn Transform<N>>)>,
}

impl<N> FromRecord<N> {
    fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            filter: None,
            includes: Vec::new(),
            excludes: Vec::new(),
            transforms: Vec::new(),
        }
    }

    /// The source path
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn filter(&self) -> Option<&SharedFilter<N>> {
        self.filter.as_ref()
    }

    /// Includes as declared; may be empty
    pub fn declared_includes(&self) -> &[(String, Option<SharedFilter<N>>)] {
        &self.includes
    }

    /// Includes in effect: with none declared, the whole match filtered by the record's filter
    pub fn includes(&self) -> Vec<(&str, Option<&SharedFilter<N>>)> {
        if self.includes.is_empty() {
            return vec![(ROOT, self.filter.as_ref())];
        }
        self.includes
            .iter()
            .map(|(path, filter)| (path.as_str(), filter.as_ref()))
            .collect()
    }

    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }

    pub fn transforms(&self) -> impl Iterator<Item = (&str, &dyn Transform<N>)> {
        self.transforms
            .iter()
            .map(|(path, transform)| (path.as_str(), transform.as_ref()))
    }

    fn set_filter(&mut self, filter: SharedFilter<N>) -> Result<()> {
        if self.filter.is_some() {
            return Err(PointerError::invalid(
                &self.path,
                "may only have one filter per from path",
            ));
        }
        self.filter = Some(filter);
        Ok(())
    }

    /// Ordered-map insert: a repeated include path keeps its position, last filter wins
    fn add_include(&mut self, include: &str, filter: Option<SharedFilter<N>>) {
        match self.includes.iter_mut().find(|(path, _)| path == include) {
            Some(entry) => entry.1 = filter,
            None => self.includes.push((include.to_string(), filter)),
        }
    }

    fn add_transform(&mut self, value: &str, transform: Box<dyn Transform<N>>) {
        match self.transforms.iter_mut().find(|(path, _)| path == value) {
            Some(entry) => entry.1 = transform,
            None => self.transforms.push((value.to_string(), transform)),
        }
    }

    fn reset_transforms(&mut self, arguments: &Arguments) {
        for (_, transform) in &mut self.transforms {
            if transform.is_resettable() {
                transform.reset(arguments);
            }
        }
    }
}

impl<N> fmt::Display for FromRecord<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let includes: Vec<&str> = self.includes.iter().map(|(p, _)| p.as_str()).collect();
        let transforms: Vec<&str> = self.transforms.iter().map(|(p, _)| p.as_str()).collect();
        write!(
            f,
            "From{{from='{}', filtered={}, includes={:?}, excludes={:?}, transforms={:?}}}",
            self.path,
            self.filter.is_some(),
            includes,
            self.excludes,
            transforms
        )
    }
}

/// A frozen copy specification
pub struct CopySpec<N> {
    target: String,
    froms: Vec<FromRecord<N>>,
}

impl<N> CopySpec<N> {
    /// Start a spec that copies into the destination root
    pub fn builder() -> CopySpecBuilder<N> {
        CopySpecBuilder {
            spec: CopySpec {
                target: ROOT.to_string(),
                froms: Vec::new(),
            },
            error: None,
        }
    }

    /// Destination path, relative to the destination root
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Source records in declaration order
    pub fn froms(&self) -> &[FromRecord<N>] {
        &self.froms
    }

    /// True if any declared transform is resettable
    pub fn has_resettable_transforms(&self) -> bool {
        self.froms
            .iter()
            .flat_map(|from| from.transforms.iter())
            .any(|(_, transform)| transform.is_resettable())
    }

    /// Reinitialize every resettable transform from `arguments`
    pub fn reset_transforms(&mut self, arguments: &Arguments) {
        for from in &mut self.froms {
            from.reset_transforms(arguments);
        }
    }
}

impl<N> fmt::Display for CopySpec<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CopySpec{{into='{}', from=[", self.target)?;
        for (i, from) in self.froms.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", from)?;
        }
        f.write_str("]}")
    }
}

impl<N> fmt::Debug for CopySpec<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Chained, by-value assembly of a [`CopySpec`]
pub struct CopySpecBuilder<N> {
    spec: CopySpec<N>,
    error: Option<PointerError>,
}

impl<N: 'static> CopySpecBuilder<N> {
    /// Copy into `path` instead of the destination root
    pub fn with_target(mut self, path: impl Into<String>) -> Self {
        self.spec.target = path.into();
        self
    }

    /// Copy everything matched by `from`
    pub fn from(mut self, from: &str) -> Self {
        self.record(from);
        self
    }

    /// Copy matches of `from` accepted by `filter`; one filter per source path
    pub fn from_filtered(mut self, from: &str, filter: impl NodeFilter<N> + 'static) -> Self {
        let filter: SharedFilter<N> = Arc::new(filter);
        if let Err(err) = self.record(from).set_filter(filter) {
            self.fail(err);
        }
        self
    }

    /// Copy only the listed sub-paths of each match of `from`
    pub fn from_include(mut self, from: &str, includes: &[&str]) -> Self {
        let record = self.record(from);
        for include in includes {
            record.add_include(include, None);
        }
        self
    }

    /// Copy the sub-path `include` of each match of `from` when `filter` accepts it
    pub fn from_include_filtered(
        mut self,
        from: &str,
        include: &str,
        filter: impl NodeFilter<N> + 'static,
    ) -> Self {
        self.record(from)
            .add_include(include, Some(Arc::new(filter) as SharedFilter<N>));
        self
    }

    /// `from_include` against the source root
    pub fn include(self, includes: &[&str]) -> Self {
        self.from_include(ROOT, includes)
    }

    pub fn include_filtered(self, include: &str, filter: impl NodeFilter<N> + 'static) -> Self {
        self.from_include_filtered(ROOT, include, filter)
    }

    /// Remove the listed sub-paths from the destination after copying matches of `from`
    pub fn from_exclude(mut self, from: &str, excludes: &[&str]) -> Self {
        let record = self.record(from);
        record
            .excludes
            .extend(excludes.iter().map(|exclude| exclude.to_string()));
        self
    }

    /// `from_exclude` against the source root
    pub fn exclude(self, excludes: &[&str]) -> Self {
        self.from_exclude(ROOT, excludes)
    }

    /// Apply `transform` at `value` in the destination after copying matches of `from`
    pub fn from_transform(
        mut self,
        from: &str,
        value: &str,
        transform: impl Transform<N> + 'static,
    ) -> Self {
        self.record(from).add_transform(value, Box::new(transform));
        self
    }

    /// `from_transform` against the source root
    pub fn transform(self, value: &str, transform: impl Transform<N> + 'static) -> Self {
        self.from_transform(ROOT, value, transform)
    }

    /// Freeze the spec
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` for the first conflicting declaration, such
    /// as a second filter on the same source path.
    pub fn build(self) -> Result<CopySpec<N>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.spec),
        }
    }

    fn record(&mut self, from: &str) -> &mut FromRecord<N> {
        let index = match self.spec.froms.iter().position(|r| r.path == from) {
            Some(index) => index,
            None => {
                self.spec.froms.push(FromRecord::new(from));
                self.spec.froms.len() - 1
            }
        };
        &mut self.spec.froms[index]
    }

    fn fail(&mut self, err: PointerError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}
