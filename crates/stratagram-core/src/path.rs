//! Construct paths from the cloud assembly metadata.
//!
//! Metadata keys are construct paths such as `/appStack/baseVPC/Resource`.
//! Splitting on `/` keeps the leading empty segment, so `segment(1)` is the
//! stack name and `segment(2)` the first construct below it.

use std::fmt;

/// Suffix the CDK appends to the construct id of a nested stack.
pub const NESTED_STACK_SUFFIX: &str = ".NestedStack";

/// A metadata path split into its `/`-separated segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestPath<'a> {
    raw: &'a str,
    segments: Vec<&'a str>,
}

impl<'a> ManifestPath<'a> {
    /// Splits `raw` into segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratagram_core::path::ManifestPath;
    ///
    /// let path = ManifestPath::new("/appStack/baseVPC/Resource");
    /// assert_eq!(path.len(), 4);
    /// assert_eq!(path.segment(1), Some("appStack"));
    /// assert_eq!(path.last(), "Resource");
    /// ```
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            segments: raw.split('/').collect(),
        }
    }

    /// The unsplit path.
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Number of segments, including the leading empty one.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn segment(&self, index: usize) -> Option<&'a str> {
        self.segments.get(index).copied()
    }

    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    /// The final segment. Never fails since `split` yields at least one item.
    pub fn last(&self) -> &'a str {
        self.segments.last().copied().unwrap_or_default()
    }

    /// Returns `true` when the path belongs to `stack` and names a construct
    /// below it, i.e. `/stack/.../last`.
    pub fn is_scoped_to(&self, stack: &str) -> bool {
        self.len() >= 3 && self.segment(1) == Some(stack)
    }

    /// The sub-path starting at the last segment ending in `.NestedStack`.
    ///
    /// Returns `None` when there is no such segment or when it is the final
    /// segment of the path.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratagram_core::path::ManifestPath;
    ///
    /// let path = ManifestPath::new("/app/Db.NestedStack/Cluster/Resource");
    /// assert_eq!(
    ///     path.nested_stack_tail().as_deref(),
    ///     Some("Db.NestedStack/Cluster/Resource")
    /// );
    /// ```
    pub fn nested_stack_tail(&self) -> Option<String> {
        let index = self
            .segments
            .iter()
            .rposition(|segment| segment.ends_with(NESTED_STACK_SUFFIX))?;

        if index == 0 || index >= self.len() - 1 {
            return None;
        }

        Some(self.segments[index..].join("/"))
    }
}

impl fmt::Display for ManifestPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw)
    }
}
