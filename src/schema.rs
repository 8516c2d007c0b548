mod column;
mod flag_group;

pub use column::{ColumnSpec, DefaultPolicy};
pub use flag_group::FlagGroup;

use polars::frame::DataFrame;

use crate::error::PipelineError;

/// Ordered set of named columns required by a predictor.
///
/// Every column carries its own default-resolution policy, so fallback
/// behavior is declared up front instead of being buried in control flow.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    columns: Vec<ColumnSpec>,
}

impl FeatureSchema {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self { columns }
    }

    /// Build a schema over `names` applying the same policy to every column.
    pub fn with_policy<I, S>(names: I, policy: DefaultPolicy) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: names.into_iter().map(|name| ColumnSpec::new(name, policy)).collect(),
        }
    }

    /// Number of columns in the schema.
    #[inline] pub fn len(&self) -> usize { self.columns.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.columns.is_empty() }

    /// Column descriptors in declared order.
    #[inline] pub fn columns(&self) -> &[ColumnSpec] { &self.columns }

    /// Column names in declared order.
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|spec| spec.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|spec| spec.name == name)
    }

    pub fn spec(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|spec| spec.name == name)
    }

    /// Replace the policy of an existing column. Returns false if the column
    /// is not part of the schema.
    pub fn set_policy(&mut self, name: &str, policy: DefaultPolicy) -> bool {
        match self.columns.iter_mut().find(|spec| spec.name == name) {
            Some(spec) => { spec.default = policy; true }
            None => false,
        }
    }

    /// Check that `frame` provides every schema column.
    pub fn validate(&self, frame: &DataFrame) -> Result<(), PipelineError> {
        for spec in &self.columns {
            if frame.column(&spec.name).is_err() {
                return Err(PipelineError::SchemaMismatch(format!(
                    "constructed row is missing column '{}'",
                    spec.name
                )));
            }
        }
        Ok(())
    }

    /// Project `frame` onto exactly the schema columns, in declared order.
    /// Extra columns are dropped; missing columns are a fatal mismatch.
    pub fn align(&self, frame: &DataFrame) -> Result<DataFrame, PipelineError> {
        self.validate(frame)?;
        Ok(frame.select(self.names())?)
    }
}

#[cfg(test)]
mod tests {
    use polars::prelude::*;

    use super::*;
    use crate::error::PipelineError;

    fn schema() -> FeatureSchema {
        FeatureSchema::with_policy(["hour", "temp", "baseline"], DefaultPolicy::Mode)
    }

    #[test]
    fn with_policy_keeps_declared_order() {
        let schema = schema();
        assert_eq!(schema.names(), vec!["hour", "temp", "baseline"]);
        assert_eq!(schema.len(), 3);
        assert!(schema.contains("temp"));
        assert!(!schema.contains("wind_speed"));
    }

    #[test]
    fn set_policy_updates_existing_column() {
        let mut schema = schema();
        assert!(schema.set_policy("temp", DefaultPolicy::Median));
        assert_eq!(schema.spec("temp").unwrap().default, DefaultPolicy::Median);
        assert!(!schema.set_policy("missing", DefaultPolicy::Zero));
    }

    #[test]
    fn align_reorders_and_drops_extras() {
        let frame = df![
            "extra" => [1.0],
            "baseline" => [3.0],
            "temp" => [2.0],
            "hour" => [1.0],
        ]
        .unwrap();

        let aligned = schema().align(&frame).unwrap();
        let names: Vec<&str> = aligned.get_column_names().iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["hour", "temp", "baseline"]);
    }

    #[test]
    fn align_fails_on_missing_column() {
        let frame = df!["hour" => [1.0], "temp" => [2.0]].unwrap();
        let err = schema().align(&frame).unwrap_err();
        assert!(matches!(err, PipelineError::SchemaMismatch(_)));
    }
}
