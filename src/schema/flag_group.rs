use polars::prelude::*;

use crate::error::PipelineError;

/// A set of mutually exclusive one-hot indicator columns.
///
/// Invariant: after [`FlagGroup::apply`], at most one flag in the group is 1
/// per row; all others are 0.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagGroup {
    columns: Vec<String>,
}

impl FlagGroup {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { columns: columns.into_iter().map(Into::into).collect() }
    }

    /// Event-team indicators carried by the shipped demand models.
    pub fn teams() -> Self {
        Self::new(["Team_ChicagoBulls", "Team_FireFC", "Team_StarsFC"])
    }

    /// Flag column names in declared order.
    #[inline] pub fn columns(&self) -> &[String] { &self.columns }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Match `choice` against the group, either by full column name or by the
    /// suffix after the group prefix (`"FireFC"` matches `"Team_FireFC"`).
    pub fn resolve(&self, choice: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|name| {
                name.as_str() == choice
                    || name.rsplit_once('_').is_some_and(|(_, suffix)| suffix == choice)
            })
            .map(String::as_str)
    }

    /// Reset every flag column in `frame` to 0, then set the column matching
    /// `choice` (if any) to 1. An unresolvable choice is a schema mismatch.
    pub fn apply(&self, frame: &mut DataFrame, choice: Option<&str>) -> Result<(), PipelineError> {
        let height = frame.height();
        for name in &self.columns {
            frame.with_column(Series::new(name.as_str().into(), vec![0.0f64; height]))?;
        }

        if let Some(choice) = choice {
            let name = self.resolve(choice).ok_or_else(|| {
                PipelineError::SchemaMismatch(format!("flag '{choice}' is not part of the group"))
            })?;
            frame.with_column(Series::new(name.into(), vec![1.0f64; height]))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use polars::prelude::*;

    use super::*;
    use crate::error::PipelineError;

    fn flag_values(frame: &DataFrame, name: &str) -> Vec<f64> {
        frame.column(name).unwrap().f64().unwrap().into_iter().flatten().collect()
    }

    #[test]
    fn apply_sets_exactly_one_flag() {
        let mut frame = df!["Team_ChicagoBulls" => [1.0], "Team_FireFC" => [1.0], "Team_StarsFC" => [1.0]].unwrap();
        FlagGroup::teams().apply(&mut frame, Some("FireFC")).unwrap();

        assert_eq!(flag_values(&frame, "Team_ChicagoBulls"), vec![0.0]);
        assert_eq!(flag_values(&frame, "Team_FireFC"), vec![1.0]);
        assert_eq!(flag_values(&frame, "Team_StarsFC"), vec![0.0]);
    }

    #[test]
    fn apply_without_choice_resets_all_flags() {
        let mut frame = df!["Team_ChicagoBulls" => [1.0], "Team_FireFC" => [1.0], "Team_StarsFC" => [0.0]].unwrap();
        FlagGroup::teams().apply(&mut frame, None).unwrap();

        for name in FlagGroup::teams().columns() {
            assert_eq!(flag_values(&frame, name), vec![0.0]);
        }
    }

    #[test]
    fn apply_creates_missing_flag_columns() {
        let mut frame = df!["hour" => [12.0]].unwrap();
        FlagGroup::teams().apply(&mut frame, Some("Team_StarsFC")).unwrap();

        assert_eq!(flag_values(&frame, "Team_StarsFC"), vec![1.0]);
        assert_eq!(flag_values(&frame, "Team_FireFC"), vec![0.0]);
    }

    #[test]
    fn unknown_choice_is_a_schema_mismatch() {
        let mut frame = df!["hour" => [12.0]].unwrap();
        let err = FlagGroup::teams().apply(&mut frame, Some("Cubs")).unwrap_err();
        assert!(matches!(err, PipelineError::SchemaMismatch(_)));
    }

    #[test]
    fn resolve_accepts_full_name_or_suffix() {
        let group = FlagGroup::teams();
        assert_eq!(group.resolve("Team_FireFC"), Some("Team_FireFC"));
        assert_eq!(group.resolve("FireFC"), Some("Team_FireFC"));
        assert_eq!(group.resolve("Cubs"), None);
    }
}
