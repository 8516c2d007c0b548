use polars::prelude::*;

use crate::error::PipelineError;

/// One (hex cell, predicted value) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct HexPrediction {
    pub hex_id: String,
    pub value: f64,
}

/// One (hour, predicted value) pair of a day forecast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourPrediction {
    pub hour: u32,
    pub value: f64,
}

/// Long-format prediction table ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutput {
    /// One row per spatial unit, in the predictor's declared target order.
    PerHex(Vec<HexPrediction>),
    /// One row per hour of the day template.
    PerHour(Vec<HourPrediction>),
}

impl PredictionOutput {
    pub fn len(&self) -> usize {
        match self {
            Self::PerHex(rows) => rows.len(),
            Self::PerHour(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Predicted values in table order.
    pub fn values(&self) -> Vec<f64> {
        match self {
            Self::PerHex(rows) => rows.iter().map(|r| r.value).collect(),
            Self::PerHour(rows) => rows.iter().map(|r| r.value).collect(),
        }
    }

    /// Observed (min, max) of the batch, `None` for an empty table.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.values().into_iter().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Materialize as a two-column frame for table output.
    pub fn to_frame(&self) -> Result<DataFrame, PipelineError> {
        let frame = match self {
            Self::PerHex(rows) => df![
                "hex_id" => rows.iter().map(|r| r.hex_id.as_str()).collect::<Vec<_>>(),
                "pred_trips" => rows.iter().map(|r| r.value).collect::<Vec<_>>(),
            ]?,
            Self::PerHour(rows) => df![
                "hour" => rows.iter().map(|r| r.hour).collect::<Vec<_>>(),
                "pred_trips" => rows.iter().map(|r| r.value).collect::<Vec<_>>(),
            ]?,
        };
        Ok(frame)
    }
}

/// Unpivot a single wide output vector into per-hex rows. Insertion order
/// follows the predictor's declared target order.
pub(crate) fn unpivot_per_hex(
    outputs: &[Vec<f64>],
    targets: &[String],
) -> Result<PredictionOutput, PipelineError> {
    let [row] = outputs else {
        return Err(PipelineError::PredictorFailure(format!(
            "expected one output row to unpivot, got {}",
            outputs.len()
        )));
    };
    if row.len() != targets.len() {
        return Err(PipelineError::PredictorFailure(format!(
            "output width {} does not match {} declared targets",
            row.len(),
            targets.len()
        )));
    }

    Ok(PredictionOutput::PerHex(
        targets
            .iter()
            .zip(row)
            .map(|(hex_id, value)| HexPrediction { hex_id: hex_id.clone(), value: *value })
            .collect(),
    ))
}

/// Keep one predicted scalar per hour of a day batch (first target).
pub(crate) fn per_hour(outputs: &[Vec<f64>]) -> Result<PredictionOutput, PipelineError> {
    let mut rows = Vec::with_capacity(outputs.len());
    for (hour, output) in outputs.iter().enumerate() {
        let value = output.first().ok_or_else(|| {
            PipelineError::PredictorFailure(format!("empty output vector at hour {hour}"))
        })?;
        rows.push(HourPrediction { hour: hour as u32, value: *value });
    }
    Ok(PredictionOutput::PerHour(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;

    fn targets(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unpivot_yields_one_row_per_target() {
        let out = unpivot_per_hex(&[vec![1.0, 2.0, 3.0]], &targets(&["a", "b", "c"])).unwrap();

        let PredictionOutput::PerHex(rows) = &out else { panic!("expected per-hex output") };
        assert_eq!(rows.len(), 3);
        let ids: Vec<&str> = rows.iter().map(|r| r.hex_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(out.values(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn unpivot_rejects_width_mismatch() {
        let err = unpivot_per_hex(&[vec![1.0, 2.0]], &targets(&["a"])).unwrap_err();
        assert!(matches!(err, PipelineError::PredictorFailure(_)));
    }

    #[test]
    fn unpivot_rejects_multi_row_batches() {
        let err = unpivot_per_hex(&[vec![1.0], vec![2.0]], &targets(&["a"])).unwrap_err();
        assert!(matches!(err, PipelineError::PredictorFailure(_)));
    }

    #[test]
    fn per_hour_keeps_first_target_per_row() {
        let out = per_hour(&[vec![5.0, 9.0], vec![6.0, 9.0]]).unwrap();

        let PredictionOutput::PerHour(rows) = &out else { panic!("expected per-hour output") };
        assert_eq!(rows[0], HourPrediction { hour: 0, value: 5.0 });
        assert_eq!(rows[1], HourPrediction { hour: 1, value: 6.0 });
    }

    #[test]
    fn range_spans_the_batch() {
        let out = PredictionOutput::PerHour(vec![
            HourPrediction { hour: 0, value: 3.0 },
            HourPrediction { hour: 1, value: -1.0 },
            HourPrediction { hour: 2, value: 7.0 },
        ]);
        assert_eq!(out.range(), Some((-1.0, 7.0)));
        assert_eq!(PredictionOutput::PerHex(vec![]).range(), None);
    }

    #[test]
    fn to_frame_is_long_format() {
        let out = PredictionOutput::PerHex(vec![
            HexPrediction { hex_id: "a".into(), value: 1.5 },
            HexPrediction { hex_id: "b".into(), value: 2.5 },
        ]);

        let frame = out.to_frame().unwrap();
        assert_eq!(frame.height(), 2);
        let names: Vec<&str> = frame.get_column_names().iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["hex_id", "pred_trips"]);
    }
}
