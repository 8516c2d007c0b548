//! Historical/forecast diagnostics backing the dashboard views.

use anyhow::{Result, ensure};
use ndarray::Array2;
use polars::prelude::*;

/// Aggregate forecast error over a frame of actual vs. predicted values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastAccuracy {
    /// Mean absolute percentage error, in percent, over rows with positive
    /// actuals.
    pub mape: f64,
    /// Root mean squared error over the same rows.
    pub rmse: f64,
}

/// Compare `actual` and `predicted` columns. Rows without a positive actual
/// are excluded (a zero actual makes percentage error undefined).
pub fn forecast_accuracy(
    frame: &DataFrame,
    actual: &str,
    predicted: &str,
) -> Result<ForecastAccuracy> {
    let eval = frame
        .clone()
        .lazy()
        .filter(col(actual).gt(lit(0.0)).and(col(predicted).is_not_null()))
        .select([
            col(actual).cast(DataType::Float64),
            col(predicted).cast(DataType::Float64),
        ])
        .collect()?;
    ensure!(eval.height() > 0, "no rows with positive actuals to evaluate");

    let y = eval.column(actual)?.f64()?;
    let p = eval.column(predicted)?.f64()?;

    let mut abs_pct = 0.0;
    let mut squared = 0.0;
    for (a, b) in y.into_iter().zip(p) {
        let (a, b) = (a.unwrap_or(0.0), b.unwrap_or(0.0));
        abs_pct += ((a - b) / a).abs();
        squared += (a - b) * (a - b);
    }

    let n = eval.height() as f64;
    Ok(ForecastAccuracy { mape: 100.0 * abs_pct / n, rmse: (squared / n).sqrt() })
}

/// Mean of `value` per (day-of-week, hour) cell as a 7×24 matrix.
/// Cells with no observations stay zero.
pub fn usage_matrix(frame: &DataFrame, day: &str, hour: &str, value: &str) -> Result<Array2<f64>> {
    let grouped = frame
        .clone()
        .lazy()
        .group_by([col(day), col(hour)])
        .agg([col(value).mean().alias("mean_value")])
        .collect()?;

    let days = grouped.column(day)?.cast(&DataType::Float64)?;
    let days = days.f64()?;
    let hours = grouped.column(hour)?.cast(&DataType::Float64)?;
    let hours = hours.f64()?;
    let means = grouped.column("mean_value")?.f64()?;

    let mut matrix = Array2::zeros((7, 24));
    for i in 0..grouped.height() {
        let (Some(d), Some(h), Some(m)) = (days.get(i), hours.get(i), means.get(i)) else {
            continue;
        };
        // Negative floats would saturate to 0 on the cast, so check first.
        ensure!(d >= 0.0 && h >= 0.0, "day/hour value out of range: ({d}, {h})");
        let (row, column) = (d as usize, h as usize);
        ensure!(row < 7 && column < 24, "day/hour value out of range: ({d}, {h})");
        matrix[[row, column]] = m;
    }
    Ok(matrix)
}

/// Total trips and mean trips per hex for each month, sorted by month key.
pub fn monthly_totals(frame: &DataFrame, month: &str, trips: &str) -> Result<DataFrame> {
    Ok(frame
        .clone()
        .lazy()
        .group_by([col(month)])
        .agg([
            col(trips).sum().alias("total_trips"),
            col(trips).mean().alias("mean_trips_per_hex"),
        ])
        .sort([month], Default::default())
        .collect()?)
}

/// Incoming/outgoing/local trip counts for one hex within a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripBreakdown {
    pub incoming: f64,
    pub outgoing: f64,
    pub local: f64,
}

pub fn trip_breakdown(frame: &DataFrame, hex_id: &str) -> Result<TripBreakdown> {
    let row = frame.clone().lazy().filter(col("hex_id").eq(lit(hex_id))).collect()?;
    ensure!(row.height() > 0, "hex '{hex_id}' not present in frame");

    let get = |name: &str| -> Result<f64> {
        let column = row.column(name)?.cast(&DataType::Float64)?;
        Ok(column.f64()?.get(0).unwrap_or(0.0))
    };

    Ok(TripBreakdown {
        incoming: get("incoming_trips")?,
        outgoing: get("outgoing_trips")?,
        local: get("local_trips")?,
    })
}

/// Rows whose absolute error (actual − predicted) exceeds three times the
/// mean absolute error. Non-empty output suggests unmodeled events.
pub fn large_misses(frame: &DataFrame, actual: &str, predicted: &str) -> Result<DataFrame> {
    let errors = frame
        .clone()
        .lazy()
        .filter(col(actual).is_not_null().and(col(predicted).is_not_null()))
        .with_column((col(actual) - col(predicted)).alias("error"))
        .collect()?;

    let error = errors.column("error")?.cast(&DataType::Float64)?;
    let n = errors.height().max(1) as f64;
    let mean_abs = error.f64()?.into_iter().flatten().map(f64::abs).sum::<f64>() / n;
    let threshold = 3.0 * mean_abs;

    Ok(errors
        .lazy()
        .filter(col("error").gt(lit(threshold)).or(col("error").lt(lit(-threshold))))
        .collect()?)
}

#[cfg(test)]
mod tests {
    use polars::prelude::*;

    use super::*;

    #[test]
    fn accuracy_matches_hand_computed_values() {
        let frame = df![
            "y" => [100.0, 200.0, 0.0],
            "preds" => [110.0, 180.0, 50.0],
        ]
        .unwrap();

        // Zero-actual row is excluded: errors are 10/100 and 20/200.
        let acc = forecast_accuracy(&frame, "y", "preds").unwrap();
        assert!((acc.mape - 10.0).abs() < 1e-9);
        let expected_rmse = ((100.0f64 + 400.0) / 2.0).sqrt();
        assert!((acc.rmse - expected_rmse).abs() < 1e-9);
    }

    #[test]
    fn accuracy_requires_positive_actuals() {
        let frame = df!["y" => [0.0, 0.0], "preds" => [1.0, 2.0]].unwrap();
        assert!(forecast_accuracy(&frame, "y", "preds").is_err());
    }

    #[test]
    fn usage_matrix_places_means() {
        let frame = df![
            "day_of_week" => [0.0, 0.0, 6.0],
            "hour" => [8.0, 8.0, 23.0],
            "y" => [10.0, 20.0, 5.0],
        ]
        .unwrap();

        let matrix = usage_matrix(&frame, "day_of_week", "hour", "y").unwrap();
        assert_eq!(matrix[[0, 8]], 15.0);
        assert_eq!(matrix[[6, 23]], 5.0);
        assert_eq!(matrix[[3, 0]], 0.0);
    }

    #[test]
    fn usage_matrix_rejects_out_of_range_days() {
        let frame = df![
            "day_of_week" => [7.0],
            "hour" => [0.0],
            "y" => [1.0],
        ]
        .unwrap();
        assert!(usage_matrix(&frame, "day_of_week", "hour", "y").is_err());
    }

    #[test]
    fn usage_matrix_rejects_negative_days_and_hours() {
        let frame = df![
            "day_of_week" => [-1.0],
            "hour" => [8.0],
            "y" => [1.0],
        ]
        .unwrap();
        assert!(usage_matrix(&frame, "day_of_week", "hour", "y").is_err());

        let frame = df![
            "day_of_week" => [0.0],
            "hour" => [-3.0],
            "y" => [1.0],
        ]
        .unwrap();
        assert!(usage_matrix(&frame, "day_of_week", "hour", "y").is_err());
    }

    #[test]
    fn monthly_totals_aggregates_per_month() {
        let frame = df![
            "year_month" => ["2024-05", "2024-05", "2024-06"],
            "trip_count" => [10.0, 30.0, 7.0],
        ]
        .unwrap();

        let totals = monthly_totals(&frame, "year_month", "trip_count").unwrap();
        assert_eq!(totals.height(), 2);
        assert_eq!(totals.column("total_trips").unwrap().f64().unwrap().get(0), Some(40.0));
        assert_eq!(totals.column("mean_trips_per_hex").unwrap().f64().unwrap().get(0), Some(20.0));
    }

    #[test]
    fn trip_breakdown_reads_one_hex() {
        let frame = df![
            "hex_id" => ["a", "b"],
            "incoming_trips" => [3.0, 1.0],
            "outgoing_trips" => [2.0, 4.0],
            "local_trips" => [5.0, 0.0],
        ]
        .unwrap();

        let breakdown = trip_breakdown(&frame, "b").unwrap();
        assert_eq!(breakdown, TripBreakdown { incoming: 1.0, outgoing: 4.0, local: 0.0 });
        assert!(trip_breakdown(&frame, "missing").is_err());
    }

    #[test]
    fn large_misses_filters_by_triple_mean_abs_error() {
        // Errors: 1, -1, 1, 1, 20 → mean |error| = 4.8, threshold 14.4.
        let frame = df![
            "y" => [10.0, 10.0, 10.0, 10.0, 30.0],
            "preds" => [9.0, 11.0, 9.0, 9.0, 10.0],
        ]
        .unwrap();

        let misses = large_misses(&frame, "y", "preds").unwrap();
        assert_eq!(misses.height(), 1);
        assert_eq!(misses.column("error").unwrap().f64().unwrap().get(0), Some(20.0));
    }
}
