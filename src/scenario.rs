//! User-chosen scenario variables: calendar context plus a weather
//! perturbation, either for a single row or a 3-hour window of a day.

/// Column names shared between the historical frames and the model schemas.
pub mod columns {
    pub const HOUR: &str = "hour";
    pub const DAY_OF_WEEK: &str = "day_of_week";
    pub const MONTH: &str = "month";
    pub const TEMP: &str = "temp";
    pub const HUMIDITY: &str = "humidity";
    pub const WIND_SPEED: &str = "wind_speed";
    pub const RAIN_1H: &str = "rain_1h";
    pub const SNOW_1H: &str = "snow_1h";
    pub const CLOUDS_ALL: &str = "clouds_all";
    pub const BASELINE: &str = "baseline";
    pub const CAP: &str = "cap";
    pub const FLOOR: &str = "floor";
}

/// A single what-if combination of calendar and weather conditions.
///
/// Valid ranges are the caller's contract (the surrounding UI clamps via its
/// input widgets): hour 0..=23, day_of_week 0..=6 (Monday = 0), month 1..=12,
/// temp -10..=40 °C, humidity 0..=100 %, wind 0..=20 m/s, rain 0..=10 mm/h,
/// clouds 0..=100 %. Out-of-range values are not validated here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioInputs {
    pub hour: u32,
    pub day_of_week: u32,
    pub month: u32,
    pub temp: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub rain_1h: f64,
    pub clouds_all: f64,
}

impl ScenarioInputs {
    /// (column, value) pairs this scenario overrides in the default row.
    pub fn overrides(&self) -> Vec<(&'static str, f64)> {
        vec![
            (columns::HOUR, self.hour as f64),
            (columns::DAY_OF_WEEK, self.day_of_week as f64),
            (columns::MONTH, self.month as f64),
            (columns::TEMP, self.temp),
            (columns::HUMIDITY, self.humidity),
            (columns::WIND_SPEED, self.wind_speed),
            (columns::RAIN_1H, self.rain_1h),
            (columns::CLOUDS_ALL, self.clouds_all),
        ]
    }
}

impl Default for ScenarioInputs {
    /// The UI's default slider positions.
    fn default() -> Self {
        Self {
            hour: 0,
            day_of_week: 0,
            month: 1,
            temp: 15.0,
            humidity: 70.0,
            wind_speed: 5.0,
            rain_1h: 0.0,
            clouds_all: 50.0,
        }
    }
}

/// Weather applied to the perturbed window of a day forecast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowWeather {
    pub temp: f64,
    pub rain_1h: f64,
    pub snow_1h: f64,
    pub wind_speed: f64,
    pub humidity: f64,
}

impl WindowWeather {
    /// Template weather every hour outside the window keeps. Fixed values,
    /// not dataset-derived defaults, so the unperturbed hours of a custom
    /// scenario stay identical to the baseline run.
    pub const TEMPLATE: WindowWeather = WindowWeather {
        temp: 15.0,
        rain_1h: 0.0,
        snow_1h: 0.0,
        wind_speed: 2.0,
        humidity: 50.0,
    };

    /// (column, value) pairs for the weather columns of the day template.
    pub fn overrides(&self) -> [(&'static str, f64); 5] {
        [
            (columns::TEMP, self.temp),
            (columns::RAIN_1H, self.rain_1h),
            (columns::SNOW_1H, self.snow_1h),
            (columns::WIND_SPEED, self.wind_speed),
            (columns::HUMIDITY, self.humidity),
        ]
    }
}

/// A full-day scenario: calendar context plus a localized weather
/// perturbation over hours `[start_hour, start_hour + 2]` inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayScenario {
    pub day_of_week: u32,
    pub month: u32,
    /// First hour of the 3-hour window, 0..=21.
    pub start_hour: u32,
    pub weather: WindowWeather,
}

impl DayScenario {
    /// The inclusive hour range the custom weather applies to.
    #[inline]
    pub fn window(&self) -> std::ops::RangeInclusive<u32> {
        self.start_hour..=self.start_hour + 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_cover_calendar_and_weather() {
        let inputs = ScenarioInputs { hour: 12, temp: 25.0, ..ScenarioInputs::default() };
        let overrides = inputs.overrides();

        assert_eq!(overrides.len(), 8);
        assert!(overrides.contains(&(columns::HOUR, 12.0)));
        assert!(overrides.contains(&(columns::TEMP, 25.0)));
        assert!(overrides.contains(&(columns::HUMIDITY, 70.0)));
    }

    #[test]
    fn window_is_three_hours_inclusive() {
        let scenario = DayScenario {
            day_of_week: 1,
            month: 8,
            start_hour: 10,
            weather: WindowWeather::TEMPLATE,
        };

        let hours: Vec<u32> = scenario.window().collect();
        assert_eq!(hours, vec![10, 11, 12]);
    }
}
