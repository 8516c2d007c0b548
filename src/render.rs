//! Presentational color/elevation encoding for prediction tables.
//!
//! Purely cosmetic: the only invariants are "no division by zero" and
//! "channels stay within 8-bit bounds".

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Neutral color returned when the batch has no spread.
pub const NEUTRAL: Rgba = Rgba::new(128, 128, 128, 255);

const GREEN: [f64; 4] = [0.0, 255.0, 0.0, 250.0];
const RED: [f64; 4] = [255.0, 0.0, 0.0, 250.0];
const BLUE: [f64; 4] = [0.0, 0.0, 255.0, 250.0];

/// Net-flow values at or beyond this magnitude saturate the diverging ramp.
const NET_FLOW_SPAN: f64 = 6.0;

/// Linear green-to-red ramp over `[min, max]`.
///
/// Degenerate ranges (`min == max`) return [`NEUTRAL`] rather than dividing
/// by zero.
pub fn demand_color(value: f64, min: f64, max: f64) -> Rgba {
    if max == min {
        return NEUTRAL;
    }
    let ratio = ((value - min) / (max - min)).clamp(0.0, 1.0);
    Rgba::new(channel(255.0 * ratio), channel(255.0 * (1.0 - ratio)), 0, 255)
}

/// Diverging ramp for signed net-flow values: green at zero, toward red for
/// negative flow, toward blue for positive, saturating at ±6.
pub fn net_flow_color(value: f64) -> Rgba {
    if value.abs() < 1e-9 {
        return Rgba::new(0, 255, 0, 250);
    }
    let (anchor, ratio) = if value < 0.0 {
        (RED, (value / -NET_FLOW_SPAN).clamp(0.0, 1.0))
    } else {
        (BLUE, (value / NET_FLOW_SPAN).clamp(0.0, 1.0))
    };
    lerp(GREEN, anchor, ratio)
}

/// Elevation used for signed values on an extruded map.
#[inline]
pub fn elevation(value: f64) -> f64 {
    value.abs()
}

/// Demand colors for a whole output batch, scaled to its own range.
pub fn color_batch(values: &[f64]) -> Vec<Rgba> {
    let range = values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
    });
    match range {
        None => Vec::new(),
        Some((min, max)) => values.iter().map(|&v| demand_color(v, min, max)).collect(),
    }
}

fn lerp(from: [f64; 4], to: [f64; 4], ratio: f64) -> Rgba {
    let mix = |i: usize| channel(from[i] + ratio * (to[i] - from[i]));
    Rgba { r: mix(0), g: mix(1), b: mix(2), a: mix(3) }
}

#[inline]
fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_range_is_neutral() {
        assert_eq!(demand_color(5.0, 3.0, 3.0), NEUTRAL);
        assert_eq!(demand_color(-100.0, 0.0, 0.0), NEUTRAL);
    }

    #[test]
    fn endpoints_hit_the_anchor_colors() {
        assert_eq!(demand_color(0.0, 0.0, 10.0), Rgba::new(0, 255, 0, 255));
        assert_eq!(demand_color(10.0, 0.0, 10.0), Rgba::new(255, 0, 0, 255));
    }

    #[test]
    fn out_of_range_values_clamp() {
        assert_eq!(demand_color(-5.0, 0.0, 10.0), Rgba::new(0, 255, 0, 255));
        assert_eq!(demand_color(15.0, 0.0, 10.0), Rgba::new(255, 0, 0, 255));
    }

    #[test]
    fn net_flow_zero_is_green() {
        assert_eq!(net_flow_color(0.0), Rgba::new(0, 255, 0, 250));
    }

    #[test]
    fn net_flow_saturates_at_span() {
        assert_eq!(net_flow_color(-6.0), Rgba::new(255, 0, 0, 250));
        assert_eq!(net_flow_color(-100.0), Rgba::new(255, 0, 0, 250));
        assert_eq!(net_flow_color(6.0), Rgba::new(0, 0, 255, 250));
        assert_eq!(net_flow_color(100.0), Rgba::new(0, 0, 255, 250));
    }

    #[test]
    fn net_flow_midpoint_blends() {
        let c = net_flow_color(3.0);
        assert_eq!((c.r, c.b), (0, 128));
        assert!(c.g > 0 && c.g < 255);
    }

    #[test]
    fn color_batch_scales_to_own_range() {
        let colors = color_batch(&[1.0, 2.0, 3.0]);
        assert_eq!(colors[0], Rgba::new(0, 255, 0, 255));
        assert_eq!(colors[2], Rgba::new(255, 0, 0, 255));
        assert!(color_batch(&[]).is_empty());
    }

    #[test]
    fn constant_batch_is_all_neutral() {
        let colors = color_batch(&[4.0, 4.0]);
        assert_eq!(colors, vec![NEUTRAL, NEUTRAL]);
    }

    #[test]
    fn elevation_is_absolute() {
        assert_eq!(elevation(-3.5), 3.5);
        assert_eq!(elevation(2.0), 2.0);
    }
}
