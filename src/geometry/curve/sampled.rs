use crate::math::numeric::cumulative_simpson;

/// Arc length of a curve tabulated at evenly spaced parameters.
///
/// Between table entries both directions of the mapping interpolate
/// linearly, so `parameter_at(length_at(u))` returns `u`.
#[derive(Debug, Clone)]
pub(crate) struct LengthTable {
    cumulative: Vec<f64>,
}

impl LengthTable {
    pub(crate) fn build(speed: impl Fn(f64) -> f64, subdivisions: u32) -> Self {
        Self {
            cumulative: cumulative_simpson(speed, subdivisions),
        }
    }

    pub(crate) fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    fn step(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let n = (self.cumulative.len() - 1) as f64;
        1.0 / n
    }

    pub(crate) fn length_at(&self, u: f64) -> f64 {
        let u = u.clamp(0.0, 1.0);
        let last = self.cumulative.len() - 2;
        let scaled = u / self.step();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let i = (scaled.floor() as usize).min(last);
        #[allow(clippy::cast_precision_loss)]
        let frac = (scaled - i as f64).clamp(0.0, 1.0);
        self.cumulative[i] + frac * (self.cumulative[i + 1] - self.cumulative[i])
    }

    pub(crate) fn parameter_at(&self, distance: f64) -> f64 {
        let total = self.total();
        if total <= 0.0 {
            return 0.0;
        }
        let d = distance.clamp(0.0, total);
        let last = self.cumulative.len() - 2;
        let i = self
            .cumulative
            .partition_point(|&c| c <= d)
            .saturating_sub(1)
            .min(last);
        let span = self.cumulative[i + 1] - self.cumulative[i];
        let frac = if span > 0.0 {
            ((d - self.cumulative[i]) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        #[allow(clippy::cast_precision_loss)]
        let u = (i as f64 + frac) * self.step();
        u.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_speed_maps_linearly() {
        let table = LengthTable::build(|_| 2.0, 64);
        assert!((table.total() - 2.0).abs() < 1e-12);
        assert!((table.length_at(0.25) - 0.5).abs() < 1e-12);
        assert!((table.parameter_at(1.5) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn round_trip_with_varying_speed() {
        let table = LengthTable::build(|u| 1.0 + 3.0 * u * u, 64);
        for k in 0..=20 {
            let u = f64::from(k) / 20.0;
            let back = table.parameter_at(table.length_at(u));
            assert!((back - u).abs() < 1e-9, "u={u} back={back}");
        }
    }

    #[test]
    fn clamps_outside_range() {
        let table = LengthTable::build(|_| 1.0, 64);
        assert!(table.parameter_at(-1.0).abs() < 1e-15);
        assert!((table.parameter_at(10.0) - 1.0).abs() < 1e-15);
        assert!((table.length_at(2.0) - 1.0).abs() < 1e-12);
    }
}
