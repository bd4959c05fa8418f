/// An inclusive range of evenly spaced values, like the markers of a slider.
///
/// Values are addressed by their step index so that a range such as
/// `1.0..=10.0` by `0.5` never accumulates floating point error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SteppedRange {
    start: f64,
    step: f64,
    steps: u16,
}

const STEP_EPSILON: f64 = 1e-9;

impl SteppedRange {
    /// # Panics
    /// if `end < start`, `step` is not positive, or the range has more than
    /// `u16::MAX` steps.
    #[must_use]
    pub fn new(start: f64, end: f64, step: f64) -> Self {
        assert!(step > 0.0, "step must be positive");
        assert!(end >= start, "end must not be less than start");
        let steps = ((end - start) / step + STEP_EPSILON).floor();
        assert!(steps <= f64::from(u16::MAX), "too many steps");

        Self {
            start,
            step,
            steps: steps as u16,
        }
    }

    /// The value at step index `n`, not clamped to the range.
    #[must_use]
    pub fn nth(&self, n: u16) -> f64 {
        f64::from(n).mul_add(self.step, self.start)
    }

    /// The step index of `value`, or [`None`] if it is out of bounds or between two markers.
    #[must_use]
    pub fn index_of(&self, value: f64) -> Option<u16> {
        if !value.is_finite() {
            return None;
        }

        let offset = (value - self.start) / self.step;
        let index = offset.round();
        let on_step = (offset - index).abs() < STEP_EPSILON;
        (on_step && index >= 0.0 && index <= f64::from(self.steps)).then_some(index as u16)
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::SteppedRange;

    #[rstest]
    #[case(0, 1.0)]
    #[case(1, 1.5)]
    #[case(2, 2.0)]
    #[case(18, 10.0)]
    fn half_step_markers(#[case] n: u16, #[case] expected: f64) {
        assert!((SteppedRange::new(1.0, 10.0, 0.5).nth(n) - expected).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case(1.0, Some(0))]
    #[case(2.0, Some(2))]
    #[case(2.5, Some(3))]
    #[case(10.0, Some(18))]
    #[case(0.5, None)]
    #[case(10.5, None)]
    #[case(1.25, None)]
    #[case(f64::NAN, None)]
    #[case(f64::INFINITY, None)]
    fn half_step_index_of(#[case] value: f64, #[case] expected: Option<u16>) {
        assert_eq!(SteppedRange::new(1.0, 10.0, 0.5).index_of(value), expected);
    }

    #[test]
    fn end_rounds_down_to_last_marker() {
        let range = SteppedRange::new(0.0, 1.0, 0.3);
        assert_eq!(range.index_of(0.9), Some(3));
        assert_eq!(range.index_of(1.0), None);
        assert_eq!(range.index_of(0.6), Some(2));
    }
}
