/// Animation parameter advanced by a fixed step per frame.
///
/// The value stays in `[0, 1]`; an advance that pushes it past 1.0 resets it
/// to exactly 0.0 rather than keeping the remainder, so every cycle replays
/// identically.
#[derive(Debug, Clone, Copy)]
pub struct AnimationParam {
    value: f64,
    step: f64,
}

impl AnimationParam {
    /// Creates a parameter starting at 0.0 with the given per-frame step.
    #[must_use]
    pub fn new(step: f64) -> Self {
        Self { value: 0.0, step }
    }

    /// Returns the current parameter value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Advances the parameter by one step, wrapping past 1.0 back to 0.0.
    pub fn advance(&mut self) {
        self.value += self.step;
        if self.value > 1.0 {
            self.value = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_within_unit_interval() {
        let mut param = AnimationParam::new(0.001);
        for _ in 0..5000 {
            param.advance();
            assert!(param.value() >= 0.0);
            assert!(param.value() <= 1.0);
        }
    }

    #[test]
    fn wraps_to_exactly_zero() {
        let mut param = AnimationParam::new(0.3);
        // 0.3, 0.6, 0.9, 1.2 -> reset
        for _ in 0..4 {
            param.advance();
        }
        assert_eq!(param.value(), 0.0);
    }

    #[test]
    fn starts_at_zero() {
        assert_eq!(AnimationParam::new(0.001).value(), 0.0);
    }
}
