//! Exponential Moving Average.

use super::Filter;

/// An Exponential Moving Average (EMA) filter.
///
/// The filtered value is the convex combination
/// `alpha * value + (1 - alpha) * last`, applied per call. With a constant
/// input the output converges to that input and never overshoots it.
#[derive(Debug, Clone, Copy)]
pub struct Ema {
    alpha: f32,
}

impl Ema {
    /// Creates a new Exponential Moving Average filter.
    ///
    /// The `alpha` parameter must be between 0.0 and 1.0 and defines how
    /// quickly the weight of older values decays. Values closer to 1.0
    /// strongly favor recent values over older values, while values closer
    /// to 0.0 favor the accumulated history.
    ///
    /// # Panics
    ///
    /// This method will panic if `alpha` is not in between 0.0 and 1.0.
    pub fn new(alpha: f32) -> Self {
        assert!(alpha >= 0.0 && alpha <= 1.0);
        Self { alpha }
    }
}

/// Filter state for [`Ema`] filters.
///
/// A default state is uninitialized: the first value pushed through it is
/// returned unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmaState {
    last: Option<f32>,
}

impl Filter<f32> for Ema {
    type State = EmaState;

    fn filter(&self, state: &mut EmaState, value: f32) -> f32 {
        match state.last {
            Some(last) => {
                let avg = self.alpha * value + (1.0 - self.alpha) * last;
                state.last = Some(avg);
                avg
            }
            None => {
                state.last = Some(value);
                value
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ema() {
        let ema = Ema::new(0.5);
        let mut state = EmaState::default();
        assert_eq!(ema.filter(&mut state, 1.0), 1.0);
        assert_eq!(ema.filter(&mut state, 2.0), 1.5);
        assert_eq!(ema.filter(&mut state, 2.0), 1.75);
    }

    #[test]
    fn reset_forgets_history() {
        let ema = Ema::new(0.5);
        let mut state = EmaState::default();
        ema.filter(&mut state, 1.0);
        ema.filter(&mut state, 2.0);

        state = EmaState::default();
        assert_eq!(ema.filter(&mut state, 5.0), 5.0);
    }

    #[test]
    fn constant_input_converges_without_overshoot() {
        let ema = Ema::new(0.3);
        let mut state = EmaState::default();
        let mut out = ema.filter(&mut state, 0.0);
        for _ in 0..20 {
            let next = ema.filter(&mut state, 1.0);
            assert!(next > out);
            assert!(next <= 1.0);
            out = next;
        }
        assert!((1.0 - out) < 1e-3);
    }
}
