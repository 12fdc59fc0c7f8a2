//! Range enforcement for numeric fields.

/// Inclusive `[min, max]` range of a field. Unset bounds are infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    min: f64,
    max: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        }
    }
}

impl Limits {
    /// Inverted bounds are swapped.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        let min = min.unwrap_or(f64::NEG_INFINITY);
        let max = max.unwrap_or(f64::INFINITY);
        if min < max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// A field whose lower bound is non-negative never accepts a `-`.
    pub fn disallows_negative(&self) -> bool {
        self.min >= 0.0
    }

    /// Bound to snap `value` to, or `None` when no clamping applies.
    ///
    /// A forced clamp (blur, external update) always pulls the value into
    /// range. While typing, a bound only applies when it sits on its own
    /// side of zero (`max >= 0` for the upper bound, `min <= 0` for the
    /// lower one) so a user can pass through an out-of-range prefix such
    /// as `1` on the way to `15` in a field bounded to `[10, 20]`.
    pub fn clamp(&self, value: Option<f64>, forced: bool) -> Option<f64> {
        let value = value.filter(|v| !v.is_nan())?;
        if value > self.max && (self.max >= 0.0 || forced) {
            return Some(self.max);
        }
        if value < self.min && (self.min <= 0.0 || forced) {
            return Some(self.min);
        }
        None
    }
}

/// Free-function form of [`Limits::clamp`].
pub fn clamp(value: Option<f64>, min: Option<f64>, max: Option<f64>, forced: bool) -> Option<f64> {
    Limits::new(min, max).clamp(value, forced)
}
