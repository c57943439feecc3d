use super::angle::sum;

/// Running sum that carries its own rounding error.
///
/// The total is held as an unevaluated pair `s + t` where `s` is the rounded
/// sum and `t` the residual, so adding thousands of small increments loses
/// essentially no precision. The type is `Copy`, which lets a caller probe a
/// snapshot without disturbing the original.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    s: f64,
    t: f64,
}

impl Accumulator {
    /// Creates an accumulator holding `value`.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self { s: value, t: 0.0 }
    }

    /// Resets the accumulator to `value`.
    pub fn set(&mut self, value: f64) {
        self.s = value;
        self.t = 0.0;
    }

    /// Adds `y` to the running total.
    pub fn add(&mut self, y: f64) {
        // Accumulate starting at the least significant end.
        let (y, u) = sum(y, self.t);
        let (s, t) = sum(y, self.s);
        self.s = s;
        self.t = t;
        // s, t, u are now non-overlapping and decreasing; fold u back in.
        if self.s == 0.0 {
            self.s = u;
        } else {
            self.t += u;
        }
    }

    /// Returns the current total.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.s
    }

    /// Returns the total that would result from adding `y`, without adding it.
    #[must_use]
    pub fn sum_with(&self, y: f64) -> f64 {
        if y == 0.0 {
            return self.s;
        }
        let mut b = *self;
        b.add(y);
        b.s
    }

    /// Negates the total.
    pub fn negate(&mut self) {
        self.s = -self.s;
        self.t = -self.t;
    }
}

impl From<f64> for Accumulator {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}
