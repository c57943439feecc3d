//! Angle helpers working in degrees.
//!
//! Reductions are carried out in degrees before converting to radians so that
//! multiples of 90 degrees produce exact sines and cosines.

/// Error-free transformation of a sum.
///
/// Returns `(s, t)` with `s = round(u + v)` and `t = u + v - s` exactly.
#[must_use]
pub fn sum(u: f64, v: f64) -> (f64, f64) {
    let s = u + v;
    let up = s - v;
    let vpp = s - up;
    let up = up - u;
    let vpp = vpp - v;
    let t = if s == 0.0 { s } else { 0.0 - (up + vpp) };
    (s, t)
}

/// IEEE-style remainder of `x` by `y` (with `y > 0`), in `[-y/2, y/2]`.
#[must_use]
pub fn remainder(x: f64, y: f64) -> f64 {
    let z = x % y;
    if 2.0 * z.abs() <= y {
        z
    } else if z > 0.0 {
        z - y
    } else {
        z + y
    }
}

/// Reduces an angle to the range `(-180, 180]`.
#[must_use]
pub fn ang_normalize(x: f64) -> f64 {
    let y = remainder(x, 360.0);
    if y == -180.0 {
        180.0
    } else {
        y
    }
}

/// Returns `NaN` for latitudes outside `[-90, 90]`.
#[must_use]
pub fn lat_fix(x: f64) -> f64 {
    if x.abs() > 90.0 {
        f64::NAN
    } else {
        x
    }
}

/// Exact difference `y - x` of two angles reduced to `(-180, 180]`.
///
/// Returns `(d, e)` where `d` is the rounded difference and `e` the error
/// term, so that `d + e` equals the true difference.
#[must_use]
pub fn ang_diff(x: f64, y: f64) -> (f64, f64) {
    let (d, t) = sum(ang_normalize(-x), ang_normalize(y));
    let d = ang_normalize(d);
    sum(if d == 180.0 && t > 0.0 { -180.0 } else { d }, t)
}

/// Coarsens tiny angles so that values near zero are exactly representable.
///
/// Angles smaller than 1/16 degree are rounded to a multiple of `2^-57`
/// degrees, which keeps the canonicalization of nearly meridional or nearly
/// equatorial geodesics stable.
#[must_use]
pub fn ang_round(x: f64) -> f64 {
    const Z: f64 = 1.0 / 16.0;
    let mut y = x.abs();
    if y < Z {
        y = Z - (Z - y);
    }
    if x == 0.0 {
        0.0
    } else {
        y.copysign(x)
    }
}

/// Sine and cosine of an angle in degrees.
///
/// Multiples of 90 degrees give exact results.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn sincosd(x: f64) -> (f64, f64) {
    let r = if x.is_finite() { x % 360.0 } else { f64::NAN };
    let q = if r.is_nan() { 0 } else { (r / 90.0).round() as i32 };
    let (s, c) = (r - 90.0 * f64::from(q)).to_radians().sin_cos();
    let (sinx, cosx) = match q.rem_euclid(4) {
        0 => (s, c),
        1 => (c, -s),
        2 => (-s, -c),
        _ => (-c, s),
    };
    (sinx, cosx + 0.0)
}

/// Two-argument arctangent returning degrees in `(-180, 180]`.
///
/// Exact for the axis directions.
#[must_use]
pub fn atan2d(y: f64, x: f64) -> f64 {
    let (mut x, mut y) = (x, y);
    let mut q = 0;
    if y.abs() > x.abs() {
        std::mem::swap(&mut x, &mut y);
        q = 2;
    }
    if x < 0.0 {
        x = -x;
        q += 1;
    }
    let ang = y.atan2(x).to_degrees();
    match q {
        1 => (if y >= 0.0 { 180.0 } else { -180.0 }) - ang,
        2 => 90.0 - ang,
        3 => -90.0 + ang,
        _ => ang,
    }
}
