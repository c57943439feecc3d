use crate::math::angle::{ang_diff, ang_normalize};

/// Counts crossings of the prime meridian by a segment between two vertices.
///
/// Returns `1` for an eastward crossing, `-1` for a westward crossing and `0`
/// otherwise. The longitude difference is taken the same way the inverse
/// solver does it, i.e. the short way round.
#[must_use]
pub fn transit(lon1: f64, lon2: f64) -> i32 {
    let lon1 = ang_normalize(lon1);
    let lon2 = ang_normalize(lon2);
    let (lon12, _) = ang_diff(lon1, lon2);
    if lon1 < 0.0 && lon2 >= 0.0 && lon12 > 0.0 {
        1
    } else if lon2 < 0.0 && lon1 >= 0.0 && lon12 < 0.0 {
        -1
    } else {
        0
    }
}

/// Counts crossings of the prime meridian for a segment whose end longitude
/// is unrolled.
///
/// Only the parity of `floor(lon2 / 360) - floor(lon1 / 360)` matters, so it
/// is evaluated on the remainders modulo 720.
#[must_use]
pub fn transit_direct(lon1: f64, lon2: f64) -> i32 {
    fn odd_turn(lon: f64) -> i32 {
        let lon = lon % 720.0;
        i32::from(!((0.0..360.0).contains(&lon) || lon < -360.0))
    }
    odd_turn(lon2) - odd_turn(lon1)
}
