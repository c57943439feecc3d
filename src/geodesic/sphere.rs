use crate::error::{EllipsoidError, Result};
use crate::math::angle::{ang_diff, ang_normalize, ang_round, atan2d, lat_fix, sincosd};
use crate::math::{Vector3, TINY};

use super::{DirectSolution, GeodesicEngine, InverseSolution, Outputs, WGS84_A, WGS84_F};

/// Geodesic engine for a sphere, i.e. an ellipsoid with zero flattening.
///
/// Geodesics are great circles, so both problems have closed-form solutions.
/// Arguments are canonicalized the same way an ellipsoidal solver does it
/// (non-negative longitude difference, first point in the southern hemisphere
/// and farther from the equator) so that the area differential keeps full
/// accuracy for short, meridional and nearly antipodal segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    radius: f64,
}

impl Sphere {
    /// Creates a sphere with the given radius in meters.
    ///
    /// # Errors
    ///
    /// Returns `EllipsoidError::InvalidRadius` if the radius is not positive
    /// and finite.
    pub fn new(radius: f64) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(EllipsoidError::InvalidRadius(radius).into());
        }
        Ok(Self { radius })
    }

    /// Creates the sphere with the same surface area as the ellipsoid with
    /// equatorial radius `a` and flattening `f`.
    ///
    /// # Errors
    ///
    /// Returns an error if `a` is not positive and finite, or if `f` is not
    /// finite or not below 1.
    pub fn authalic(a: f64, f: f64) -> Result<Self> {
        if !(a.is_finite() && a > 0.0) {
            return Err(EllipsoidError::InvalidRadius(a).into());
        }
        if !(f.is_finite() && f < 1.0) {
            return Err(EllipsoidError::InvalidFlattening(f).into());
        }
        Self::new(authalic_radius(a, f))
    }

    /// Returns the radius in meters.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Default for Sphere {
    /// The authalic sphere of WGS84.
    fn default() -> Self {
        Self {
            radius: authalic_radius(WGS84_A, WGS84_F),
        }
    }
}

/// Radius of the sphere with the same area as the ellipsoid `(a, f)`.
fn authalic_radius(a: f64, f: f64) -> f64 {
    let b = a * (1.0 - f);
    let e2 = f * (2.0 - f);
    let ratio = if e2 == 0.0 {
        1.0
    } else if e2 > 0.0 {
        let e = e2.sqrt();
        e.atanh() / e
    } else {
        let e = (-e2).sqrt();
        e.atan() / e
    };
    ((a * a + b * b * ratio) / 2.0).sqrt()
}

fn norm2(s: f64, c: f64) -> (f64, f64) {
    let h = s.hypot(c);
    (s / h, c / h)
}

impl GeodesicEngine for Sphere {
    #[allow(clippy::similar_names)]
    fn inverse(
        &self,
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
        outputs: Outputs,
    ) -> InverseSolution {
        let (lon12, _) = ang_diff(lon1, lon2);
        let mut lonsign = 1f64.copysign(lon12);
        let lon12 = lonsign * ang_round(lon12);
        let (slam12, clam12) = sincosd(lon12);

        let mut lat1 = ang_round(lat_fix(lat1));
        let mut lat2 = ang_round(lat_fix(lat2));
        // Point 1 is the one farther from the equator.
        let swapp = if lat1.abs() < lat2.abs() || lat2.is_nan() {
            -1.0
        } else {
            1.0
        };
        if swapp < 0.0 {
            lonsign = -lonsign;
            std::mem::swap(&mut lat1, &mut lat2);
        }
        // Point 1 is in the southern hemisphere.
        let latsign = 1f64.copysign(-lat1);
        lat1 *= latsign;
        lat2 *= latsign;

        let (sbet1, cbet1) = sincosd(lat1);
        let cbet1 = cbet1.max(TINY);
        let (sbet2, cbet2) = sincosd(lat2);
        let cbet2 = cbet2.max(TINY);

        let p1 = Vector3::new(cbet1, 0.0, sbet1);
        let p2 = Vector3::new(cbet2 * clam12, cbet2 * slam12, sbet2);
        let sig12 = p1.cross(&p2).norm().atan2(p1.dot(&p2));

        let meridian = lat1 == -90.0 || slam12 == 0.0;
        let (salp1, calp1, salp2, calp2) = if meridian {
            (slam12, clam12, 0.0, 1.0)
        } else {
            let (salp1, calp1) = norm2(cbet2 * slam12, cbet1 * sbet2 - sbet1 * cbet2 * clam12);
            let (salp2, calp2) = norm2(cbet1 * slam12, cbet1 * sbet2 * clam12 - sbet1 * cbet2);
            (salp1, calp1, salp2, calp2)
        };

        let area = if outputs.contains(Outputs::AREA) {
            let alp12 = if !meridian && clam12 > -0.7071 && sbet2 - sbet1 < 1.75 {
                // tan(E/2) = tan(lam12/2) * (tan(bet1/2) + tan(bet2/2))
                //            / (1 + tan(bet1/2) * tan(bet2/2))
                let domg12 = 1.0 + clam12;
                let dbet1 = 1.0 + cbet1;
                let dbet2 = 1.0 + cbet2;
                2.0 * (slam12 * (sbet1 * dbet2 + sbet2 * dbet1))
                    .atan2(domg12 * (sbet1 * sbet2 + dbet1 * dbet2))
            } else {
                let mut salp12 = salp2 * calp1 - calp2 * salp1;
                let mut calp12 = calp2 * calp1 + salp2 * salp1;
                // Pin the sign of a half turn.
                if salp12 == 0.0 && calp12 < 0.0 {
                    salp12 = TINY * calp1;
                    calp12 = -1.0;
                }
                salp12.atan2(calp12)
            };
            swapp * lonsign * latsign * (self.authalic_radius_squared() * alp12) + 0.0
        } else {
            f64::NAN
        };

        let (azi1, azi2) = if outputs.contains(Outputs::AZIMUTH) {
            let (salp1, calp1, salp2, calp2) = if swapp < 0.0 {
                (salp2, calp2, salp1, calp1)
            } else {
                (salp1, calp1, salp2, calp2)
            };
            (
                atan2d(swapp * lonsign * salp1, swapp * latsign * calp1),
                atan2d(swapp * lonsign * salp2, swapp * latsign * calp2),
            )
        } else {
            (f64::NAN, f64::NAN)
        };

        InverseSolution {
            a12: sig12.to_degrees(),
            s12: if outputs.contains(Outputs::DISTANCE) {
                self.radius * sig12
            } else {
                f64::NAN
            },
            azi1,
            azi2,
            area,
        }
    }

    #[allow(clippy::similar_names)]
    fn direct(&self, lat1: f64, lon1: f64, azi1: f64, s12: f64, outputs: Outputs) -> DirectSolution {
        let (salp1, calp1) = sincosd(ang_round(azi1));
        let (sbet1, cbet1) = sincosd(ang_round(lat_fix(lat1)));
        let cbet1 = cbet1.max(TINY);

        // Azimuth where the great circle crosses the equator.
        let salp0 = salp1 * cbet1;
        let calp0 = calp1.hypot(salp1 * sbet1);

        let somg1 = salp0 * sbet1;
        let csig1 = if sbet1 != 0.0 || calp1 != 0.0 {
            cbet1 * calp1
        } else {
            1.0
        };
        let comg1 = csig1;
        let (ssig1, csig1) = norm2(sbet1, csig1);

        let sig12 = s12 / self.radius;
        let (ssig12, csig12) = sig12.sin_cos();
        let ssig2 = ssig1 * csig12 + csig1 * ssig12;
        let mut csig2 = csig1 * csig12 - ssig1 * ssig12;
        let sbet2 = calp0 * ssig2;
        let mut cbet2 = salp0.hypot(calp0 * csig2);
        if cbet2 == 0.0 {
            // The end point is a pole.
            cbet2 = TINY;
            csig2 = TINY;
        }
        let somg2 = salp0 * ssig2;
        let comg2 = csig2;
        let salp2 = salp0;
        let calp2 = calp0 * csig2;

        let lat2 = if outputs.contains(Outputs::LATITUDE) {
            atan2d(sbet2, cbet2)
        } else {
            f64::NAN
        };

        let lon2 = if outputs.contains(Outputs::LONGITUDE) {
            if outputs.contains(Outputs::LONG_UNROLL) {
                let e = 1f64.copysign(salp0);
                let omg12 = e
                    * (sig12 - (ssig2.atan2(csig2) - ssig1.atan2(csig1))
                        + ((e * somg2).atan2(comg2) - (e * somg1).atan2(comg1)));
                lon1 + omg12.to_degrees()
            } else {
                let omg12 = (somg2 * comg1 - comg2 * somg1).atan2(comg2 * comg1 + somg2 * somg1);
                ang_normalize(ang_normalize(lon1) + ang_normalize(omg12.to_degrees()))
            }
        } else {
            f64::NAN
        };

        let azi2 = if outputs.contains(Outputs::AZIMUTH) {
            atan2d(salp2, calp2)
        } else {
            f64::NAN
        };

        let area = if outputs.contains(Outputs::AREA) {
            let (salp12, calp12) = if calp0 == 0.0 || salp0 == 0.0 {
                (
                    salp2 * calp1 - calp2 * salp1,
                    calp2 * calp1 + salp2 * salp1,
                )
            } else {
                let dsig = if csig12 <= 0.0 {
                    csig1 * (1.0 - csig12) + ssig12 * ssig1
                } else {
                    ssig12 * (csig1 * ssig12 / (1.0 + csig12) + ssig1)
                };
                (
                    calp0 * salp0 * dsig,
                    salp0 * salp0 + calp0 * calp0 * csig1 * csig2,
                )
            };
            self.authalic_radius_squared() * salp12.atan2(calp12)
        } else {
            f64::NAN
        };

        DirectSolution {
            a12: sig12.to_degrees(),
            lat2,
            lon2,
            azi2,
            area,
        }
    }

    fn authalic_radius_squared(&self) -> f64 {
        self.radius * self.radius
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::GeoAreaError;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    const ALL: Outputs = Outputs::all();

    fn unit() -> Sphere {
        Sphere::new(1.0).unwrap()
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(matches!(
            Sphere::new(0.0),
            Err(GeoAreaError::Ellipsoid(EllipsoidError::InvalidRadius(_)))
        ));
        assert!(Sphere::new(f64::NAN).is_err());
        assert!(Sphere::authalic(-1.0, 0.0).is_err());
        assert!(matches!(
            Sphere::authalic(WGS84_A, 1.0),
            Err(GeoAreaError::Ellipsoid(EllipsoidError::InvalidFlattening(_)))
        ));
    }

    #[test]
    fn wgs84_authalic_radius() {
        let sphere = Sphere::default();
        assert_relative_eq!(sphere.radius(), 6_371_007.180_918_5, epsilon = 1e-3);
        let built = Sphere::authalic(WGS84_A, WGS84_F).unwrap();
        assert_relative_eq!(built.radius(), sphere.radius());
        // Zero flattening is the sphere itself.
        assert_relative_eq!(Sphere::authalic(2.0, 0.0).unwrap().radius(), 2.0);
        // A prolate spheroid is also accepted.
        assert!(Sphere::authalic(1.0, -0.1).unwrap().radius() > 1.0);
    }

    #[test]
    fn inverse_along_equator() {
        let sol = unit().inverse(0.0, 0.0, 0.0, 90.0, ALL);
        assert_relative_eq!(sol.s12, PI / 2.0, epsilon = 1e-15);
        assert_relative_eq!(sol.a12, 90.0, epsilon = 1e-12);
        assert_relative_eq!(sol.azi1, 90.0, epsilon = 1e-12);
        assert_relative_eq!(sol.azi2, 90.0, epsilon = 1e-12);
        assert_relative_eq!(sol.area, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn inverse_to_pole() {
        let sol = unit().inverse(0.0, 90.0, 90.0, 0.0, ALL);
        assert_relative_eq!(sol.s12, PI / 2.0, epsilon = 1e-15);
        assert_relative_eq!(sol.azi1, 0.0, epsilon = 1e-12);
        assert_relative_eq!(sol.area, -PI / 2.0, epsilon = 1e-15);
    }

    #[test]
    fn inverse_area_flips_with_direction() {
        let engine = unit();
        let fwd = engine.inverse(10.0, 20.0, 40.0, 60.0, ALL);
        let back = engine.inverse(40.0, 60.0, 10.0, 20.0, ALL);
        assert_relative_eq!(fwd.s12, back.s12, epsilon = 1e-15);
        assert_relative_eq!(fwd.area, -back.area, epsilon = 1e-15);
        // Eastbound in the north bounds a positive strip.
        assert!(fwd.area > 0.0);
    }

    #[test]
    fn inverse_antipodal_on_equator() {
        let sol = unit().inverse(0.0, 0.0, 0.0, 180.0, ALL);
        assert_relative_eq!(sol.s12, PI, epsilon = 1e-15);
        assert_relative_eq!(sol.a12, 180.0, epsilon = 1e-12);
    }

    #[test]
    fn unrequested_outputs_are_nan() {
        let sol = unit().inverse(0.0, 0.0, 10.0, 10.0, Outputs::DISTANCE);
        assert!(sol.s12.is_finite());
        assert!(sol.area.is_nan());
        assert!(sol.azi1.is_nan());

        let sol = unit().direct(0.0, 0.0, 30.0, 0.5, Outputs::LATITUDE);
        assert!(sol.lat2.is_finite());
        assert!(sol.lon2.is_nan());
        assert!(sol.area.is_nan());
    }

    #[test]
    fn direct_due_north_reaches_pole() {
        let sol = unit().direct(0.0, 0.0, 0.0, PI / 2.0, ALL);
        assert_relative_eq!(sol.lat2, 90.0, epsilon = 1e-12);
        assert_relative_eq!(sol.area, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn direct_unrolls_longitude() {
        let engine = unit();
        let s12 = 20f64.to_radians();
        let unrolled = engine.direct(0.0, 170.0, 90.0, s12, ALL);
        assert_relative_eq!(unrolled.lon2, 190.0, epsilon = 1e-10);
        let reduced = engine.direct(0.0, 170.0, 90.0, s12, ALL - Outputs::LONG_UNROLL);
        assert_relative_eq!(reduced.lon2, -170.0, epsilon = 1e-10);
        assert_relative_eq!(reduced.lat2, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn direct_matches_inverse() {
        let engine = Sphere::default();
        let inv = engine.inverse(10.0, 20.0, 40.0, 60.0, ALL);
        let dir = engine.direct(10.0, 20.0, inv.azi1, inv.s12, ALL);
        assert_relative_eq!(dir.lat2, 40.0, epsilon = 1e-9);
        assert_relative_eq!(dir.lon2, 60.0, epsilon = 1e-9);
        assert_relative_eq!(dir.azi2, inv.azi2, epsilon = 1e-9);
        assert_relative_eq!(dir.area, inv.area, max_relative = 1e-9);

        let inv = engine.inverse(-30.0, 100.0, 25.0, -150.0, ALL);
        let dir = engine.direct(-30.0, 100.0, inv.azi1, inv.s12, ALL);
        assert_relative_eq!(dir.lat2, 25.0, epsilon = 1e-9);
        assert_relative_eq!(ang_normalize(dir.lon2), -150.0, epsilon = 1e-9);
        assert_relative_eq!(dir.area, inv.area, max_relative = 1e-9);
    }
}
