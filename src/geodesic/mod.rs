mod sphere;

pub use sphere::Sphere;

use bitflags::bitflags;

/// Equatorial radius of the WGS84 ellipsoid in meters.
pub const WGS84_A: f64 = 6_378_137.0;

/// Flattening of the WGS84 ellipsoid.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

bitflags! {
    /// Outputs requested from a geodesic solve.
    ///
    /// Quantities that are not requested come back as `NaN`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Outputs: u32 {
        /// Latitude of the end point (direct problem).
        const LATITUDE = 1 << 0;
        /// Longitude of the end point (direct problem).
        const LONGITUDE = 1 << 1;
        /// Azimuths at both ends.
        const AZIMUTH = 1 << 2;
        /// Distance between the points (inverse problem).
        const DISTANCE = 1 << 3;
        /// Area differential `S12`.
        const AREA = 1 << 4;
        /// Return the end longitude unrolled instead of reduced to `(-180, 180]`.
        const LONG_UNROLL = 1 << 5;
    }
}

/// Result of an inverse solve between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseSolution {
    /// Arc length on the auxiliary sphere, in degrees.
    pub a12: f64,
    /// Distance between the points, in meters.
    pub s12: f64,
    /// Forward azimuth at the first point, in degrees.
    pub azi1: f64,
    /// Forward azimuth at the second point, in degrees.
    pub azi2: f64,
    /// Area between the geodesic and the equator, in square meters.
    pub area: f64,
}

/// Result of a direct solve from a point along an azimuth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectSolution {
    /// Arc length on the auxiliary sphere, in degrees.
    pub a12: f64,
    /// Latitude of the end point, in degrees.
    pub lat2: f64,
    /// Longitude of the end point, in degrees.
    pub lon2: f64,
    /// Forward azimuth at the end point, in degrees.
    pub azi2: f64,
    /// Area between the geodesic and the equator, in square meters.
    pub area: f64,
}

/// Solver for the direct and inverse geodesic problems on a reference surface.
///
/// Implementations must be pure: the same inputs always give the same
/// outputs. The area differential follows the convention that summing it
/// around a closed ring yields a clockwise-positive total.
pub trait GeodesicEngine {
    /// Solves the inverse problem from `(lat1, lon1)` to `(lat2, lon2)`.
    fn inverse(
        &self,
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
        outputs: Outputs,
    ) -> InverseSolution;

    /// Solves the direct problem from `(lat1, lon1)` along `azi1` for `s12` meters.
    fn direct(
        &self,
        lat1: f64,
        lon1: f64,
        azi1: f64,
        s12: f64,
        outputs: Outputs,
    ) -> DirectSolution;

    /// Square of the radius of the sphere with the same area as the surface.
    fn authalic_radius_squared(&self) -> f64;
}
