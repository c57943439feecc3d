mod transit;

pub use transit::{transit, transit_direct};

use std::f64::consts::PI;

use tracing::{debug, trace};

use crate::geodesic::{GeodesicEngine, Outputs};
use crate::math::Accumulator;

/// Finalized properties of a polygon or polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonResult {
    /// Number of vertices.
    pub count: usize,
    /// Perimeter in meters. For a polygon this includes the closing edge.
    pub perimeter: f64,
    /// Enclosed area in square meters, or `NaN` for a polyline.
    pub area: f64,
}

impl PolygonResult {
    fn empty(count: usize, polyline: bool) -> Self {
        Self {
            count,
            perimeter: 0.0,
            area: if polyline { f64::NAN } else { 0.0 },
        }
    }
}

/// Incremental perimeter and area of a geodesic polygon.
///
/// Vertices are added one at a time, either as absolute positions
/// ([`add_vertex`](Self::add_vertex)) or relative to the current vertex
/// ([`add_edge`](Self::add_edge)). Each new segment is solved once by the
/// engine and its length and area differential are folded into compensated
/// running sums, so results stay accurate after many thousands of vertices.
///
/// [`compute`](Self::compute) reports the polygon as if it were closed back to
/// its first vertex without changing any state, and the `probe_*` methods do
/// the same for a tentative next vertex or edge.
///
/// In polyline mode only the path length is tracked and the area is `NaN`.
#[derive(Debug)]
pub struct PolygonArea<'a, G: GeodesicEngine> {
    engine: &'a G,
    outputs: Outputs,
    /// Total area of the surface; used to resolve the ambiguity of which side
    /// of the ring is enclosed.
    area0: f64,
    count: usize,
    crossings: i32,
    perimeter_sum: Accumulator,
    /// Running sum of area differentials; `None` in polyline mode.
    area_sum: Option<Accumulator>,
    lat0: f64,
    lon0: f64,
    lat1: f64,
    lon1: f64,
}

impl<'a, G: GeodesicEngine> PolygonArea<'a, G> {
    /// Creates an empty polygon, or an empty polyline if `polyline` is true.
    #[must_use]
    pub fn new(engine: &'a G, polyline: bool) -> Self {
        let outputs = Outputs::LATITUDE
            | Outputs::LONGITUDE
            | Outputs::DISTANCE
            | if polyline {
                Outputs::empty()
            } else {
                Outputs::AREA | Outputs::LONG_UNROLL
            };
        let mut polygon = Self {
            engine,
            outputs,
            area0: 4.0 * PI * engine.authalic_radius_squared(),
            count: 0,
            crossings: 0,
            perimeter_sum: Accumulator::default(),
            area_sum: (!polyline).then(Accumulator::default),
            lat0: f64::NAN,
            lon0: f64::NAN,
            lat1: f64::NAN,
            lon1: f64::NAN,
        };
        polygon.reset();
        polygon
    }

    /// Creates an empty polygon.
    #[must_use]
    pub fn polygon(engine: &'a G) -> Self {
        Self::new(engine, false)
    }

    /// Creates an empty polyline.
    #[must_use]
    pub fn polyline(engine: &'a G) -> Self {
        Self::new(engine, true)
    }

    /// Removes all vertices, keeping the engine and the mode.
    pub fn reset(&mut self) {
        self.count = 0;
        self.crossings = 0;
        self.perimeter_sum.set(0.0);
        if let Some(area_sum) = &mut self.area_sum {
            area_sum.set(0.0);
        }
        self.lat0 = f64::NAN;
        self.lon0 = f64::NAN;
        self.lat1 = f64::NAN;
        self.lon1 = f64::NAN;
        trace!(polyline = self.is_polyline(), "polygon reset");
    }

    /// Returns the engine the polygon is bound to.
    #[must_use]
    pub fn engine(&self) -> &'a G {
        self.engine
    }

    /// Returns true if this object measures an open path.
    #[must_use]
    pub fn is_polyline(&self) -> bool {
        self.area_sum.is_none()
    }

    /// Returns the number of vertices added since the last reset.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.count
    }

    /// Returns the most recently added vertex as `(lat, lon)`, or a pair of
    /// `NaN` if there is none.
    #[must_use]
    pub fn current_vertex(&self) -> (f64, f64) {
        (self.lat1, self.lon1)
    }

    /// Adds a vertex at `(lat, lon)` in degrees.
    pub fn add_vertex(&mut self, lat: f64, lon: f64) {
        if self.count == 0 {
            self.lat0 = lat;
            self.lon0 = lon;
        } else {
            let step = self
                .engine
                .inverse(self.lat1, self.lon1, lat, lon, self.outputs);
            self.perimeter_sum.add(step.s12);
            if let Some(area_sum) = &mut self.area_sum {
                area_sum.add(step.area);
                self.crossings += transit(self.lon1, lon);
            }
        }
        self.lat1 = lat;
        self.lon1 = lon;
        self.count += 1;
        trace!(count = self.count, lat, lon, "vertex added");
    }

    /// Adds a vertex `distance` meters from the current vertex along
    /// `azimuth` degrees.
    ///
    /// Does nothing if there is no vertex yet.
    pub fn add_edge(&mut self, azimuth: f64, distance: f64) {
        if self.count == 0 {
            trace!(azimuth, distance, "edge ignored on empty polygon");
            return;
        }
        let step = self
            .engine
            .direct(self.lat1, self.lon1, azimuth, distance, self.outputs);
        self.perimeter_sum.add(distance);
        if let Some(area_sum) = &mut self.area_sum {
            area_sum.add(step.area);
            self.crossings += transit_direct(self.lon1, step.lon2);
        }
        self.lat1 = step.lat2;
        self.lon1 = step.lon2;
        self.count += 1;
        trace!(
            count = self.count,
            azimuth,
            distance,
            lat = step.lat2,
            lon = step.lon2,
            "edge added"
        );
    }

    /// Computes the perimeter and area of the polygon closed back to its
    /// first vertex.
    ///
    /// With `reverse` false, counter-clockwise traversal gives a positive
    /// area. With `sign` true the area lies in `(-A/2, A/2]`, where `A` is
    /// the area of the whole surface, so a ring traversed the "wrong" way
    /// reports a negative area; otherwise it lies in `[0, A)` and such a ring
    /// reports the area of the rest of the surface.
    #[must_use]
    pub fn compute(&self, reverse: bool, sign: bool) -> PolygonResult {
        if self.count < 2 {
            return PolygonResult::empty(self.count, self.is_polyline());
        }
        let Some(mut area) = self.area_sum else {
            return PolygonResult {
                count: self.count,
                perimeter: self.perimeter_sum.sum(),
                area: f64::NAN,
            };
        };
        let closing = self
            .engine
            .inverse(self.lat1, self.lon1, self.lat0, self.lon0, self.outputs);
        area.add(closing.area);
        let crossings = self.crossings + transit(self.lon1, self.lon0);
        PolygonResult {
            count: self.count,
            perimeter: self.perimeter_sum.sum_with(closing.s12),
            area: self.reduce_area(area, crossings, reverse, sign),
        }
    }

    /// Computes the result as if `(lat, lon)` were added as the next vertex,
    /// without adding it.
    #[must_use]
    pub fn probe_vertex(&self, lat: f64, lon: f64, reverse: bool, sign: bool) -> PolygonResult {
        if self.count == 0 {
            return PolygonResult::empty(1, self.is_polyline());
        }
        let count = self.count + 1;
        let step = self
            .engine
            .inverse(self.lat1, self.lon1, lat, lon, self.outputs);
        let mut perimeter = self.perimeter_sum;
        perimeter.add(step.s12);
        let Some(mut area) = self.area_sum else {
            return PolygonResult {
                count,
                perimeter: perimeter.sum(),
                area: f64::NAN,
            };
        };
        area.add(step.area);
        let closing = self
            .engine
            .inverse(lat, lon, self.lat0, self.lon0, self.outputs);
        area.add(closing.area);
        let crossings = self.crossings + transit(self.lon1, lon) + transit(lon, self.lon0);
        PolygonResult {
            count,
            perimeter: perimeter.sum_with(closing.s12),
            area: self.reduce_area(area, crossings, reverse, sign),
        }
    }

    /// Computes the result as if an edge of `distance` meters along
    /// `azimuth` degrees were added, without adding it.
    ///
    /// With no current vertex the count is 0 and perimeter and area are
    /// `NaN`.
    #[must_use]
    pub fn probe_edge(
        &self,
        azimuth: f64,
        distance: f64,
        reverse: bool,
        sign: bool,
    ) -> PolygonResult {
        if self.count == 0 {
            return PolygonResult {
                count: 0,
                perimeter: f64::NAN,
                area: f64::NAN,
            };
        }
        let count = self.count + 1;
        let mut perimeter = self.perimeter_sum;
        perimeter.add(distance);
        let Some(mut area) = self.area_sum else {
            return PolygonResult {
                count,
                perimeter: perimeter.sum(),
                area: f64::NAN,
            };
        };
        let step = self
            .engine
            .direct(self.lat1, self.lon1, azimuth, distance, self.outputs);
        area.add(step.area);
        let closing = self
            .engine
            .inverse(step.lat2, step.lon2, self.lat0, self.lon0, self.outputs);
        area.add(closing.area);
        let crossings =
            self.crossings + transit_direct(self.lon1, step.lon2) + transit(step.lon2, self.lon0);
        PolygonResult {
            count,
            perimeter: perimeter.sum_with(closing.s12),
            area: self.reduce_area(area, crossings, reverse, sign),
        }
    }

    /// Turns a clockwise-positive raw area sum into the reported area.
    fn reduce_area(&self, mut area: Accumulator, crossings: i32, reverse: bool, sign: bool) -> f64 {
        let half = self.area0 / 2.0;
        // An odd number of crossings means the ring encircles a pole.
        if crossings & 1 != 0 {
            area.add(if area.sum() < 0.0 { half } else { -half });
            debug!(crossings, "ring encircles a pole");
        }
        if !reverse {
            area.negate();
        }
        if sign {
            if area.sum() > half {
                area.add(-self.area0);
            } else if area.sum() <= -half {
                area.add(self.area0);
            }
        } else if area.sum() >= self.area0 {
            area.add(-self.area0);
        } else if area.sum() < 0.0 {
            area.add(self.area0);
        }
        0.0 + area.sum()
    }
}

impl<G: GeodesicEngine> Extend<(f64, f64)> for PolygonArea<'_, G> {
    /// Adds each `(lat, lon)` pair as a vertex.
    fn extend<I: IntoIterator<Item = (f64, f64)>>(&mut self, iter: I) {
        for (lat, lon) in iter {
            self.add_vertex(lat, lon);
        }
    }
}
