//! Perimeter and area of polygons whose edges are geodesics on a reference
//! surface.
//!
//! ```
//! use geoarea::{PolygonArea, Sphere};
//!
//! let earth = Sphere::default();
//! let mut polygon = PolygonArea::polygon(&earth);
//! polygon.extend([(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
//! let result = polygon.compute(false, true);
//! assert_eq!(result.count, 4);
//! assert!(result.area > 1.2e10 && result.area < 1.3e10);
//! ```

pub mod error;
pub mod geodesic;
pub mod math;
pub mod polygon;

pub use error::{GeoAreaError, Result};
pub use geodesic::{GeodesicEngine, Outputs, Sphere};
pub use polygon::{PolygonArea, PolygonResult};
