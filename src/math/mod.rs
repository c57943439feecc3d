mod accumulator;
pub mod angle;

pub use accumulator::Accumulator;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Smallest positive value used to nudge cosines away from zero at the poles.
pub const TINY: f64 = 1.491_668_146_240_041_3e-154;
