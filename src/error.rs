use thiserror::Error;

/// Top-level error type for geoarea.
#[derive(Debug, Error)]
pub enum GeoAreaError {
    #[error(transparent)]
    Ellipsoid(#[from] EllipsoidError),
}

/// Errors related to the parameters of a reference surface.
#[derive(Debug, Error, PartialEq)]
pub enum EllipsoidError {
    #[error("equatorial radius {0} must be positive and finite")]
    InvalidRadius(f64),

    #[error("flattening {0} must be finite and less than 1")]
    InvalidFlattening(f64),
}

/// Convenience type alias for results using [`GeoAreaError`].
pub type Result<T> = std::result::Result<T, GeoAreaError>;
