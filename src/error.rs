use thiserror::Error;

/// Top-level error type for trackline.
#[derive(Debug, Error)]
pub enum TracklineError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    ProfileConfig(#[from] ProfileConfigError),

    #[error(transparent)]
    Bind(#[from] BindError),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Errors raised while constructing or sampling segment geometry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("non-finite value for {0}")]
    NonFinite(&'static str),

    #[error("track has no segments")]
    EmptyTrack,

    #[error("segment {index} ends {gap} away from the start of the next segment")]
    Discontinuous { index: usize, gap: f64 },
}

/// Errors raised while binding a motion profile to a track length.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProfileConfigError {
    #[error("profile length must be finite and non-negative, got {0}")]
    InvalidLength(f64),

    #[error("invalid {parameter} = {value}")]
    InvalidParameter { parameter: &'static str, value: f64 },

    #[error("conflicting acceleration parameters: {0}")]
    ConflictingParameters(&'static str),

    #[error("keyframe profile needs at least two points, got {0}")]
    TooFewKeyframes(usize),

    #[error("keyframe {index} has alpha {alpha} outside [0, 1]")]
    KeyframeOutOfRange { index: usize, alpha: f64 },

    #[error("keyframe {index}: {field} is out of order")]
    NonMonotonic { index: usize, field: &'static str },

    #[error("keyframe {index}: slope would make the profile non-monotonic")]
    NonMonotonicTangent { index: usize },

    #[error("first keyframe distance must be 0, got {0}")]
    StartMismatch(f64),

    #[error("profile covers length {actual} but the track is {expected} long")]
    LengthMismatch { expected: f64, actual: f64 },

    #[error("acceleration cannot satisfy both boundary conditions: {0}")]
    Unsatisfiable(String),
}

/// Errors raised while binding a body to a span of a track.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BindError {
    #[error("endpoint is `auto` but no body position was supplied")]
    MissingBodyPosition,

    #[error("invalid endpoint {0}")]
    InvalidEndpoint(f64),
}

/// Errors raised by track store lookups.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LookupError {
    #[error("track not found: {0}")]
    TrackNotFound(String),
}

/// An arc-length query landed outside `[0, length]` and was clamped.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("arc length {requested} clamped to {clamped} on a track of length {length}")]
pub struct OutOfRangeWarning {
    pub requested: f64,
    pub clamped: f64,
    pub length: f64,
}

/// The extents gave no usable scale; a unit of 1 was used instead.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("degenerate raw scale {raw}; falling back to unit 1")]
pub struct DegenerateScaleWarning {
    pub raw: f64,
}

/// Convenience type alias for results using [`TracklineError`].
pub type Result<T> = std::result::Result<T, TracklineError>;
