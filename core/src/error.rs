use thiserror::Error;

use crate::bbox::Bbox;

/// Errors that can occur while resolving a bounding box
#[derive(Error, Debug)]
pub enum Error {
    #[error("no way to build a bounding box from the given arguments")]
    NoUsableBuilder,

    #[error("unexpected argument `{field}' (not used when building a box from {strategy})")]
    UnexpectedArgument {
        field: &'static str,
        strategy: &'static str,
    },

    #[error("invalid `{field}': {message}")]
    InputValidation {
        field: &'static str,
        message: String,
    },

    #[error("a buffer was given but there is no bounding box to apply it to")]
    BufferWithoutBbox,

    #[error("unable to apply buffer of {amount} to an axis of width {width}: box would be inverted")]
    Shrink { width: f64, amount: f64 },

    #[error("invalid bounding box {bbox}")]
    InvalidBbox { bbox: Bbox },

    #[error("unrecognized input format")]
    UnrecognizedFormat,

    #[error("could not parse GeoJSON")]
    CouldNotParseGeoJSON,

    #[error("no features found")]
    NoFeaturesFound,

    #[error("no valid coordinates found")]
    NoValidCoordinatesFound,

    #[error("invalid shapefile file code {0} (expected 9994)")]
    InvalidFileCode(u32),

    #[error("invalid shapefile header version {0} (expected 1000)")]
    InvalidHeaderVersion(u32),

    #[error("shapefile header is too short ({len} bytes, expected 100)")]
    TruncatedHeader { len: usize },

    #[error("invalid token `{value}' at position {position}")]
    InvalidToken { position: usize, value: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown output format `{0}'")]
    UnknownFormat(String),

    #[error("geocoding failed: {0}")]
    Geocode(String),

    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
