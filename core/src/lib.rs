//! Resolves a single bounding box from coordinates, GeoJSON, shapefiles,
//! place names, or a center and a size

pub mod bbox;
pub mod error;
pub mod input;
pub mod output;
pub mod params;
pub mod resolve;
pub mod util;

pub use bbox::Bbox;
pub use error::{Error, Result};
pub use params::InputParams;
pub use resolve::{resolve, InputResolver};
