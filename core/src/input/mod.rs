//! Parsers that compute bounding boxes from input data

pub mod file;
pub mod geojson;
pub mod raw;
pub mod shapefile;
pub mod sniff;
