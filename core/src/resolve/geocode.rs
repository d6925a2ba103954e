use crate::{bbox::Bbox, error::Result};

/// The location of a named place
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeocodeResult {
    pub location_x: f64,
    pub location_y: f64,

    /// The extent of the place, if the geocoder knows it
    pub extent: Option<Bbox>,
}

/// Looks up named places. Implementations should return
/// [`crate::error::Error::Geocode`] if the lookup fails.
pub trait Geocoder {
    fn geocode(&self, place: &str) -> Result<GeocodeResult>;
}

impl<F> Geocoder for F
where
    F: Fn(&str) -> Result<GeocodeResult>,
{
    fn geocode(&self, place: &str) -> Result<GeocodeResult> {
        self(place)
    }
}
