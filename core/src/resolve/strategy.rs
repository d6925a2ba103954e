use tracing::trace;

use crate::{
    bbox::Bbox,
    error::{Error, Result},
    input::{file::FileLoader, raw},
    params::{Field, InputParams},
    resolve::geocode::Geocoder,
};

/// A way to build a bounding box from [`InputParams`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Raw coordinates or GeoJSON
    Raw,

    /// A geocoded place name
    Place,

    /// GeoJSON files or shapefiles
    File,

    /// A center coordinate and a size
    Center,

    /// Explicit bounds, or a bound and a size per axis
    Bounds,
}

/// Parses a size given as a string. Returns [`None`] if it is empty.
fn parse_length(field: Field, value: &str) -> Result<Option<f64>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|_| Error::InputValidation {
            field: field.name(),
            message: format!("`{value}' is not a number"),
        })
}

/// Resolves the extent of one axis from a minimum, a maximum, and a length.
/// Exactly two of them must be given.
fn resolve_axis(
    field: &'static str,
    min: Option<f64>,
    max: Option<f64>,
    length: Option<f64>,
) -> Result<(f64, f64)> {
    let err = |message: &str| Error::InputValidation {
        field,
        message: message.to_string(),
    };

    match (min, max, length) {
        (None, None, _) => Err(err("must specify two of: min, max, or length")),
        (Some(_), None, None) => Err(err("min specified without max or length")),
        (None, Some(_), None) => Err(err("max specified without min or length")),
        (Some(_), Some(_), Some(_)) => Err(err("must specify only two of: min, max, and length")),
        (Some(min), Some(max), None) => Ok((min, max)),
        (Some(min), None, Some(length)) => Ok((min, min + length)),
        (None, Some(max), Some(length)) => Ok((max - length, max)),
    }
}

/// Parses width and height, which must either both be given or both be
/// missing
fn parse_size(params: &InputParams) -> Result<Option<(f64, f64)>> {
    let width = parse_length(Field::Width, &params.width)?;
    let height = parse_length(Field::Height, &params.height)?;
    match (width, height) {
        (Some(w), Some(h)) => Ok(Some((w, h))),
        (None, None) => Ok(None),
        (Some(_), None) => Err(Error::InputValidation {
            field: Field::Height.name(),
            message: "must be given together with width".to_string(),
        }),
        (None, Some(_)) => Err(Error::InputValidation {
            field: Field::Width.name(),
            message: "must be given together with height".to_string(),
        }),
    }
}

/// Creates a box of the given size around a center
fn centered(x: f64, y: f64, width: f64, height: f64) -> Bbox {
    Bbox::new(
        x - width / 2.0,
        y - height / 2.0,
        x + width / 2.0,
        y + height / 2.0,
    )
}

impl Strategy {
    /// All strategies in the order in which they are tried
    pub const PRIORITY: [Strategy; 5] = [
        Strategy::Raw,
        Strategy::Place,
        Strategy::File,
        Strategy::Center,
        Strategy::Bounds,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Raw => "raw",
            Strategy::Place => "place",
            Strategy::File => "file",
            Strategy::Center => "center",
            Strategy::Bounds => "bounds",
        }
    }

    /// Returns `true` if this strategy can be used for the given params
    pub fn is_usable(self, params: &InputParams) -> bool {
        match self {
            Strategy::Raw => params.is_set(Field::Raw),
            Strategy::Place => params.is_set(Field::Place),
            Strategy::File => params.is_set(Field::File),
            Strategy::Center => params.is_set(Field::Center),
            Strategy::Bounds => [Field::Left, Field::Bottom, Field::Right, Field::Top]
                .into_iter()
                .any(|f| params.is_set(f)),
        }
    }

    /// The fields this strategy reads. All other fields except for the
    /// buffer must not be set.
    pub fn used_fields(self) -> &'static [Field] {
        match self {
            Strategy::Raw => &[Field::Raw],
            Strategy::Place => &[Field::Place, Field::Width, Field::Height],
            Strategy::File => &[Field::File],
            Strategy::Center => &[Field::Center, Field::Width, Field::Height],
            Strategy::Bounds => &[
                Field::Left,
                Field::Bottom,
                Field::Right,
                Field::Top,
                Field::Width,
                Field::Height,
            ],
        }
    }

    /// Checks the combination of values before the box is built
    pub fn validate(self, params: &InputParams) -> Result<()> {
        match self {
            Strategy::Raw | Strategy::File => Ok(()),

            Strategy::Place => parse_size(params).map(|_| ()),

            Strategy::Center => {
                if params.center.as_ref().map_or(0, Vec::len) != 2 {
                    return Err(Error::InputValidation {
                        field: Field::Center.name(),
                        message: "must consist of exactly two coordinates".to_string(),
                    });
                }
                match parse_size(params)? {
                    Some(_) => Ok(()),
                    None => Err(Error::InputValidation {
                        field: Field::Width.name(),
                        message: "width and height are required with a center".to_string(),
                    }),
                }
            }

            Strategy::Bounds => self.bounds(params).map(|_| ()),
        }
    }

    /// Resolves both axes of the bounds strategy
    fn bounds(self, params: &InputParams) -> Result<Bbox> {
        let (left, right) = resolve_axis(
            "left, right, width",
            params.left,
            params.right,
            parse_length(Field::Width, &params.width)?,
        )?;
        let (bottom, top) = resolve_axis(
            "bottom, top, height",
            params.bottom,
            params.top,
            parse_length(Field::Height, &params.height)?,
        )?;
        Ok(Bbox::new(left, bottom, right, top))
    }

    /// Builds the bounding box. [`Strategy::validate`] must have succeeded.
    pub fn build(
        self,
        params: &InputParams,
        geocoder: Option<&dyn Geocoder>,
        file_loader: &dyn FileLoader,
    ) -> Result<Bbox> {
        match self {
            Strategy::Raw => raw::parse(params.raw.as_deref().unwrap_or_default()),

            Strategy::Place => {
                let geocoder = geocoder
                    .ok_or_else(|| Error::Geocode("no geocoder configured".to_string()))?;
                let location = geocoder.geocode(&params.place)?;
                match (parse_size(params)?, location.extent) {
                    (Some((w, h)), _) => Ok(centered(location.location_x, location.location_y, w, h)),
                    (None, Some(extent)) => Ok(extent),
                    (None, None) => Err(Error::InputValidation {
                        field: Field::Place.name(),
                        message: format!(
                            "the extent of `{}' is unknown, please provide width and height",
                            params.place
                        ),
                    }),
                }
            }

            Strategy::File => {
                let mut result: Option<Bbox> = None;
                for path in &params.file {
                    match file_loader.load(path) {
                        Ok(bbox) => {
                            result = Some(match result {
                                Some(r) => r.union(&bbox),
                                None => bbox,
                            });
                        }
                        Err(Error::NoFeaturesFound) => {
                            trace!(path, "Skipping file without features");
                        }
                        Err(e) => return Err(e),
                    }
                }
                result.ok_or(Error::NoFeaturesFound)
            }

            Strategy::Center => {
                let (w, h) = parse_size(params)?.unwrap_or_default();
                let (x, y) = match params.center.as_deref() {
                    Some(&[x, y]) => (x, y),
                    _ => {
                        return Err(Error::InputValidation {
                            field: Field::Center.name(),
                            message: "must consist of exactly two coordinates".to_string(),
                        })
                    }
                };
                let bbox = centered(x, y, w, h);
                bbox.validate()?;
                Ok(bbox)
            }

            Strategy::Bounds => {
                let bbox = self.bounds(params)?;
                bbox.validate()?;
                Ok(bbox)
            }
        }
    }
}
