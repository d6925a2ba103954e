use std::{fmt, str::FromStr};

use itertools::Itertools;
use serde_json::json;

use crate::{bbox::Bbox, error::Error};

/// The formats a bounding box can be written in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `left bottom right top`
    #[default]
    Plain,

    /// `left,bottom,right,top`
    Comma,

    /// A WKT polygon
    Wkt,

    /// A GeoJSON polygon geometry
    GeoJson,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Plain,
        OutputFormat::Comma,
        OutputFormat::Wkt,
        OutputFormat::GeoJson,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Comma => "comma",
            OutputFormat::Wkt => "wkt",
            OutputFormat::GeoJson => "geojson",
        }
    }

    /// Writes the given bounding box in this format
    pub fn format(self, bbox: &Bbox) -> String {
        let Bbox {
            left,
            bottom,
            right,
            top,
        } = *bbox;
        let ring = [
            (left, bottom),
            (right, bottom),
            (right, top),
            (left, top),
            (left, bottom),
        ];

        match self {
            OutputFormat::Plain => [left, bottom, right, top].iter().join(" "),
            OutputFormat::Comma => [left, bottom, right, top].iter().join(","),
            OutputFormat::Wkt => format!(
                "POLYGON(({}))",
                ring.iter().map(|(x, y)| format!("{x} {y}")).join(",")
            ),
            OutputFormat::GeoJson => json!({
                "type": "Polygon",
                "coordinates": [ring.iter().map(|(x, y)| [x, y]).collect::<Vec<_>>()],
            })
            .to_string(),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownFormat(s.to_string()))
    }
}
