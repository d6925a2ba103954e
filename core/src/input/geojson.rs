use std::io::Read;

use geo::Rect;
use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use crate::{
    bbox::Bbox,
    error::{Error, Result},
    util::extend_rect::ExtendRect,
};

/// A coordinate. Only the first two components are used. Positions with
/// fewer than two components are skipped.
type Position = Vec<f64>;

/// A GeoJSON geometry decoded down to its coordinates
#[derive(Debug, PartialEq)]
pub enum Geometry {
    Point(Position),
    LineString(Vec<Position>),
    Polygon(Vec<Vec<Position>>),
    MultiPoint(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
    GeometryCollection(Vec<Geometry>),
}

/// Decodes `coordinates` into the nesting depth `T` expected by a
/// geometry type. Returns [`None`] if the value does not have this shape.
fn decode<'a, T: Deserialize<'a>>(coordinates: &'a Value) -> Option<T> {
    T::deserialize(coordinates).ok()
}

impl Geometry {
    /// Decodes a GeoJSON geometry object. Returns [`None`] if the object has
    /// no type, an unknown type, or no coordinates matching its type.
    pub fn from_value(v: &Value) -> Option<Geometry> {
        let kind = v.get("type").and_then(Value::as_str).unwrap_or_default();
        if kind == "GeometryCollection" {
            let geometries = v.get("geometries").and_then(Value::as_array)?;
            return Some(Geometry::GeometryCollection(
                geometries.iter().filter_map(Geometry::from_value).collect(),
            ));
        }

        let coordinates = v.get("coordinates").filter(|c| !c.is_null())?;
        match kind {
            "Point" => decode(coordinates).map(Geometry::Point),
            "LineString" => decode(coordinates).map(Geometry::LineString),
            "Polygon" => decode(coordinates).map(Geometry::Polygon),
            "MultiPoint" => decode(coordinates).map(Geometry::MultiPoint),
            "MultiLineString" => decode(coordinates).map(Geometry::MultiLineString),
            "MultiPolygon" => decode(coordinates).map(Geometry::MultiPolygon),
            _ => None,
        }
    }

    /// Returns `true` if `kind` is the type of a GeoJSON geometry
    fn is_geometry_type(kind: &str) -> bool {
        matches!(
            kind,
            "Point"
                | "LineString"
                | "Polygon"
                | "MultiPoint"
                | "MultiLineString"
                | "MultiPolygon"
                | "GeometryCollection"
        )
    }

    /// Extends `acc` so it covers all valid positions of this geometry
    pub fn extend(&self, acc: &mut Option<Rect>) {
        match self {
            Geometry::Point(p) => extend_positions(acc, std::slice::from_ref(p)),
            Geometry::LineString(ps) | Geometry::MultiPoint(ps) => extend_positions(acc, ps),
            Geometry::Polygon(rings) | Geometry::MultiLineString(rings) => {
                for ring in rings {
                    extend_positions(acc, ring);
                }
            }
            Geometry::MultiPolygon(polygons) => {
                for ring in polygons.iter().flatten() {
                    extend_positions(acc, ring);
                }
            }
            Geometry::GeometryCollection(geometries) => {
                for g in geometries {
                    g.extend(acc);
                }
            }
        }
    }
}

fn extend_positions(acc: &mut Option<Rect>, positions: &[Position]) {
    for p in positions {
        if let [x, y, ..] = p.as_slice() {
            acc.extend_point(*x, *y);
        } else {
            trace!(components = p.len(), "Skipping incomplete position");
        }
    }
}

/// Returns the value of an object's `type` member
fn type_of(v: &Value) -> Option<&str> {
    v.get("type").and_then(Value::as_str)
}

/// The interpretations of a GeoJSON document, in the order they are tried
#[derive(Debug)]
enum Document<'a> {
    /// A list of features, either from a FeatureCollection, a bare array,
    /// or a single feature
    Features(Vec<&'a Value>),

    /// A geometry without a feature around it
    Geometry(&'a Value),

    /// Coordinates without a geometry around them
    Rings(Vec<Vec<Position>>),
}

impl<'a> Document<'a> {
    fn interpret(v: &'a Value) -> Option<Document<'a>> {
        match v {
            Value::Object(_) => match type_of(v)? {
                "FeatureCollection" => {
                    // members are not required to carry a type
                    let features = v
                        .get("features")
                        .and_then(Value::as_array)
                        .map(|fs| fs.iter().collect())
                        .unwrap_or_default();
                    Some(Document::Features(features))
                }
                "Feature" => Some(Document::Features(vec![v])),
                kind if Geometry::is_geometry_type(kind) => Some(Document::Geometry(v)),
                _ => None,
            },

            Value::Array(elements) => {
                let features: Vec<_> = elements
                    .iter()
                    .filter(|e| type_of(e) == Some("Feature"))
                    .collect();
                if !features.is_empty() {
                    return Some(Document::Features(features));
                }

                if let Some(rings) = decode::<Vec<Vec<Position>>>(v).filter(|r| !r.is_empty()) {
                    return Some(Document::Rings(rings));
                }

                decode::<Vec<Position>>(v)
                    .filter(|r| !r.is_empty())
                    .map(|ring| Document::Rings(vec![ring]))
            }

            _ => None,
        }
    }

    /// Computes the bounding box of all features in the document
    fn bounds(&self) -> Result<Bbox> {
        let mut acc: Option<Rect> = None;
        match self {
            Document::Features(features) => {
                if features.is_empty() {
                    return Err(Error::NoFeaturesFound);
                }
                for f in features {
                    let geometry = f.get("geometry").and_then(Geometry::from_value);
                    let Some(geometry) = geometry else {
                        trace!("Skipping feature without usable geometry");
                        continue;
                    };
                    let mut feature_acc = None;
                    geometry.extend(&mut feature_acc);
                    if let Some(r) = feature_acc {
                        acc.extend_rect(&r);
                    }
                }
            }

            Document::Geometry(v) => {
                if let Some(geometry) = Geometry::from_value(v) {
                    geometry.extend(&mut acc);
                }
            }

            Document::Rings(rings) => {
                for ring in rings {
                    extend_positions(&mut acc, ring);
                }
            }
        }

        acc.map(Bbox::from).ok_or(Error::NoValidCoordinatesFound)
    }
}

/// Computes the bounding box of a parsed GeoJSON value
pub fn bounds_of(v: &Value) -> Result<Bbox> {
    Document::interpret(v)
        .ok_or(Error::CouldNotParseGeoJSON)?
        .bounds()
}

/// Parses a GeoJSON document and computes its bounding box
///
/// The document may be a FeatureCollection, an array of Features, a single
/// Feature, a single geometry, or a bare array of rings or positions.
/// Features without a usable geometry are skipped. The result is
/// [`Error::NoFeaturesFound`] if there are no features at all and
/// [`Error::NoValidCoordinatesFound`] if no feature contributed a position.
pub fn parse(bytes: &[u8]) -> Result<Bbox> {
    let v: Value = serde_json::from_slice(bytes).map_err(|_| Error::CouldNotParseGeoJSON)?;
    bounds_of(&v)
}

/// Reads a GeoJSON document from `reader` and computes its bounding box
pub fn from_reader<R: Read>(reader: R) -> Result<Bbox> {
    let v: Value = serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            Error::Io(e.into())
        } else {
            Error::CouldNotParseGeoJSON
        }
    })?;
    bounds_of(&v)
}
