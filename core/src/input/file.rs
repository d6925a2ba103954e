use std::{
    fs::File,
    io::{self, Read},
};

use tracing::{debug, trace};

use crate::{
    bbox::Bbox,
    error::{Error, Result},
    input::{
        geojson, shapefile,
        sniff::{classify, Format, SNIFF_PREFIX_LEN},
    },
    util::peek_read::PeekRead,
};

/// Loads the bounding box of a file
pub trait FileLoader {
    /// Computes the bounding box of the file at `path`. Returns
    /// [`Error::NoFeaturesFound`] if the file does not contain any data.
    fn load(&self, path: &str) -> Result<Bbox>;
}

/// A [`FileLoader`] that reads GeoJSON files and shapefiles from the file
/// system. The path `-` stands for standard input.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsFileLoader;

impl FileLoader for FsFileLoader {
    fn load(&self, path: &str) -> Result<Bbox> {
        debug!(path, "Loading file");
        if path == "-" {
            load_from(io::stdin().lock())
        } else {
            let file = File::open(path)?;
            load_from(file)
        }
    }
}

/// Detects the format of the data in `reader` and computes its bounding
/// box
///
/// A shapefile starts with a zero byte and GeoJSON with `{` or `[`, so no
/// input is classified as both and the detected format's error is final.
pub fn load_from<R: Read>(reader: R) -> Result<Bbox> {
    let mut reader = PeekRead::new(reader, SNIFF_PREFIX_LEN)?;
    let format = classify(reader.prefix());
    debug!(?format, prefix_len = reader.prefix().len(), "Classified input");

    let bbox = match format {
        Format::GeoJson => geojson::from_reader(&mut reader),

        // shapefile headers always fit into the prefix, so the stream is
        // not consumed here
        Format::Shapefile => shapefile::decode_header(reader.prefix()),

        Format::Unrecognized => Err(Error::UnrecognizedFormat),
    }?;

    if bbox.is_empty() {
        trace!("File has no data");
        return Err(Error::NoFeaturesFound);
    }

    Ok(bbox)
}
