use std::io::Read;

use crate::{
    bbox::Bbox,
    error::{Error, Result},
};

/// The length of a shapefile's main file header
pub const HEADER_LEN: usize = 100;

/// The file code every shapefile starts with (big endian)
pub const FILE_CODE: u32 = 9994;

/// The only shapefile version in existence (little endian)
pub const VERSION: u32 = 1000;

/// Bounds at or below this value mean "no data"
const NO_DATA: f64 = -1e38;

const OFFSET_VERSION: usize = 28;
const OFFSET_MIN_X: usize = 36;
const OFFSET_MIN_Y: usize = 44;
const OFFSET_MAX_X: usize = 52;
const OFFSET_MAX_Y: usize = 60;

fn u32_be(buf: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}

fn u32_le(buf: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}

fn f64_le(buf: &[u8], offset: usize) -> f64 {
    let mut b = [0u8; 8];
    b.copy_from_slice(&buf[offset..offset + 8]);
    f64::from_le_bytes(b)
}

/// Returns `true` if `buf` looks like the start of a shapefile
pub fn has_signature(buf: &[u8]) -> bool {
    buf.len() >= HEADER_LEN && u32_be(buf, 0) == FILE_CODE
}

/// Decodes the bounding box stored in a shapefile header
///
/// "No data" bounds are turned into infinities: minima become `+inf` and
/// maxima `-inf`, so the result is reported as empty by
/// [`Bbox::is_empty`] and fails [`Bbox::validate`].
///
/// The header bounds are metadata written by whoever created the file. They
/// are not guaranteed to be the tight bounds of the stored shapes, and this
/// function does not scan the records to check.
pub fn decode_header(buf: &[u8]) -> Result<Bbox> {
    if buf.len() < HEADER_LEN {
        return Err(Error::TruncatedHeader { len: buf.len() });
    }

    let file_code = u32_be(buf, 0);
    if file_code != FILE_CODE {
        return Err(Error::InvalidFileCode(file_code));
    }

    let version = u32_le(buf, OFFSET_VERSION);
    if version != VERSION {
        return Err(Error::InvalidHeaderVersion(version));
    }

    let min = |v: f64| if v <= NO_DATA { f64::INFINITY } else { v };
    let max = |v: f64| if v <= NO_DATA { f64::NEG_INFINITY } else { v };

    Ok(Bbox::new(
        min(f64_le(buf, OFFSET_MIN_X)),
        min(f64_le(buf, OFFSET_MIN_Y)),
        max(f64_le(buf, OFFSET_MAX_X)),
        max(f64_le(buf, OFFSET_MAX_Y)),
    ))
}

/// Reads a shapefile header from `reader` and decodes its bounding box
pub fn read_header<R: Read>(reader: R) -> Result<Bbox> {
    let mut buf = Vec::with_capacity(HEADER_LEN);
    reader.take(HEADER_LEN as u64).read_to_end(&mut buf)?;
    decode_header(&buf)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Cursor;

    use assertor::{assert_that, BooleanAssertion, EqualityAssertion};

    use crate::{bbox::Bbox, error::Error};

    use super::{decode_header, has_signature, read_header, HEADER_LEN};

    /// Creates a shapefile header with the given bounds
    pub(crate) fn header(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<u8> {
        let mut buf = vec![0u8; HEADER_LEN];
        buf[0..4].copy_from_slice(&9994u32.to_be_bytes());
        buf[24..28].copy_from_slice(&50u32.to_be_bytes());
        buf[28..32].copy_from_slice(&1000u32.to_le_bytes());
        buf[32..36].copy_from_slice(&5u32.to_le_bytes());
        buf[36..44].copy_from_slice(&min_x.to_le_bytes());
        buf[44..52].copy_from_slice(&min_y.to_le_bytes());
        buf[52..60].copy_from_slice(&max_x.to_le_bytes());
        buf[60..68].copy_from_slice(&max_y.to_le_bytes());
        buf
    }

    /// Decode a valid header
    #[test]
    fn valid() {
        let buf = header(8.5, 49.1, 9.75, 50.25);
        assert_that!(has_signature(&buf)).is_true();
        let bbox = decode_header(&buf).unwrap();
        assert_that!(bbox).is_equal_to(Bbox::new(8.5, 49.1, 9.75, 50.25));
    }

    /// The file code is checked
    #[test]
    fn invalid_file_code() {
        let mut buf = header(0.0, 0.0, 1.0, 1.0);
        buf[0..4].copy_from_slice(&1234u32.to_be_bytes());
        assert_that!(has_signature(&buf)).is_false();
        assert!(matches!(
            decode_header(&buf),
            Err(Error::InvalidFileCode(1234))
        ));
    }

    /// The version is checked
    #[test]
    fn invalid_version() {
        let mut buf = header(0.0, 0.0, 1.0, 1.0);
        buf[28..32].copy_from_slice(&1001u32.to_le_bytes());
        assert!(matches!(
            decode_header(&buf),
            Err(Error::InvalidHeaderVersion(1001))
        ));
    }

    /// Headers must be complete
    #[test]
    fn truncated() {
        let buf = header(0.0, 0.0, 1.0, 1.0);
        assert_that!(has_signature(&buf[0..99])).is_false();
        assert!(matches!(
            decode_header(&buf[0..99]),
            Err(Error::TruncatedHeader { len: 99 })
        ));
        assert!(matches!(
            read_header(Cursor::new(&buf[0..40])),
            Err(Error::TruncatedHeader { len: 40 })
        ));
    }

    /// "No data" bounds become infinities and make the box empty
    #[test]
    fn no_data() {
        let buf = header(-1e39, 2.0, 3.0, 4.0);
        let bbox = decode_header(&buf).unwrap();
        assert_that!(bbox.left).is_equal_to(f64::INFINITY);
        assert_that!(bbox.bottom).is_equal_to(2.0);
        assert_that!(bbox.is_empty()).is_true();
        assert!(bbox.validate().is_err());

        let buf = header(-1e38, -1e38, -1e38, -1e38);
        let bbox = decode_header(&buf).unwrap();
        assert_that!(bbox).is_equal_to(Bbox::new(
            f64::INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
        ));

        // the union with a real box is not affected by the empty one
        let u = bbox.union(&Bbox::new(1.0, 2.0, 3.0, 4.0));
        assert_that!(u).is_equal_to(Bbox::new(1.0, 2.0, 3.0, 4.0));
    }

    /// Only the header is consumed when reading from a stream
    #[test]
    fn read_from_stream() {
        let mut buf = header(-10.0, -20.0, 10.0, 20.0);
        buf.extend_from_slice(&[0xff; 64]);
        let bbox = read_header(Cursor::new(buf)).unwrap();
        assert_that!(bbox).is_equal_to(Bbox::new(-10.0, -20.0, 10.0, 20.0));
    }
}
