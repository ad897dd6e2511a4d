//! Extract the GPS position embedded in a JPEG photo's EXIF metadata.
//!
//! ```no_run
//! # fn main() -> photogeo::Result<()> {
//! let bytes = std::fs::read("IMG_2222.JPG").expect("read photo");
//! if let Some(c) = photogeo::read_coordinate(&bytes)? {
//!     println!("{}, {}", c.lat(), c.lng());
//! }
//! # Ok(())
//! # }
//! ```

pub mod gps;
pub mod jpeg;
pub mod tag;
pub mod tiff;

#[cfg(test)]
mod testutil;

pub use crate::gps::{Coordinate, Dms, GpsInfo, Rational};
pub use crate::jpeg::is_jpeg;

use thiserror::Error;

/// Structural problems with the input. Missing metadata is never an error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed image: {0}")]
    MalformedImage(&'static str),
    #[error("malformed exif: {0}")]
    MalformedExif(&'static str),
    /// offsets are relative to the buffer being read, the TIFF block once inside EXIF
    #[error("truncated: {len} bytes at offset {offset}, only {available} available")]
    Truncated {
        offset: usize,
        len: usize,
        available: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Read the GPS tags of a JPEG. Empty when the image has no EXIF or no GPS IFD.
pub fn read_gps_info(buf: &[u8]) -> Result<GpsInfo> {
    let range = match jpeg::locate_tiff(buf)? {
        Some(r) => r,
        None => return Ok(GpsInfo::default()),
    };
    let block = tiff::slice(buf, range.start, range.end - range.start)?;
    tiff::read_gps_info(block)
}

/// The photo's position, if it has a complete and valid one.
pub fn read_coordinate(buf: &[u8]) -> Result<Option<Coordinate>> {
    Ok(read_gps_info(buf)?.coordinate())
}

/// Where to pin an uploaded photo: its own GPS position when it has one,
/// the trip's main location otherwise. Unreadable photos fall back too.
pub fn locate_photo(buf: &[u8], main_location: Coordinate) -> Coordinate {
    match read_coordinate(buf) {
        Ok(Some(c)) => c,
        Ok(None) => main_location,
        Err(e) => {
            log::warn!("couldn't read photo gps data, using main location: {}", e);
            main_location
        }
    }
}
