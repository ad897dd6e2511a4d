// http://vip.sugovica.hu/Sardi/kepnezo/JPEG%20File%20Layout%20and%20Format.htm
// https://www.imperialviolet.org/binary/jpeg/
// http://dev.exiv2.org/projects/exiv2/wiki/The_Metadata_in_JPEG_files

use std::ops::Range;

use byteorder::BigEndian;

use crate::tag::{self, marker};
use crate::tiff::{read_u16, slice};
use crate::{Error, Result};

/// cheap check for the start of image marker
pub fn is_jpeg(buf: &[u8]) -> bool {
    read_u16::<BigEndian>(buf, 0).ok() == Some(marker::SOI)
}

/// Locate the TIFF block of the EXIF APP1 segment.
///
/// Returns its absolute byte range within `buf`, or None when the image
/// carries no EXIF. Every segment walked must fit in `buf`, and running out
/// of bytes before the scan data or EXIF is `Error::Truncated`.
pub fn locate_tiff(buf: &[u8]) -> Result<Option<Range<usize>>> {
    if !is_jpeg(buf) {
        return Err(Error::MalformedImage("missing start of image marker"));
    }

    let mut offset = 2;
    loop {
        let seg_id = read_u16::<BigEndian>(buf, offset)?;
        if seg_id & 0xFF00 != 0xFF00 {
            log::debug!("no segment marker at offset {}, giving up", offset);
            return Ok(None);
        }
        // only entropy coded data follows
        if seg_id == marker::SOS || seg_id == marker::EOI {
            break;
        }

        // length includes itself but not the marker
        let len = read_u16::<BigEndian>(buf, offset + 2)? as usize;
        if len < 2 {
            return Err(Error::MalformedImage("invalid segment length"));
        }
        let end = offset + 2 + len;
        if end > buf.len() {
            return Err(Error::Truncated {
                offset: offset + 2,
                len: len,
                available: buf.len(),
            });
        }

        if seg_id == marker::APP1 {
            const HDR_SZ: usize = 6;
            if len < 2 + HDR_SZ || slice(buf, offset + 4, HDR_SZ)? != &tag::EXIF_SIGNATURE[..] {
                log::debug!("app1 segment at offset {} is not exif", offset);
                return Ok(None);
            }
            return Ok(Some(offset + 4 + HDR_SZ..end));
        }

        log::trace!("skipping segment 0x{:04x}, {} bytes", seg_id, len);
        offset = end;
    }

    log::debug!("no exif segment found");
    Ok(None)
}
