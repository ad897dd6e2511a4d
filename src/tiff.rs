//! TIFF structure embedded in the EXIF APP1 segment.
//!
//! All offsets handled here are relative to the start of the TIFF block,
//! which is the slice every function in this module receives. Every read
//! goes through `slice`, so a bogus offset or count in the file turns into
//! an error instead of a panic.

use std::marker::PhantomData;

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::gps::{self, GpsInfo};
use crate::tag;
use crate::{Error, Result};

const IFD_ENTRY_LEN: usize = 12;

pub(crate) fn slice(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    let truncated = || Error::Truncated {
        offset: offset,
        len: len,
        available: data.len(),
    };
    let end = offset.checked_add(len).ok_or_else(truncated)?;
    data.get(offset..end).ok_or_else(truncated)
}

pub(crate) fn read_u16<B: ByteOrder>(data: &[u8], offset: usize) -> Result<u16> {
    Ok(B::read_u16(slice(data, offset, 2)?))
}

pub(crate) fn read_u32<B: ByteOrder>(data: &[u8], offset: usize) -> Result<u32> {
    Ok(B::read_u32(slice(data, offset, 4)?))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// byte order and location of IFD0
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TiffHeader {
    pub endian: Endian,
    pub ifd0_offset: u32,
}

impl TiffHeader {
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mark = slice(data, 0, 2)?;
        let endian = match (mark[0], mark[1]) {
            (b'I', b'I') => Endian::Little,
            (b'M', b'M') => Endian::Big,
            _ => return Err(Error::MalformedExif("invalid byte order marker")),
        };

        let (magic, ifd0_offset) = match endian {
            Endian::Little => (read_u16::<LittleEndian>(data, 2)?, read_u32::<LittleEndian>(data, 4)?),
            Endian::Big => (read_u16::<BigEndian>(data, 2)?, read_u32::<BigEndian>(data, 4)?),
        };
        if magic != tag::TIFF_MAGIC {
            return Err(Error::MalformedExif("invalid tiff magic number"));
        }

        Ok(TiffHeader {
            endian: endian,
            ifd0_offset: ifd0_offset,
        })
    }
}

/// single 12 byte directory entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IfdEntry {
    pub tag: u16,
    pub format: u16,
    pub count: u32,
    /// the raw value-or-offset field, still in file byte order
    value: [u8; 4],
}

impl IfdEntry {
    fn decode<B: ByteOrder>(data: &[u8], offset: usize) -> Result<Self> {
        let raw = slice(data, offset, IFD_ENTRY_LEN)?;
        let mut value = [0u8; 4];
        value.copy_from_slice(&raw[8..12]);

        Ok(IfdEntry {
            tag: B::read_u16(&raw[0..2]),
            format: B::read_u16(&raw[2..4]),
            count: B::read_u32(&raw[4..8]),
            value: value,
        })
    }

    /// total size of the entry's data, None if it doesn't fit in a usize
    fn data_sz(&self) -> Option<usize> {
        tag::format::item_sz(self.format).checked_mul(self.count as usize)
    }

    /// if all the data fits into 4 bytes it's stored in the entry itself,
    /// otherwise the value field is an offset to the data
    pub fn is_inline(&self) -> bool {
        self.data_sz().map_or(false, |sz| sz <= 4)
    }

    /// the value field interpreted as an unsigned long, e.g. a sub-IFD pointer
    pub fn value_u32<B: ByteOrder>(&self) -> u32 {
        B::read_u32(&self.value)
    }

    /// resolve the entry's data, following the offset when it isn't inline
    pub fn data<'a, B: ByteOrder>(&'a self, tiff: &'a [u8]) -> Result<&'a [u8]> {
        let sz = self.data_sz().ok_or(Error::MalformedExif("entry size overflows"))?;
        if sz <= 4 {
            Ok(&self.value[..sz])
        } else {
            slice(tiff, self.value_u32::<B>() as usize, sz)
        }
    }
}

/// lazily decodes the entries of one IFD, stopping after the first error
pub struct IfdEntries<'a, B> {
    data: &'a [u8],
    next: usize,
    remaining: u16,
    _order: PhantomData<B>,
}

impl<'a, B: ByteOrder> Iterator for IfdEntries<'a, B> {
    type Item = Result<IfdEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = IfdEntry::decode::<B>(self.data, self.next);
        self.next += IFD_ENTRY_LEN;
        self.remaining = if entry.is_err() { 0 } else { self.remaining - 1 };
        Some(entry)
    }
}

pub fn entries<B: ByteOrder>(data: &[u8], offset: usize) -> Result<IfdEntries<'_, B>> {
    let count = read_u16::<B>(data, offset)?;
    Ok(IfdEntries {
        data: data,
        next: offset + 2,
        remaining: count,
        _order: PhantomData,
    })
}

/// scan IFD0 for the GPS info pointer, first match wins
fn find_gps_ifd<B: ByteOrder>(data: &[u8], header: &TiffHeader) -> Result<Option<usize>> {
    for entry in entries::<B>(data, header.ifd0_offset as usize)? {
        let entry = entry?;
        log::trace!("ifd0 entry 0x{:04x} format {} count {}", entry.tag, entry.format, entry.count);
        if entry.tag == tag::GPS_INFO_IFD_POINTER {
            return Ok(Some(entry.value_u32::<B>() as usize));
        }
    }
    Ok(None)
}

fn walk<B: ByteOrder>(data: &[u8], header: &TiffHeader) -> Result<GpsInfo> {
    match find_gps_ifd::<B>(data, header)? {
        Some(offset) => gps::parse_ifd::<B>(data, offset),
        None => {
            log::debug!("no gps info pointer in ifd0");
            Ok(GpsInfo::default())
        }
    }
}

/// extract the GPS tags from a TIFF block
pub fn read_gps_info(data: &[u8]) -> Result<GpsInfo> {
    let header = TiffHeader::parse(data)?;
    match header.endian {
        Endian::Little => walk::<LittleEndian>(data, &header),
        Endian::Big => walk::<BigEndian>(data, &header),
    }
}
