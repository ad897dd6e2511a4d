//! synthetic jpeg/exif payloads for tests

use std::io;
use std::io::prelude::*;

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

use crate::tag;

const ORIENTATION: u16 = 0x0112;

/// GPS tags to embed, rationals as (numerator, denominator)
#[derive(Clone, Debug)]
pub struct GpsFixture {
    pub gps_pointer: bool,
    pub latitude_ref: Option<u8>,
    pub latitude: Option<[(u32, u32); 3]>,
    pub latitude_format: u16,
    pub longitude_ref: Option<u8>,
    pub longitude: Option<[(u32, u32); 3]>,
}

impl GpsFixture {
    /// 40°26'46"N 79°58'56"W
    pub fn pittsburgh() -> Self {
        GpsFixture {
            gps_pointer: true,
            latitude_ref: Some(b'N'),
            latitude: Some([(40, 1), (26, 1), (46, 1)]),
            latitude_format: tag::format::RATIONAL,
            longitude_ref: Some(b'W'),
            longitude: Some([(79, 1), (58, 1), (56, 1)]),
        }
    }
}

enum Value {
    Inline([u8; 4]),
    Offset(Vec<u8>),
}

struct Entry {
    tag: u16,
    format: u16,
    count: u32,
    value: Value,
}

fn ascii_ref(tag: u16, c: u8) -> Entry {
    Entry { tag: tag, format: tag::format::ASCII, count: 2, value: Value::Inline([c, 0, 0, 0]) }
}

fn rationals<B: ByteOrder>(tag: u16, format: u16, r: &[(u32, u32); 3]) -> io::Result<Entry> {
    let mut d = vec![];
    for &(num, denom) in r {
        d.write_u32::<B>(num)?;
        d.write_u32::<B>(denom)?;
    }
    Ok(Entry { tag: tag, format: format, count: 3, value: Value::Offset(d) })
}

fn ifd_len(n: usize) -> usize {
    2 + n * 12 + 4
}

/// write an IFD at `offset`, out-of-line data follows the IFD directly
fn write_ifd<W: Write, B: ByteOrder>(w: &mut W, entries: &[Entry], offset: usize) -> io::Result<()> {
    w.write_u16::<B>(entries.len() as u16)?;

    let mut data_offset = offset + ifd_len(entries.len());
    for e in entries {
        w.write_u16::<B>(e.tag)?;
        w.write_u16::<B>(e.format)?;
        w.write_u32::<B>(e.count)?;
        match e.value {
            Value::Inline(ref v) => w.write_all(v)?,
            Value::Offset(ref d) => {
                w.write_u32::<B>(data_offset as u32)?;
                data_offset += d.len();
            }
        }
    }
    w.write_u32::<B>(0)?;

    for e in entries {
        if let Value::Offset(ref d) = e.value {
            w.write_all(d)?;
        }
    }
    Ok(())
}

fn encode_tiff<B: ByteOrder>(f: &GpsFixture) -> io::Result<Vec<u8>> {
    let mut probe = [0u8; 2];
    B::write_u16(&mut probe, 1);
    let mark = if probe[0] == 1 { b"II" } else { b"MM" };

    let mut w = vec![];
    w.write_all(mark)?;
    w.write_u16::<B>(tag::TIFF_MAGIC)?;
    w.write_u32::<B>(8)?;

    let mut ifd0 = vec![Entry { tag: ORIENTATION, format: tag::format::SHORT, count: 1, value: Value::Inline([0; 4]) }];
    let gps_offset = 8 + ifd_len(2);
    if f.gps_pointer {
        let mut v = [0u8; 4];
        B::write_u32(&mut v, gps_offset as u32);
        ifd0.push(Entry { tag: tag::GPS_INFO_IFD_POINTER, format: tag::format::LONG, count: 1, value: Value::Inline(v) });
    }
    write_ifd::<_, B>(&mut w, &ifd0, 8)?;

    if !f.gps_pointer {
        return Ok(w);
    }

    let mut gps = vec![];
    if let Some(c) = f.latitude_ref {
        gps.push(ascii_ref(tag::gps::LATITUDE_REF, c));
    }
    if let Some(ref r) = f.latitude {
        gps.push(rationals::<B>(tag::gps::LATITUDE, f.latitude_format, r)?);
    }
    if let Some(c) = f.longitude_ref {
        gps.push(ascii_ref(tag::gps::LONGITUDE_REF, c));
    }
    if let Some(ref r) = f.longitude {
        gps.push(rationals::<B>(tag::gps::LONGITUDE, tag::format::RATIONAL, r)?);
    }
    // something to skip over
    gps.push(Entry { tag: 0x0005, format: tag::format::BYTE, count: 1, value: Value::Inline([0; 4]) });

    assert_eq!(w.len(), gps_offset);
    write_ifd::<_, B>(&mut w, &gps, gps_offset)?;
    Ok(w)
}

/// a TIFF block in byte order `B` carrying the fixture's GPS tags
pub fn tiff<B: ByteOrder>(f: &GpsFixture) -> Vec<u8> {
    encode_tiff::<B>(f).expect("encode tiff")
}

/// a marker segment, length field included
pub fn segment(marker: u16, payload: &[u8]) -> Vec<u8> {
    let mut s = vec![];
    s.write_u16::<BigEndian>(marker).expect("write marker");
    s.write_u16::<BigEndian>(payload.len() as u16 + 2).expect("write length");
    s.extend_from_slice(payload);
    s
}

fn jfif_app0() -> Vec<u8> {
    segment(0xFFE0, &[b'J', b'F', b'I', b'F', 0, 1, 1, 0, 0, 1, 0, 1, 0, 0])
}

/// SOI, then the given segments, then a token scan and EOI
pub fn jpeg_with(segments: &[Vec<u8>]) -> Vec<u8> {
    let mut j = vec![0xFF, 0xD8];
    for s in segments {
        j.extend_from_slice(s);
    }
    j.extend(segment(tag::marker::SOS, &[1, 1, 0, 0, 0x3F, 0]));
    j.extend_from_slice(&[0x12, 0x34, 0xFF, 0x00, 0x56]);
    j.extend_from_slice(&[0xFF, 0xD9]);
    j
}

pub fn exif_app1(tiff: &[u8]) -> Vec<u8> {
    let mut payload = tag::EXIF_SIGNATURE.to_vec();
    payload.extend_from_slice(tiff);
    segment(tag::marker::APP1, &payload)
}

/// a JFIF jpeg with the TIFF block in an EXIF APP1 segment
pub fn jpeg(tiff: &[u8]) -> Vec<u8> {
    jpeg_with(&[jfif_app0(), exif_app1(tiff)])
}

pub fn jpeg_without_exif() -> Vec<u8> {
    jpeg_with(&[jfif_app0(), segment(0xFFDB, &[0u8; 65])])
}
