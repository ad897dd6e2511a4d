//! GPS sub-IFD decoding and conversion to decimal degrees.

use byteorder::ByteOrder;

use crate::tag;
use crate::tiff::{self, IfdEntry};
use crate::Result;

/// unsigned EXIF rational, numerator over denominator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rational {
    pub num: u32,
    pub denom: u32,
}

impl Rational {
    pub fn new(num: u32, denom: u32) -> Self {
        Rational { num: num, denom: denom }
    }

    pub fn is_valid(&self) -> bool {
        self.denom != 0
    }

    /// None for a zero denominator
    pub fn to_f64(&self) -> Option<f64> {
        if self.is_valid() {
            Some(self.num as f64 / self.denom as f64)
        } else {
            None
        }
    }
}

/// degrees, minutes, seconds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dms {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl Dms {
    pub fn from_rationals(r: [Rational; 3]) -> Option<Self> {
        Some(Dms {
            degrees: r[0].to_f64()?,
            minutes: r[1].to_f64()?,
            seconds: r[2].to_f64()?,
        })
    }

    /// Signed decimal degrees. A reference of 'S' or 'W' negates the value,
    /// anything else (including no reference at all) leaves it positive.
    pub fn to_decimal(&self, reference: Option<char>) -> f64 {
        let dd = self.degrees + self.minutes / 60.0 + self.seconds / 3600.0;
        match reference {
            Some('S') | Some('W') => -dd,
            _ => dd,
        }
    }
}

/// The recognized GPS tags of a photo. Any of them may be missing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GpsInfo {
    pub latitude_ref: Option<char>,
    pub latitude: Option<Dms>,
    pub longitude_ref: Option<char>,
    pub longitude: Option<Dms>,
}

impl GpsInfo {
    pub fn is_empty(&self) -> bool {
        *self == GpsInfo::default()
    }

    /// Both axes converted and within range, or nothing.
    pub fn coordinate(&self) -> Option<Coordinate> {
        let lat = self.latitude?.to_decimal(self.latitude_ref);
        let lng = self.longitude?.to_decimal(self.longitude_ref);
        let c = Coordinate::new(lat, lng);
        if c.is_none() {
            log::debug!("gps position out of range: lat {} lng {}", lat, lng);
        }
        c
    }
}

/// A validated position in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "LatLng"))]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    /// None unless lat is within [-90, 90] and lng within [-180, 180]
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
            Some(Coordinate { lat: lat, lng: lng })
        } else {
            None
        }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[cfg(feature = "serde")]
impl std::convert::TryFrom<LatLng> for Coordinate {
    type Error = &'static str;

    fn try_from(ll: LatLng) -> std::result::Result<Self, Self::Error> {
        Coordinate::new(ll.lat, ll.lng).ok_or("coordinate out of range")
    }
}

fn read_ref<B: ByteOrder>(entry: &IfdEntry, data: &[u8]) -> Result<Option<char>> {
    match entry.format {
        tag::format::ASCII | tag::format::BYTE if entry.count > 0 => {}
        _ => {
            log::debug!("ignoring gps ref 0x{:04x} with format {}", entry.tag, entry.format);
            return Ok(None);
        }
    }
    let d = entry.data::<B>(data)?;
    Ok(d.first().filter(|&&c| c != 0).map(|&c| c as char))
}

fn read_dms<B: ByteOrder>(entry: &IfdEntry, data: &[u8]) -> Result<Option<Dms>> {
    if entry.format != tag::format::RATIONAL || entry.count < 3 {
        log::debug!(
            "ignoring gps position 0x{:04x} with format {} count {}",
            entry.tag,
            entry.format,
            entry.count
        );
        return Ok(None);
    }

    let d = entry.data::<B>(data)?;
    let rational = |i: usize| Rational::new(B::read_u32(&d[i * 8..]), B::read_u32(&d[i * 8 + 4..]));
    let dms = Dms::from_rationals([rational(0), rational(1), rational(2)]);
    if dms.is_none() {
        log::debug!("zero denominator in gps position 0x{:04x}", entry.tag);
    }
    Ok(dms)
}

/// decode the GPS sub-IFD at `offset` within the TIFF block
pub fn parse_ifd<B: ByteOrder>(data: &[u8], offset: usize) -> Result<GpsInfo> {
    let mut info = GpsInfo::default();

    for entry in tiff::entries::<B>(data, offset)? {
        let entry = entry?;
        log::trace!("gps entry 0x{:04x} format {} count {}", entry.tag, entry.format, entry.count);
        match entry.tag {
            tag::gps::LATITUDE_REF => info.latitude_ref = read_ref::<B>(&entry, data)?,
            tag::gps::LATITUDE => info.latitude = read_dms::<B>(&entry, data)?,
            tag::gps::LONGITUDE_REF => info.longitude_ref = read_ref::<B>(&entry, data)?,
            tag::gps::LONGITUDE => info.longitude = read_dms::<B>(&entry, data)?,
            _ => {}
        }
    }

    Ok(info)
}
