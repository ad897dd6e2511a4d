// NB: only what GPS extraction needs, add here as needed

pub const GPS_INFO_IFD_POINTER: u16 = 0x8825;

pub mod gps {
    pub const LATITUDE_REF: u16 = 0x0001;
    pub const LATITUDE: u16 = 0x0002;
    pub const LONGITUDE_REF: u16 = 0x0003;
    pub const LONGITUDE: u16 = 0x0004;
}

pub mod marker {
    pub const SOI: u16 = 0xFFD8;
    pub const EOI: u16 = 0xFFD9;
    pub const SOS: u16 = 0xFFDA;
    pub const APP1: u16 = 0xFFE1;
}

pub const EXIF_SIGNATURE: [u8; 6] = [b'E', b'x', b'i', b'f', 0x00, 0x00];
pub const TIFF_MAGIC: u16 = 0x002A;

/// field types, as found in the type slot of an IFD entry
pub mod format {
    pub const BYTE: u16 = 1;
    pub const ASCII: u16 = 2;
    pub const SHORT: u16 = 3;
    pub const LONG: u16 = 4;
    pub const RATIONAL: u16 = 5;
    pub const SIGNED_BYTE: u16 = 6;
    pub const UNDEFINED: u16 = 7;
    pub const SIGNED_SHORT: u16 = 8;
    pub const SIGNED_LONG: u16 = 9;
    pub const SIGNED_RATIONAL: u16 = 10;
    pub const FLOAT: u16 = 11;
    pub const DOUBLE: u16 = 12;

    /// size in bytes of a single item of the given type, 0 if unknown
    pub fn item_sz(fmt: u16) -> usize {
        match fmt {
            BYTE | ASCII | SIGNED_BYTE | UNDEFINED => 1,
            SHORT | SIGNED_SHORT => 2,
            LONG | SIGNED_LONG | FLOAT => 4,
            RATIONAL | SIGNED_RATIONAL | DOUBLE => 8,
            _ => 0,
        }
    }
}
