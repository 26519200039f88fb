//! ICC profile header inspection.
//!
//! Only the fixed 128-byte header is read (ICC.1:2010, Section 7.2). Tag
//! tables are left to the rules that need them.

use crate::error::{Error, Result};
use crate::object::Object;
use byteorder::{BigEndian, ByteOrder};

/// Length of the fixed profile header.
pub const ICC_HEADER_LEN: usize = 128;

/// Profile file signature at offset 36.
const ACSP_SIGNATURE: &[u8; 4] = b"acsp";

/// Header fields of an embedded ICC profile.
#[derive(Debug, Clone, PartialEq)]
pub struct IccProfile {
    /// Profile size declared in the header.
    pub declared_size: u32,
    /// Number of bytes actually present.
    pub actual_size: usize,
    /// Major version.
    pub major_version: u8,
    /// Minor version (upper nibble of byte 9).
    pub minor_version: u8,
    /// Device class signature (`mntr`, `prtr`, `scnr`, ...).
    pub device_class: String,
    /// Data color space signature (`RGB`, `CMYK`, `GRAY`, ...).
    pub color_space: String,
    /// Profile connection space signature (`XYZ` or `Lab`).
    pub connection_space: String,
    /// Whether the `acsp` file signature is present.
    pub has_signature: bool,
}

impl IccProfile {
    /// Parse the header of raw profile bytes.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < ICC_HEADER_LEN {
            return Err(Error::InvalidPdf(format!(
                "ICC profile has {} bytes, header needs {}",
                data.len(),
                ICC_HEADER_LEN
            )));
        }

        Ok(Self {
            declared_size: BigEndian::read_u32(&data[0..4]),
            actual_size: data.len(),
            major_version: data[8],
            minor_version: data[9] >> 4,
            device_class: signature(&data[12..16]),
            color_space: signature(&data[16..20]),
            connection_space: signature(&data[20..24]),
            has_signature: &data[36..40] == ACSP_SIGNATURE,
        })
    }

    /// Decode an ICC stream object and parse its header.
    pub fn from_stream(stream: &Object) -> Result<Self> {
        let data = stream.decode_stream_data()?;
        Self::parse(&data)
    }

    /// Version as `major.minor`, e.g. `2.1` or `4.2`.
    pub fn version(&self) -> f64 {
        f64::from(self.major_version) + f64::from(self.minor_version) / 10.0
    }

    /// A header is valid when it carries the file signature and the declared
    /// size does not exceed the available bytes.
    pub fn is_valid(&self) -> bool {
        self.has_signature && self.declared_size as usize <= self.actual_size
    }

    /// Number of components implied by the data color space.
    pub fn n_components(&self) -> Option<usize> {
        match self.color_space.as_str() {
            "GRAY" => Some(1),
            "RGB" | "Lab" | "XYZ" | "Luv" | "YCbr" | "Yxy" | "HSV" | "HLS" | "CMY" => Some(3),
            "CMYK" => Some(4),
            other => {
                // nCLR signatures: 2CLR..9CLR, ACLR..FCLR
                let digit = other.strip_suffix("CLR")?;
                u8::from_str_radix(digit, 16).ok().map(usize::from)
            },
        }
    }
}

fn signature(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim_end().to_string()
}
