//! Image management commands.
//!
//! The image group covers firmware slot inspection and boot selection. The
//! list response payload is a flat concatenation of fixed 8-byte version
//! records; there is no count field, the record stream simply ends.

use std::fmt;

use crate::core::{GROUP_IMAGE, IMAGE_ID_BOOT, IMAGE_ID_LIST, IMAGE_VERSION_RECORD_SIZE};

use super::msg::NmpMsg;

/// Firmware version quad.
///
/// Wire format (8 bytes):
/// ```text
/// +--------+--------+----------------+----------------+
/// | Major  | Minor  | Revision       | Build          |
/// | 1 byte | 1 byte | 2 bytes (BE16) | 4 bytes (BE32) |
/// +--------+--------+----------------+----------------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageVersion {
    /// Major version.
    pub major: u8,
    /// Minor version.
    pub minor: u8,
    /// Revision.
    pub revision: u16,
    /// Build number.
    pub build: u32,
}

impl ImageVersion {
    /// All-bits-set sentinel meaning "no version programmed". This exact
    /// value is what peers put on the wire for an unset slot; it is compared
    /// against directly rather than mapped to an `Option`.
    pub const NOT_SET: Self = Self {
        major: 0xff,
        minor: 0xff,
        revision: 0xffff,
        build: 0xffff_ffff,
    };

    /// Decode one version record.
    pub fn from_bytes(bytes: [u8; IMAGE_VERSION_RECORD_SIZE]) -> Self {
        Self {
            major: bytes[0],
            minor: bytes[1],
            revision: u16::from_be_bytes([bytes[2], bytes[3]]),
            build: u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        }
    }

    /// Encode this version as one record.
    pub fn to_bytes(&self) -> [u8; IMAGE_VERSION_RECORD_SIZE] {
        let mut buf = [0u8; IMAGE_VERSION_RECORD_SIZE];
        buf[0] = self.major;
        buf[1] = self.minor;
        buf[2..4].copy_from_slice(&self.revision.to_be_bytes());
        buf[4..8].copy_from_slice(&self.build.to_be_bytes());
        buf
    }
}

impl fmt::Display for ImageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::NOT_SET {
            write!(f, "Not set")
        } else {
            write!(f, "{}.{}.{}.{}", self.major, self.minor, self.revision, self.build)
        }
    }
}

/// Firmware image versions reported by the peer, in slot order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageList {
    /// Formatted version string per image slot.
    pub images: Vec<String>,
}

impl ImageList {
    /// Build the image list request: a read of (image, list) with an empty
    /// payload.
    pub fn request() -> NmpMsg {
        NmpMsg::read_req(GROUP_IMAGE, IMAGE_ID_LIST)
    }

    /// Decode a list response payload.
    ///
    /// Consumes 8-byte version records while at least 8 bytes remain.
    /// Trailing bytes shorter than one record are dropped, not reported;
    /// peers pad responses and callers depend on the leniency.
    pub fn decode(payload: &[u8]) -> Self {
        let mut list = Self::default();

        for record in payload.chunks_exact(IMAGE_VERSION_RECORD_SIZE) {
            let mut bytes = [0u8; IMAGE_VERSION_RECORD_SIZE];
            bytes.copy_from_slice(record);
            list.images.push(ImageVersion::from_bytes(bytes).to_string());
        }

        list
    }
}

/// Build a boot request selecting `target` as the boot image: a write of
/// (image, boot) whose payload is the target version string.
pub fn boot_request(target: &str) -> NmpMsg {
    NmpMsg::write_req(GROUP_IMAGE, IMAGE_ID_BOOT, target.as_bytes().to_vec())
}
