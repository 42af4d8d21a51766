use crate::config::DisplaySize;
use crate::enums::{CodeTable, Datatype};

use thiserror::Error;

/// Size of the fixed header layout.
pub const HEADER_SIZE: usize = 352;
/// Voxel data starts right after the header.
pub const VOXEL_DATA_OFFSET: usize = 352;

mod offsets {
    pub const WIDTH: usize = 42;
    pub const HEIGHT: usize = 44;
    pub const DEPTH: usize = 46;
    pub const DATATYPE: usize = 70;
    pub const MAGIC: usize = 344;
}

const MAGIC_SINGLE_FILE: &[u8; 4] = b"n+1\0";
const MAGIC_PAIR: &[u8; 4] = b"ni1\0";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("Malformed header: buffer has {len} bytes, at least 352 required")]
    MalformedHeader { len: usize },

    #[error("Invalid dimensions {width}x{height}x{depth}")]
    InvalidDimensions { width: i16, height: i16, depth: i16 },

    #[error("Volume of {voxels} voxels exceeds the limit of {limit}")]
    TooManyVoxels { voxels: usize, limit: usize },

    #[error("Display slices would need {bytes} bytes, limit is {limit}")]
    StacksTooLarge { bytes: usize, limit: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeHeader {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    pub datatype_code: i16,
    pub datatype: Datatype,
    pub voxel_offset: usize,
}

impl VolumeHeader {
    /// Parse the header of a decompressed NIfTI buffer.
    ///
    /// # Errors
    ///
    /// Fails if the buffer cannot hold the header, if a dimension is not
    /// positive, or if the voxel count is larger than `max_voxels`.
    pub fn decode(
        buffer: &[u8],
        code_table: CodeTable,
        max_voxels: usize,
    ) -> Result<Self, HeaderError> {
        if buffer.len() < HEADER_SIZE {
            return Err(HeaderError::MalformedHeader { len: buffer.len() });
        }

        let width = read_i16(buffer, offsets::WIDTH);
        let height = read_i16(buffer, offsets::HEIGHT);
        let depth = read_i16(buffer, offsets::DEPTH);
        let datatype_code = read_i16(buffer, offsets::DATATYPE);

        if width <= 0 || height <= 0 || depth <= 0 {
            return Err(HeaderError::InvalidDimensions {
                width,
                height,
                depth,
            });
        }

        let magic = &buffer[offsets::MAGIC..offsets::MAGIC + 4];
        if magic != MAGIC_SINGLE_FILE && magic != MAGIC_PAIR {
            log::warn!("Unexpected header magic {magic:?}, decoding anyway");
        }

        let (width, height, depth) = (width as usize, height as usize, depth as usize);
        let voxels = width * height * depth;
        if voxels > max_voxels {
            return Err(HeaderError::TooManyVoxels {
                voxels,
                limit: max_voxels,
            });
        }

        let datatype = code_table.datatype(datatype_code);
        log::debug!(
            "Decoded header: {width}x{height}x{depth}, datatype {datatype_code} ({datatype:?})"
        );

        Ok(Self {
            width,
            height,
            depth,
            datatype_code,
            datatype,
            voxel_offset: VOXEL_DATA_OFFSET,
        })
    }

    /// Dimensions as (width, height, depth)
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.depth)
    }

    pub fn voxel_count(&self) -> usize {
        self.width * self.height * self.depth
    }

    /// Bytes taken by every slice of every orientation at `display` size
    pub fn stack_bytes(&self, display: DisplaySize) -> usize {
        (self.width + self.height + self.depth).saturating_mul(display.len())
    }

    /// Bytes the voxel block should occupy after the offset
    pub fn expected_data_len(&self) -> usize {
        self.voxel_count() * self.datatype.bytes_per_voxel()
    }
}

#[inline]
fn read_i16(buffer: &[u8], offset: usize) -> i16 {
    i16::from_le_bytes([buffer[offset], buffer[offset + 1]])
}
