use crate::enums::Datatype;
use crate::header::VolumeHeader;

use ndarray::Array3;

/// Decoded voxel samples, shape (depth, height, width) so x varies fastest.
pub type RawVolume = Array3<f64>;

/// Decode every voxel of the volume described by `header`.
///
/// Samples whose bytes lie beyond the end of `buffer` are zero.
pub fn extract_voxels(buffer: &[u8], header: &VolumeHeader) -> RawVolume {
    let (width, height, depth) = header.dims();
    let samples = extract_samples(
        buffer,
        header.voxel_offset,
        header.datatype,
        header.voxel_count(),
    );
    Array3::from_shape_vec((depth, height, width), samples)
        .unwrap_or_else(|_| Array3::zeros((depth, height, width)))
}

/// Decode `count` samples starting at `offset`.
pub fn extract_samples(buffer: &[u8], offset: usize, datatype: Datatype, count: usize) -> Vec<f64> {
    let step = datatype.bytes_per_voxel();
    let mut samples = Vec::with_capacity(count);
    let mut missing = 0usize;

    for i in 0..count {
        let start = offset + i * step;
        match buffer.get(start..start + step) {
            Some(bytes) => samples.push(decode_sample(bytes, datatype)),
            None => {
                samples.push(0.0);
                missing += 1;
            }
        }
    }

    if missing > 0 {
        log::warn!("Voxel data truncated: {missing} of {count} samples zero-filled");
    }
    samples
}

#[inline]
fn decode_sample(bytes: &[u8], datatype: Datatype) -> f64 {
    match datatype {
        Datatype::I16 => i16::from_le_bytes([bytes[0], bytes[1]]) as f64,
        Datatype::U16 => u16::from_le_bytes([bytes[0], bytes[1]]) as f64,
        Datatype::I32 => i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64,
        Datatype::F32 => f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64,
        Datatype::U8 | Datatype::Reserved64 | Datatype::Unknown(_) => bytes[0] as f64,
    }
}
