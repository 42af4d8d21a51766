use crate::enums::Orientation;
use crate::normalizer::NormalizedVolume;

use image::{GrayImage, ImageBuffer};
use ndarray::{ArrayView2, s};

/// Row-major 8-bit image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Plane {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl Plane {
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn zeroed(width: usize, height: usize) -> Self {
        Self::new(width, height, vec![0; width * height])
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    pub fn to_image(&self) -> Option<GrayImage> {
        ImageBuffer::from_raw(self.width as u32, self.height as u32, self.pixels.clone())
    }
}

/// Native (width, height) of a plane cut from a volume of the given dims.
pub fn plane_dims(dims: (usize, usize, usize), orientation: Orientation) -> (usize, usize) {
    let (width, height, depth) = dims;
    match orientation {
        Orientation::Axial => (width, height),
        Orientation::Sagittal => (height, depth),
        Orientation::Coronal => (width, depth),
    }
}

/// Number of slices along the orientation's axis.
pub fn slice_count(dims: (usize, usize, usize), orientation: Orientation) -> usize {
    let (width, height, depth) = dims;
    match orientation {
        Orientation::Axial => depth,
        Orientation::Sagittal => width,
        Orientation::Coronal => height,
    }
}

/// View of one single-voxel-thick cut, or `None` if the index is outside the volume.
pub fn slice_view(
    volume: &NormalizedVolume,
    orientation: Orientation,
    index: usize,
) -> Option<ArrayView2<'_, u8>> {
    // Array layout is (z, y, x)
    let (depth, height, width) = volume.dim();
    let view = match orientation {
        Orientation::Axial if index < depth => volume.slice(s![index, .., ..]),
        Orientation::Coronal if index < height => volume.slice(s![.., index, ..]),
        Orientation::Sagittal if index < width => volume.slice(s![.., .., index]),
        _ => return None,
    };
    Some(view)
}

/// Extract the plane at `index` at native resolution.
///
/// An index beyond the orientation's extent produces an all-zero plane.
pub fn sample_plane(volume: &NormalizedVolume, orientation: Orientation, index: usize) -> Plane {
    let (depth, height, width) = volume.dim();
    let (plane_width, plane_height) = plane_dims((width, height, depth), orientation);
    match slice_view(volume, orientation, index) {
        Some(view) => Plane::new(plane_width, plane_height, view.iter().copied().collect()),
        None => Plane::zeroed(plane_width, plane_height),
    }
}
