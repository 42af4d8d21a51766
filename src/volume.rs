use crate::config::DisplaySize;
use crate::enums::Orientation;
use crate::interpolator::Interpolator;
use crate::normalizer::NormalizedVolume;
use crate::plane::{self, Plane};

use ndarray::ArrayView2;
use rayon::prelude::*;

/// Slice count per orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientationExtents {
    pub axial: usize,
    pub sagittal: usize,
    pub coronal: usize,
}

impl OrientationExtents {
    pub fn get(&self, orientation: Orientation) -> usize {
        match orientation {
            Orientation::Axial => self.axial,
            Orientation::Sagittal => self.sagittal,
            Orientation::Coronal => self.coronal,
        }
    }
}

/// A normalized volume with every slice of every orientation resampled
/// to the display size.
#[derive(Debug, Clone)]
pub struct Volume {
    data: NormalizedVolume,
    display: DisplaySize,
    stacks: [Vec<Plane>; 3],
}

impl Volume {
    pub fn new(data: NormalizedVolume, display: DisplaySize) -> Self {
        let (axial, (sagittal, coronal)) = rayon::join(
            || Self::build_stack(&data, Orientation::Axial, display),
            || {
                rayon::join(
                    || Self::build_stack(&data, Orientation::Sagittal, display),
                    || Self::build_stack(&data, Orientation::Coronal, display),
                )
            },
        );

        Self {
            data,
            display,
            stacks: [axial, sagittal, coronal],
        }
    }

    fn build_stack(
        data: &NormalizedVolume,
        orientation: Orientation,
        display: DisplaySize,
    ) -> Vec<Plane> {
        let (depth, height, width) = data.dim();
        let stack = (0..plane::slice_count((width, height, depth), orientation))
            .into_par_iter()
            .map(|index| {
                let native = plane::sample_plane(data, orientation, index);
                Interpolator::nearest_neighbor(&native, display)
            })
            .collect::<Vec<_>>();
        log::debug!("Built {} {orientation} slices", stack.len());
        stack
    }

    /// Get the dimensions of the volume (width, height, depth)
    pub fn dims(&self) -> (usize, usize, usize) {
        let (depth, height, width) = self.data.dim();
        (width, height, depth)
    }

    /// Get a reference to the underlying data, indexed (z, y, x)
    pub fn data(&self) -> &NormalizedVolume {
        &self.data
    }

    pub fn display(&self) -> DisplaySize {
        self.display
    }

    pub fn extent(&self, orientation: Orientation) -> usize {
        plane::slice_count(self.dims(), orientation)
    }

    pub fn extents(&self) -> OrientationExtents {
        OrientationExtents {
            axial: self.extent(Orientation::Axial),
            sagittal: self.extent(Orientation::Sagittal),
            coronal: self.extent(Orientation::Coronal),
        }
    }

    pub fn is_valid_index(&self, index: usize, orientation: Orientation) -> bool {
        index < self.extent(orientation)
    }

    pub fn get_slice_from_axis(
        &self,
        index: usize,
        orientation: Orientation,
    ) -> Option<ArrayView2<'_, u8>> {
        plane::slice_view(&self.data, orientation, index)
    }

    /// Slice at native voxel-grid resolution
    pub fn native_plane(&self, index: usize, orientation: Orientation) -> Option<Plane> {
        self.is_valid_index(index, orientation)
            .then(|| plane::sample_plane(&self.data, orientation, index))
    }

    /// Cached slice at display resolution
    pub fn plane(&self, index: usize, orientation: Orientation) -> Option<&Plane> {
        self.stacks[orientation.index()].get(index)
    }

    pub fn stack(&self, orientation: Orientation) -> &[Plane] {
        &self.stacks[orientation.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn volume(dims: (usize, usize, usize), data: Vec<u8>) -> Volume {
        let (width, height, depth) = dims;
        let data = Array3::from_shape_vec((depth, height, width), data).unwrap();
        Volume::new(data, DisplaySize::new(4, 4))
    }

    #[test]
    fn extents_follow_axes() {
        let volume = volume((4, 3, 2), vec![0; 24]);
        assert_eq!(
            volume.extents(),
            OrientationExtents {
                axial: 2,
                sagittal: 4,
                coronal: 3
            }
        );
        for orientation in Orientation::ALL {
            assert_eq!(volume.stack(orientation).len(), volume.extent(orientation));
        }
    }

    #[test]
    fn cached_planes_have_display_size() {
        let volume = volume((4, 3, 2), (0..24).collect());
        for orientation in Orientation::ALL {
            for plane in volume.stack(orientation) {
                assert_eq!((plane.width, plane.height), (4, 4));
                assert_eq!(plane.len(), 16);
            }
        }
    }

    #[test]
    fn native_planes_match_sampler() {
        let volume = volume((2, 2, 2), vec![0, 255, 0, 255, 0, 255, 0, 255]);
        let axial = volume.native_plane(1, Orientation::Axial).unwrap();
        assert_eq!(axial.pixels, vec![0, 255, 0, 255]);
        let sagittal = volume.native_plane(0, Orientation::Sagittal).unwrap();
        assert_eq!(sagittal.pixels, vec![0, 0, 0, 0]);
        assert!(volume.native_plane(2, Orientation::Coronal).is_none());
        assert!(volume.get_slice_from_axis(2, Orientation::Axial).is_none());
    }
}
