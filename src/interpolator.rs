use crate::config::DisplaySize;
use crate::plane::Plane;

use rayon::prelude::*;

pub struct Interpolator;

impl Interpolator {
    /// Nearest-neighbor resize of `plane` to exactly `target`.
    pub fn nearest_neighbor(plane: &Plane, target: DisplaySize) -> Plane {
        let DisplaySize { width, height } = target;
        let mut pixels = vec![0u8; width * height];
        if width == 0 || height == 0 {
            return Plane::new(width, height, pixels);
        }

        pixels
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                let src_y = Self::source_coordinate(y, plane.height, height);
                for (x, pixel) in row.iter_mut().enumerate() {
                    let src_x = Self::source_coordinate(x, plane.width, width);
                    *pixel = plane
                        .pixels
                        .get(src_y * plane.width + src_x)
                        .copied()
                        .unwrap_or(0);
                }
            });

        Plane::new(width, height, pixels)
    }

    /// floor(dst * src_len / dst_len), clamped to the last source sample
    #[inline]
    pub(crate) fn source_coordinate(dst: usize, src_len: usize, dst_len: usize) -> usize {
        (dst * src_len / dst_len).min(src_len.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_always_matches_target() {
        let sources = [
            Plane::new(1, 1, vec![9]),
            Plane::zeroed(3, 7),
            Plane::zeroed(500, 2),
            Plane::default(),
        ];
        for plane in &sources {
            let targets = [
                DisplaySize::new(384, 256),
                DisplaySize::new(1, 1),
                DisplaySize::new(5, 3),
            ];
            for target in targets {
                let out = Interpolator::nearest_neighbor(plane, target);
                assert_eq!(out.len(), target.len());
                assert_eq!((out.width, out.height), (target.width, target.height));
            }
        }
    }

    #[test]
    fn single_pixel_source_fills_target() {
        let plane = Plane::new(1, 1, vec![9]);
        let out = Interpolator::nearest_neighbor(&plane, DisplaySize::new(4, 3));
        assert!(out.pixels.iter().all(|&p| p == 9));
    }

    #[test]
    fn upsampling_repeats_pixels() {
        let plane = Plane::new(2, 1, vec![1, 2]);
        let out = Interpolator::nearest_neighbor(&plane, DisplaySize::new(4, 2));
        assert_eq!(out.pixels, vec![1, 1, 2, 2, 1, 1, 2, 2]);
    }

    #[test]
    fn downsampling_picks_floor_samples() {
        let plane = Plane::new(4, 1, vec![10, 20, 30, 40]);
        let out = Interpolator::nearest_neighbor(&plane, DisplaySize::new(2, 1));
        assert_eq!(out.pixels, vec![10, 30]);
    }

    #[test]
    fn empty_source_is_black() {
        let out = Interpolator::nearest_neighbor(&Plane::default(), DisplaySize::new(2, 2));
        assert_eq!(out.pixels, vec![0; 4]);
    }

    #[test]
    fn source_coordinate_is_clamped() {
        assert_eq!(Interpolator::source_coordinate(3, 2, 4), 1);
        assert_eq!(Interpolator::source_coordinate(0, 0, 4), 0);
    }
}
