use crate::extractor::RawVolume;

use ndarray::Array3;
use rayon::prelude::*;

/// 8-bit samples sharing the layout of [`RawVolume`].
pub type NormalizedVolume = Array3<u8>;

/// Rescale the whole volume to 0..=255 with one global min/max pair.
pub fn normalize(raw: &RawVolume) -> NormalizedVolume {
    let samples = match raw.as_slice() {
        Some(samples) => normalize_samples(samples),
        None => normalize_samples(&raw.iter().copied().collect::<Vec<_>>()),
    };
    Array3::from_shape_vec(raw.raw_dim(), samples)
        .unwrap_or_else(|_| Array3::zeros(raw.raw_dim()))
}

pub fn normalize_samples(samples: &[f64]) -> Vec<u8> {
    let Some((min, mut max)) = min_max(samples) else {
        if !samples.is_empty() {
            log::warn!("No numeric samples in volume, output is black");
        }
        return vec![0; samples.len()];
    };
    if max == min {
        log::debug!("Degenerate intensity range at {min}, widening by one");
        max = min + 1.0;
    }
    let range = max - min;

    samples
        .par_iter()
        .map(|&v| (((v - min) / range) * 255.0).round() as u8)
        .collect()
}

/// Smallest and largest sample in a single pass. NaN samples are ignored.
pub fn min_max(samples: &[f64]) -> Option<(f64, f64)> {
    let (min, max) = samples
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
            (min.min(v), max.max(v))
        });
    (min <= max).then_some((min, max))
}
