//! Single DICOM slices shown as a degenerate one-slice volume.

use crate::normalizer;
use crate::plane::Plane;

use dicom::object::ReadError;
use dicom_dictionary_std::tags;
use std::ops::Range;

const DEFAULT_DIMENSION: u16 = 256;
const PREAMBLE_LEN: usize = 128;

/// Pre-parsed DICOM elements needed to locate the image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DicomElements {
    pub rows: Option<u16>,
    pub columns: Option<u16>,
    /// Byte range of the pixel data value inside the original buffer
    pub pixel_data: Option<Range<usize>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SingleSliceImage {
    pub rows: usize,
    pub columns: usize,
    /// Signed 16-bit samples, row-major, length rows * columns
    pub samples: Vec<i16>,
}

impl SingleSliceImage {
    /// Build the image from elements pointing into `buffer`.
    ///
    /// Missing rows/columns default to 256. Pixel bytes that are missing or
    /// outside the buffer produce black samples.
    pub fn from_elements(buffer: &[u8], elements: &DicomElements) -> Self {
        let pixel_bytes = elements
            .pixel_data
            .clone()
            .and_then(|range| buffer.get(range))
            .unwrap_or_default();
        if elements.pixel_data.is_some() && pixel_bytes.is_empty() {
            log::warn!("Pixel data element lies outside the buffer");
        }
        Self::from_pixel_bytes(elements.rows, elements.columns, pixel_bytes)
    }

    pub fn from_pixel_bytes(rows: Option<u16>, columns: Option<u16>, pixel_bytes: &[u8]) -> Self {
        let rows = rows.filter(|&r| r > 0).unwrap_or(DEFAULT_DIMENSION) as usize;
        let columns = columns.filter(|&c| c > 0).unwrap_or(DEFAULT_DIMENSION) as usize;
        let count = rows * columns;

        let mut samples: Vec<i16> = pixel_bytes
            .chunks_exact(2)
            .take(count)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        if samples.len() < count {
            log::warn!(
                "Pixel data holds {} of {count} samples, padding with zeros",
                samples.len()
            );
            samples.resize(count, 0);
        }

        Self {
            rows,
            columns,
            samples,
        }
    }

    /// The image at native resolution, normalized to 8 bits
    pub fn to_plane(&self) -> Plane {
        let samples: Vec<f64> = self.samples.iter().map(|&v| v as f64).collect();
        Plane::new(self.columns, self.rows, normalizer::normalize_samples(&samples))
    }
}

/// Whether the buffer carries the `DICM` marker after a 128-byte preamble.
pub fn has_dicom_preamble(buffer: &[u8]) -> bool {
    buffer.get(PREAMBLE_LEN..PREAMBLE_LEN + 4) == Some(b"DICM".as_slice())
}

/// Decode a DICOM Part-10 buffer holding one image.
pub fn decode_dicom(buffer: &[u8]) -> Result<SingleSliceImage, ReadError> {
    let body = if has_dicom_preamble(buffer) {
        &buffer[PREAMBLE_LEN..]
    } else {
        buffer
    };
    let object = dicom::object::from_reader(body)?;

    let rows = object
        .element(tags::ROWS)
        .ok()
        .and_then(|e| e.to_int::<u16>().ok());
    let columns = object
        .element(tags::COLUMNS)
        .ok()
        .and_then(|e| e.to_int::<u16>().ok());
    let pixel_bytes = object
        .element(tags::PIXEL_DATA)
        .ok()
        .and_then(|e| e.to_bytes().ok());

    if pixel_bytes.is_none() {
        log::warn!("DICOM object has no readable pixel data");
    }
    log::debug!("DICOM slice: rows {rows:?}, columns {columns:?}");

    Ok(SingleSliceImage::from_pixel_bytes(
        rows,
        columns,
        pixel_bytes.as_deref().unwrap_or_default(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel_bytes(values: &[i16]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn reads_pixels_from_element_range() {
        let mut buffer = vec![0xAA; 10];
        buffer.extend(pixel_bytes(&[-5, 0, 5, 10]));
        let elements = DicomElements {
            rows: Some(2),
            columns: Some(2),
            pixel_data: Some(10..18),
        };
        let image = SingleSliceImage::from_elements(&buffer, &elements);
        assert_eq!((image.rows, image.columns), (2, 2));
        assert_eq!(image.samples, vec![-5, 0, 5, 10]);

        let plane = image.to_plane();
        assert_eq!((plane.width, plane.height), (2, 2));
        assert_eq!(plane.pixels[0], 0);
        assert_eq!(plane.pixels[3], 255);
    }

    #[test]
    fn missing_dimensions_default_to_256() {
        let image = SingleSliceImage::from_elements(&[], &DicomElements::default());
        assert_eq!((image.rows, image.columns), (256, 256));
        assert_eq!(image.samples.len(), 256 * 256);
        assert!(image.samples.iter().all(|&s| s == 0));
    }

    #[test]
    fn range_outside_buffer_is_black() {
        let elements = DicomElements {
            rows: Some(1),
            columns: Some(3),
            pixel_data: Some(4..10),
        };
        let image = SingleSliceImage::from_elements(&[1, 2, 3], &elements);
        assert_eq!(image.samples, vec![0, 0, 0]);
    }

    #[test]
    fn short_pixel_data_is_padded() {
        let image = SingleSliceImage::from_pixel_bytes(Some(1), Some(3), &pixel_bytes(&[7]));
        assert_eq!(image.samples, vec![7, 0, 0]);
    }

    #[test]
    fn detects_preamble() {
        let mut buffer = vec![0u8; 132];
        assert!(!has_dicom_preamble(&buffer));
        buffer[128..132].copy_from_slice(b"DICM");
        assert!(has_dicom_preamble(&buffer));
        assert!(!has_dicom_preamble(&[0u8; 12]));
    }

    #[test]
    fn garbage_is_not_dicom() {
        assert!(decode_dicom(&[0u8; 64]).is_err());
    }
}
