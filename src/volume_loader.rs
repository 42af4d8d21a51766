use crate::config::ViewerConfig;
use crate::extractor;
use crate::header::{HeaderError, VolumeHeader};
use crate::normalizer;
use crate::single_slice::{self, SingleSliceImage};
use crate::volume::Volume;

use flate2::read::MultiGzDecoder;
use std::{fs, io::Read, path::Path};
use thiserror::Error;
use web_time::Instant;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Header error: {0}")]
    Header(#[from] HeaderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("DICOM error: {0}")]
    Dicom(#[from] dicom::object::ReadError),

    #[error("Decoding task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Unknown file format: neither DICOM nor a decodable NIfTI header")]
    UnknownFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Nifti,
    Dicom,
}

impl FileFormat {
    /// Guess the format from the file name, then from the DICOM marker.
    pub fn detect(name: Option<&str>, bytes: &[u8]) -> Option<Self> {
        let name = name.map(str::to_ascii_lowercase);
        match name.as_deref() {
            Some(n) if n.ends_with(".nii") || n.ends_with(".nii.gz") => Some(Self::Nifti),
            Some(n) if n.ends_with(".dcm") || n.ends_with(".dicom") => Some(Self::Dicom),
            _ if single_slice::has_dicom_preamble(bytes) => Some(Self::Dicom),
            _ => None,
        }
    }
}

/// Decoded content ready for a session.
#[derive(Debug, Clone)]
pub enum LoadedImage {
    Volume(Volume),
    SingleSlice(SingleSliceImage),
}

pub struct VolumeLoader;

impl VolumeLoader {
    /// Decode a decompressed NIfTI buffer into a volume with all slices
    /// resampled to the configured display size.
    ///
    /// # Errors
    ///
    /// Returns an error only if the header is unusable. Short voxel data is
    /// zero-filled.
    pub fn decode_nifti(buffer: &[u8], config: &ViewerConfig) -> Result<Volume, HeaderError> {
        let started = Instant::now();
        let header = VolumeHeader::decode(buffer, config.code_table, config.max_voxels)?;
        let stack_bytes = header.stack_bytes(config.display);
        if stack_bytes > config.max_stack_bytes {
            return Err(HeaderError::StacksTooLarge {
                bytes: stack_bytes,
                limit: config.max_stack_bytes,
            });
        }
        let raw = extractor::extract_voxels(buffer, &header);
        let normalized = normalizer::normalize(&raw);
        drop(raw);
        let volume = Volume::new(normalized, config.display);
        log::info!(
            "Decoded {}x{}x{} volume in {:?}",
            header.width,
            header.height,
            header.depth,
            started.elapsed()
        );
        Ok(volume)
    }

    /// Load raw file bytes, inflating gzip and detecting the format.
    ///
    /// # Arguments
    ///
    /// * `bytes` - File content, possibly gzip compressed
    /// * `name` - Optional file name used as a format hint
    /// * `config` - Decoding and display settings
    pub fn load_bytes(
        bytes: &[u8],
        name: Option<&str>,
        config: &ViewerConfig,
    ) -> Result<LoadedImage, LoadError> {
        let inflated;
        let bytes = if is_gzipped(bytes) {
            inflated = gunzip(bytes)?;
            log::debug!("Inflated {} bytes to {}", bytes.len(), inflated.len());
            inflated.as_slice()
        } else {
            bytes
        };

        let format = match FileFormat::detect(name, bytes) {
            Some(format) => format,
            None if VolumeHeader::decode(bytes, config.code_table, config.max_voxels).is_ok() => {
                FileFormat::Nifti
            }
            None => return Err(LoadError::UnknownFormat),
        };

        match format {
            FileFormat::Nifti => Ok(LoadedImage::Volume(Self::decode_nifti(bytes, config)?)),
            FileFormat::Dicom => Ok(LoadedImage::SingleSlice(single_slice::decode_dicom(bytes)?)),
        }
    }

    /// Load a volume from a `.nii`, `.nii.gz` or `.dcm` file
    pub fn load_file(
        path: impl AsRef<Path>,
        config: &ViewerConfig,
    ) -> Result<LoadedImage, LoadError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let name = path.file_name().and_then(|n| n.to_str());
        Self::load_bytes(&bytes, name, config)
    }

    /// Read the file asynchronously and decode it on the blocking pool.
    pub async fn load_file_async(
        path: impl AsRef<Path>,
        config: ViewerConfig,
    ) -> Result<LoadedImage, LoadError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_owned);
        tokio::task::spawn_blocking(move || Self::load_bytes(&bytes, name.as_deref(), &config))
            .await?
    }
}

pub fn is_gzipped(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

pub fn gunzip(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoder = MultiGzDecoder::new(bytes);
    let mut out = Vec::with_capacity(bytes.len() * 4);
    decoder.read_to_end(&mut out)?;
    Ok(out)
}
