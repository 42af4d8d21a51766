//! # NIfTI multi-planar reconstruction
//!
//! This crate decodes a volumetric NIfTI image (or a single DICOM slice) and
//! produces display-ready 8-bit planes in the three medical axes:
//!  - Axial (cut along z)
//!  - Sagittal (cut along x)
//!  - Coronal (cut along y)
//!
//! The decoding pipeline is strictly sequential: the fixed 352-byte header
//! gives the dimensions and datatype, the voxels are decoded into a flat
//! volume, the whole volume is normalized to 0..=255 with one global
//! min/max, and finally every slice of every orientation is cut out and
//! resampled with nearest-neighbor to a fixed display size. The three
//! orientation stacks are built in parallel using rayon.
//!
//! The decoder favors always showing something over strict validation:
//! only an unusable header is an error. Truncated voxel data is zero
//! filled, unknown datatypes are read as unsigned bytes and navigation
//! requests are clamped.
//!
//! Voxel axes are assumed to be aligned with the index order; the affine
//! transform of the header is ignored.
//!
//! # Examples
//!
//! ## Loading a volume and stepping through axial slices
//!
//! ```no_run
//! # use nifti_mpr::{config::ViewerConfig, enums::{Direction, Orientation}};
//! # use nifti_mpr::{session::VolumeSession, volume_loader::VolumeLoader};
//! let config = ViewerConfig::default();
//! let image = VolumeLoader::load_file("brain.nii.gz", &config)
//!     .expect("should have decoded the volume");
//! let mut session = VolumeSession::new(config);
//! session.load(image);
//!
//! session.navigate(Orientation::Axial, Direction::Next);
//! let image = session
//!     .render(Orientation::Axial)
//!     .expect("should have an axial slice");
//! image.save("axial.png");
//! ```

pub mod config;
pub mod enums;
pub mod extractor;
pub mod header;
pub mod interpolator;
pub mod normalizer;
pub mod plane;
pub mod session;
pub mod single_slice;
pub mod volume;
pub mod volume_loader;
pub mod window;

pub use enums::{CodeTable, Datatype, Direction, Orientation};
pub use plane::Plane;
pub use session::{Navigation, VolumeSession};
pub use volume_loader::{LoadError, LoadedImage, VolumeLoader};
