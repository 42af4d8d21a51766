use crate::config::ViewerConfig;
use crate::enums::{Direction, Orientation};
use crate::plane::Plane;
use crate::single_slice::SingleSliceImage;
use crate::volume::{OrientationExtents, Volume};
use crate::volume_loader::{LoadError, LoadedImage, VolumeLoader};
use crate::window::WindowLevel;

use image::GrayImage;

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub new_index: usize,
    pub changed: bool,
}

#[derive(Debug, Clone)]
enum Content {
    Volume(Volume),
    SingleSlice {
        image: SingleSliceImage,
        plane: Plane,
    },
}

#[derive(Debug, Clone)]
struct Loaded {
    content: Content,
    indices: [usize; 3],
}

impl Loaded {
    fn new(image: LoadedImage) -> Self {
        match image {
            LoadedImage::Volume(volume) => {
                // Start in the middle of each axis
                let indices = Orientation::ALL.map(|o| volume.extent(o) / 2);
                Self {
                    content: Content::Volume(volume),
                    indices,
                }
            }
            LoadedImage::SingleSlice(image) => {
                let plane = image.to_plane();
                Self {
                    content: Content::SingleSlice { image, plane },
                    indices: [0; 3],
                }
            }
        }
    }

    fn extent(&self, orientation: Orientation) -> usize {
        match &self.content {
            Content::Volume(volume) => volume.extent(orientation),
            Content::SingleSlice { .. } => 1,
        }
    }

    fn plane(&self, orientation: Orientation, index: usize) -> Option<&Plane> {
        match &self.content {
            Content::Volume(volume) => volume.plane(index, orientation),
            Content::SingleSlice { plane, .. } => (index == 0).then_some(plane),
        }
    }

    fn move_to(&mut self, orientation: Orientation, target: isize) -> Navigation {
        let last = self.extent(orientation).saturating_sub(1) as isize;
        let new_index = target.clamp(0, last) as usize;
        let current = &mut self.indices[orientation.index()];
        let changed = new_index != *current;
        *current = new_index;
        Navigation { new_index, changed }
    }
}

#[derive(Debug, Clone, Default)]
enum State {
    #[default]
    Empty,
    Loaded(Box<Loaded>),
}

/// The decoded image being viewed and the current slice of each orientation.
#[derive(Debug, Clone, Default)]
pub struct VolumeSession {
    config: ViewerConfig,
    window: WindowLevel,
    state: State,
}

impl VolumeSession {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            window: config.window,
            config,
            state: State::Empty,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Replace whatever is loaded with `image`.
    pub fn load(&mut self, image: LoadedImage) {
        if self.is_loaded() {
            log::info!("Discarding previously loaded image");
        }
        self.state = State::Empty;
        self.state = State::Loaded(Box::new(Loaded::new(image)));
        if let Some(extents) = self.extents() {
            log::info!(
                "Session loaded: axial {}, sagittal {}, coronal {} slices",
                extents.axial,
                extents.sagittal,
                extents.coronal
            );
        }
    }

    /// Decode `bytes` and load the result. On failure the session is left as it was.
    pub fn load_bytes(&mut self, bytes: &[u8], name: Option<&str>) -> Result<(), LoadError> {
        let image = VolumeLoader::load_bytes(bytes, name, &self.config)?;
        self.load(image);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.state = State::Empty;
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, State::Loaded(_))
    }

    fn loaded(&self) -> Option<&Loaded> {
        match &self.state {
            State::Loaded(loaded) => Some(loaded),
            State::Empty => None,
        }
    }

    fn loaded_mut(&mut self) -> Option<&mut Loaded> {
        match &mut self.state {
            State::Loaded(loaded) => Some(loaded),
            State::Empty => None,
        }
    }

    pub fn volume(&self) -> Option<&Volume> {
        match &self.loaded()?.content {
            Content::Volume(volume) => Some(volume),
            Content::SingleSlice { .. } => None,
        }
    }

    pub fn single_slice(&self) -> Option<&SingleSliceImage> {
        match &self.loaded()?.content {
            Content::SingleSlice { image, .. } => Some(image),
            Content::Volume(_) => None,
        }
    }

    /// Dimensions as (width, height, depth); a single slice is columns x rows x 1
    pub fn dims(&self) -> Option<(usize, usize, usize)> {
        match &self.loaded()?.content {
            Content::Volume(volume) => Some(volume.dims()),
            Content::SingleSlice { image, .. } => Some((image.columns, image.rows, 1)),
        }
    }

    pub fn extents(&self) -> Option<OrientationExtents> {
        let loaded = self.loaded()?;
        Some(OrientationExtents {
            axial: loaded.extent(Orientation::Axial),
            sagittal: loaded.extent(Orientation::Sagittal),
            coronal: loaded.extent(Orientation::Coronal),
        })
    }

    /// Number of slices along `orientation`, 0 when empty
    pub fn extent(&self, orientation: Orientation) -> usize {
        self.loaded().map_or(0, |loaded| loaded.extent(orientation))
    }

    pub fn current_index(&self, orientation: Orientation) -> Option<usize> {
        self.loaded().map(|loaded| loaded.indices[orientation.index()])
    }

    pub fn current_slice(&self, orientation: Orientation) -> Option<&Plane> {
        let loaded = self.loaded()?;
        loaded.plane(orientation, loaded.indices[orientation.index()])
    }

    pub fn plane_at(&self, orientation: Orientation, index: usize) -> Option<&Plane> {
        self.loaded()?.plane(orientation, index)
    }

    /// Step one slice. Moving past either end leaves the index unchanged.
    pub fn navigate(
        &mut self,
        orientation: Orientation,
        direction: Direction,
    ) -> Option<Navigation> {
        let loaded = self.loaded_mut()?;
        let current = loaded.indices[orientation.index()] as isize;
        let navigation = loaded.move_to(orientation, current + direction.step());
        if navigation.changed {
            log::debug!("{orientation} slice -> {}", navigation.new_index);
        }
        Some(navigation)
    }

    /// Jump to `index`, clamped to the valid range.
    pub fn set_slice(&mut self, orientation: Orientation, index: usize) -> Option<Navigation> {
        let loaded = self.loaded_mut()?;
        let target = index.min(isize::MAX as usize) as isize;
        Some(loaded.move_to(orientation, target))
    }

    /// One-based position label, e.g. `Slice: 3/20`
    pub fn slice_label(&self, orientation: Orientation) -> Option<String> {
        let loaded = self.loaded()?;
        Some(format!(
            "Slice: {}/{}",
            loaded.indices[orientation.index()] + 1,
            loaded.extent(orientation)
        ))
    }

    pub fn window(&self) -> WindowLevel {
        self.window
    }

    /// Shared by every orientation.
    pub fn set_window(&mut self, window: WindowLevel) {
        self.window = window;
    }

    /// Current slice with the window applied.
    pub fn render(&self, orientation: Orientation) -> Option<GrayImage> {
        let plane = self.current_slice(orientation)?;
        self.window.apply(plane).to_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn session_with(dims: (usize, usize, usize), data: Vec<u8>) -> VolumeSession {
        let (width, height, depth) = dims;
        let config = ViewerConfig::default().with_display(4, 4);
        let data = Array3::from_shape_vec((depth, height, width), data).unwrap();
        let mut session = VolumeSession::new(config);
        session.load(LoadedImage::Volume(Volume::new(data, config.display)));
        session
    }

    #[test]
    fn empty_session_serves_nothing() {
        let mut session = VolumeSession::default();
        assert!(!session.is_loaded());
        assert_eq!(session.current_slice(Orientation::Axial), None);
        assert_eq!(session.navigate(Orientation::Axial, Direction::Next), None);
        assert_eq!(session.extent(Orientation::Coronal), 0);
        assert_eq!(session.extents(), None);
    }

    #[test]
    fn starts_at_center() {
        let session = session_with((5, 4, 3), vec![0; 60]);
        assert_eq!(session.current_index(Orientation::Axial), Some(1));
        assert_eq!(session.current_index(Orientation::Sagittal), Some(2));
        assert_eq!(session.current_index(Orientation::Coronal), Some(2));
        assert_eq!(session.slice_label(Orientation::Sagittal).unwrap(), "Slice: 3/5");
    }

    #[test]
    fn navigation_is_clamped_and_idempotent_at_edges() {
        let mut session = session_with((2, 2, 3), vec![0; 12]);
        assert_eq!(
            session.set_slice(Orientation::Axial, 0),
            Some(Navigation {
                new_index: 0,
                changed: true
            })
        );
        for _ in 0..3 {
            assert_eq!(
                session.navigate(Orientation::Axial, Direction::Previous),
                Some(Navigation {
                    new_index: 0,
                    changed: false
                })
            );
        }

        let steps: Vec<_> = (0..4)
            .map(|_| session.navigate(Orientation::Axial, Direction::Next).unwrap())
            .collect();
        assert_eq!(
            steps.iter().map(|n| (n.new_index, n.changed)).collect::<Vec<_>>(),
            vec![(1, true), (2, true), (2, false), (2, false)]
        );
    }

    #[test]
    fn set_slice_clamps_large_indices() {
        let mut session = session_with((2, 2, 3), vec![0; 12]);
        let navigation = session.set_slice(Orientation::Coronal, usize::MAX).unwrap();
        assert_eq!(navigation.new_index, 1);
        assert_eq!(session.current_index(Orientation::Coronal), Some(1));
    }

    #[test]
    fn current_slice_follows_index() {
        let data: Vec<u8> = (0..8).map(|i| if i < 4 { 0 } else { 255 }).collect();
        let mut session = session_with((2, 2, 2), data);
        session.set_slice(Orientation::Axial, 0);
        let plane = session.current_slice(Orientation::Axial).unwrap();
        assert!(plane.pixels.iter().all(|&p| p == 0));
        session.navigate(Orientation::Axial, Direction::Next);
        let plane = session.current_slice(Orientation::Axial).unwrap();
        assert!(plane.pixels.iter().all(|&p| p == 255));
    }

    #[test]
    fn loading_replaces_previous_content() {
        let mut session = session_with((4, 4, 4), vec![0; 64]);
        session.navigate(Orientation::Axial, Direction::Next);

        let image = SingleSliceImage::from_pixel_bytes(Some(2), Some(3), &[]);
        session.load(LoadedImage::SingleSlice(image));
        assert!(session.volume().is_none());
        assert_eq!(session.dims(), Some((3, 2, 1)));
        for orientation in Orientation::ALL {
            assert_eq!(session.extent(orientation), 1);
            assert_eq!(session.current_index(orientation), Some(0));
            let plane = session.current_slice(orientation).unwrap();
            assert_eq!((plane.width, plane.height), (3, 2));
            assert_eq!(
                session.navigate(orientation, Direction::Next),
                Some(Navigation {
                    new_index: 0,
                    changed: false
                })
            );
        }
    }

    #[test]
    fn failed_load_keeps_state() {
        let mut session = session_with((2, 2, 2), vec![0; 8]);
        assert!(session.load_bytes(&[0u8; 10], Some("bad.nii")).is_err());
        assert_eq!(session.dims(), Some((2, 2, 2)));
        session.clear();
        assert!(!session.is_loaded());
    }

    #[test]
    fn render_applies_window() {
        let mut session = session_with((1, 1, 1), vec![0]);
        session.set_window(WindowLevel::new(0.0, 1.0));
        let image = session.render(Orientation::Axial).unwrap();
        assert_eq!(image.dimensions(), (4, 4));
        assert!(image.pixels().all(|p| p.0 == [255]));
    }
}
