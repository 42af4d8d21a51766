use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Cut along z, plane is width x height
    Axial,
    /// Cut along x, plane is height x depth
    Sagittal,
    /// Cut along y, plane is width x depth
    Coronal,
}

impl Orientation {
    pub const ALL: [Orientation; 3] = [Self::Axial, Self::Sagittal, Self::Coronal];

    /// Position of the orientation inside per-orientation arrays
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Axial => 0,
            Self::Sagittal => 1,
            Self::Coronal => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Axial => "axial",
            Self::Sagittal => "sagittal",
            Self::Coronal => "coronal",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Step direction for slice navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn step(self) -> isize {
        match self {
            Self::Previous => -1,
            Self::Next => 1,
        }
    }

    /// Scroll-wheel convention: positive delta moves forward.
    pub fn from_delta(delta: f32) -> Self {
        if delta > 0.0 { Self::Next } else { Self::Previous }
    }
}

/// Voxel sample encoding of a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Datatype {
    U8,
    I16,
    I32,
    F32,
    /// 64-bit samples, stepped over but decoded as unsigned 8-bit
    Reserved64,
    U16,
    Unknown(i16),
}

impl Datatype {
    pub fn bytes_per_voxel(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::F32 => 4,
            Self::Reserved64 => 8,
            Self::Unknown(_) => 2,
        }
    }
}

/// Mapping from the header's datatype field to a [`Datatype`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeTable {
    /// Codes 1 to 6
    #[default]
    Compact,
    /// Standard NIfTI-1 `DT_*` codes
    Nifti1,
}

impl CodeTable {
    pub fn datatype(self, code: i16) -> Datatype {
        match (self, code) {
            (Self::Compact, 1) | (Self::Nifti1, 2) => Datatype::U8,
            (Self::Compact, 2) | (Self::Nifti1, 4) => Datatype::I16,
            (Self::Compact, 3) | (Self::Nifti1, 8) => Datatype::I32,
            (Self::Compact, 4) | (Self::Nifti1, 16) => Datatype::F32,
            (Self::Compact, 5) | (Self::Nifti1, 64) => Datatype::Reserved64,
            (Self::Compact, 6) | (Self::Nifti1, 512) => Datatype::U16,
            (_, other) => Datatype::Unknown(other),
        }
    }
}

/// Convenience for the default code table.
pub fn bytes_per_voxel(code: i16) -> usize {
    CodeTable::Compact.datatype(code).bytes_per_voxel()
}
