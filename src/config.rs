use crate::enums::CodeTable;
use crate::window::WindowLevel;

/// Fixed resolution every orientation is resampled to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySize {
    pub width: usize,
    pub height: usize,
}

impl DisplaySize {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DisplaySize {
    // 256 * 1.5 wide, 256 high
    fn default() -> Self {
        Self::new(384, 256)
    }
}

pub const DEFAULT_MAX_VOXELS: usize = 512 * 1024 * 1024;
pub const DEFAULT_MAX_STACK_BYTES: usize = 2 * 1024 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    pub display: DisplaySize,
    pub code_table: CodeTable,
    /// Upper bound on width * height * depth accepted from a header
    pub max_voxels: usize,
    /// Upper bound on the memory of all resampled slices
    pub max_stack_bytes: usize,
    pub window: WindowLevel,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            display: DisplaySize::default(),
            code_table: CodeTable::default(),
            max_voxels: DEFAULT_MAX_VOXELS,
            max_stack_bytes: DEFAULT_MAX_STACK_BYTES,
            window: WindowLevel::default(),
        }
    }
}

impl ViewerConfig {
    pub fn with_display(mut self, width: usize, height: usize) -> Self {
        self.display = DisplaySize::new(width, height);
        self
    }

    pub fn with_code_table(mut self, code_table: CodeTable) -> Self {
        self.code_table = code_table;
        self
    }

    pub fn with_max_voxels(mut self, max_voxels: usize) -> Self {
        self.max_voxels = max_voxels;
        self
    }

    pub fn with_max_stack_bytes(mut self, max_stack_bytes: usize) -> Self {
        self.max_stack_bytes = max_stack_bytes;
        self
    }

    pub fn with_window(mut self, window: WindowLevel) -> Self {
        self.window = window;
        self
    }
}
