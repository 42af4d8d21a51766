//! Render-time window/level (contrast and luminosity) remapping of 8-bit planes.

use crate::plane::Plane;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowLevel {
    pub center: f32,
    pub width: f32,
}

impl Default for WindowLevel {
    fn default() -> Self {
        Self {
            center: 128.0,
            width: 256.0,
        }
    }
}

impl WindowLevel {
    pub fn new(center: f32, width: f32) -> Self {
        Self {
            center,
            width: width.max(1.0),
        }
    }

    /// Linear VOI function
    #[inline]
    pub fn map(&self, value: u8) -> u8 {
        let value = value as f32;
        let center = self.center - 0.5;
        let half = (self.width - 1.0) / 2.0;
        if value <= center - half {
            0
        } else if value > center + half {
            255
        } else if self.width <= 1.0 {
            // Zero-width window degenerates into a threshold
            255
        } else {
            ((((value - center) / (self.width - 1.0)) + 0.5) * 255.0).round() as u8
        }
    }

    pub fn apply(&self, plane: &Plane) -> Plane {
        let lut = self.lookup_table();
        Plane::new(
            plane.width,
            plane.height,
            plane.pixels.iter().map(|&v| lut[v as usize]).collect(),
        )
    }

    fn lookup_table(&self) -> [u8; 256] {
        let mut lut = [0u8; 256];
        for (value, slot) in lut.iter_mut().enumerate() {
            *slot = self.map(value as u8);
        }
        lut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_nearly_identity() {
        let window = WindowLevel::default();
        for value in 0..=255u8 {
            let mapped = window.map(value) as i32;
            assert!((mapped - value as i32).abs() <= 1, "{value} -> {mapped}");
        }
        assert_eq!(window.map(0), 0);
        assert_eq!(window.map(255), 255);
    }

    #[test]
    fn narrow_window_saturates() {
        let window = WindowLevel::new(100.0, 20.0);
        assert_eq!(window.map(50), 0);
        assert_eq!(window.map(200), 255);
        let mid = window.map(100);
        assert!((120..=135).contains(&mid), "{mid}");
    }

    #[test]
    fn apply_keeps_dimensions() {
        let plane = Plane::new(2, 2, vec![0, 50, 100, 255]);
        let out = WindowLevel::new(50.0, 2.0).apply(&plane);
        assert_eq!((out.width, out.height), (2, 2));
        assert_eq!(out.pixels[0], 0);
        assert_eq!(out.pixels[3], 255);
    }

    #[test]
    fn width_is_at_least_one() {
        let window = WindowLevel::new(10.0, 0.0);
        assert_eq!(window.width, 1.0);
        assert_eq!(window.map(9), 0);
        assert_eq!(window.map(10), 255);
    }
}
