use pitchtag_types::Point;

/// Convert a pixel coordinate into a whole percentage of `extent`.
///
/// Truncates like `floor((value / extent) * 100)`. Values inside
/// `0..=extent` land in `0..=100`; anything else saturates into `u8`.
pub fn norm(value: f64, extent: u32) -> u8 {
    if extent == 0 {
        return 0;
    }
    ((value / f64::from(extent)) * 100.0).floor() as u8
}

/// Pixel size of the field image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageExtent {
    pub width: u32,
    pub height: u32,
}

impl ImageExtent {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether a click at `point` lands on the image (edges included)
    pub fn contains(&self, point: Point) -> bool {
        point.x.is_finite()
            && point.y.is_finite()
            && (0.0..=f64::from(self.width)).contains(&point.x)
            && (0.0..=f64::from(self.height)).contains(&point.y)
    }

    pub fn normalize(&self, point: Point) -> (u8, u8) {
        (norm(point.x, self.width), norm(point.y, self.height))
    }
}
