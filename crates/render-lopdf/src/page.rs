const POINTS_PER_INCH: f32 = 72.0;

/// Paper size in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// ISO A4 expressed in inches, as print drivers round it.
    pub const A4_INCHES: (f32, f32) = (8.268, 11.693);

    pub const A4: PageSize = PageSize::from_inches(Self::A4_INCHES.0, Self::A4_INCHES.1);

    pub const fn from_inches(width: f32, height: f32) -> Self {
        Self {
            width: width * POINTS_PER_INCH,
            height: height * POINTS_PER_INCH,
        }
    }

    /// Size and offset of an image scaled to fit this page, centred.
    pub fn fit(&self, image_width: u32, image_height: u32) -> (f32, f32, f32, f32) {
        if image_width == 0 || image_height == 0 {
            return (0.0, 0.0, 0.0, 0.0);
        }
        let scale = (self.width / image_width as f32).min(self.height / image_height as f32);
        let width = image_width as f32 * scale;
        let height = image_height as f32 * scale;
        (
            (self.width - width) / 2.0,
            (self.height - height) / 2.0,
            width,
            height,
        )
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}
