use rgbd_image::LegacyImage;

/// Color and depth pair in the legacy byte layout.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegacyRgbdImage {
    /// The color image.
    pub color: LegacyImage,
    /// The depth image.
    pub depth: LegacyImage,
}

impl LegacyRgbdImage {
    /// Create a legacy pair from two legacy images.
    pub fn new(color: LegacyImage, depth: LegacyImage) -> Self {
        Self { color, depth }
    }

    /// Legacy consumers treat the pair as unusable as soon as one side has no data.
    pub fn is_empty(&self) -> bool {
        self.color.is_empty() || self.depth.is_empty()
    }

    /// Minimum `(x, y)` of the side-by-side layout.
    pub fn min_bound(&self) -> [f64; 2] {
        [0.0, 0.0]
    }

    /// Maximum `(x, y)` of the side-by-side layout, using the color height.
    pub fn max_bound(&self) -> [f64; 2] {
        [
            (self.color.width + self.depth.width) as f64,
            self.color.height as f64,
        ]
    }
}

impl std::fmt::Display for LegacyRgbdImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LegacyRgbdImage of size\nColor image : {}x{}, with {} channels.\nDepth image : {}x{}, with {} channels.",
            self.color.width,
            self.color.height,
            self.color.num_of_channels,
            self.depth.width,
            self.depth.height,
            self.depth.num_of_channels
        )
    }
}
