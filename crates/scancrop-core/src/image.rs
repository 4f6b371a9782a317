//! Lightweight grayscale buffer types.

/// Borrowed view of a single-channel image.
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

/// Owned single-channel image.
#[derive(Clone, Debug)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    /// Borrow this image as a view.
    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

/// Convert interleaved RGB8 pixel data to a single-channel intensity image.
///
/// Uses the BT.601 luma weights (the same weighting scanned-photo pipelines
/// conventionally apply), in fixed-point: `(77 R + 150 G + 29 B) >> 8`.
///
/// `data.len()` must be exactly `width * height * 3`.
pub fn gray_from_rgb8(data: &[u8], width: usize, height: usize) -> GrayImage {
    debug_assert_eq!(data.len(), width * height * 3);

    let mut out = Vec::with_capacity(width * height);
    for px in data.chunks_exact(3) {
        let (r, g, b) = (px[0] as u32, px[1] as u32, px[2] as u32);
        out.push(((77 * r + 150 * g + 29 * b) >> 8) as u8);
    }

    GrayImage {
        width,
        height,
        data: out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_conversion_extremes() {
        let rgb = [0u8, 0, 0, 255, 255, 255];
        let gray = gray_from_rgb8(&rgb, 2, 1);
        assert_eq!(gray.data[0], 0);
        assert!(gray.data[1] >= 254, "white should stay near 255");
    }

    #[test]
    fn gray_conversion_weights_green_heaviest() {
        let rgb = [255u8, 0, 0, 0, 255, 0, 0, 0, 255];
        let gray = gray_from_rgb8(&rgb, 3, 1);
        assert!(gray.data[1] > gray.data[0]);
        assert!(gray.data[0] > gray.data[2]);
    }
}
