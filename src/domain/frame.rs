// ============================================================
// Layer 3 — Frame (1-bit raster)
// ============================================================
// One image of the box: `true` is a black pixel (the square),
// `false` is white background. Stored row-major, row 0 at the
// TOP of the image as in any raster format.

/// A black-and-white bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width:  usize,
    height: usize,
    pixels: Vec<bool>,
}

impl Frame {
    /// An all-white frame.
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width * height],
        }
    }

    /// Pixel at (col, row); out-of-bounds reads are white.
    pub fn get(&self, col: usize, row: usize) -> bool {
        col < self.width && row < self.height && self.pixels[row * self.width + col]
    }

    /// Set a pixel; out-of-bounds writes are ignored.
    pub fn set(&mut self, col: usize, row: usize, black: bool) {
        if col < self.width && row < self.height {
            self.pixels[row * self.width + col] = black;
        }
    }

    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    /// (col, row) of the first black pixel in raster order.
    pub fn first_lit(&self) -> Option<(usize, usize)> {
        self.pixels
            .iter()
            .position(|&p| p)
            .map(|i| (i % self.width, i / self.width))
    }

    /// `#` for black, `.` for white, one line per row.
    pub fn to_ascii(&self) -> String {
        self.rows()
            .map(|row| row.iter().map(|&p| if p { '#' } else { '.' }).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Plain PBM ("P1"): header, then one text row per image row,
    /// `1` for black and `0` for white.
    pub fn to_pbm(&self) -> String {
        let mut out = format!("P1\n{} {}\n", self.width, self.height);
        for row in self.rows() {
            let line: Vec<&str> = row.iter().map(|&p| if p { "1" } else { "0" }).collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        out
    }

    fn rows(&self) -> impl Iterator<Item = &[bool]> {
        // chunks(0) panics; a zero-width frame simply has no rows
        self.pixels.chunks(self.width.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut f = Frame::blank(4, 3);
        f.set(2, 1, true);
        assert!(f.get(2, 1));
        assert!(!f.get(1, 2));
        assert_eq!(f.lit_pixels(), 1);
        assert_eq!(f.first_lit(), Some((2, 1)));

        // ignored rather than panicking
        f.set(10, 10, true);
        assert!(!f.get(10, 10));
        assert_eq!(f.lit_pixels(), 1);
    }

    #[test]
    fn test_ascii_rendering() {
        let mut f = Frame::blank(3, 2);
        f.set(0, 0, true);
        f.set(2, 1, true);
        assert_eq!(f.to_ascii(), "#..\n..#");
    }

    #[test]
    fn test_pbm_layout() {
        let mut f = Frame::blank(2, 2);
        f.set(1, 0, true);
        assert_eq!(f.to_pbm(), "P1\n2 2\n0 1\n0 0\n");
    }

    #[test]
    fn test_blank_frame_has_no_lit_pixel() {
        let f = Frame::blank(16, 16);
        assert_eq!(f.lit_pixels(), 0);
        assert_eq!(f.first_lit(), None);
    }
}
