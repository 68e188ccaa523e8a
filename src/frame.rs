use bitvec::prelude::*;

pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 32;
/// Width of a sprite row in pixels
pub const SPRITE_WIDTH: usize = 8;

/// Display buffer, one byte per pixel holding either 0 or 1
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Frame([[u8; WIDTH]; HEIGHT]);

/// A shared view over a `Frame`
///
/// Rows are stored from top to bottom, each row holding pixels from left to
/// right. A lit pixel is `1`, a dark one `0`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct FrameView<'a>(&'a [[u8; WIDTH]; HEIGHT]);

impl<'a> FrameView<'a> {
    /// View the raw memory of a frame
    pub fn as_raw(&self) -> &'a [[u8; WIDTH]; HEIGHT] {
        self.0
    }

    /// Create an owned copy of a frame
    pub fn copy_frame(self) -> Frame {
        Frame(*self.0)
    }

    /// Access a pixel by its column and row
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        self.0.get(y).and_then(|row| row.get(x)).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a [u8; WIDTH]> {
        self.0.iter()
    }

    /// Number of lit pixels
    pub fn lit(&self) -> usize {
        self.rows().flatten().filter(|&&px| px != 0).count()
    }

    /// Iter frame pixelwise (each pixel in row for each row in frame) after scaling it
    /// by a given factor.
    pub fn iter_pixelwise_scaled(
        &self,
        scale: usize,
    ) -> impl Iterator<Item = impl Iterator<Item = &'a u8>> {
        self.rows()
            .map(move |row| {
                row.iter()
                    .flat_map(move |px| core::iter::repeat(px).take(scale))
            })
            .flat_map(move |row| core::iter::repeat(row).take(scale))
    }
}

impl Frame {
    pub fn new() -> Self {
        Self([[0; WIDTH]; HEIGHT])
    }

    /// Get view over frame
    pub fn view(&self) -> FrameView<'_> {
        FrameView(&self.0)
    }

    pub(crate) fn clear(&mut self) {
        self.0 = [[0; WIDTH]; HEIGHT];
    }

    /// XOR `sprite` onto the frame with its top-left corner at (`x`, `y`).
    ///
    /// The origin and every pixel of the sprite wrap around the screen edges.
    /// Each byte of `sprite` is one row, most significant bit leftmost.
    /// Returns whether any lit pixel was turned off.
    pub(crate) fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let (x0, y0) = (x as usize % WIDTH, y as usize % HEIGHT);
        let mut collision = false;
        for (dy, row) in sprite.view_bits::<Msb0>().chunks(SPRITE_WIDTH).enumerate() {
            let py = (y0 + dy) % HEIGHT;
            for (dx, bit) in row.iter().enumerate() {
                if *bit {
                    let px = (x0 + dx) % WIDTH;
                    let cell = &mut self.0[py][px];
                    collision |= *cell == 1;
                    *cell ^= 1;
                }
            }
        }
        collision
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl Frame {
    pub(crate) fn set_pixel(&mut self, x: usize, y: usize) {
        self.0[y][x] = 1;
    }
}
