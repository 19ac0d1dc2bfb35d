use crate::cell::Cell;
use crate::elementary::History;
use crate::life::Grid;

/// Hex values of braille dots
///
/// ```notrust
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// Dots per braille character, horizontally and vertically
const CHAR_W: usize = 2;
const CHAR_H: usize = 4;

/// A monochrome pixel buffer drawn with braille characters, each holding a 2x4 block
/// of dots.
///
/// ```
/// use automata::render::Canvas;
///
/// let mut canvas = Canvas::new(4, 4);
/// canvas.draw_pixel(0, 0);
///
/// assert_eq!(canvas.render(), "\u{2801}\u{2800}\n");
/// ```
pub struct Canvas {
    /// The dot buffer
    db: Vec<bool>,

    /// The frame buffer
    fb: String,

    /// Codepoints, one per braille character
    cp: Vec<u32>,

    /// Width in dots
    w: usize,

    /// Height in dots
    h: usize,
}

impl Canvas {
    pub fn new(w: usize, h: usize) -> Self {
        let (bw, bh) = (w.div_ceil(CHAR_W), h.div_ceil(CHAR_H));

        // Each braille character is 3 bytes of UTF-8, plus one newline per line
        let fb = String::with_capacity(3 * (bw * bh) + bh);

        Self {
            db: vec![false; w * h],
            fb,
            cp: vec![BRAILLE_EMPTY; bw * bh],
            w,
            h,
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Turns on a single dot
    pub fn draw_pixel(&mut self, x: usize, y: usize) {
        assert!(x < self.w, "x is out of bounds");
        assert!(y < self.h, "y is out of bounds");

        let i = self.xy_from(x, y);
        self.db[i] = true;
    }

    /// Turns on an `s` by `s` square of dots with its top left corner at `(x, y)`
    pub fn draw_square(&mut self, x: usize, y: usize, s: usize) {
        assert!(x + s <= self.w, "x is out of bounds");
        assert!(y + s <= self.h, "y is out of bounds");

        for dy in 0..s {
            let i = self.xy_from(x, y + dy);
            self.db[i..i + s].fill(true);
        }
    }

    /// Turn every dot off
    pub fn reset(&mut self) {
        self.db.fill(false);
    }

    /// Encode the dots as lines of braille characters. Every line, including the last,
    /// ends in a newline.
    pub fn render(&mut self) -> &str {
        let bw = self.w.div_ceil(CHAR_W);

        self.cp.fill(BRAILLE_EMPTY);

        for (n, &on) in self.db.iter().enumerate() {
            if on {
                let (x, y) = (n % self.w, n / self.w);
                self.cp[(y / CHAR_H) * bw + (x / CHAR_W)] += Self::get_hex_value(x, y);
            }
        }

        self.fb.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            // Every value in U+2800..=U+28FF is a braille pattern
            self.fb
                .push(char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER));
        }

        if !self.cp.is_empty() {
            self.fb.push('\n');
        }

        &self.fb
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % CHAR_W, y % CHAR_H) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}

/// A canvas showing every generation of `history`, one dot per cell and one dot row per
/// generation.
pub fn history_canvas(history: &History) -> Canvas {
    let (generations, size) = history.shape();
    let mut canvas = Canvas::new(size, generations);

    for (g, row) in history.rows().iter().enumerate() {
        for (i, _) in row.iter().enumerate().filter(|(_, c)| c.is_alive()) {
            canvas.draw_pixel(i, g);
        }
    }

    canvas
}

/// Draw every live cell of `grid` as a `dots` by `dots` square. The canvas must be at
/// least `dots` times the grid's size in each direction.
pub fn draw_grid(canvas: &mut Canvas, grid: &Grid, dots: usize) {
    for r in 0..grid.rows() {
        for (c, &cell) in grid.row(r).iter().enumerate() {
            if cell == Cell::Alive {
                canvas.draw_square(c * dots, r * dots, dots);
            }
        }
    }
}
