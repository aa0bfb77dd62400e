//! Board geometry and the frame buffer shared by the renderer and encoder.
//!
//! The physical display is a grid of 8×8 LED panels.  The frame buffer is
//! addressed either globally (board cells, origin top-left) or per panel.

/// LEDs per panel edge.
pub const LED_SIZE: usize = 8;
/// LEDs per panel.
pub const PANEL_PIXELS: usize = LED_SIZE * LED_SIZE;

pub const PANEL_COLS: usize = 4;
pub const PANEL_ROWS: usize = 3;
pub const PANEL_COUNT: usize = PANEL_COLS * PANEL_ROWS;
/// Panel columns used by the play field; the rest are HUD panels.
pub const GAME_PANEL_COLS: usize = 3;

pub const BOARD_WIDTH: i32 = (PANEL_COLS * LED_SIZE) as i32;
pub const BOARD_HEIGHT: i32 = (PANEL_ROWS * LED_SIZE) as i32;
pub const GAME_WIDTH: i32 = (GAME_PANEL_COLS * LED_SIZE) as i32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
}

/// Maps a panel slot index (0..12) to its (row, col) position.
pub fn panel_position(index: usize) -> (usize, usize) {
    (index / PANEL_COLS, index % PANEL_COLS)
}

/// Panel-row × panel-col × 8×8 colour grid.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    cells: Vec<Rgb>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        FrameBuffer::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            cells: vec![Rgb::BLACK; PANEL_COUNT * PANEL_PIXELS],
        }
    }

    pub fn fill(&mut self, color: Rgb) {
        self.cells.iter_mut().for_each(|c| *c = color);
    }

    fn offset(row: usize, col: usize, lx: usize, ly: usize) -> usize {
        ((row * PANEL_COLS + col) * LED_SIZE + ly) * LED_SIZE + lx
    }

    fn in_range(row: usize, col: usize, lx: usize, ly: usize) -> bool {
        row < PANEL_ROWS && col < PANEL_COLS && lx < LED_SIZE && ly < LED_SIZE
    }

    /// Reads one LED of one panel, `None` outside the wall.
    pub fn panel_pixel(&self, row: usize, col: usize, lx: usize, ly: usize) -> Option<Rgb> {
        Self::in_range(row, col, lx, ly).then(|| self.cells[Self::offset(row, col, lx, ly)])
    }

    /// Writes one LED of one panel; out-of-range writes are dropped.
    pub fn set_panel_pixel(&mut self, row: usize, col: usize, lx: usize, ly: usize, color: Rgb) {
        if Self::in_range(row, col, lx, ly) {
            self.cells[Self::offset(row, col, lx, ly)] = color;
        }
    }

    /// Board-coordinate read, `None` outside the board.
    pub fn get(&self, x: i32, y: i32) -> Option<Rgb> {
        if x < 0 || y < 0 || x >= BOARD_WIDTH || y >= BOARD_HEIGHT {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        self.panel_pixel(y / LED_SIZE, x / LED_SIZE, x % LED_SIZE, y % LED_SIZE)
    }

    /// Board-coordinate write; out-of-bounds writes are silently dropped.
    pub fn set(&mut self, x: i32, y: i32, color: Rgb) {
        if x < 0 || y < 0 || x >= BOARD_WIDTH || y >= BOARD_HEIGHT {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        self.set_panel_pixel(y / LED_SIZE, x / LED_SIZE, x % LED_SIZE, y % LED_SIZE, color);
    }

    /// The 64 colours of one panel in row-major order.
    pub fn panel(&self, row: usize, col: usize) -> &[Rgb] {
        let start = Self::offset(row, col, 0, 0);
        &self.cells[start..start + PANEL_PIXELS]
    }
}
