//! Frame Encoder: per-panel palette indices and the `SCREEN:` text framing.
//!
//! Wire format, one line per panel per frame:
//!
//! ```text
//! SCREEN:<i0>,<i1>,...,<i63>\n
//! ```
//!
//! where each index is a palette entry (0..=15), 8×8 row-major.

use crate::frame::{FrameBuffer, LED_SIZE, PANEL_PIXELS};
use crate::glyphs;
use crate::palette::{self, Palette};

pub const FRAME_TAG: &str = "SCREEN:";

/// Palette indices of one panel, row-major.
pub type PanelFrame = [u8; PANEL_PIXELS];

/// Quantize one panel's 8×8 sub-grid.
pub fn encode_panel(frame: &FrameBuffer, row: usize, col: usize) -> PanelFrame {
    let mut out = [Palette::Black.index(); PANEL_PIXELS];
    for (slot, color) in out.iter_mut().zip(frame.panel(row, col)) {
        *slot = palette::quantize(*color).index();
    }
    out
}

/// Tagged, comma-joined, newline-terminated text frame.
pub fn frame_line(indices: &PanelFrame) -> String {
    let body: Vec<String> = indices.iter().map(|i| i.to_string()).collect();
    format!("{FRAME_TAG}{}\n", body.join(","))
}

pub fn blank_panel() -> PanelFrame {
    [Palette::Black.index(); PANEL_PIXELS]
}

/// Test pattern: the 1-based panel number in white.
pub fn panel_number_frame(index: usize) -> PanelFrame {
    let number = index as u32 + 1;
    let digits: Vec<u32> = if number >= 10 {
        vec![number / 10, number % 10]
    } else {
        vec![number]
    };

    let width = glyphs::small_digit(0).width();
    let height = glyphs::small_digit(0).height();
    let total = digits.len() * width + digits.len().saturating_sub(1);
    let ox = (LED_SIZE - total) / 2;
    let oy = (LED_SIZE - height) / 2;

    let mut out = blank_panel();
    for (n, d) in digits.iter().enumerate() {
        let dx = ox + n * (width + 1);
        for (x, y) in glyphs::small_digit(*d).lit() {
            out[(oy + y) * LED_SIZE + dx + x] = Palette::White.index();
        }
    }
    out
}
