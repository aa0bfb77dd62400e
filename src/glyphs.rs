//! Small bitmap patterns for the HUD panels and the panel test pattern.
//! `#` marks a lit LED.

#[derive(Clone, Copy, Debug)]
pub struct Glyph(&'static [&'static str]);

impl Glyph {
    pub fn width(&self) -> usize {
        self.0.first().map_or(0, |row| row.len())
    }

    pub fn height(&self) -> usize {
        self.0.len()
    }

    /// Lit cells as (x, y) offsets from the glyph's top-left corner.
    pub fn lit(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().enumerate().flat_map(|(y, row)| {
            row.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'#')
                .map(move |(x, _)| (x, y))
        })
    }
}

/// 4×8 digits used for score, countdown and the start countdown.
const DIGITS: [Glyph; 10] = [
    Glyph(&[".##.", "#..#", "#..#", "#..#", "#..#", "#..#", "#..#", ".##."]),
    Glyph(&["..#.", ".##.", "..#.", "..#.", "..#.", "..#.", "..#.", ".###"]),
    Glyph(&[".##.", "#..#", "...#", "..#.", ".#..", "#...", "#...", "####"]),
    Glyph(&[".##.", "#..#", "...#", ".##.", "...#", "...#", "#..#", ".##."]),
    Glyph(&["...#", "..##", ".#.#", "#..#", "####", "...#", "...#", "...#"]),
    Glyph(&["####", "#...", "#...", "###.", "...#", "...#", "#..#", ".##."]),
    Glyph(&[".##.", "#..#", "#...", "###.", "#..#", "#..#", "#..#", ".##."]),
    Glyph(&["####", "...#", "..#.", "..#.", ".#..", ".#..", "#...", "#..."]),
    Glyph(&[".##.", "#..#", "#..#", ".##.", "#..#", "#..#", "#..#", ".##."]),
    Glyph(&[".##.", "#..#", "#..#", "#..#", ".###", "...#", "#..#", ".##."]),
];

/// 3×5 digits for the panel number shown by the test pattern.
const SMALL_DIGITS: [Glyph; 10] = [
    Glyph(&["###", "#.#", "#.#", "#.#", "###"]),
    Glyph(&[".#.", "##.", ".#.", ".#.", "###"]),
    Glyph(&["###", "..#", "###", "#..", "###"]),
    Glyph(&["###", "..#", "###", "..#", "###"]),
    Glyph(&["#.#", "#.#", "###", "..#", "..#"]),
    Glyph(&["###", "#..", "###", "..#", "###"]),
    Glyph(&["###", "#..", "###", "#.#", "###"]),
    Glyph(&["###", "..#", ".#.", ".#.", ".#."]),
    Glyph(&["###", "#.#", "###", "#.#", "###"]),
    Glyph(&["###", "#.#", "###", "..#", "###"]),
];

pub const BIG_HEART: Glyph = Glyph(&[
    ".#...#.",
    "###.###",
    "#######",
    "#######",
    ".#####.",
    "..###..",
    "...#...",
]);

pub const SMALL_HEART: Glyph = Glyph(&[".#.#.", "#####", "#####", ".###.", "..#.."]);

pub const SKULL: Glyph = Glyph(&[
    ".######.",
    "########",
    "##.##.##",
    "########",
    ".######.",
    "..#..#..",
    ".#.##.#.",
    "#......#",
]);

/// Only the last decimal digit of `value` is used.
pub fn digit(value: u32) -> Glyph {
    DIGITS[(value % 10) as usize]
}

pub fn small_digit(value: u32) -> Glyph {
    SMALL_DIGITS[(value % 10) as usize]
}
