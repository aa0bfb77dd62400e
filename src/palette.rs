//! The panels' 16-colour palette and RGB → palette quantization.
//!
//! Quantization is an ordered rule table: rules are tried top to bottom and
//! the first matching predicate wins.  Anything no rule claims is black.

use crate::frame::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Palette {
    Black = 0,
    Red = 1,
    Green = 2,
    Blue = 3,
    Yellow = 4,
    Purple = 5,
    Cyan = 6,
    White = 7,
    DarkRed = 8,
    DarkGreen = 9,
    DarkBlue = 10,
    Brown = 11,
    Pink = 12,
    LightCyan = 13,
    LightPink = 14,
    Gray = 15,
}

impl Palette {
    /// Wire index, 0..=15.
    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Brightness below which a dominant channel picks the dark variant.
const DIM: u8 = 100;
/// Secondary channels above this turn a dominant colour into a blend.
const BRIGHT: u8 = 100;
const WHITE_FLOOR: u8 = 200;
const GRAY_FLOOR: u8 = 50;

pub struct Rule {
    pub name: &'static str,
    pub matches: fn(Rgb) -> bool,
    pub color: Palette,
}

fn red_dominant(c: Rgb) -> bool {
    c.r > c.g && c.r > c.b
}

fn green_dominant(c: Rgb) -> bool {
    c.g > c.r && c.g > c.b
}

fn blue_dominant(c: Rgb) -> bool {
    c.b > c.r && c.b > c.g
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "off",
        matches: |c| c.r == 0 && c.g == 0 && c.b == 0,
        color: Palette::Black,
    },
    Rule {
        name: "all channels high",
        matches: |c| c.r > WHITE_FLOOR && c.g > WHITE_FLOOR && c.b > WHITE_FLOOR,
        color: Palette::White,
    },
    Rule {
        name: "dim red",
        matches: |c| red_dominant(c) && c.r < DIM,
        color: Palette::DarkRed,
    },
    Rule {
        name: "red with green and blue",
        matches: |c| red_dominant(c) && c.g > BRIGHT && c.b > BRIGHT,
        color: Palette::Pink,
    },
    Rule {
        name: "red",
        matches: red_dominant,
        color: Palette::Red,
    },
    Rule {
        name: "dim green",
        matches: |c| green_dominant(c) && c.g < DIM,
        color: Palette::DarkGreen,
    },
    Rule {
        name: "green with red and blue",
        matches: |c| green_dominant(c) && c.r > BRIGHT && c.b > BRIGHT,
        color: Palette::LightCyan,
    },
    Rule {
        name: "green",
        matches: green_dominant,
        color: Palette::Green,
    },
    Rule {
        name: "dim blue",
        matches: |c| blue_dominant(c) && c.b < DIM,
        color: Palette::DarkBlue,
    },
    Rule {
        name: "blue with red and green",
        matches: |c| blue_dominant(c) && c.r > BRIGHT && c.g > BRIGHT,
        color: Palette::Cyan,
    },
    Rule {
        name: "blue",
        matches: blue_dominant,
        color: Palette::Blue,
    },
    Rule {
        name: "red and green",
        matches: |c| c.r > BRIGHT && c.g > BRIGHT && c.b < BRIGHT,
        color: Palette::Yellow,
    },
    Rule {
        name: "red and blue",
        matches: |c| c.r > BRIGHT && c.b > BRIGHT && c.g < BRIGHT,
        color: Palette::Purple,
    },
    Rule {
        name: "green and blue",
        matches: |c| c.g > BRIGHT && c.b > BRIGHT && c.r < BRIGHT,
        color: Palette::Cyan,
    },
    Rule {
        name: "mid grey",
        matches: |c| c.r > GRAY_FLOOR && c.g > GRAY_FLOOR && c.b > GRAY_FLOOR,
        color: Palette::Gray,
    },
];

/// First matching rule, if any.
pub fn classify(color: Rgb) -> Option<&'static Rule> {
    RULES.iter().find(|rule| (rule.matches)(color))
}

pub fn quantize(color: Rgb) -> Palette {
    classify(color).map_or(Palette::Black, |rule| rule.color)
}
