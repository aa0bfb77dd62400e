pub mod compute;
pub mod config;
pub mod difficulty;
pub mod encoder;
pub mod entities;
pub mod error;
pub mod frame;
pub mod glyphs;
pub mod link;
pub mod palette;
pub mod render;
pub mod session;
