//! Colour mapping for entities and status effects

use serde::{Deserialize, Serialize};

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex string, e.g. `#8b4513`
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

pub const BACKGROUND: Color = Color::rgb(0xf0, 0xf8, 0xff);
pub const TEXT: Color = Color::rgb(0x00, 0x00, 0x00);

pub const PLAYER: Color = Color::rgb(0x00, 0x80, 0x00);
pub const PLAYER_INVINCIBLE: Color = Color::rgb(0xff, 0xd7, 0x00);

pub const PLATFORM: Color = Color::rgb(0x8b, 0x45, 0x13);
pub const PLATFORM_DISAPPEARING: Color = Color::rgb(0xd2, 0xb4, 0x8c);

pub const OBSTACLE: Color = Color::rgb(0xff, 0x00, 0x00);

pub const INVINCIBILITY: Color = Color::rgb(0xff, 0xd7, 0x00);
pub const SUPER_JUMP: Color = Color::rgb(0x00, 0x00, 0xff);
