//! Named indicator colors

use super::{Rgb, rgb_from_u32};

pub const BLACK: Rgb = rgb_from_u32(0x00_00_00);
pub const WHITE: Rgb = rgb_from_u32(0xFF_FF_FF);
pub const RED: Rgb = rgb_from_u32(0xFF_00_00);
pub const GREEN: Rgb = rgb_from_u32(0x00_FF_00);
pub const BLUE: Rgb = rgb_from_u32(0x00_00_FF);
pub const YELLOW: Rgb = rgb_from_u32(0xFF_FF_00);
/// Medium battery band
pub const AMBER: Rgb = rgb_from_u32(0xFF_A5_00);
/// Red-adjacent warm color used for a draining (but not low) battery
pub const EMBER: Rgb = rgb_from_u32(0xFF_30_00);
