mod palette;

use smart_leds::RGB8;

pub use palette::{AMBER, BLACK, BLUE, EMBER, GREEN, RED, WHITE, YELLOW};

pub type Rgb = RGB8;

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Replace the blue channel of a color, keeping the dominant hue
#[inline]
pub const fn with_blue(color: Rgb, blue: u8) -> Rgb {
    Rgb {
        r: color.r,
        g: color.g,
        b: blue,
    }
}
