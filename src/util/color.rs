use glam::Vec3;

/// Convert an sRGB `0xRRGGBB` color into linear RGB.
#[must_use]
pub fn srgb_hex_to_linear(hex: u32) -> Vec3 {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        srgb_to_linear(c)
    };
    Vec3::new(channel(16), channel(8), channel(0))
}

/// sRGB transfer function, decoding direction.
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_channels_decode_in_order() {
        let white = srgb_hex_to_linear(0xff_ffff);
        assert!((white - Vec3::ONE).length() < 1e-6);

        let black = srgb_hex_to_linear(0x00_0000);
        assert_eq!(black, Vec3::ZERO);

        let red = srgb_hex_to_linear(0xff_0000);
        assert!((red.x - 1.0).abs() < 1e-6);
        assert_eq!(red.y, 0.0);
        assert_eq!(red.z, 0.0);
    }

    #[test]
    fn mid_grey_is_darker_in_linear() {
        let grey = srgb_hex_to_linear(0x80_8080);
        assert!((grey.x - 0.2158).abs() < 1e-3);
    }
}
