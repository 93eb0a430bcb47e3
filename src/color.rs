use eframe::egui::Color32;
use palette::{Darken, Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Chart colours
// ---------------------------------------------------------------------------

pub const STEEL_BLUE: Color32 = Color32::from_rgb(70, 130, 180);

/// Outline colour for a bar filled with `fill`.
pub fn outline_for(fill: Color32) -> Color32 {
    let hsl: Hsl = to_srgb(fill).into_color();
    from_srgb(hsl.darken(0.3).into_color())
}

fn to_srgb(c: Color32) -> Srgb {
    Srgb::new(c.r(), c.g(), c.b()).into_format()
}

fn from_srgb(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_use_css_steel_blue() {
        assert_eq!(STEEL_BLUE, Color32::from_rgb(0x46, 0x82, 0xB4));
    }

    #[test]
    fn outline_is_darker() {
        let outline = outline_for(STEEL_BLUE);
        let lum = |c: Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
        assert!(lum(outline) < lum(STEEL_BLUE));
    }
}
