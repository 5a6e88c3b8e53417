use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    /// Top of the water gradient.
    pub background: Color32,
    /// Bottom of the water gradient.
    pub background_deep: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    pub bubble: Color32,
    pub shimmer: Color32,
    pub fish: Color32,
    pub panel: Color32,
    pub heading_size: f32,
    pub body_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x0B, 0x3D, 0x5C),
            background_deep: Color32::from_rgb(0x03, 0x12, 0x24),
            foreground: Color32::from_rgb(0xD6, 0xEE, 0xF5),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0x4F, 0xD1, 0xE0),
            bubble: Color32::from_rgb(0xBF, 0xF1, 0xFF),
            shimmer: Color32::from_rgb(0xFF, 0xFF, 0xFF),
            fish: Color32::from_rgb(0xFF, 0x9F, 0x45),
            panel: Color32::from_rgb(0x06, 0x1F, 0x33),
            heading_size: 84.0,
            body_size: 40.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::from_rgb(0xC9, 0xF1, 0xF7),
            background_deep: Color32::from_rgb(0x5F, 0xB8, 0xD3),
            foreground: Color32::from_rgb(0x0F, 0x2E, 0x3F),
            heading_color: Color32::from_rgb(0x06, 0x24, 0x3A),
            accent: Color32::from_rgb(0x00, 0x7C, 0x91),
            bubble: Color32::from_rgb(0xFF, 0xFF, 0xFF),
            shimmer: Color32::from_rgb(0xFF, 0xFF, 0xFF),
            fish: Color32::from_rgb(0xE0, 0x6A, 0x1B),
            panel: Color32::from_rgb(0xEE, 0xFA, 0xFC),
            heading_size: 84.0,
            body_size: 40.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn toggled(&self) -> Self {
        if self.name == "dark" {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(
            color.r(),
            color.g(),
            color.b(),
            (opacity.clamp(0.0, 1.0) * 255.0) as u8,
        )
    }

    /// Interpolate between the two water colors, `t` = 0 at the surface.
    pub fn water_at(&self, t: f32) -> Color32 {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color32::from_rgb(
            mix(self.background.r(), self.background_deep.r()),
            mix(self.background.g(), self.background_deep.g()),
            mix(self.background.b(), self.background_deep.b()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trips() {
        let theme = Theme::dark();
        assert_eq!(theme.toggled().name, "light");
        assert_eq!(theme.toggled().toggled().name, "dark");
    }

    #[test]
    fn test_unknown_name_falls_back_to_dark() {
        assert_eq!(Theme::from_name("neon").name, "dark");
    }

    #[test]
    fn test_water_gradient_endpoints() {
        let theme = Theme::dark();
        assert_eq!(theme.water_at(0.0), theme.background);
        assert_eq!(theme.water_at(1.0), theme.background_deep);
    }
}
