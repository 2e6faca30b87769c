use vaas_config::UiConfig;

/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLUE: Self = Self { r: 0.231, g: 0.510, b: 0.965, a: 1.0 }; // #3b82f6
    pub const AMBER: Self = Self { r: 0.961, g: 0.620, b: 0.043, a: 1.0 }; // #f59e0b

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };

        let a = match hex.len() {
            6 => 255,
            8 => byte(&hex[6..8])?,
            _ => return None,
        };

        Some(Self {
            r: byte(&hex[0..2])? as f32 / 255.0,
            g: byte(&hex[2..4])? as f32 / 255.0,
            b: byte(&hex[4..6])? as f32 / 255.0,
            a: a as f32 / 255.0,
        })
    }

    /// 24-bit terminal colour channels.
    pub fn to_rgba8(self) -> [u8; 4] {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [c(self.r), c(self.g), c(self.b), c(self.a)]
    }
}

/// Fixed list of series colours, indexed modulo its length.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Build from the `[ui]` section. Unparsable entries are skipped; an
    /// empty result falls back to the default palette.
    pub fn from_config(cfg: &UiConfig) -> Self {
        let colors: Vec<Color> = cfg.palette.iter().filter_map(|c| Color::from_hex(c)).collect();
        if colors.is_empty() {
            return Self::default();
        }
        Self { colors }
    }

    /// Colour for the series at sorted position `index`.
    pub fn color_for(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        let colors = UiConfig::default()
            .palette
            .iter()
            .filter_map(|c| Color::from_hex(c))
            .collect();
        Self { colors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_without_alpha_is_opaque() {
        let c = Color::from_hex("#10b981").unwrap();
        assert_eq!(c.to_rgba8(), [16, 185, 129, 255]);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn hex_with_alpha_and_invalid_input() {
        let c = Color::from_hex("#ff000080").unwrap();
        assert_eq!(c.to_rgba8(), [255, 0, 0, 128]);
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#gg0000").is_none());
        assert!(Color::from_hex("#ééé").is_none());
    }

    #[test]
    fn palette_wraps_modulo_len() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 10);
        assert_eq!(palette.color_for(0), palette.color_for(10));
        assert_eq!(palette.color_for(3).to_rgba8(), [239, 68, 68, 255]);
    }

    #[test]
    fn invalid_config_palette_falls_back() {
        let cfg = UiConfig { palette: vec!["nope".into()], ..UiConfig::default() };
        assert_eq!(Palette::from_config(&cfg), Palette::default());
    }
}
