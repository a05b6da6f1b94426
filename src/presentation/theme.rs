//! Theme store: palette, font set, fixed sizes and layout offsets.
//!
//! A [`Theme`] is an explicit value owned by one generation run. Lookups go
//! through [`resolve`], which prefers a non-empty override and otherwise
//! falls back to the compiled-in default.

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Canvas width in points.
pub const SLIDE_WIDTH: f64 = 720.0;
/// Canvas height in points.
pub const SLIDE_HEIGHT: f64 = 405.0;
/// English Metric Units per point.
pub const PT_TO_EMU: i64 = 12_700;

/// Font sizes in points.
pub mod font_size {
    pub const SLIDE_TITLE: f64 = 28.0;
    pub const SUBHEAD: f64 = 14.0;
    pub const BODY: f64 = 12.0;
    pub const SMALL: f64 = 10.0;
    pub const SECTION_NO: f64 = 60.0;
    pub const SECTION_TITLE: f64 = 32.0;
    pub const CARD_TITLE: f64 = 14.0;
    pub const CARD_DESC: f64 = 11.0;
    pub const TITLE_MAIN: f64 = 36.0;
    pub const TITLE_DATE: f64 = 16.0;
    pub const BIG_TITLE: f64 = 44.0;
}

/// Margins and fixed vertical offsets in points.
pub mod layout {
    pub const MARGIN: f64 = 40.0;
    pub const PADDING: f64 = 20.0;
    pub const CARD_GAP: f64 = 15.0;
    pub const TITLE_Y: f64 = 30.0;
    pub const SUBHEAD_Y: f64 = 65.0;
    pub const CONTENT_Y: f64 = 95.0;
}

/// Named color roles of the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColorRole {
    Primary,
    PrimaryLight,
    Accent,
    Secondary,
    AccentLight,
    Success,
    Warning,
    SectionBg,
    BgWhite,
    TextWhite,
    TextDark,
    TextGray,
    BgLight,
    CardBg,
    CompareLeft,
    CompareRight,
    Cycle1,
    Cycle2,
    Cycle3,
    Cycle4,
    Pyramid1,
    Pyramid2,
    Pyramid3,
}

impl ColorRole {
    /// Compiled-in default for this role.
    pub fn default_value(self) -> &'static str {
        match self {
            ColorRole::Primary => "#bebebe",
            ColorRole::PrimaryLight => "#2D4A7A",
            ColorRole::Accent => "#3B82F6",
            ColorRole::Secondary => "#EF4444",
            ColorRole::AccentLight => "#60A5FA",
            ColorRole::Success => "#10B981",
            ColorRole::Warning => "#F59E0B",
            ColorRole::SectionBg => "#1E3A5F",
            ColorRole::BgWhite => "#FFFFFF",
            ColorRole::TextWhite => "#FFFFFF",
            ColorRole::TextDark => "#1F2937",
            ColorRole::TextGray => "#6B7280",
            ColorRole::BgLight => "#F3F4F6",
            ColorRole::CardBg => "#F8FAFC",
            ColorRole::CompareLeft => "#EF4444",
            ColorRole::CompareRight => "#3B82F6",
            ColorRole::Cycle1 => "#3B82F6",
            ColorRole::Cycle2 => "#10B981",
            ColorRole::Cycle3 => "#F59E0B",
            ColorRole::Cycle4 => "#EF4444",
            ColorRole::Pyramid1 => "#1B2A4A",
            ColorRole::Pyramid2 => "#2D4A7A",
            ColorRole::Pyramid3 => "#3B82F6",
        }
    }
}

/// Font roles. All three default to the same family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FontRole {
    Title,
    Body,
    Caption,
}

impl FontRole {
    pub const ALL: [FontRole; 3] = [FontRole::Title, FontRole::Body, FontRole::Caption];

    pub fn default_value(self) -> &'static str {
        "Noto Sans JP"
    }
}

/// Look up `role`, preferring a non-empty override over the default table.
pub fn resolve<'a, R>(role: R, overrides: &'a HashMap<R, String>, defaults: fn(R) -> &'static str) -> &'a str
where
    R: Copy + Eq + Hash,
{
    match overrides.get(&role) {
        Some(value) if !value.is_empty() => value.as_str(),
        _ => defaults(role),
    }
}

/// Optional theme patch supplied with a generation request.
///
/// Empty strings count as "not provided".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeOverride {
    pub preset_name: Option<String>,
    pub theme_color: Option<String>,
    pub font_family: Option<String>,
    pub footer_text: Option<String>,
    #[serde(alias = "outputFolderUrl")]
    pub output_folder_locator: Option<String>,
}

impl ThemeOverride {
    /// The output folder locator, if present and non-empty.
    pub fn folder_locator(&self) -> Option<&str> {
        non_empty(&self.output_folder_locator)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Resolved colors, fonts and footer text used by every renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Theme {
    colors: HashMap<ColorRole, String>,
    fonts: HashMap<FontRole, String>,
    footer_text: Option<String>,
    preset_name: Option<String>,
}

impl Theme {
    /// A theme holding only the compiled-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&self, role: ColorRole) -> &str {
        resolve(role, &self.colors, ColorRole::default_value)
    }

    pub fn font(&self, role: FontRole) -> &str {
        resolve(role, &self.fonts, FontRole::default_value)
    }

    pub fn footer_text(&self) -> Option<&str> {
        non_empty(&self.footer_text)
    }

    pub fn preset_name(&self) -> Option<&str> {
        non_empty(&self.preset_name)
    }

    /// Apply an override. Only non-empty fields take effect.
    ///
    /// `themeColor` replaces the primary role alone; tints keep their
    /// defaults. `fontFamily` replaces all three font roles.
    pub fn patch(&mut self, patch: &ThemeOverride) {
        if let Some(color) = non_empty(&patch.theme_color) {
            self.colors.insert(ColorRole::Primary, color.to_string());
        }
        if let Some(family) = non_empty(&patch.font_family) {
            for role in FontRole::ALL {
                self.fonts.insert(role, family.to_string());
            }
        }
        if let Some(footer) = non_empty(&patch.footer_text) {
            self.footer_text = Some(footer.to_string());
        }
        if let Some(preset) = non_empty(&patch.preset_name) {
            log::debug!("Theme preset '{}' requested", preset);
            self.preset_name = Some(preset.to_string());
        }
    }

    /// Drop every override and return to the defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A color split into channels on the 0..=1 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

/// Parse `#RRGGBB` (leading `#` optional).
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .ok()
            .map(|v| f64::from(v) / 255.0)
    };
    Some(Rgb {
        red: channel(0..2)?,
        green: channel(2..4)?,
        blue: channel(4..6)?,
    })
}

/// Points to EMU.
pub fn pt_to_emu(pt: f64) -> i64 {
    (pt * PT_TO_EMU as f64).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_patch(color: &str) -> ThemeOverride {
        ThemeOverride {
            theme_color: Some(color.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let theme = Theme::new();
        assert_eq!(theme.color(ColorRole::Primary), "#bebebe");
        assert_eq!(theme.color(ColorRole::Accent), "#3B82F6");
        assert_eq!(theme.font(FontRole::Caption), "Noto Sans JP");
        assert_eq!(theme.footer_text(), None);
    }

    #[test]
    fn test_theme_color_replaces_primary_only() {
        let mut theme = Theme::new();
        theme.patch(&color_patch("#FF0000"));
        assert_eq!(theme.color(ColorRole::Primary), "#FF0000");
        assert_eq!(theme.color(ColorRole::PrimaryLight), "#2D4A7A");
        assert_eq!(theme.color(ColorRole::Accent), "#3B82F6");
    }

    #[test]
    fn test_empty_theme_color_is_ignored() {
        let mut theme = Theme::new();
        theme.patch(&color_patch("#123456"));
        theme.patch(&color_patch(""));
        assert_eq!(theme.color(ColorRole::Primary), "#123456");
    }

    #[test]
    fn test_font_family_sets_all_roles() {
        let mut theme = Theme::new();
        theme.patch(&ThemeOverride {
            font_family: Some("Roboto".to_string()),
            ..Default::default()
        });
        for role in FontRole::ALL {
            assert_eq!(theme.font(role), "Roboto");
        }
    }

    #[test]
    fn test_read_is_stable_without_patch() {
        let mut theme = Theme::new();
        theme.patch(&color_patch("#00AA00"));
        let first = theme.color(ColorRole::Primary).to_string();
        assert_eq!(theme.color(ColorRole::Primary), first);
    }

    #[test]
    fn test_resolve_skips_empty_override() {
        let mut overrides = HashMap::new();
        overrides.insert(ColorRole::Accent, String::new());
        assert_eq!(
            resolve(ColorRole::Accent, &overrides, ColorRole::default_value),
            "#3B82F6"
        );
    }

    #[test]
    fn test_footer_and_reset() {
        let mut theme = Theme::new();
        theme.patch(&ThemeOverride {
            footer_text: Some("ACME Corp".to_string()),
            theme_color: Some("#000000".to_string()),
            ..Default::default()
        });
        assert_eq!(theme.footer_text(), Some("ACME Corp"));
        theme.reset();
        assert_eq!(theme, Theme::new());
    }

    #[test]
    fn test_override_accepts_folder_url_alias() {
        let patch: ThemeOverride =
            serde_json::from_str(r#"{"outputFolderUrl": "https://drive/folders/abc"}"#).unwrap();
        assert_eq!(patch.folder_locator(), Some("https://drive/folders/abc"));
        let empty: ThemeOverride = serde_json::from_str(r#"{"outputFolderLocator": ""}"#).unwrap();
        assert_eq!(empty.folder_locator(), None);
    }

    #[test]
    fn test_hex_to_rgb() {
        let rgb = hex_to_rgb("#FF8000").unwrap();
        assert_eq!(rgb.red, 1.0);
        assert!((rgb.green - 128.0 / 255.0).abs() < 1e-9);
        assert_eq!(rgb.blue, 0.0);
        assert!(hex_to_rgb("bebebe").is_some());
        assert!(hex_to_rgb("#FFF").is_none());
        assert!(hex_to_rgb("#GGGGGG").is_none());
    }

    #[test]
    fn test_pt_to_emu() {
        assert_eq!(pt_to_emu(1.0), 12_700);
        assert_eq!(pt_to_emu(720.0), 9_144_000);
    }
}
