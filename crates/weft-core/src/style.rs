//! Pre-resolved style values carried by serialized nodes.

/// An 8-bit RGB color with a unit alpha channel, as produced by the serializer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[cfg_attr(feature = "serde", serde(default = "opaque"))]
    pub a: f64,
}

#[cfg(feature = "serde")]
fn opaque() -> f64 {
    1.0
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to unit-range channels `(r, g, b)`.
    pub fn to_unit_rgb(&self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    /// Alpha clamped into `0.0..=1.0`.
    pub fn opacity(&self) -> f64 {
        if self.a.is_nan() {
            1.0
        } else {
            self.a.clamp(0.0, 1.0)
        }
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Four-sided box values (padding or margin).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    /// True when at least one side is strictly positive.
    pub fn any_positive(&self) -> bool {
        self.top > 0.0 || self.right > 0.0 || self.bottom > 0.0 || self.left > 0.0
    }

    /// Keep only the strictly positive sides, zeroing the rest.
    pub fn positive_only(&self) -> Self {
        let keep = |v: f64| if v > 0.0 { v } else { 0.0 };
        Self {
            top: keep(self.top),
            right: keep(self.right),
            bottom: keep(self.bottom),
            left: keep(self.left),
        }
    }
}

/// The flat style record of a serialized node.
///
/// Styles arrive fully resolved for each node; there is no cascade. Every
/// field is optional and unknown keyword values are tolerated downstream.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Styles {
    pub display: Option<String>,
    pub flex_direction: Option<String>,
    pub justify_content: Option<String>,
    pub align_items: Option<String>,
    pub text_align: Option<String>,

    pub width: Option<f64>,
    pub height: Option<f64>,

    pub padding_top: Option<f64>,
    pub padding_right: Option<f64>,
    pub padding_bottom: Option<f64>,
    pub padding_left: Option<f64>,

    pub margin_top: Option<f64>,
    pub margin_right: Option<f64>,
    pub margin_bottom: Option<f64>,
    pub margin_left: Option<f64>,

    pub background_color: Option<Rgba>,
    pub color: Option<Rgba>,

    pub border_radius: Option<f64>,
    pub font_size: Option<f64>,
    pub gap: Option<f64>,
    pub flex_grow: Option<f64>,
}

impl Styles {
    /// Whether `display` selects flex layout (`flex` or `flexbox`).
    pub fn is_flex(&self) -> bool {
        matches!(
            self.display
                .as_deref()
                .map(|d| d.trim().to_ascii_lowercase())
                .as_deref(),
            Some("flex") | Some("flexbox")
        )
    }

    /// Padding box, missing sides default to 0.
    pub fn padding(&self) -> Edges {
        Edges {
            top: self.padding_top.unwrap_or(0.0),
            right: self.padding_right.unwrap_or(0.0),
            bottom: self.padding_bottom.unwrap_or(0.0),
            left: self.padding_left.unwrap_or(0.0),
        }
    }

    /// Margin box, missing sides default to 0.
    pub fn margin(&self) -> Edges {
        Edges {
            top: self.margin_top.unwrap_or(0.0),
            right: self.margin_right.unwrap_or(0.0),
            bottom: self.margin_bottom.unwrap_or(0.0),
            left: self.margin_left.unwrap_or(0.0),
        }
    }

    /// Explicit width, if it is a positive number.
    pub fn explicit_width(&self) -> Option<f64> {
        self.width.filter(|w| *w > 0.0)
    }

    /// Explicit height, if it is a positive number.
    pub fn explicit_height(&self) -> Option<f64> {
        self.height.filter(|h| *h > 0.0)
    }

    /// Whether a positive `flex-grow` was requested.
    pub fn grows(&self) -> bool {
        self.flex_grow.is_some_and(|g| g > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_flex_normalizes() {
        let mut styles = Styles::default();
        assert!(!styles.is_flex());

        styles.display = Some("  FLEX ".into());
        assert!(styles.is_flex());

        styles.display = Some("flexbox".into());
        assert!(styles.is_flex());

        styles.display = Some("block".into());
        assert!(!styles.is_flex());
    }

    #[test]
    fn test_margin_defaults_and_positive_sides() {
        let styles = Styles {
            margin_top: Some(10.0),
            margin_left: Some(-4.0),
            ..Default::default()
        };

        let margin = styles.margin();
        assert!(margin.any_positive());
        assert_eq!(margin.right, 0.0);

        let wrapped = margin.positive_only();
        assert_eq!(wrapped.top, 10.0);
        assert_eq!(wrapped.left, 0.0);
        assert!(!Styles::default().margin().any_positive());
    }

    #[test]
    fn test_explicit_sizes_ignore_non_positive() {
        let styles = Styles {
            width: Some(0.0),
            height: Some(40.0),
            ..Default::default()
        };
        assert_eq!(styles.explicit_width(), None);
        assert_eq!(styles.explicit_height(), Some(40.0));
    }

    #[test]
    fn test_grows() {
        assert!(!Styles::default().grows());
        let styles = Styles { flex_grow: Some(0.0), ..Default::default() };
        assert!(!styles.grows());
        let styles = Styles { flex_grow: Some(2.5), ..Default::default() };
        assert!(styles.grows());
    }

    #[test]
    fn test_rgba_unit_conversion() {
        let (r, g, b) = Rgba::rgb(255, 0, 51).to_unit_rgb();
        assert!((r - 1.0).abs() < 1e-9);
        assert_eq!(g, 0.0);
        assert!((b - 0.2).abs() < 1e-9);
        assert_eq!(Rgba::rgba(0, 0, 0, 3.0).opacity(), 1.0);
        assert_eq!(Rgba::rgba(0, 0, 0, f64::NAN).opacity(), 1.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_styles_deserialize_camel_case() {
        let styles: Styles = serde_json::from_str(
            r#"{
                "display": "flex",
                "flexDirection": "column",
                "paddingTop": 12,
                "backgroundColor": { "r": 10, "g": 20, "b": 30 },
                "flexGrow": 1
            }"#,
        )
        .unwrap();

        assert!(styles.is_flex());
        assert_eq!(styles.flex_direction.as_deref(), Some("column"));
        assert_eq!(styles.padding().top, 12.0);
        assert_eq!(styles.background_color, Some(Rgba::rgb(10, 20, 30)));
        assert!(styles.grows());
    }
}
