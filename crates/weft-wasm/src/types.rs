//! JavaScript-facing value shapes.

use serde::{Deserialize, Serialize};
use weft_canvas::{FontName, Paint};
use weft_render::RenderOptions;

/// Options accepted by `new Importer(host, options)`; every field is
/// optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptionsJs {
    pub font: Option<FontNameJs>,
    pub default_font_size: Option<f64>,
    pub default_width: Option<f64>,
    pub default_height: Option<f64>,
    pub grow_width: Option<f64>,
    pub grow_height: Option<f64>,
    pub focus_viewport: Option<bool>,
    pub rollback_on_fault: Option<bool>,
}

impl RenderOptionsJs {
    pub fn into_core(self) -> RenderOptions {
        let defaults = RenderOptions::default();
        RenderOptions {
            font: self.font.map(FontNameJs::into_core).unwrap_or(defaults.font),
            default_font_size: self.default_font_size.unwrap_or(defaults.default_font_size),
            default_width: self.default_width.unwrap_or(defaults.default_width),
            default_height: self.default_height.unwrap_or(defaults.default_height),
            grow_width: self.grow_width.unwrap_or(defaults.grow_width),
            grow_height: self.grow_height.unwrap_or(defaults.grow_height),
            focus_viewport: self.focus_viewport.unwrap_or(defaults.focus_viewport),
            rollback_on_fault: self.rollback_on_fault.unwrap_or(defaults.rollback_on_fault),
        }
    }
}

/// `{ family, style }`, as the host's `fontName` property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontNameJs {
    pub family: String,
    pub style: String,
}

impl FontNameJs {
    pub fn into_core(self) -> FontName {
        FontName::new(self.family, self.style)
    }
}

impl From<&FontName> for FontNameJs {
    fn from(font: &FontName) -> Self {
        Self {
            family: font.family.clone(),
            style: font.style.clone(),
        }
    }
}

/// A solid paint entry of the host's `fills` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolidPaintJs {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub color: RgbJs,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RgbJs {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl From<&Paint> for SolidPaintJs {
    fn from(paint: &Paint) -> Self {
        Self {
            kind: "SOLID",
            color: RgbJs {
                r: paint.r,
                g: paint.g,
                b: paint.b,
            },
            opacity: paint.opacity,
        }
    }
}

/// `{ width, height }` as returned by the host.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SizeJs {
    pub width: f64,
    pub height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_options_keep_defaults() {
        let options: RenderOptionsJs =
            serde_json::from_str(r#"{"growWidth": 640, "rollbackOnFault": true}"#).unwrap();
        let options = options.into_core();

        assert_eq!(options.grow_width, 640.0);
        assert!(options.rollback_on_fault);
        assert_eq!(options.grow_height, 200.0);
        assert_eq!(options.default_font_size, 14.0);
        assert_eq!(options.font, FontName::default());
    }

    #[test]
    fn test_font_option() {
        let options: RenderOptionsJs =
            serde_json::from_str(r#"{"font": {"family": "Roboto", "style": "Bold"}}"#).unwrap();
        assert_eq!(options.into_core().font, FontName::new("Roboto", "Bold"));
    }

    #[test]
    fn test_solid_paint_shape() {
        let paint = Paint { r: 1.0, g: 0.5, b: 0.0, opacity: 0.25 };
        let value = serde_json::to_value(SolidPaintJs::from(&paint)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "SOLID",
                "color": { "r": 1.0, "g": 0.5, "b": 0.0 },
                "opacity": 0.25
            })
        );
    }
}
