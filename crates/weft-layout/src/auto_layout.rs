//! Target auto-layout vocabulary and the layout-mode decision for containers.

use std::fmt;

use weft_core::Styles;

use crate::mapper::{map_align_items, map_flex_direction, map_justify_content, map_text_align};

/// Primary axis of an auto-layout container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Children flow left to right
    #[default]
    Horizontal,
    /// Children stack top to bottom
    Vertical,
}

/// Placement of children along the primary axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimaryAxisAlign {
    /// Pack at the start
    #[default]
    Min,
    /// Pack in the middle
    Center,
    /// Pack at the end
    Max,
    /// Equal space between children, none at the edges
    SpaceBetween,
}

/// Placement of children across the primary axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterAxisAlign {
    #[default]
    Min,
    Center,
    Max,
    Baseline,
}

/// How a container sizes itself along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizingMode {
    /// Size is set explicitly
    Fixed,
    /// Size hugs the content
    #[default]
    Auto,
}

/// Whether a child consumes leftover space on its parent's primary axis.
///
/// The target model is binary: any positive `flex-grow` becomes `Grow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutGrow {
    #[default]
    Fixed,
    Grow,
}

/// Cross-axis behaviour of a child inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutAlign {
    /// Follow the parent's counter-axis alignment
    #[default]
    Inherit,
    /// Fill the parent's cross axis
    Stretch,
}

macro_rules! labelled {
    ($ty:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $ty {
            /// The canvas-facing keyword for this value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

labelled!(LayoutMode { Horizontal => "HORIZONTAL", Vertical => "VERTICAL" });
labelled!(PrimaryAxisAlign {
    Min => "MIN",
    Center => "CENTER",
    Max => "MAX",
    SpaceBetween => "SPACE_BETWEEN",
});
labelled!(CounterAxisAlign {
    Min => "MIN",
    Center => "CENTER",
    Max => "MAX",
    Baseline => "BASELINE",
});
labelled!(SizingMode { Fixed => "FIXED", Auto => "AUTO" });
labelled!(LayoutGrow { Fixed => "FIXED", Grow => "GROW" });
labelled!(LayoutAlign { Inherit => "INHERIT", Stretch => "STRETCH" });

/// Auto-layout configuration for a container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AutoLayout {
    /// Layout mode (primary axis)
    pub mode: LayoutMode,
    /// Alignment on the primary axis
    pub primary_align: PrimaryAxisAlign,
    /// Alignment on the counter axis
    pub counter_align: CounterAxisAlign,
    /// Spacing between items, when one was requested
    pub item_spacing: Option<f64>,
}

impl AutoLayout {
    /// Create a horizontal layout packed at the start.
    pub fn horizontal() -> Self {
        Self {
            mode: LayoutMode::Horizontal,
            ..Default::default()
        }
    }

    /// Create a vertical layout packed at the top-left.
    pub fn vertical() -> Self {
        Self {
            mode: LayoutMode::Vertical,
            ..Default::default()
        }
    }

    /// Set the primary-axis alignment.
    pub fn with_primary_align(mut self, align: PrimaryAxisAlign) -> Self {
        self.primary_align = align;
        self
    }

    /// Set the counter-axis alignment.
    pub fn with_counter_align(mut self, align: CounterAxisAlign) -> Self {
        self.counter_align = align;
        self
    }

    /// Set the item spacing.
    pub fn with_item_spacing(mut self, spacing: f64) -> Self {
        self.item_spacing = Some(spacing);
        self
    }

    /// Derive the flex layout from `flex-direction`, `justify-content`,
    /// `align-items` and `gap`.
    pub fn from_flex(styles: &Styles) -> Self {
        let mut auto = Self {
            mode: map_flex_direction(styles.flex_direction.as_deref()),
            primary_align: map_justify_content(styles.justify_content.as_deref()),
            counter_align: map_align_items(styles.align_items.as_deref()),
            item_spacing: None,
        };
        if let Some(gap) = styles.gap.filter(|g| g.is_finite() && *g >= 0.0) {
            auto = auto.with_item_spacing(gap);
        }
        auto
    }

    /// Decide the layout of a container element from its tag and styles.
    ///
    /// Flex elements follow their flex properties. Non-flex buttons center
    /// their content on a horizontal axis. Other non-flex blocks become a
    /// horizontal run when `text-align` asks for right or center placement,
    /// and a top-left vertical stack otherwise.
    pub fn for_element(tag: &str, styles: &Styles) -> Self {
        if styles.is_flex() {
            return Self::from_flex(styles);
        }

        if tag.eq_ignore_ascii_case("button") {
            return Self::horizontal()
                .with_primary_align(PrimaryAxisAlign::Center)
                .with_counter_align(CounterAxisAlign::Center);
        }

        match map_text_align(styles.text_align.as_deref()) {
            Some(align) => Self::horizontal().with_primary_align(align),
            None => Self::vertical(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flex(direction: &str) -> Styles {
        Styles {
            display: Some("flex".into()),
            flex_direction: Some(direction.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_flex_row_with_gap() {
        let styles = Styles {
            gap: Some(8.0),
            justify_content: Some("space-between".into()),
            align_items: Some("center".into()),
            ..flex("row")
        };

        let auto = AutoLayout::for_element("div", &styles);
        assert_eq!(auto.mode, LayoutMode::Horizontal);
        assert_eq!(auto.primary_align, PrimaryAxisAlign::SpaceBetween);
        assert_eq!(auto.counter_align, CounterAxisAlign::Center);
        assert_eq!(auto.item_spacing, Some(8.0));
    }

    #[test]
    fn test_flex_ignores_negative_or_nan_gap() {
        let styles = Styles { gap: Some(-2.0), ..flex("column") };
        let auto = AutoLayout::for_element("section", &styles);
        assert_eq!(auto.mode, LayoutMode::Vertical);
        assert_eq!(auto.item_spacing, None);

        let styles = Styles { gap: Some(f64::NAN), ..flex("row") };
        assert_eq!(AutoLayout::for_element("div", &styles).item_spacing, None);
    }

    #[test]
    fn test_flex_wins_over_button_and_text_align() {
        let styles = Styles {
            text_align: Some("center".into()),
            ..flex("column")
        };
        let auto = AutoLayout::for_element("button", &styles);
        assert_eq!(auto.mode, LayoutMode::Vertical);
        assert_eq!(auto.primary_align, PrimaryAxisAlign::Min);
    }

    #[test]
    fn test_button_centers_content() {
        let auto = AutoLayout::for_element("BUTTON", &Styles::default());
        assert_eq!(auto.mode, LayoutMode::Horizontal);
        assert_eq!(auto.primary_align, PrimaryAxisAlign::Center);
        assert_eq!(auto.counter_align, CounterAxisAlign::Center);
    }

    #[test]
    fn test_text_align_runs() {
        let right = Styles { text_align: Some("right".into()), ..Default::default() };
        let auto = AutoLayout::for_element("div", &right);
        assert_eq!(auto.mode, LayoutMode::Horizontal);
        assert_eq!(auto.primary_align, PrimaryAxisAlign::Max);

        let center = Styles { text_align: Some("center".into()), ..Default::default() };
        assert_eq!(
            AutoLayout::for_element("footer", &center).primary_align,
            PrimaryAxisAlign::Center
        );
    }

    #[test]
    fn test_block_flow_default() {
        let auto = AutoLayout::for_element("div", &Styles::default());
        assert_eq!(auto, AutoLayout::vertical());
        assert_eq!(auto.primary_align, PrimaryAxisAlign::Min);
        assert_eq!(auto.counter_align, CounterAxisAlign::Min);
    }

    #[test]
    fn test_labels() {
        assert_eq!(LayoutMode::Vertical.to_string(), "VERTICAL");
        assert_eq!(PrimaryAxisAlign::SpaceBetween.as_str(), "SPACE_BETWEEN");
        assert_eq!(CounterAxisAlign::Baseline.as_str(), "BASELINE");
        assert_eq!(SizingMode::Auto.as_str(), "AUTO");
        assert_eq!(LayoutAlign::Stretch.to_string(), "STRETCH");
    }
}
