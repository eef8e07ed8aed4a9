//! Keyword mapping from CSS values to the target auto-layout enums.
//!
//! Every mapper is total: unknown keywords degrade to the nearest supported
//! value or to the documented default, they never fail.

use crate::auto_layout::{CounterAxisAlign, LayoutMode, PrimaryAxisAlign};

/// Trim and lowercase a keyword, substituting `default` when empty or absent.
fn normalize(value: Option<&str>, default: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_ascii_lowercase(),
        _ => default.to_string(),
    }
}

/// Map `justify-content` onto primary-axis alignment.
///
/// `space-around` and `space-evenly` collapse to `Center`: the target model
/// has no distribution that also spaces the edges.
pub fn map_justify_content(value: Option<&str>) -> PrimaryAxisAlign {
    match normalize(value, "flex-start").as_str() {
        "flex-start" | "start" | "left" | "normal" => PrimaryAxisAlign::Min,
        "center" => PrimaryAxisAlign::Center,
        "flex-end" | "end" | "right" => PrimaryAxisAlign::Max,
        "space-between" => PrimaryAxisAlign::SpaceBetween,
        "space-around" | "space-evenly" => PrimaryAxisAlign::Center,
        _ => PrimaryAxisAlign::Min,
    }
}

/// Map `align-items` onto counter-axis alignment.
///
/// `stretch` maps to `Min` here; stretching is applied per child after the
/// children of a vertical container are rendered.
pub fn map_align_items(value: Option<&str>) -> CounterAxisAlign {
    match normalize(value, "flex-start").as_str() {
        "flex-start" | "start" | "self-start" | "normal" => CounterAxisAlign::Min,
        "center" => CounterAxisAlign::Center,
        "flex-end" | "end" | "self-end" => CounterAxisAlign::Max,
        "baseline" | "first baseline" | "last baseline" => CounterAxisAlign::Baseline,
        "stretch" => CounterAxisAlign::Min,
        _ => CounterAxisAlign::Min,
    }
}

/// Map `flex-direction` onto a layout mode.
///
/// Reversed directions are not distinguished; children always keep source
/// order.
pub fn map_flex_direction(value: Option<&str>) -> LayoutMode {
    match normalize(value, "row").as_str() {
        "column" | "column-reverse" => LayoutMode::Vertical,
        _ => LayoutMode::Horizontal,
    }
}

/// Map `text-align` onto a primary-axis alignment for a non-flex block.
///
/// Returns `None` when the value does not call for a horizontal run, in
/// which case the block keeps its vertical stacking default.
pub fn map_text_align(value: Option<&str>) -> Option<PrimaryAxisAlign> {
    match normalize(value, "start").as_str() {
        "right" | "end" => Some(PrimaryAxisAlign::Max),
        "center" => Some(PrimaryAxisAlign::Center),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_justify_content_table() {
        assert_eq!(map_justify_content(None), PrimaryAxisAlign::Min);
        assert_eq!(map_justify_content(Some("")), PrimaryAxisAlign::Min);
        assert_eq!(map_justify_content(Some("center")), PrimaryAxisAlign::Center);
        assert_eq!(map_justify_content(Some("flex-end")), PrimaryAxisAlign::Max);
        assert_eq!(map_justify_content(Some("space-between")), PrimaryAxisAlign::SpaceBetween);
        assert_eq!(map_justify_content(Some("space-around")), PrimaryAxisAlign::Center);
        assert_eq!(map_justify_content(Some("space-evenly")), PrimaryAxisAlign::Center);
        assert_eq!(map_justify_content(Some("stretch")), PrimaryAxisAlign::Min);
    }

    #[test]
    fn test_align_items_table() {
        assert_eq!(map_align_items(None), CounterAxisAlign::Min);
        assert_eq!(map_align_items(Some("center")), CounterAxisAlign::Center);
        assert_eq!(map_align_items(Some("flex-end")), CounterAxisAlign::Max);
        assert_eq!(map_align_items(Some("baseline")), CounterAxisAlign::Baseline);
        assert_eq!(map_align_items(Some("stretch")), CounterAxisAlign::Min);
        assert_eq!(map_align_items(Some("bogus")), CounterAxisAlign::Min);
    }

    #[test]
    fn test_flex_direction() {
        assert_eq!(map_flex_direction(None), LayoutMode::Horizontal);
        assert_eq!(map_flex_direction(Some("row")), LayoutMode::Horizontal);
        assert_eq!(map_flex_direction(Some("row-reverse")), LayoutMode::Horizontal);
        assert_eq!(map_flex_direction(Some("column")), LayoutMode::Vertical);
        assert_eq!(map_flex_direction(Some("column-reverse")), LayoutMode::Vertical);
    }

    #[test]
    fn test_text_align() {
        assert_eq!(map_text_align(None), None);
        assert_eq!(map_text_align(Some("left")), None);
        assert_eq!(map_text_align(Some("justify")), None);
        assert_eq!(map_text_align(Some("RIGHT")), Some(PrimaryAxisAlign::Max));
        assert_eq!(map_text_align(Some("end")), Some(PrimaryAxisAlign::Max));
        assert_eq!(map_text_align(Some(" center")), Some(PrimaryAxisAlign::Center));
    }

    fn keyword() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec![
            "flex-start",
            "flex-end",
            "center",
            "space-between",
            "space-around",
            "space-evenly",
            "stretch",
            "baseline",
            "column",
            "column-reverse",
            "row",
            "right",
            "end",
        ])
    }

    /// Randomly flip ASCII case and pad with whitespace.
    fn disguise(word: &str, flips: &[bool], pad_left: usize, pad_right: usize) -> String {
        let body: String = word
            .chars()
            .zip(flips.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
            .collect();
        format!("{}{}{}", " ".repeat(pad_left), body, "\t".repeat(pad_right))
    }

    proptest! {
        #[test]
        fn prop_mappers_are_total(input in ".*") {
            let _ = map_justify_content(Some(&input));
            let _ = map_align_items(Some(&input));
            let _ = map_flex_direction(Some(&input));
            let _ = map_text_align(Some(&input));
        }

        #[test]
        fn prop_mappers_ignore_case_and_whitespace(
            word in keyword(),
            flips in prop::collection::vec(any::<bool>(), 1..8),
            pad_left in 0usize..3,
            pad_right in 0usize..3,
        ) {
            let disguised = disguise(word, &flips, pad_left, pad_right);
            prop_assert_eq!(map_justify_content(Some(&disguised)), map_justify_content(Some(word)));
            prop_assert_eq!(map_align_items(Some(&disguised)), map_align_items(Some(word)));
            prop_assert_eq!(map_flex_direction(Some(&disguised)), map_flex_direction(Some(word)));
            prop_assert_eq!(map_text_align(Some(&disguised)), map_text_align(Some(word)));
        }

        #[test]
        fn prop_unknown_keywords_take_defaults(input in "[a-z]{1,12}x[0-9]") {
            prop_assert_eq!(map_justify_content(Some(&input)), PrimaryAxisAlign::Min);
            prop_assert_eq!(map_align_items(Some(&input)), CounterAxisAlign::Min);
            prop_assert_eq!(map_flex_direction(Some(&input)), LayoutMode::Horizontal);
            prop_assert_eq!(map_text_align(Some(&input)), None);
        }
    }
}
