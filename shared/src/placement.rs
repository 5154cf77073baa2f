//! Popup placement relative to the host input and the document bounds.

use serde::{Deserialize, Serialize};

/// A box in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DocSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Horizontal {
    /// Natural left anchoring, styles untouched
    Left,
    /// Right edge aligned with the host input's right edge
    Right,
    /// Pinned to left 0 because the popup does not fit either way
    LeftClamped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vertical {
    Top,
    /// Bottom edge aligned with the host input's bottom edge
    Bottom,
    TopClamped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub horizontal: Horizontal,
    pub vertical: Vertical,
}

impl Placement {
    pub const NATURAL: Placement = Placement {
        horizontal: Horizontal::Left,
        vertical: Vertical::Top,
    };

    pub fn is_flipped(&self) -> bool {
        *self != Self::NATURAL
    }

    /// Inline CSS for the calendar element. Natural anchoring leaves the
    /// stylesheet in charge.
    pub fn to_style(&self) -> String {
        let horizontal = match self.horizontal {
            Horizontal::Left => "",
            Horizontal::Right => "left: auto; right: 0px;",
            Horizontal::LeftClamped => "left: 0px; right: auto;",
        };
        let vertical = match self.vertical {
            Vertical::Top => "",
            Vertical::Bottom => "top: auto; bottom: 0px;",
            Vertical::TopClamped => "top: 0px; bottom: auto;",
        };
        [horizontal, vertical]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Decide how the popup should be anchored.
///
/// `popup` is the calendar's rect as rendered with natural anchoring. A
/// popup overflowing the document's right (bottom) edge is re-anchored to
/// the input's right (bottom) edge; if that would push it past the origin,
/// it is pinned at 0 instead so clipping happens on the far side.
pub fn compute_placement(anchor: Rect, popup: Rect, doc: DocSize) -> Placement {
    let mut horizontal = Horizontal::Left;
    if popup.right() > doc.width {
        horizontal = Horizontal::Right;
    }
    let flipped_left = anchor.right() - popup.width;
    if popup.left < 0.0 || (horizontal == Horizontal::Right && flipped_left < 0.0) {
        horizontal = Horizontal::LeftClamped;
    }

    let mut vertical = Vertical::Top;
    if popup.bottom() > doc.height {
        vertical = Vertical::Bottom;
    }
    let flipped_top = anchor.bottom() - popup.height;
    if popup.top < 0.0 || (vertical == Vertical::Bottom && flipped_top < 0.0) {
        vertical = Vertical::TopClamped;
    }

    let placement = Placement { horizontal, vertical };
    if placement.is_flipped() {
        log::debug!("Calendar flipped to {:?} to stay inside {:?}", placement, doc);
    }
    placement
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: DocSize = DocSize { width: 1000.0, height: 800.0 };

    fn input_at(left: f64, top: f64) -> Rect {
        Rect::new(left, top, 150.0, 24.0)
    }

    /// Calendar rendered just below the input
    fn popup_below(anchor: Rect, width: f64, height: f64) -> Rect {
        Rect::new(anchor.left, anchor.bottom(), width, height)
    }

    #[test]
    fn test_fits_stays_natural() {
        let anchor = input_at(100.0, 100.0);
        let placement = compute_placement(anchor, popup_below(anchor, 200.0, 180.0), DOC);
        assert_eq!(placement, Placement::NATURAL);
        assert_eq!(placement.to_style(), "");
    }

    #[test]
    fn test_right_overflow_flips_right() {
        let anchor = input_at(900.0, 100.0);
        let placement = compute_placement(anchor, popup_below(anchor, 200.0, 180.0), DOC);
        assert_eq!(placement.horizontal, Horizontal::Right);
        assert_eq!(placement.vertical, Vertical::Top);
        assert_eq!(placement.to_style(), "left: auto; right: 0px;");
    }

    #[test]
    fn test_right_flip_that_goes_negative_clamps_left() {
        let anchor = input_at(900.0, 100.0);
        let placement = compute_placement(anchor, popup_below(anchor, 1200.0, 180.0), DOC);
        assert_eq!(placement.horizontal, Horizontal::LeftClamped);
        assert_eq!(placement.to_style(), "left: 0px; right: auto;");
    }

    #[test]
    fn test_bottom_overflow_flips_up() {
        let anchor = input_at(100.0, 700.0);
        let placement = compute_placement(anchor, popup_below(anchor, 200.0, 180.0), DOC);
        assert_eq!(placement.vertical, Vertical::Bottom);
        assert_eq!(placement.horizontal, Horizontal::Left);
    }

    #[test]
    fn test_bottom_flip_that_goes_negative_clamps_top() {
        let anchor = input_at(100.0, 100.0);
        let placement = compute_placement(anchor, popup_below(anchor, 200.0, 900.0), DOC);
        assert_eq!(placement.vertical, Vertical::TopClamped);
    }

    #[test]
    fn test_both_axes_flip() {
        let anchor = input_at(900.0, 700.0);
        let placement = compute_placement(anchor, popup_below(anchor, 200.0, 180.0), DOC);
        assert_eq!(
            placement.to_style(),
            "left: auto; right: 0px; top: auto; bottom: 0px;"
        );
    }

    #[test]
    fn test_negative_origin_is_clamped() {
        let anchor = input_at(-50.0, 10.0);
        let placement = compute_placement(anchor, popup_below(anchor, 200.0, 180.0), DOC);
        assert_eq!(placement.horizontal, Horizontal::LeftClamped);
    }

    #[test]
    fn test_placement_is_pure() {
        let anchor = input_at(900.0, 700.0);
        let popup = popup_below(anchor, 200.0, 180.0);
        assert_eq!(
            compute_placement(anchor, popup, DOC),
            compute_placement(anchor, popup, DOC)
        );
    }
}
