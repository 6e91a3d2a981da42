//! Message bubble placement.

use darkvoir_dom::{BoundingBox, ViewportInfo};

/// Which side of the target the bubble sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubblePosition {
    Top,
    Bottom,
    Left,
    Right,
}

impl BubblePosition {
    /// Modifier class carrying the pointer-arrow decoration.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Top => "dark-voir-message-top",
            Self::Bottom => "dark-voir-message-bottom",
            Self::Left => "dark-voir-message-left",
            Self::Right => "dark-voir-message-right",
        }
    }
}

/// Pick the side with the most free space around the target.
///
/// Ties resolve to the first of Top, Bottom, Left, Right holding the
/// maximum, matching the stable ordering guides have always used.
pub fn best_position(target: &BoundingBox, viewport: &ViewportInfo) -> BubblePosition {
    let spaces = [
        (BubblePosition::Top, target.y),
        (BubblePosition::Bottom, viewport.height - target.bottom()),
        (BubblePosition::Left, target.x),
        (BubblePosition::Right, viewport.width - target.right()),
    ];
    let mut best = spaces[0];
    for candidate in &spaces[1..] {
        if candidate.1 > best.1 {
            best = *candidate;
        }
    }
    best.0
}

/// Bubble rectangle for a fixed footprint at `offset` px from the target
/// edge in the chosen direction.
pub fn bubble_rect(
    target: &BoundingBox,
    position: BubblePosition,
    width: f64,
    height: f64,
    offset: f64,
) -> BoundingBox {
    let (cx, cy) = target.center();
    match position {
        BubblePosition::Top => {
            BoundingBox::new(cx - width / 2.0, target.y - height - offset, width, height)
        }
        BubblePosition::Bottom => {
            BoundingBox::new(cx - width / 2.0, target.bottom() + offset, width, height)
        }
        BubblePosition::Left => {
            BoundingBox::new(target.x - width - offset, cy - height / 2.0, width, height)
        }
        BubblePosition::Right => {
            BoundingBox::new(target.right() + offset, cy - height / 2.0, width, height)
        }
    }
}
