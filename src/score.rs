use crate::render::{Anchor, Label, Rgb, TextStyle};

pub const SCORE_STYLE: TextStyle = TextStyle {
    size: 30,
    colour: Rgb::BLUE,
};

/// Session score.  It only ever goes up.
#[derive(Clone, Debug)]
pub struct ScoreTracker {
    count: u32,
    label: Label,
    /// Bottom-left corner the label is pinned to.
    origin: (i32, i32),
}

impl ScoreTracker {
    /// Tracker whose label sits 100px in from the left, 50px above the
    /// bottom of a field `field_height` tall.
    pub fn new(field_height: i32) -> Self {
        let origin = (100, field_height - 50);
        ScoreTracker {
            count: 0,
            label: make_label(0, origin),
            origin,
        }
    }

    pub fn increase(&mut self, points: u32) {
        self.count = self.count.saturating_add(points);
        self.label = make_label(self.count, self.origin);
    }

    pub fn increase_by_one(&mut self) {
        self.increase(1);
    }

    pub fn current_value(&self) -> u32 {
        self.count
    }

    pub fn label(&self) -> &Label {
        &self.label
    }
}

fn make_label(count: u32, origin: (i32, i32)) -> Label {
    Label {
        text: format!("Score: {count}"),
        style: SCORE_STYLE,
        position: origin,
        anchor: Anchor::BottomLeft,
    }
}
