//! Direction tables - fixed row-to-direction mappings for sheet layouts
//!
//! The tables here are the single source of truth for both extraction-time
//! row labeling and config-emission `startFrame` arithmetic. They are lookup
//! tables on purpose: the row counts 4, 8 and 3 are layout conventions, and
//! keeping the two consumers pointed at one table is what keeps them in
//! lock-step.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A logical facing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Down,
    DownLeft,
    Left,
    UpLeft,
    Up,
    UpRight,
    Right,
    DownRight,
}

impl Direction {
    /// Stable config key for this direction (e.g. `"down-left"`).
    pub fn key(&self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::DownLeft => "down-left",
            Direction::Left => "left",
            Direction::UpLeft => "up-left",
            Direction::Up => "up",
            Direction::UpRight => "up-right",
            Direction::Right => "right",
            Direction::DownRight => "down-right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Row order for 8-row sheets: row index N holds the Nth direction here.
pub const EIGHT_DIRECTION_ORDER: [Direction; 8] = [
    Direction::Down,
    Direction::DownLeft,
    Direction::Left,
    Direction::UpLeft,
    Direction::Up,
    Direction::UpRight,
    Direction::Right,
    Direction::DownRight,
];

/// Row order for 4-row sheets (cardinal directions only).
pub const FOUR_DIRECTION_ORDER: [Direction; 4] =
    [Direction::Down, Direction::Up, Direction::Left, Direction::Right];

/// Row order for 3-row combined-attack sheets.
pub const ATTACK_ROW_ORDER: [&str; 3] = ["attack1", "attack2", "attack3"];

/// How the rows of a grid extraction are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLayout {
    /// 4 rows: down, up, left, right.
    FourDirection,
    /// 8 rows: the full 8-direction order.
    EightDirection,
    /// 3 rows: attack1, attack2, attack3.
    AttackCombo,
    /// Any other row count: one unlabeled sequence.
    Unlabeled,
}

impl RowLayout {
    /// Classify a grid row count.
    ///
    /// Only applies to grid/divider extractions; free-region extractions are
    /// always [`RowLayout::Unlabeled`].
    pub fn for_rows(rows: usize) -> Self {
        match rows {
            3 => RowLayout::AttackCombo,
            4 => RowLayout::FourDirection,
            8 => RowLayout::EightDirection,
            _ => RowLayout::Unlabeled,
        }
    }

    /// Label for row `index` under this layout, if the layout names rows.
    pub fn row_label(&self, index: usize) -> Option<&'static str> {
        match self {
            RowLayout::FourDirection => {
                FOUR_DIRECTION_ORDER.get(index).map(|d| d.key())
            }
            RowLayout::EightDirection => {
                EIGHT_DIRECTION_ORDER.get(index).map(|d| d.key())
            }
            RowLayout::AttackCombo => ATTACK_ROW_ORDER.get(index).copied(),
            RowLayout::Unlabeled => None,
        }
    }

    /// Number of labeled rows, or `None` for the unlabeled fallback.
    pub fn row_count(&self) -> Option<usize> {
        match self {
            RowLayout::FourDirection => Some(4),
            RowLayout::EightDirection => Some(8),
            RowLayout::AttackCombo => Some(3),
            RowLayout::Unlabeled => None,
        }
    }
}
