use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One major or minor tick along an axis.
///
/// `position` is an absolute pixel coordinate (the caller's `start` already
/// applied). `text` holds one label per level; only calendar axes use more
/// than level 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub position: f64,
    pub value: f64,
    text: SmallVec<[String; 2]>,
}

impl GridPoint {
    #[must_use]
    pub fn new(position: f64, value: f64, text: impl Into<String>) -> Self {
        let mut levels = SmallVec::new();
        levels.push(text.into());
        Self {
            position,
            value,
            text: levels,
        }
    }

    /// Creates a point with one label per level.
    #[must_use]
    pub fn with_levels<I, S>(position: f64, value: f64, levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            position,
            value,
            text: levels.into_iter().map(Into::into).collect(),
        }
    }

    /// Minor tick: no label at any level.
    #[must_use]
    pub fn unlabelled(position: f64, value: f64) -> Self {
        Self {
            position,
            value,
            text: SmallVec::new(),
        }
    }

    /// Label at `level`, or `""` when the level is absent.
    #[must_use]
    pub fn text(&self, level: usize) -> &str {
        self.text.get(level).map_or("", String::as_str)
    }

    #[must_use]
    pub fn blank(&self, level: usize) -> bool {
        self.text(level).is_empty()
    }

    #[must_use]
    pub fn levels(&self) -> usize {
        self.text.len()
    }
}
