//! Event categories and their display colors
//!
//! Categories are mutually exclusive and assigned by precedence. A collision
//! whose subtype mentions a lane is still a collision.

use std::fmt;

use serde::{Deserialize, Serialize};

const COLLISION_TYPE_PATTERNS: &[&str] = &["collision", "accident"];
const STOPPED_SUBTYPE_PATTERNS: &[&str] = &["stopped", "stalled", "disabled"];
const LANE_SUBTYPE_PATTERNS: &[&str] = &["lane"];

/// Mutually exclusive event category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Collision,
    StoppedVehicle,
    LaneClosure,
    Other,
}

/// Marker fill color, 1:1 with [`Category`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayColor {
    Red,
    Orange,
    Blue,
    Green,
}

impl Category {
    /// All categories in precedence order
    pub const ALL: [Category; 4] = [
        Category::Collision,
        Category::StoppedVehicle,
        Category::LaneClosure,
        Category::Other,
    ];

    pub fn color(self) -> DisplayColor {
        match self {
            Category::Collision => DisplayColor::Red,
            Category::StoppedVehicle => DisplayColor::Orange,
            Category::LaneClosure => DisplayColor::Blue,
            Category::Other => DisplayColor::Green,
        }
    }

    /// Text shown next to the color swatch in the map legend
    pub fn legend_label(self) -> &'static str {
        match self {
            Category::Collision => "Collision",
            Category::StoppedVehicle => "Stalled Vehicle",
            Category::LaneClosure => "Lane Closure",
            Category::Other => "Other",
        }
    }

    /// `Other` markers are drawn but left out of the legend
    pub fn in_legend(self) -> bool {
        !matches!(self, Category::Other)
    }
}

impl DisplayColor {
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayColor::Red => "red",
            DisplayColor::Orange => "orange",
            DisplayColor::Blue => "blue",
            DisplayColor::Green => "green",
        }
    }
}

impl fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assign a category from the event type and subtype (first match wins).
///
/// # Examples
///
/// ```
/// use roadsense_common::events::{classify, Category};
///
/// assert_eq!(classify("Collision", "Lane Closure"), Category::Collision);
/// assert_eq!(classify("Road Work", "Vehicle Stalled"), Category::StoppedVehicle);
/// assert_eq!(classify("Road Work", "Lane Closed"), Category::LaneClosure);
/// assert_eq!(classify("Special Event", ""), Category::Other);
/// ```
pub fn classify(event_type: &str, event_subtype: &str) -> Category {
    let event_type = event_type.to_lowercase();
    let event_subtype = event_subtype.to_lowercase();

    if contains_any(&event_type, COLLISION_TYPE_PATTERNS) {
        Category::Collision
    } else if contains_any(&event_subtype, STOPPED_SUBTYPE_PATTERNS) {
        Category::StoppedVehicle
    } else if contains_any(&event_subtype, LANE_SUBTYPE_PATTERNS) {
        Category::LaneClosure
    } else {
        Category::Other
    }
}

fn contains_any(haystack: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|pattern| haystack.contains(pattern))
}

/// Number of events per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub collision: usize,
    pub stopped_vehicle: usize,
    pub lane_closure: usize,
    pub other: usize,
}

impl CategoryCounts {
    pub fn record(&mut self, category: Category) {
        match category {
            Category::Collision => self.collision += 1,
            Category::StoppedVehicle => self.stopped_vehicle += 1,
            Category::LaneClosure => self.lane_closure += 1,
            Category::Other => self.other += 1,
        }
    }

    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Collision => self.collision,
            Category::StoppedVehicle => self.stopped_vehicle,
            Category::LaneClosure => self.lane_closure,
            Category::Other => self.other,
        }
    }

    pub fn total(&self) -> usize {
        self.collision + self.stopped_vehicle + self.lane_closure + self.other
    }
}

impl FromIterator<Category> for CategoryCounts {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut counts = Self::default();
        for category in iter {
            counts.record(category);
        }
        counts
    }
}
