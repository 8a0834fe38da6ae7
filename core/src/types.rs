// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt::Display, str::FromStr};

/// Category of a calendar event, each carrying its canonical display color.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Meetings, calls and other appointments with people.
    Meeting,

    /// Personal errands and private appointments.
    Personal,

    /// Work items.
    Work,

    /// Lectures, study sessions and coursework.
    Study,

    /// Trips and commutes.
    Travel,

    /// Anything else.
    #[default]
    Other,
}

const CATEGORY_MEETING: &str = "meeting";
const CATEGORY_PERSONAL: &str = "personal";
const CATEGORY_WORK: &str = "work";
const CATEGORY_STUDY: &str = "study";
const CATEGORY_TRAVEL: &str = "travel";
const CATEGORY_OTHER: &str = "other";

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 6] = [
        Category::Meeting,
        Category::Personal,
        Category::Work,
        Category::Study,
        Category::Travel,
        Category::Other,
    ];

    /// The canonical display color of the category, as a `#rrggbb` string.
    pub const fn color(self) -> &'static str {
        match self {
            Category::Meeting => "#3b82f6",
            Category::Personal => "#10b981",
            Category::Work => "#f59e0b",
            Category::Study => "#8b5cf6",
            Category::Travel => "#ef4444",
            Category::Other => "#6b7280",
        }
    }

    /// Maps a stored color onto its category. Unknown colors are `Other`.
    pub fn from_color(color: &str) -> Self {
        let color = color.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.color().eq_ignore_ascii_case(color))
            .unwrap_or_default()
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        match self {
            Category::Meeting => CATEGORY_MEETING,
            Category::Personal => CATEGORY_PERSONAL,
            Category::Work => CATEGORY_WORK,
            Category::Study => CATEGORY_STUDY,
            Category::Travel => CATEGORY_TRAVEL,
            Category::Other => CATEGORY_OTHER,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            CATEGORY_MEETING => Ok(Category::Meeting),
            CATEGORY_PERSONAL => Ok(Category::Personal),
            CATEGORY_WORK => Ok(Category::Work),
            CATEGORY_STUDY => Ok(Category::Study),
            CATEGORY_TRAVEL => Ok(Category::Travel),
            CATEGORY_OTHER => Ok(Category::Other),
            _ => Err(()),
        }
    }
}

/// Priority of a task.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority.
    #[cfg_attr(feature = "clap", clap(alias = "l"))]
    Low,

    /// Medium priority, the default.
    #[default]
    #[cfg_attr(feature = "clap", clap(alias = "mid"))]
    Medium,

    /// High priority.
    #[cfg_attr(feature = "clap", clap(alias = "h"))]
    High,
}

const PRIORITY_LOW: &str = "low";
const PRIORITY_MEDIUM: &str = "medium";
const PRIORITY_HIGH: &str = "high";

impl AsRef<str> for Priority {
    fn as_ref(&self) -> &str {
        match self {
            Priority::Low => PRIORITY_LOW,
            Priority::Medium => PRIORITY_MEDIUM,
            Priority::High => PRIORITY_HIGH,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for Priority {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            PRIORITY_LOW => Ok(Priority::Low),
            PRIORITY_MEDIUM => Ok(Priority::Medium),
            PRIORITY_HIGH => Ok(Priority::High),
            _ => Err(()),
        }
    }
}
