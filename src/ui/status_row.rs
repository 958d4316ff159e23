//! One-line rendering of a dependency status.
//!
//! Rows read `[OK] Homebrew: Installed`, `[MISSING] Docker: Not Found`,
//! `[OK] XQuartz: Installed & Configured` or
//! `[WARNING] XQuartz: Installed (Needs Configuration)`.

use std::fmt;

use crate::deps::{DependencyKind, DependencyStatus, Presence};

/// Leading tag of a status row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTag {
    Ok,
    Missing,
    Warning,
}

impl RowTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "[OK]",
            Self::Missing => "[MISSING]",
            Self::Warning => "[WARNING]",
        }
    }
}

/// A rendered status row, before styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRow {
    pub tag: RowTag,
    pub name: &'static str,
    pub state: &'static str,
}

impl StatusRow {
    pub fn from_status(status: &DependencyStatus) -> Self {
        let (tag, state) = match status.presence() {
            Presence::Installed { .. } if status.kind() == DependencyKind::DisplayServer => {
                (RowTag::Ok, "Installed & Configured")
            }
            Presence::Installed { .. } => (RowTag::Ok, "Installed"),
            Presence::Unconfigured { .. } => {
                (RowTag::Warning, "Installed (Needs Configuration)")
            }
            Presence::Missing => (RowTag::Missing, "Not Found"),
        };
        Self {
            tag,
            name: status.name(),
            state,
        }
    }
}

impl fmt::Display for StatusRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.tag.as_str(), self.name, self.state)
    }
}
