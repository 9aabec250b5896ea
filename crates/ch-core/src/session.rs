//! # Session & Theme
//!
//! The signed-in viewer and the active color theme. Both are plain values
//! handed to whoever needs them; nothing reads them from ambient state.

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::models::handle_for;

/// The viewer on whose behalf lists are filtered and dates are formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub display_name: String,
    /// Offset of the viewer's local time from UTC, in minutes.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl Session {
    pub fn new(display_name: impl Into<String>, utc_offset_minutes: i32) -> Self {
        Self {
            display_name: display_name.into(),
            utc_offset_minutes,
        }
    }

    pub fn handle(&self) -> String {
        handle_for(&self.display_name)
    }

    /// The viewer's offset. Out-of-range values fall back to UTC.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }
}

/// Resolved colors for one theme variant. Values are CSS hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub primary: &'static str,
    pub primary_light: &'static str,
    pub secondary: &'static str,
    pub background: &'static str,
    pub card: &'static str,
    pub text: &'static str,
    pub text_light: &'static str,
    pub border: &'static str,
    pub notification: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub info: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Theme {
    pub dark_mode: bool,
}

impl Theme {
    pub fn light() -> Self {
        Self { dark_mode: false }
    }

    pub fn dark() -> Self {
        Self { dark_mode: true }
    }

    pub fn toggled(self) -> Self {
        Self {
            dark_mode: !self.dark_mode,
        }
    }

    pub fn palette(&self) -> Palette {
        let dark = self.dark_mode;
        Palette {
            primary: "#8B1E41",
            primary_light: "#A52A4A",
            secondary: "#C0C0C0",
            background: if dark { "#121212" } else { "#F8F8F8" },
            card: if dark { "#1E1E1E" } else { "#FFFFFF" },
            text: if dark { "#FFFFFF" } else { "#333333" },
            text_light: if dark { "#BBBBBB" } else { "#666666" },
            border: if dark { "#444444" } else { "#DDDDDD" },
            notification: "#E53935",
            success: "#43A047",
            warning: "#FB8C00",
            info: "#1E88E5",
        }
    }
}
