use chrono::{DateTime, Duration, Utc};
use std::str::FromStr;

/// Default trailing window length in days, used whenever analyst input
/// is absent, unparseable, or non-positive.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// The analyst-selectable trailing window presets.
///
/// The dashboard deliberately offers a small fixed set rather than a free
/// text field; anything that does not parse to one of these clamps to the
/// 30-day default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPreset {
    Seven,
    Fourteen,
    Thirty,
    Ninety,
}

impl WindowPreset {
    /// Window length in days for this preset
    pub fn days(self) -> u32 {
        match self {
            WindowPreset::Seven => 7,
            WindowPreset::Fourteen => 14,
            WindowPreset::Thirty => 30,
            WindowPreset::Ninety => 90,
        }
    }

    /// Maps a day count to a preset, clamping anything that is not an
    /// exact preset value (including zero and negatives) to the default.
    pub fn from_days(days: i64) -> Self {
        match days {
            7 => WindowPreset::Seven,
            14 => WindowPreset::Fourteen,
            30 => WindowPreset::Thirty,
            90 => WindowPreset::Ninety,
            _ => WindowPreset::Thirty,
        }
    }
}

impl Default for WindowPreset {
    fn default() -> Self {
        WindowPreset::Thirty
    }
}

impl FromStr for WindowPreset {
    type Err = String;

    /// Parsing never fails: unparseable or non-positive input clamps to
    /// the 30-day default, matching the analyst-control contract.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<i64>() {
            Ok(days) if days > 0 => Ok(WindowPreset::from_days(days)),
            _ => Ok(WindowPreset::Thirty),
        }
    }
}

/// An inclusive date window `[start, end]`, both UTC.
///
/// Derived on every render pass from the snapshot's reference instant and
/// the current window preset; never stored between passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    /// Inclusive containment check on both boundaries
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t <= self.end
    }
}

/// Resolves the trailing window for a reference instant.
///
/// `end` is exactly the reference instant; `start` lies `window_days - 1`
/// whole calendar days earlier, computed in UTC so the displayed range
/// never drifts across timezones. A zero `window_days` is treated as 1.
pub fn resolve_window(reference: DateTime<Utc>, window_days: u32) -> DateWindow {
    let days = window_days.max(1);
    DateWindow {
        start: reference - Duration::days(i64::from(days) - 1),
        end: reference,
    }
}
