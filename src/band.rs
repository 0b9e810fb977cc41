//! urgency classification.

use crossterm::style::Color;

/// the discretized urgency of a percentage.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Band {
    Normal,
    Warning,
    Critical,
}

/// a set of thresholds mapping percentages to [`Band`]s.
///
/// the two policies deliberately disagree, gauges and the heatmap have always used different
/// cut-offs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Policy {
    /// gauges and bars: above 60 is a warning, above 80 is critical.
    ///
    /// boundaries belong to the lower band, so exactly 60 is normal and exactly 80 a warning.
    Load,
    /// the cpu heatmap: from 40 is a warning, from 75 is critical.
    ///
    /// boundaries belong to the upper band, so exactly 40 is a warning and exactly 75 critical.
    Heat,
}

// === impl Band ===

impl Band {
    /// classifies a percentage with the [`Policy::Load`] thresholds.
    pub fn classify(percentage: f64) -> Self {
        Policy::Load.classify(percentage)
    }

    /// the terminal color this band is drawn in.
    pub fn color(self) -> Color {
        match self {
            Self::Normal => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Critical => Color::Red,
        }
    }
}

// === impl Policy ===

impl Policy {
    pub fn classify(self, percentage: f64) -> Band {
        // nothing meaningful can be said about a nan.
        if percentage.is_nan() {
            return Band::Normal;
        }

        match self {
            Self::Load if percentage > 80.0 => Band::Critical,
            Self::Load if percentage > 60.0 => Band::Warning,
            Self::Load => Band::Normal,
            Self::Heat if percentage < 40.0 => Band::Normal,
            Self::Heat if percentage < 75.0 => Band::Warning,
            Self::Heat => Band::Critical,
        }
    }
}
