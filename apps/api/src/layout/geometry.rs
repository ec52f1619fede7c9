//! Page geometry: paper size, margins, and column frames, in points.
//!
//! Vertical positions elsewhere in the layout code are measured from the top
//! edge of the page downward; only the PDF writer flips them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::layout::block::Region;

/// Sidebar share of the page width in two-column layouts.
pub const SIDEBAR_RATIO: f32 = 0.30;
/// Inner padding between the sidebar tint edge and its text.
pub const SIDEBAR_PADDING: f32 = 22.0;
/// Gap between the sidebar tint and the main column text.
pub const COLUMN_GAP: f32 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    #[default]
    Letter,
    A4,
}

impl FromStr for PaperSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "letter" | "us-letter" => Ok(PaperSize::Letter),
            "a4" => Ok(PaperSize::A4),
            other => Err(format!("unknown paper size '{other}' (expected letter or a4)")),
        }
    }
}

/// A horizontal strip text can be set in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnFrame {
    pub x: f32,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub paper: PaperSize,
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl PageGeometry {
    pub fn new(paper: PaperSize) -> Self {
        let (width, height) = match paper {
            PaperSize::Letter => (612.0, 792.0),
            PaperSize::A4 => (595.28, 841.89),
        };
        Self {
            paper,
            width,
            height,
            margin_top: 48.0,
            margin_bottom: 48.0,
            margin_left: 54.0,
            margin_right: 54.0,
        }
    }

    /// Width of the tinted sidebar band, measured from the left page edge.
    pub fn sidebar_width(&self) -> f32 {
        self.width * SIDEBAR_RATIO
    }

    /// Lowest y (from the top) a line may reach before the page must break.
    pub fn bottom_limit(&self) -> f32 {
        self.height - self.margin_bottom
    }

    pub fn column(&self, region: Region) -> ColumnFrame {
        match region {
            Region::Full => ColumnFrame {
                x: self.margin_left,
                width: self.width - self.margin_left - self.margin_right,
            },
            Region::Sidebar => ColumnFrame {
                x: SIDEBAR_PADDING,
                width: self.sidebar_width() - 2.0 * SIDEBAR_PADDING,
            },
            Region::Main => {
                let x = self.sidebar_width() + COLUMN_GAP;
                ColumnFrame {
                    x,
                    width: self.width - x - self.margin_right,
                }
            }
        }
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::new(PaperSize::Letter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_dimensions() {
        let geometry = PageGeometry::new(PaperSize::Letter);
        assert_eq!((geometry.width, geometry.height), (612.0, 792.0));
        assert_eq!(geometry.bottom_limit(), 744.0);
    }

    #[test]
    fn test_columns_do_not_overlap() {
        let geometry = PageGeometry::new(PaperSize::A4);
        let sidebar = geometry.column(Region::Sidebar);
        let main = geometry.column(Region::Main);
        assert!(sidebar.x + sidebar.width < main.x, "sidebar text must end before main text");
        assert!(main.x + main.width <= geometry.width - geometry.margin_right + 1e-3);
        assert!(sidebar.width > 100.0, "sidebar should stay usable, got {}", sidebar.width);
    }

    #[test]
    fn test_paper_size_parsing() {
        assert_eq!("A4".parse::<PaperSize>(), Ok(PaperSize::A4));
        assert_eq!(" letter ".parse::<PaperSize>(), Ok(PaperSize::Letter));
        assert!("legal".parse::<PaperSize>().is_err());
    }
}
