//! Node categories and the palette that colors them.
//!
//! Every chart node belongs to one [`Category`]. The [`Palette`] maps each
//! category to an opaque [`Rgba`] color; links borrow the color of their
//! target node at reduced opacity.

use std::fmt;

use crate::color::{ColorError, Rgba, hex_to_rgba};

/// Default color for product and revenue nodes.
pub const REVENUE_HEX: &str = "#4A90D9";
/// Default color for profit nodes.
pub const PROFIT_HEX: &str = "#27AE60";
/// Default color for cost and expense nodes.
pub const COST_HEX: &str = "#C0392B";

/// Semantic grouping of a chart node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Products and total revenue
    Revenue,
    /// Gross, operating and net profit lines
    Profit,
    /// Costs, expenses and taxes
    Cost,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Profit => "profit",
            Self::Cost => "cost",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opaque colors for each [`Category`].
///
/// # Examples
///
/// ```
/// use ledgerflow_core::palette::{Category, Palette};
///
/// let palette = Palette::default();
/// assert_eq!(palette.color(Category::Cost).channels(), (192, 57, 43));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    revenue: Rgba,
    profit: Rgba,
    cost: Rgba,
}

impl Palette {
    /// Builds a palette from three hex color strings.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidHex`] for any entry that is not a six-digit
    /// hex color.
    pub fn from_hex(revenue: &str, profit: &str, cost: &str) -> Result<Self, ColorError> {
        Ok(Self {
            revenue: hex_to_rgba(revenue, 1.0)?,
            profit: hex_to_rgba(profit, 1.0)?,
            cost: hex_to_rgba(cost, 1.0)?,
        })
    }

    /// Returns the opaque color for `category`.
    pub fn color(&self, category: Category) -> Rgba {
        match category {
            Category::Revenue => self.revenue,
            Category::Profit => self.profit,
            Category::Cost => self.cost,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_hex(REVENUE_HEX, PROFIT_HEX, COST_HEX)
            .expect("built-in palette colors are valid hex")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_channels() {
        let palette = Palette::default();

        assert_eq!(palette.color(Category::Revenue).channels(), (74, 144, 217));
        assert_eq!(palette.color(Category::Profit).channels(), (39, 174, 96));
        assert_eq!(palette.color(Category::Cost).channels(), (192, 57, 43));
        assert_eq!(palette.color(Category::Cost).alpha(), 1.0);
    }

    #[test]
    fn test_from_hex_rejects_invalid_entry() {
        let result = Palette::from_hex("#4A90D9", "green", "#C0392B");
        assert_eq!(result, Err(ColorError::InvalidHex("green".to_string())));
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Revenue.to_string(), "revenue");
        assert_eq!(Category::Cost.name(), "cost");
    }
}
