//! The income statement charted by Ledgerflow.
//!
//! Figures are entered by hand, in millions, for a single reporting period.
//! Total revenue is the only derived value; every other figure is taken as
//! authored, balanced or not. Edit the constants below to chart a different
//! period.

use ledgerflow_core::palette::Category;

use crate::structure::{FlowGraph, GraphError, NodeSpec};

// Product revenue (left side)
const IPHONE: f64 = 47.0;
const MAC: f64 = 9.2;
const IPAD: f64 = 6.7;
const WEARABLES: f64 = 9.377;

// Revenue split
const COGS: f64 = 44.379;
const GROSS_PROFIT: f64 = 27.898;

// Gross profit breakdown
const OPERATING_EXPENSES: f64 = 20.199;
const OPERATING_PROFIT: f64 = 7.699;

// Operating profit breakdown
const NET_PROFIT: f64 = 5.638;
const TAXES: f64 = 2.118;
const OTHER: f64 = 0.056;

// Operating expenses breakdown
const INDUSTRIAL: f64 = 6.277;
const COMMERCIAL: f64 = 8.038;
const ADMINISTRATIVE: f64 = 4.069;
const R_AND_D: f64 = 0.010;
const HEADQUARTERS: f64 = 0.936;
const DEPRECIATION: f64 = 0.868;

// COGS breakdown
const RAW_MATERIAL: f64 = 37.024;
const LABOR_COSTS: f64 = 5.365;
const OTHER_COGS: f64 = 1.990;

/// Revenue contributed by one product line.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    key: &'static str,
    name: &'static str,
    revenue: f64,
}

impl Product {
    pub const fn new(key: &'static str, name: &'static str, revenue: f64) -> Self {
        Self { key, name, revenue }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn revenue(&self) -> f64 {
        self.revenue
    }
}

/// Hand-entered revenue and cost breakdown for one reporting period.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeStatement {
    pub products: Vec<Product>,
    pub cogs: f64,
    pub gross_profit: f64,
    pub operating_expenses: f64,
    pub operating_profit: f64,
    pub net_profit: f64,
    pub taxes: f64,
    pub other: f64,
    pub industrial: f64,
    pub commercial: f64,
    pub administrative: f64,
    pub r_and_d: f64,
    pub headquarters: f64,
    pub depreciation: f64,
    pub raw_material: f64,
    pub labor_costs: f64,
    pub other_cogs: f64,
}

impl IncomeStatement {
    /// The statement built from the constants in this module.
    pub fn reference() -> Self {
        Self {
            products: vec![
                Product::new("iphone", "iPhone", IPHONE),
                Product::new("mac", "Mac", MAC),
                Product::new("ipad", "iPad", IPAD),
                Product::new("wearables", "Wearables", WEARABLES),
            ],
            cogs: COGS,
            gross_profit: GROSS_PROFIT,
            operating_expenses: OPERATING_EXPENSES,
            operating_profit: OPERATING_PROFIT,
            net_profit: NET_PROFIT,
            taxes: TAXES,
            other: OTHER,
            industrial: INDUSTRIAL,
            commercial: COMMERCIAL,
            administrative: ADMINISTRATIVE,
            r_and_d: R_AND_D,
            headquarters: HEADQUARTERS,
            depreciation: DEPRECIATION,
            raw_material: RAW_MATERIAL,
            labor_costs: LABOR_COSTS,
            other_cogs: OTHER_COGS,
        }
    }

    /// Total revenue: the sum of all product lines, in declaration order.
    pub fn revenue(&self) -> f64 {
        self.products.iter().map(Product::revenue).sum()
    }

    /// Declares the breakdown tree as a [`FlowGraph`].
    ///
    /// Nodes are declared products first, then revenue, then each breakdown
    /// level outward; that order becomes the node index order of the chart.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if two products share a key.
    pub fn to_graph(&self) -> Result<FlowGraph, GraphError> {
        use Category::{Cost, Profit, Revenue};

        let mut graph = FlowGraph::new();

        for product in &self.products {
            graph.add_node(product.key(), NodeSpec::new(product.name(), product.revenue(), Revenue))?;
        }

        let levels: [(&str, &str, f64, Category); 17] = [
            ("revenue", "Revenue", self.revenue(), Revenue),
            ("gross_profit", "Gross Profit", self.gross_profit, Profit),
            ("cogs", "COGS", self.cogs, Cost),
            ("operating_profit", "Operating Profit", self.operating_profit, Profit),
            ("operating_expenses", "Operating Expenses", self.operating_expenses, Cost),
            ("net_profit", "Net Profit", self.net_profit, Profit),
            ("taxes", "Taxes", self.taxes, Cost),
            ("other", "Other", self.other, Profit),
            ("industrial", "Industrial", self.industrial, Cost),
            ("commercial", "Commercial", self.commercial, Cost),
            ("administrative", "Administrative", self.administrative, Cost),
            ("r_and_d", "R & D", self.r_and_d, Cost),
            ("headquarters", "Headqtr.", self.headquarters, Cost),
            ("depreciation", "Depreciation", self.depreciation, Cost),
            ("raw_material", "Raw Material", self.raw_material, Cost),
            ("labor_costs", "Labor Costs", self.labor_costs, Cost),
            ("other_cogs", "Other Costs", self.other_cogs, Cost),
        ];
        for (key, name, value, category) in levels {
            graph.add_node(key, NodeSpec::new(name, value, category))?;
        }

        for product in &self.products {
            graph.add_flow(product.key(), "revenue", product.revenue())?;
        }

        let flows: [(&str, &str, f64); 16] = [
            ("revenue", "gross_profit", self.gross_profit),
            ("revenue", "cogs", self.cogs),
            ("gross_profit", "operating_profit", self.operating_profit),
            ("gross_profit", "operating_expenses", self.operating_expenses),
            ("operating_profit", "net_profit", self.net_profit),
            ("operating_profit", "taxes", self.taxes),
            ("operating_profit", "other", self.other),
            ("operating_expenses", "industrial", self.industrial),
            ("operating_expenses", "commercial", self.commercial),
            ("operating_expenses", "administrative", self.administrative),
            ("operating_expenses", "r_and_d", self.r_and_d),
            ("operating_expenses", "headquarters", self.headquarters),
            ("operating_expenses", "depreciation", self.depreciation),
            ("cogs", "raw_material", self.raw_material),
            ("cogs", "labor_costs", self.labor_costs),
            ("cogs", "other_cogs", self.other_cogs),
        ];
        for (source, target, value) in flows {
            graph.add_flow(source, target, value)?;
        }

        Ok(graph)
    }
}

impl Default for IncomeStatement {
    fn default() -> Self {
        Self::reference()
    }
}
