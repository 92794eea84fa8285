use serde::Serialize;

use super::aggregate::{
    self, CategorySales, MonthlySales, ProductSales, RegionSales, SubCategoryProfit,
};
use super::filter::{self, FilterSelection};
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Report – everything one render pass displays
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub total_sales: f64,
    pub total_profit: f64,
    /// `NaN` when no rows match (serialized as `null`).
    pub avg_margin: f64,
}

/// KPIs and roll-ups computed from one filtered subset. Built fresh each time
/// the selection changes and never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub rows: usize,
    pub kpis: Kpis,
    pub by_region: Vec<RegionSales>,
    pub by_category: Vec<CategorySales>,
    pub monthly_trend: Vec<MonthlySales>,
    pub sub_category_profit: Vec<SubCategoryProfit>,
    pub top_products: Vec<ProductSales>,
}

/// Filter `dataset` by `selection` and aggregate the result.
///
/// Pure: the same inputs always give the same report, so UI handlers and
/// tests call it the same way.
pub fn render(dataset: &Dataset, selection: &FilterSelection) -> Report {
    let subset = filter::apply(dataset, selection);
    log::debug!("selection {selection:?} matched {} of {} rows", subset.len(), dataset.len());

    Report {
        rows: subset.len(),
        kpis: Kpis {
            total_sales: aggregate::total_sales(&subset),
            total_profit: aggregate::total_profit(&subset),
            avg_margin: aggregate::avg_margin(&subset),
        },
        by_region: aggregate::by_region(&subset),
        by_category: aggregate::by_category(&subset),
        monthly_trend: aggregate::monthly_trend(&subset),
        sub_category_profit: aggregate::sub_category_profit(&subset),
        top_products: aggregate::top_products(&subset, aggregate::TOP_PRODUCTS),
    }
}
