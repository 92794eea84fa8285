use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use serde::Serialize;

use super::model::{Month, SalesRecord};

/// Default length of the best-sellers list.
pub const TOP_PRODUCTS: usize = 10;

// ---------------------------------------------------------------------------
// Roll-up rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSales {
    pub region: String,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySales {
    pub category: String,
    pub sales: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySales {
    pub year: i32,
    pub month: Month,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubCategoryProfit {
    pub sub_category: String,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSales {
    pub product: String,
    pub sales: f64,
}

// ---------------------------------------------------------------------------
// Scalar KPIs
// ---------------------------------------------------------------------------

// `Sum for f64` starts from -0.0, so an empty subset would print as "-0.0".

pub fn total_sales<'a>(rows: impl IntoIterator<Item = &'a SalesRecord>) -> f64 {
    rows.into_iter().fold(0.0, |acc, r| acc + r.sales)
}

pub fn total_profit<'a>(rows: impl IntoIterator<Item = &'a SalesRecord>) -> f64 {
    rows.into_iter().fold(0.0, |acc, r| acc + r.profit)
}

/// Mean profit margin in percent; `NaN` for no rows.
pub fn avg_margin<'a>(rows: impl IntoIterator<Item = &'a SalesRecord>) -> f64 {
    let (sum, n) = rows
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), r| (sum + r.profit_margin, n + 1));
    if n == 0 {
        f64::NAN
    } else {
        sum / n as f64
    }
}

// ---------------------------------------------------------------------------
// Grouped roll-ups
// ---------------------------------------------------------------------------

/// Sales per region, largest first.
pub fn by_region<'a>(rows: impl IntoIterator<Item = &'a SalesRecord>) -> Vec<RegionSales> {
    let mut groups = Groups::default();
    for r in rows {
        *groups.entry(r.region.as_str()) += r.sales;
    }
    sorted_desc(groups.into_entries(), |s| *s)
        .into_iter()
        .map(|(region, sales)| RegionSales {
            region: region.to_string(),
            sales,
        })
        .collect()
}

/// Sales and profit per category, ordered by sales, largest first.
pub fn by_category<'a>(rows: impl IntoIterator<Item = &'a SalesRecord>) -> Vec<CategorySales> {
    let mut groups: Groups<&str, (f64, f64)> = Groups::default();
    for r in rows {
        let acc = groups.entry(r.category.as_str());
        acc.0 += r.sales;
        acc.1 += r.profit;
    }
    sorted_desc(groups.into_entries(), |(sales, _)| *sales)
        .into_iter()
        .map(|(category, (sales, profit))| CategorySales {
            category: category.to_string(),
            sales,
            profit,
        })
        .collect()
}

/// Sales per (year, month), ordered by year then calendar month.
pub fn monthly_trend<'a>(rows: impl IntoIterator<Item = &'a SalesRecord>) -> Vec<MonthlySales> {
    let mut totals: BTreeMap<(i32, Month), f64> = BTreeMap::new();
    for r in rows {
        *totals.entry((r.year, r.month)).or_default() += r.sales;
    }
    totals
        .into_iter()
        .map(|((year, month), sales)| MonthlySales { year, month, sales })
        .collect()
}

/// Profit per sub-category, most profitable first, losses last.
pub fn sub_category_profit<'a>(
    rows: impl IntoIterator<Item = &'a SalesRecord>,
) -> Vec<SubCategoryProfit> {
    let mut groups = Groups::default();
    for r in rows {
        *groups.entry(r.sub_category.as_str()) += r.profit;
    }
    sorted_desc(groups.into_entries(), |p| *p)
        .into_iter()
        .map(|(sub_category, profit)| SubCategoryProfit {
            sub_category: sub_category.to_string(),
            profit,
        })
        .collect()
}

/// The `n` products with the highest summed sales.
pub fn top_products<'a>(
    rows: impl IntoIterator<Item = &'a SalesRecord>,
    n: usize,
) -> Vec<ProductSales> {
    let mut groups = Groups::default();
    for r in rows {
        *groups.entry(r.product_name.as_str()) += r.sales;
    }
    let mut ranked = sorted_desc(groups.into_entries(), |s| *s);
    ranked.truncate(n);
    ranked
        .into_iter()
        .map(|(product, sales)| ProductSales {
            product: product.to_string(),
            sales,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Grouping helpers
// ---------------------------------------------------------------------------

/// Accumulators keyed by group, remembering first-seen order.
struct Groups<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> Default for Groups<K, V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Hash + Eq + Copy, V: Default> Groups<K, V> {
    fn entry(&mut self, key: K) -> &mut V {
        let entries = &mut self.entries;
        let pos = *self.index.entry(key).or_insert_with(|| {
            entries.push((key, V::default()));
            entries.len() - 1
        });
        &mut self.entries[pos].1
    }

    fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }
}

/// Stable descending sort; equal values keep first-seen order.
fn sorted_desc<K, V>(mut entries: Vec<(K, V)>, value: impl Fn(&V) -> f64) -> Vec<(K, V)> {
    entries.sort_by(|a, b| value(&b.1).total_cmp(&value(&a.1)));
    entries
}
