use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::color::{self, ColorMap};
use crate::data::model::Month;
use crate::data::report::Report;
use crate::format;

const CHART_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Chart sections (central panel)
// ---------------------------------------------------------------------------

/// Render all five charts for the current report.
pub fn all_charts(ui: &mut Ui, report: &Report, regions: &ColorMap, categories: &ColorMap) {
    super::section(ui, "🌍 Sales by Region");
    region_chart(ui, report, regions);

    super::section(ui, "📦 Sales by Product Category");
    category_chart(ui, report, categories);

    super::section(ui, "📅 Monthly Sales Trend");
    monthly_chart(ui, report);

    super::section(ui, "💹 Profit by Sub-Category");
    sub_category_chart(ui, report);

    super::section(ui, "🏆 Top 10 Products by Sales");
    top_products_chart(ui, report);
}

fn base_plot(id: &str) -> Plot<'static> {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
}

fn region_chart(ui: &mut Ui, report: &Report, colors: &ColorMap) {
    let bars: Vec<Bar> = report
        .by_region
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Bar::new(i as f64, r.sales)
                .name(&r.region)
                .fill(colors.color_for(&r.region))
                .width(0.6)
        })
        .collect();
    let labels = report.by_region.iter().map(|r| r.region.clone()).collect();

    base_plot("sales_by_region")
        .x_axis_formatter(label_axis(labels))
        .y_axis_label("Sales")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name("Total Sales by Region")
                    .element_formatter(Box::new(|bar: &Bar, _: &BarChart| {
                        format!("{}\n{}", bar.name, format::currency(bar.value))
                    })),
            );
        });
}

fn category_chart(ui: &mut Ui, report: &Report, colors: &ColorMap) {
    let bars: Vec<Bar> = report
        .by_category
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Bar::new(i as f64, c.sales)
                .name(&c.category)
                .fill(colors.color_for(&c.category))
                .width(0.6)
        })
        .collect();
    let labels = report.by_category.iter().map(|c| c.category.clone()).collect();
    let profits: Vec<f64> = report.by_category.iter().map(|c| c.profit).collect();

    base_plot("sales_by_category")
        .x_axis_formatter(label_axis(labels))
        .y_axis_label("Sales")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name("Sales by Category")
                    .element_formatter(Box::new(move |bar: &Bar, _: &BarChart| {
                        let profit = profits.get(bar.argument.round() as usize).copied();
                        format!(
                            "{}\nSales {}\nProfit {}",
                            bar.name,
                            format::currency(bar.value),
                            format::currency(profit.unwrap_or(f64::NAN)),
                        )
                    })),
            );
        });
}

fn monthly_chart(ui: &mut Ui, report: &Report) {
    let mut by_year: BTreeMap<i32, Vec<[f64; 2]>> = BTreeMap::new();
    for m in &report.monthly_trend {
        by_year
            .entry(m.year)
            .or_default()
            .push([m.month.number() as f64, m.sales]);
    }
    let palette = color::generate_palette(by_year.len());

    base_plot("monthly_trend")
        .legend(Legend::default())
        .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            whole_number(mark.value)
                .and_then(|n| Month::from_number(n as u32))
                .map(|m| m.name()[..3].to_string())
                .unwrap_or_default()
        })
        .include_x(1.0)
        .include_x(12.0)
        .y_axis_label("Sales")
        .show(ui, |plot_ui| {
            for ((year, points), color) in by_year.into_iter().zip(palette) {
                let name = year.to_string();
                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .name(&name)
                        .color(color)
                        .width(2.0),
                );
                plot_ui.points(Points::new(points).name(&name).color(color).radius(3.5));
            }
        });
}

fn sub_category_chart(ui: &mut Ui, report: &Report) {
    let rows = &report.sub_category_profit;
    let (min, max) = rows.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
        (lo.min(r.profit), hi.max(r.profit))
    });
    let n = rows.len();
    // Largest value on top.
    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Bar::new((n - 1 - i) as f64, r.profit)
                .name(&r.sub_category)
                .fill(color::diverging(r.profit, min, max))
                .width(0.7)
        })
        .collect();
    let labels = rows.iter().rev().map(|r| r.sub_category.clone()).collect();

    base_plot("profit_by_sub_category")
        .y_axis_formatter(label_axis(labels))
        .y_axis_min_width(110.0)
        .x_axis_label("Profit")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Profit by Sub-Category").horizontal());
        });
}

fn top_products_chart(ui: &mut Ui, report: &Report) {
    let rows = &report.top_products;
    let (min, max) = rows.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
        (lo.min(r.sales), hi.max(r.sales))
    });
    let n = rows.len();
    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(i, p)| {
            Bar::new((n - 1 - i) as f64, p.sales)
                .name(&p.product)
                .fill(color::sequential_blue(p.sales, min, max))
                .width(0.7)
        })
        .collect();
    let labels = rows.iter().rev().map(|p| p.product.clone()).collect();

    base_plot("top_products")
        .y_axis_formatter(label_axis(labels))
        .y_axis_min_width(180.0)
        .x_axis_label("Sales")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Top 10 Products by Sales").horizontal());
        });
}

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

/// Axis formatter showing `labels[i]` at integer position `i`.
fn label_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, _range| {
        whole_number(mark.value)
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| labels.get(i).cloned())
            .unwrap_or_default()
    }
}

fn whole_number(v: f64) -> Option<i64> {
    ((v - v.round()).abs() < 1e-6).then(|| v.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_number_rejects_fractions() {
        assert_eq!(whole_number(3.0), Some(3));
        assert_eq!(whole_number(2.9999999), Some(3));
        assert_eq!(whole_number(2.5), None);
    }
}
