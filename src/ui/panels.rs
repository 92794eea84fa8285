use eframe::egui::{self, Color32, Frame, RichText, Ui};

use crate::data::export;
use crate::data::report::Report;
use crate::format;
use crate::state::AppState;

use super::{ACCENT, MUTED};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    if let Some(label) = selector(ui, "Select Region", "region", &state.region, &state.region_options()) {
        state.set_region(label);
    }
    ui.add_space(6.0);
    if let Some(label) = selector(
        ui,
        "Select Category",
        "category",
        &state.category,
        &state.category_options(),
    ) {
        state.set_category(label);
    }
    ui.add_space(6.0);
    if let Some(label) = selector(ui, "Select Year", "year", &state.year, &state.year_options()) {
        state.set_year(label);
    }
}

/// A labelled dropdown. Returns the newly picked option, if any.
fn selector(ui: &mut Ui, label: &str, id: &str, current: &str, options: &[String]) -> Option<String> {
    let mut picked = None;
    ui.label(label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for opt in options {
                let is_current = opt.as_str() == current;
                if ui.selectable_label(is_current, opt).clicked() && !is_current {
                    picked = Some(opt.clone());
                }
            }
        });
    if let Some(p) = &picked {
        log::debug!("{id} filter -> {p}");
    }
    picked
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
            if ui.button("Export CSV…").clicked() {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(report)) = (&state.dataset, &state.report) {
            let scope = if state.selection.is_unconstrained() {
                "no filters"
            } else {
                "match filters"
            };
            ui.label(format!("{} rows loaded, {} {scope}", ds.len(), report.rows));
        }

        if let Some(status) = &state.status {
            let color = if status.is_error { Color32::RED } else { ACCENT };
            ui.separator();
            ui.label(RichText::new(&status.text).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

/// Three metric boxes: total sales, total profit, average margin.
pub fn kpi_row(ui: &mut Ui, report: &Report) {
    let k = &report.kpis;
    ui.columns(3, |cols| {
        metric(&mut cols[0], "💰 Total Sales", &format::currency(k.total_sales));
        metric(&mut cols[1], "🏦 Total Profit", &format::currency(k.total_profit));
        metric(&mut cols[2], "📈 Avg Profit Margin", &format::percent(k.avg_margin));
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    Frame::group(ui.style())
        .fill(Color32::from_rgb(0x1E, 0x1E, 0x1E))
        .corner_radius(10.0)
        .inner_margin(15.0)
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(label).color(MUTED));
            ui.label(RichText::new(value).size(26.0).strong().color(ACCENT));
        });
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// "Download Filtered Data" section.
pub fn export_section(ui: &mut Ui, state: &mut AppState) {
    super::section(ui, "📥 Download Filtered Data");
    if ui
        .button("⬇️ Download as CSV")
        .on_hover_text("Download the currently filtered dataset")
        .clicked()
    {
        save_file_dialog(state);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save filtered data")
        .set_file_name(export::FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.export_to(&path);
    }
}

// ---------------------------------------------------------------------------
// Footer and fatal error
// ---------------------------------------------------------------------------

pub fn about(ui: &mut Ui) {
    super::section(ui, "📘 About this Dashboard");
    Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.label(
            "This Sales Performance Dashboard lets you explore sales data by region, \
             category and year, analyze profit trends, and download filtered insights.",
        );
    });
}

/// Shown instead of the dashboard when the data could not be loaded.
pub fn fatal_error(ui: &mut Ui, state: &mut AppState, message: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(40.0);
        ui.label(RichText::new(message).color(Color32::RED).size(18.0));
        ui.add_space(8.0);
        ui.label(RichText::new(format!("Store: {}", state.db.display())).color(MUTED));
        ui.add_space(12.0);
        if ui.button("Reload").clicked() {
            state.reload();
        }
    });
}
