use eframe::egui;

use crate::state::AppState;
use crate::ui::{charts, panels, table, ACCENT, MUTED};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalesDashboardApp {
    pub state: AppState,
}

impl SalesDashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        cc.egui_ctx.set_visuals(dark_visuals());
        Self { state }
    }
}

fn dark_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = egui::Color32::BLACK;
    visuals.window_fill = egui::Color32::from_rgb(0x11, 0x11, 0x11);
    visuals.override_text_color = Some(egui::Color32::WHITE);
    visuals
}

impl eframe::App for SalesDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // A failed load replaces the whole dashboard.
        if let Some(message) = self.state.load_error.clone() {
            egui::CentralPanel::default().show(ctx, |ui| {
                panels::fatal_error(ui, &mut self.state, &message);
            });
            return;
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs, charts, export ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading(
                            egui::RichText::new("📊 Sales Performance Dashboard")
                                .size(30.0)
                                .color(ACCENT),
                        );
                        ui.label(
                            egui::RichText::new(
                                "Analyze sales, profit, and performance trends across regions and categories",
                            )
                            .color(MUTED),
                        );
                    });
                    ui.separator();

                    if let Some(report) = &self.state.report {
                        panels::kpi_row(ui, report);
                        ui.separator();
                        charts::all_charts(
                            ui,
                            report,
                            &self.state.region_colors,
                            &self.state.category_colors,
                        );
                        ui.separator();
                        table::rows_table(ui, &self.state.subset());
                    }
                    panels::export_section(ui, &mut self.state);
                    ui.separator();
                    panels::about(ui);
                });
        });
    }
}
