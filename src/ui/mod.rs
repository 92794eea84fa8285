use eframe::egui::{Color32, RichText, Ui};

pub mod charts;
pub mod panels;
pub mod table;

/// Metric value colour.
pub const ACCENT: Color32 = Color32::from_rgb(0x00, 0xFF, 0xAA);
/// Section heading colour.
pub const HEADING: Color32 = Color32::from_rgb(0x00, 0xB4, 0xD8);
/// Muted label colour.
pub const MUTED: Color32 = Color32::from_rgb(0xCC, 0xCC, 0xCC);

/// Section heading in the dashboard's heading colour.
pub fn section(ui: &mut Ui, title: &str) {
    ui.add_space(8.0);
    ui.label(RichText::new(title).heading().color(HEADING));
}
