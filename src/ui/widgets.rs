/// Custom egui Widgets
///
/// Implementations of specialized widgets using egui::Painter:
/// - BarChart: labelled bar chart with winner highlighting and a zero-based value axis
/// - StatusBadge: coloured Winner / Success / Failed pill for the results table

use eframe::egui;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};

use crate::models::{ChartSeries, StatusLabel};
use crate::results::ChartKind;

fn rgb(color: [u8; 3]) -> Color32 {
    Color32::from_rgb(color[0], color[1], color[2])
}

fn rgb_fill(color: [u8; 3]) -> Color32 {
    // 0.8 alpha, like the stroke colour but translucent
    Color32::from_rgba_unmultiplied(color[0], color[1], color[2], 204)
}

/// Draws a vertical bar chart for one series
///
/// # Arguments
/// * `ui` - egui Ui context
/// * `kind` - Which chart this is (title, axis labels, palette)
/// * `series` - Bars to draw, in order
///
/// The value axis always starts at zero. Highlighted (winner) bars use the
/// palette's highlight colour.
pub fn bar_chart(ui: &mut egui::Ui, kind: ChartKind, series: &ChartSeries) {
    ui.label(egui::RichText::new(kind.title()).strong());

    if series.is_empty() {
        ui.label("No data");
        return;
    }

    let chart_height = 240.0;
    let (response, painter) = ui.allocate_painter(
        Vec2::new(ui.available_width(), chart_height),
        egui::Sense::hover(),
    );

    let rect = response.rect;
    let axis_width = 80.0;
    let label_height = 20.0;
    let plot = Rect::from_min_max(
        Pos2::new(rect.left() + axis_width, rect.top() + 16.0),
        Pos2::new(rect.right() - 8.0, rect.bottom() - label_height),
    );

    painter.rect_filled(rect, 0.0, Color32::from_rgb(46, 52, 64));

    let max_value = series
        .values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    let scale_max = if max_value > 0.0 { max_value } else { 1.0 };

    let value_to_y = |val: f64| -> f32 {
        plot.bottom() - ((val / scale_max) as f32).clamp(0.0, 1.0) * plot.height()
    };

    // Grid lines and value-axis labels
    let grid_color = Color32::from_gray(70);
    for tick in 0..=4 {
        let value = scale_max * tick as f64 / 4.0;
        let y = value_to_y(value);
        painter.line_segment(
            [Pos2::new(plot.left(), y), Pos2::new(plot.right(), y)],
            Stroke::new(0.5, grid_color),
        );
        painter.text(
            Pos2::new(plot.left() - 6.0, y),
            egui::Align2::RIGHT_CENTER,
            kind.axis_label(value),
            egui::FontId::new(10.0, egui::FontFamily::Monospace),
            Color32::LIGHT_GRAY,
        );
    }

    let palette = kind.palette();
    let slot_width = plot.width() / series.len() as f32;
    let bar_width = slot_width * 0.6;

    for (i, (label, value, highlight)) in series.bars().enumerate() {
        let center_x = plot.left() + slot_width * (i as f32 + 0.5);
        let top = if value.is_finite() { value_to_y(value) } else { plot.bottom() };
        let bar_rect = Rect::from_min_max(
            Pos2::new(center_x - bar_width / 2.0, top),
            Pos2::new(center_x + bar_width / 2.0, plot.bottom()),
        );

        let color = if highlight { palette.highlight } else { palette.normal };
        painter.rect_filled(bar_rect, 2.0, rgb_fill(color));
        painter.rect_stroke(bar_rect, 2.0, Stroke::new(2.0, rgb(color)));

        painter.text(
            Pos2::new(center_x, top - 2.0),
            egui::Align2::CENTER_BOTTOM,
            kind.axis_label(value),
            egui::FontId::new(10.0, egui::FontFamily::Monospace),
            Color32::WHITE,
        );

        painter.text(
            Pos2::new(center_x, plot.bottom() + label_height / 2.0),
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::new(11.0, egui::FontFamily::Proportional),
            Color32::LIGHT_GRAY,
        );
    }

    painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::from_gray(90)));
    response.on_hover_text(kind.dataset_label());
}

/// Coloured status pill for a results row
pub fn status_badge(ui: &mut egui::Ui, status: StatusLabel) {
    let color = match status {
        StatusLabel::Winner => Color32::from_rgb(251, 191, 36),
        StatusLabel::Success => Color32::from_rgb(16, 185, 129),
        StatusLabel::Failed => Color32::from_rgb(239, 68, 68),
    };
    ui.label(
        egui::RichText::new(status.as_str())
            .strong()
            .color(Color32::BLACK)
            .background_color(color),
    );
}
