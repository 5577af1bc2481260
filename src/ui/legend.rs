use crate::{
    core::config::LegendConfig,
    legend::view::LegendView,
};
use egui::{Align2, Color32, FontId, Pos2, Sense, Stroke, Ui, Vec2};

/// Title plus nested max, mean and min circles
pub struct LegendPanel<'a> {
    view: &'a LegendView,
    config: &'a LegendConfig,
}

impl<'a> LegendPanel<'a> {
    pub fn new(view: &'a LegendView, config: &'a LegendConfig) -> Self {
        Self { view, config }
    }

    pub fn show(self, ui: &mut Ui) {
        ui.strong(&self.view.title);

        let size = Vec2::new(self.config.width as f32, self.config.height as f32);
        let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
        let painter = ui.painter_at(rect);
        let style = &self.config.style;
        let at = |x: f64, y: f64| rect.min + Vec2::new(x as f32, y as f32);

        for entry in &self.view.entries {
            painter.circle(
                at(entry.cx, entry.cy),
                entry.radius as f32,
                style.fill_color.to_color32(style.fill_opacity),
                Stroke::new(style.stroke_width, style.stroke_color.to_color32(style.opacity)),
            );
        }
        for entry in &self.view.entries {
            let anchor: Pos2 = at(entry.text_x, entry.text_y);
            painter.text(
                anchor,
                Align2::LEFT_BOTTOM,
                &entry.label,
                FontId::proportional(12.0),
                ui.visuals().text_color(),
            );
        }
        if self.view.entries.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "no data",
                FontId::proportional(12.0),
                Color32::GRAY,
            );
        }
    }
}
