use crate::{
    core::geo::Point,
    layers::{popup::PopupContent, style::MarkerStyle},
    rendering::surface::DrawSurface,
};
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Rounding, Stroke, Vec2};

#[derive(Debug, Clone)]
pub struct PopupStyle {
    pub background_color: Color32,
    pub border_color: Color32,
    pub border_width: f32,
    pub rounding: f32,
    pub padding: f32,
    pub font_id: FontId,
    pub text_color: Color32,
    /// Height of the tip between the box and the anchor
    pub tip: f32,
}

impl Default for PopupStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::WHITE,
            border_color: Color32::GRAY,
            border_width: 1.0,
            rounding: 4.0,
            padding: 8.0,
            font_id: FontId::proportional(12.0),
            text_color: Color32::BLACK,
            tip: 8.0,
        }
    }
}

/// [`DrawSurface`] over an egui painter clipped to the map rect
pub struct EguiSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
    popup_style: PopupStyle,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a Painter, rect: Rect) -> Self {
        Self {
            painter,
            rect,
            popup_style: PopupStyle::default(),
        }
    }

    pub fn with_popup_style(mut self, style: PopupStyle) -> Self {
        self.popup_style = style;
        self
    }

    fn to_screen(&self, point: Point) -> Pos2 {
        self.rect.min + Vec2::new(point.x as f32, point.y as f32)
    }
}

impl DrawSurface for EguiSurface<'_> {
    fn size(&self) -> Point {
        Point::new(self.rect.width() as f64, self.rect.height() as f64)
    }

    fn circle(&mut self, center: Point, radius: f64, style: &MarkerStyle) {
        self.painter.circle(
            self.to_screen(center),
            radius as f32,
            style.fill_color.to_color32(style.fill_opacity),
            Stroke::new(style.stroke_width, style.stroke_color.to_color32(style.opacity)),
        );
    }

    fn popup(&mut self, anchor: Point, content: &PopupContent) {
        let style = &self.popup_style;
        let anchor = self.to_screen(anchor);
        let galley = self.painter.layout_no_wrap(
            content.text(),
            style.font_id.clone(),
            style.text_color,
        );

        let size = galley.size() + Vec2::splat(2.0 * style.padding);
        let min = Pos2::new(anchor.x - size.x / 2.0, anchor.y - style.tip - size.y);
        let rect = Rect::from_min_size(min, size);

        self.painter.add(egui::Shape::convex_polygon(
            vec![
                anchor,
                Pos2::new(anchor.x - style.tip, anchor.y - style.tip),
                Pos2::new(anchor.x + style.tip, anchor.y - style.tip),
            ],
            style.background_color,
            Stroke::NONE,
        ));
        self.painter.rect(
            rect,
            Rounding::same(style.rounding),
            style.background_color,
            Stroke::new(style.border_width, style.border_color),
        );
        self.painter.text(
            rect.min + Vec2::splat(style.padding),
            Align2::LEFT_TOP,
            content.text(),
            style.font_id.clone(),
            style.text_color,
        );
    }

    fn message(&mut self, text: &str) {
        self.painter.text(
            self.rect.center(),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(16.0),
            Color32::DARK_GRAY,
        );
    }
}
