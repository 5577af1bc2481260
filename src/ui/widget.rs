use crate::{
    core::{geo::Point, map::Map},
    input::events::{InputEvent, KeyCode, MapEvent},
    ui::painter::EguiSurface,
};
use egui::{Color32, CursorIcon, Key, Response, Sense, Ui, Vec2};

/// Interactive map canvas over a ready [`Map`]
///
/// Translates egui pointer, scroll and keyboard input into [`InputEvent`]s,
/// feeds them to the map and paints the result.
///
/// ```rust,ignore
/// let (response, events) = MapCanvas::new(&mut map).show(ui);
/// ```
pub struct MapCanvas<'a> {
    map: &'a mut Map,
    size: Option<Vec2>,
    background: Color32,
    /// Zoom levels per scrolled point
    zoom_speed: f64,
}

impl<'a> MapCanvas<'a> {
    pub fn new(map: &'a mut Map) -> Self {
        Self {
            map,
            size: None,
            background: Color32::from_rgb(0xE5, 0xE3, 0xDF),
            zoom_speed: 0.005,
        }
    }

    pub fn size(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }

    pub fn background(mut self, color: Color32) -> Self {
        self.background = color;
        self
    }

    pub fn show(self, ui: &mut Ui) -> (Response, Vec<MapEvent>) {
        let desired_size = self.size.unwrap_or_else(|| ui.available_size());
        let (rect, response) = ui.allocate_exact_size(desired_size, Sense::click_and_drag());

        let mut inputs = Vec::new();
        let size = Point::new(rect.width() as f64, rect.height() as f64);
        if size != self.map.viewport.size {
            inputs.push(InputEvent::Resize { size });
        }

        if response.dragged() {
            let delta = response.drag_delta();
            if delta.length_sq() > 0.0 {
                inputs.push(InputEvent::Pan {
                    delta: Point::new(delta.x as f64, delta.y as f64),
                });
            }
        }

        match response.hover_pos() {
            Some(pos) => {
                let local = pos - rect.min;
                let position = Point::new(local.x as f64, local.y as f64);
                inputs.push(InputEvent::PointerMove { position });

                let scroll = ui.input(|i| i.raw_scroll_delta.y) as f64;
                if scroll.abs() > 0.1 {
                    inputs.push(InputEvent::Zoom {
                        delta: scroll * self.zoom_speed,
                        focus: Some(position),
                    });
                }
            }
            None if self.map.hovered().is_some() => inputs.push(InputEvent::PointerLeave),
            None => {}
        }

        let bindings = [
            (Key::ArrowLeft, KeyCode::ArrowLeft),
            (Key::ArrowRight, KeyCode::ArrowRight),
            (Key::Plus, KeyCode::Plus),
            (Key::Minus, KeyCode::Minus),
            (Key::Home, KeyCode::Home),
        ];
        if response.hovered() {
            for (key, code) in bindings {
                if ui.input(|i| i.key_pressed(key)) {
                    inputs.push(InputEvent::from(code));
                }
            }
        }

        let mut events = Vec::new();
        for input in inputs {
            match self.map.handle_input(input) {
                Ok(mut emitted) => events.append(&mut emitted),
                Err(e) => log::warn!("input dropped: {}", e),
            }
        }

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, self.background);
        let mut surface = EguiSurface::new(&painter, rect);
        self.map.render(&mut surface);

        let response = if self.map.hovered().is_some() {
            response.on_hover_cursor(CursorIcon::PointingHand)
        } else if response.dragged() {
            response.on_hover_cursor(CursorIcon::Grabbing)
        } else {
            response
        };

        if !events.is_empty() {
            ui.ctx().request_repaint();
        }
        (response, events)
    }
}
