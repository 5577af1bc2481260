use crate::{core::map::Map, input::events::InputEvent};
use egui::Ui;

/// Reverse button, year slider and forward button
#[derive(Debug, Clone)]
pub struct SequenceControls {
    pub reverse_label: String,
    pub forward_label: String,
    pub slider_width: f32,
}

impl Default for SequenceControls {
    fn default() -> Self {
        Self {
            reverse_label: "◀ Reverse".to_string(),
            forward_label: "Forward ▶".to_string(),
            slider_width: 240.0,
        }
    }
}

impl SequenceControls {
    /// Slider is bounded to `[0, N - 1]` with step 1
    pub fn show(&self, ui: &mut Ui, map: &Map) -> Option<InputEvent> {
        let selection = map.selection();
        let mut index = selection.index();
        let mut input = None;

        ui.horizontal(|ui| {
            if ui.button(&self.reverse_label).clicked() {
                input = Some(InputEvent::Reverse);
            }

            ui.spacing_mut().slider_width = self.slider_width;
            let slider = egui::Slider::new(&mut index, 0..=selection.len() - 1)
                .step_by(1.0)
                .show_value(false);
            if ui.add(slider).changed() {
                input = Some(InputEvent::SliderInput { index });
            }

            if ui.button(&self.forward_label).clicked() {
                input = Some(InputEvent::Forward);
            }

            ui.label(map.current_key().label());
        });

        input
    }
}

/// Home and info buttons
#[derive(Debug, Clone, Default)]
pub struct MapControls {
    pub show_info: bool,
}

impl MapControls {
    pub fn show(&mut self, ui: &mut Ui) -> Option<InputEvent> {
        let mut input = None;
        ui.horizontal(|ui| {
            if ui
                .button("⌂ Home")
                .on_hover_text("Return to the initial extent")
                .clicked()
            {
                input = Some(InputEvent::Home);
            }
            if ui.button("ℹ Info").clicked() {
                self.show_info = !self.show_info;
            }
        });
        input
    }
}
