use crate::core::constants::{DATA_SOURCE_CREDIT, HELP_LINES, WELCOME_TEXT, WELCOME_TITLE};
use egui::{Align2, Context, Vec2};

/// Info window describing the controls and crediting the data
pub struct HelpPanel;

impl HelpPanel {
    pub fn show(ctx: &Context, open: &mut bool) {
        egui::Window::new("About this map")
            .open(open)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                for line in HELP_LINES {
                    ui.label(line);
                }
                ui.separator();
                ui.hyperlink_to(
                    DATA_SOURCE_CREDIT,
                    DATA_SOURCE_CREDIT.trim_start_matches("Source: "),
                );
            });
    }
}

/// Splash shown on start; the first click anywhere dismisses it
#[derive(Debug, Clone)]
pub struct WelcomeOverlay {
    visible: bool,
}

impl Default for WelcomeOverlay {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl WelcomeOverlay {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self, ctx: &Context) {
        if !self.visible {
            return;
        }
        if ctx.input(|i| i.pointer.any_click()) {
            self.visible = false;
            return;
        }

        egui::Area::new("welcome")
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.heading(WELCOME_TITLE);
                    ui.label(WELCOME_TEXT);
                });
            });
    }
}
