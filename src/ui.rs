use crate::fit::ScaleResult;
use crate::picture::PictureStatus;

/// Values shown read-only in the overlay
#[derive(Debug, Clone)]
pub struct OverlayInfo {
    pub fps: f32,
    pub status: PictureStatus,
    pub scale: ScaleResult,
    /// Picture texture size on the GPU
    pub texture_size: (u32, u32),
    pub loading: bool,
    pub camera_position: [f32; 3],
    pub resolution: (u32, u32),
}

/// Editable overlay state that lives across frames
#[derive(Debug, Default)]
pub struct Overlay {
    pub path_input: String,
    submitted: Option<String>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection confirmed since the last call, if any
    pub fn take_selection(&mut self) -> Option<String> {
        self.submitted.take()
    }

    pub fn show(&mut self, ctx: &egui::Context, info: &OverlayInfo) {
        egui::Window::new("Picture")
            .title_bar(true)
            .resizable(false)
            .fixed_pos(egui::pos2(10.0, 10.0))
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.label("Image file:");
                let mut confirmed = false;
                ui.horizontal(|ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.path_input)
                            .hint_text("/path/to/image.png")
                            .desired_width(220.0),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        confirmed = true;
                    }
                    if ui
                        .add_enabled(!info.loading, egui::Button::new("Load"))
                        .clicked()
                    {
                        confirmed = true;
                    }
                });
                if confirmed {
                    self.submitted = Some(self.path_input.clone());
                }

                ui.label(
                    egui::RichText::new("or drop a file on the window")
                        .size(11.0)
                        .color(egui::Color32::GRAY),
                );

                ui.add_space(5.0);
                ui.separator();
                ui.add_space(5.0);

                let status_color = if info.status.is_error() {
                    egui::Color32::from_rgb(255, 100, 100)
                } else {
                    egui::Color32::from_rgb(100, 200, 100)
                };
                ui.label(egui::RichText::new(info.status.describe()).color(status_color));
                ui.monospace(format!(
                    "Scale: ({:.3}, {:.3})",
                    info.scale.scale_x, info.scale.scale_y
                ));
                ui.monospace(format!(
                    "Texture: {}x{}",
                    info.texture_size.0, info.texture_size.1
                ));
            });

        egui::Window::new("Stats")
            .title_bar(false)
            .resizable(false)
            .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(10.0, -10.0))
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(format!("{:.0} FPS", info.fps))
                        .size(18.0)
                        .color(egui::Color32::from_rgb(74, 158, 255)),
                );
                let p = info.camera_position;
                ui.monospace(format!("Camera: ({:.2}, {:.2}, {:.2})", p[0], p[1], p[2]));
                ui.monospace(format!("Resolution: {}x{}", info.resolution.0, info.resolution.1));
            });
    }
}
