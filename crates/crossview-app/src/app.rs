use crossview_core::{CompositeImage, Session};
use eframe::egui;
use tracing::{error, warn};

use crate::{controls, dialogs};

#[derive(Default)]
pub struct CrossviewApp {
    session: Session,
    preview: Option<egui::TextureHandle>,
    // Session revision the texture was built from.
    preview_revision: u64,
    status: String,
}

impl CrossviewApp {
    fn load(&mut self) {
        let Some(path) = dialogs::pick_source() else {
            return;
        };

        match self.session.load_path(&path) {
            Ok(()) => self.status = format!("Loaded {}", path.display()),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "load failed");
                dialogs::show_error("Error", &e.to_string());
            }
        }
    }

    fn save(&mut self) {
        let Some(path) = dialogs::pick_destination(self.session.source_path()) else {
            return;
        };

        match self.session.save(&path) {
            Ok(written) => {
                self.status = format!("Saved {}", written.display());
                dialogs::show_info("Success", &format!("Image saved to {}", written.display()));
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "save failed");
                dialogs::show_error("Error", &e.to_string());
            }
        }
    }

    fn refresh_preview(&mut self, ctx: &egui::Context) {
        if self.session.revision() == self.preview_revision {
            return;
        }
        self.preview_revision = self.session.revision();
        self.preview = self
            .session
            .preview()
            .map(|preview| {
                ctx.load_texture(
                    "composite_preview",
                    to_color_image(&preview),
                    egui::TextureOptions::default(),
                )
            });
    }
}

fn to_color_image(image: &CompositeImage) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(
        [image.width as usize, image.height as usize],
        &image.pixels,
    )
}

impl eframe::App for CrossviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status.as_str());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                if ui.button("Load Image").clicked() {
                    self.load();
                }
                ui.add_space(8.0);

                self.refresh_preview(ctx);
                match &self.preview {
                    Some(tex) => {
                        ui.image((tex.id(), tex.size_vec2()));
                    }
                    None => {
                        ui.label("No image loaded");
                    }
                }
                ui.add_space(8.0);

                if let Some(params) = controls::parameter_panel(ui, self.session.parameters()) {
                    match self.session.set_parameters(params) {
                        Ok(()) => ctx.request_repaint(),
                        Err(e) => {
                            error!(error = %e, "could not rebuild composite");
                            dialogs::show_error("Error", &e.to_string());
                        }
                    }
                }
                ui.add_space(8.0);

                if ui
                    .add_enabled(self.session.can_save(), egui::Button::new("Save Composite"))
                    .clicked()
                {
                    self.save();
                }
            });
        });
    }
}
