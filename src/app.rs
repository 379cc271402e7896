use eframe::egui;
use std::path::PathBuf;

use hsv_tone::image_io::{self, DecodedImage, OutputFormat};
use hsv_tone::pipeline::{self, Adjustments};

pub struct HsvToneApp {
    source: Option<DecodedImage>,
    source_path: Option<PathBuf>,
    result: Option<Vec<u8>>,
    preview_texture: Option<egui::TextureHandle>,
    adjustments: Adjustments,
    needs_process: bool,
    auto_process: bool,
    processing_time_ms: f64,
    status: Option<String>,
}

impl HsvToneApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            source: None,
            source_path: None,
            result: None,
            preview_texture: None,
            adjustments: Adjustments::default(),
            needs_process: false,
            auto_process: true,
            processing_time_ms: 0.0,
            status: None,
        }
    }

    fn open_image(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "tiff", "tif", "bmp", "webp"])
            .pick_file()
        {
            let loaded = image_io::load_image(&path);
            if let Some(img) = report(&mut self.status, "Error loading image", loaded) {
                self.source = Some(img);
                self.source_path = Some(path);
                self.result = None;
                self.needs_process = true;
            }
        }
    }

    fn save_result(&mut self) {
        let (Some(source), Some(result)) = (&self.source, &self.result) else {
            return;
        };

        let mut dialog = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .add_filter("JPEG", &["jpg", "jpeg"]);
        if let Some(name) = self
            .source_path
            .as_deref()
            .map(|p| image_io::output_path(p, OutputFormat::Png))
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        {
            dialog = dialog.set_file_name(name);
        }

        if let Some(path) = dialog.save_file() {
            let format = OutputFormat::from_path(&path).unwrap_or(OutputFormat::Png);
            let saved = image_io::save_image(result, source.layout, &path, format);
            report(&mut self.status, "Error saving image", saved);
        }
    }

    fn process_image(&mut self, ctx: &egui::Context) {
        let Some(source) = &self.source else {
            return;
        };
        let start = web_time::Instant::now();
        let processed = pipeline::process(&source.bytes, source.layout, &self.adjustments);
        if let Some(bytes) = report(&mut self.status, "Processing failed", processed) {
            self.processing_time_ms = start.elapsed().as_secs_f64() * 1000.0;
            let size = [source.layout.width(), source.layout.height()];
            let color_image = if source.layout.channels() == 4 {
                egui::ColorImage::from_rgba_unmultiplied(size, &bytes)
            } else {
                egui::ColorImage::from_rgb(size, &bytes)
            };
            self.preview_texture = Some(ctx.load_texture(
                "preview",
                color_image,
                egui::TextureOptions::LINEAR,
            ));
            self.result = Some(bytes);
        }
    }
}

impl eframe::App for HsvToneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top panel: file operations
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open Image").clicked() {
                    self.open_image();
                }
                if ui.button("Save Result").clicked() {
                    self.save_result();
                }
                ui.separator();

                ui.checkbox(&mut self.auto_process, "Auto");
                if ui.button("Process").clicked() {
                    self.needs_process = true;
                }
                if ui.button("Reset").clicked() {
                    self.adjustments = Adjustments::default();
                    self.needs_process = true;
                }

                ui.separator();
                if let Some(source) = &self.source {
                    ui.label(format!(
                        "{}x{}x{} | {:.0}ms",
                        source.layout.width(),
                        source.layout.height(),
                        source.layout.channels(),
                        self.processing_time_ms
                    ));
                }
                if let Some(status) = &self.status {
                    ui.colored_label(egui::Color32::LIGHT_RED, status.as_str());
                }
            });
        });

        // Left panel: controls
        egui::SidePanel::left("controls")
            .default_width(300.0)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let mut changed = false;
                    changed |= ui_rgb(ui, &mut self.adjustments);
                    changed |= ui_hsv(ui, &mut self.adjustments);

                    if changed && self.auto_process {
                        self.needs_process = true;
                    }
                });
            });

        if self.needs_process && self.source.is_some() {
            self.process_image(ctx);
            self.needs_process = false;
        }

        // Central panel: image preview
        egui::CentralPanel::default().show(ctx, |ui| {
            match (&self.preview_texture, &self.source) {
                (Some(tex), Some(source)) => {
                    egui::ScrollArea::both().show(ui, |ui| {
                        let available = ui.available_size();
                        let img_w = source.layout.width() as f32;
                        let img_h = source.layout.height() as f32;
                        let scale = f32::min(available.x / img_w, available.y / img_h).min(1.0);
                        let display_size = egui::vec2(img_w * scale, img_h * scale);
                        ui.image(egui::load::SizedTexture::new(tex.id(), display_size));
                    });
                }
                _ => {
                    ui.centered_and_justified(|ui| {
                        ui.label("Open an image to begin");
                    });
                }
            }
        });
    }
}

/// Show the error of a failed action in the status label, or clear a stale
/// one when the action succeeds.
fn report<T>(
    status: &mut Option<String>,
    context: &str,
    result: hsv_tone::Result<T>,
) -> Option<T> {
    match result {
        Ok(value) => {
            *status = None;
            Some(value)
        }
        Err(e) => {
            log::error!("{context}: {e}");
            *status = Some(e.to_string());
            None
        }
    }
}

// --- UI Section Builders ---

fn ui_rgb(ui: &mut egui::Ui, adj: &mut Adjustments) -> bool {
    let mut changed = false;
    egui::CollapsingHeader::new("RGB")
        .default_open(true)
        .show(ui, |ui| {
            ui.label("Channel Offset");
            changed |= ui
                .add(egui::Slider::new(&mut adj.red_offset, -255..=255).text("Red"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut adj.green_offset, -255..=255).text("Green"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut adj.blue_offset, -255..=255).text("Blue"))
                .changed();

            ui.separator();
            changed |= ui
                .add(egui::Slider::new(&mut adj.brightness, -255..=255).text("Brightness"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut adj.contrast, 0.5..=1.5).text("Contrast"))
                .changed();
        });
    changed
}

fn ui_hsv(ui: &mut egui::Ui, adj: &mut Adjustments) -> bool {
    let mut changed = false;
    egui::CollapsingHeader::new("HSV")
        .default_open(true)
        .show(ui, |ui| {
            changed |= ui
                .add(
                    egui::Slider::new(&mut adj.hue_degrees, -360.0..=360.0)
                        .suffix("°")
                        .text("Hue"),
                )
                .changed();

            ui.separator();
            ui.label("Saturation");
            changed |= ui
                .add(egui::Slider::new(&mut adj.saturation_scale, 0.0..=2.0).text("Scale"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut adj.saturation_delta, -1.0..=1.0).text("Offset"))
                .changed();

            ui.separator();
            ui.label("Value");
            changed |= ui
                .add(egui::Slider::new(&mut adj.value_scale, 0.0..=2.0).text("Scale"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut adj.value_delta, -1.0..=1.0).text("Offset"))
                .changed();
        });
    changed
}
