//! Verdant GUI Application
//!
//! Interactive GUI for plant tray analysis using egui: open a tray image,
//! drag a rectangle around the tray, and read off the green-pixel area.

mod selection;
mod viewer;

use std::path::PathBuf;

use eframe::egui;

use verdant_core::config::analysis_config_handle;
use verdant_core::decoders::{decode_image, DecodedImage, SUPPORTED_EXTENSIONS};
use verdant_core::exporters::append_csv;
use verdant_core::geometry::DisplayMapping;
use verdant_core::models::{AnalysisOptions, AnalysisRecord, RoiMode};
use verdant_core::pipeline::analyze_region;

use selection::{DragSelection, SelectionEvent};

fn main() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Verdant - Plant Tray Analyzer"),
        ..Default::default()
    };

    eframe::run_native(
        "Verdant",
        options,
        Box::new(|_cc| Ok(Box::new(VerdantApp::default()))),
    )
}

/// One loaded image and everything derived from it
///
/// Dropped wholesale when the user starts over, so nothing from a previous
/// image can leak into the next analysis.
struct ImageSession {
    path: PathBuf,
    image: DecodedImage,
    display: DecodedImage,
    texture: Option<egui::TextureHandle>,
    drag: DragSelection,
    result: Option<SessionResult>,
}

/// A finished analysis, kept until the user dismisses the result window
struct SessionResult {
    record: AnalysisRecord,
    masked_texture: egui::TextureHandle,
    csv_status: Option<String>,
}

struct VerdantApp {
    session: Option<ImageSession>,

    // Analysis parameters, seeded from the config file
    options: AnalysisOptions,
    min_selection_px: f32,
    display_max_dimension: u32,

    // UI state
    error_message: Option<String>,
}

impl Default for VerdantApp {
    fn default() -> Self {
        let defaults = &analysis_config_handle().config.defaults;

        Self {
            session: None,
            options: defaults.to_options(),
            min_selection_px: defaults.min_selection_px,
            display_max_dimension: defaults.display_max_dimension,
            error_message: None,
        }
    }
}

impl eframe::App for VerdantApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        self.pick_and_open_image();
                        ui.close_menu();
                    }
                    if ui.button("Analyze Another Image...").clicked() {
                        self.session = None;
                        self.pick_and_open_image();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Right panel: parameters and session info
        egui::SidePanel::right("controls_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.heading("Parameters");
                ui.separator();
                egui::ScrollArea::vertical()
                    .id_salt("controls_scroll")
                    .show(ui, |ui| {
                        self.show_controls(ui);
                    });
            });

        // Central panel: the image and the selection rectangle
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_image_area(ui, ctx);
        });

        // Result window for the current session
        self.show_result_window(ctx);

        // Show error message if any
        if self.error_message.is_some() {
            let error = self.error_message.clone().unwrap();
            let mut should_close = false;
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        should_close = true;
                    }
                });
            if should_close {
                self.error_message = None;
            }
        }
    }
}

impl VerdantApp {
    fn pick_and_open_image(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", SUPPORTED_EXTENSIONS)
            .pick_file()
        {
            self.open_image(path);
        }
    }

    fn open_image(&mut self, path: PathBuf) {
        match decode_image(&path) {
            Ok(image) => match viewer::display_copy(&image, self.display_max_dimension) {
                Ok(display) => {
                    self.session = Some(ImageSession {
                        path,
                        image,
                        display,
                        texture: None,
                        drag: DragSelection::default(),
                        result: None,
                    });
                    self.error_message = None;
                }
                Err(e) => {
                    self.error_message = Some(format!("Failed to prepare display image: {}", e));
                }
            },
            Err(e) => {
                self.error_message = Some(format!("Failed to load image: {}", e));
            }
        }
    }

    fn show_image_area(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let options = self.options;
        let min_selection_px = self.min_selection_px;

        if self.session.is_none() {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.4);
                ui.label("No image loaded.");
                if ui.button("Open Image...").clicked() {
                    self.pick_and_open_image();
                }
            });
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if session.result.is_none() {
            ui.label("Please select the tray.");
        } else {
            ui.label("Analysis finished. Close the result window to select again.");
        }
        ui.separator();

        let texture = session.texture.get_or_insert_with(|| {
            ctx.load_texture(
                "tray",
                viewer::color_image_from_decoded(&session.display),
                Default::default(),
            )
        });

        let display_size = viewer::fit_display_size(texture.size_vec2(), ui.available_size());
        let response = ui.add(
            egui::Image::new((texture.id(), display_size)).sense(egui::Sense::click_and_drag()),
        );

        // Block new drags while a result window is up
        if session.result.is_none() {
            match session.drag.process(&response, min_selection_px) {
                SelectionEvent::Completed { start, end } => {
                    let origin = response.rect.min;
                    let local_start = start - origin;
                    let local_end = end - origin;
                    let display_dims = (
                        display_size.x.round().max(1.0) as u32,
                        display_size.y.round().max(1.0) as u32,
                    );

                    let outcome = DisplayMapping::new(
                        (session.image.width, session.image.height),
                        display_dims,
                    )
                    .and_then(|mapping| {
                        let rect = mapping.map_selection(
                            (local_start.x, local_start.y),
                            (local_end.x, local_end.y),
                        );
                        analyze_region(&session.image, rect, &options)
                    });

                    match outcome {
                        Ok(analyzed) => {
                            let masked_texture = ctx.load_texture(
                                "masked_crop",
                                viewer::color_image_from_rgb(&analyzed.masked),
                                Default::default(),
                            );
                            session.result = Some(SessionResult {
                                record: AnalysisRecord::new(
                                    session.path.clone(),
                                    options,
                                    analyzed.report,
                                ),
                                masked_texture,
                                csv_status: None,
                            });
                        }
                        Err(e) => {
                            session.drag.clear();
                            self.error_message = Some(format!("Analysis failed: {}", e));
                        }
                    }
                }
                SelectionEvent::Started
                | SelectionEvent::Dragging
                | SelectionEvent::Cancelled
                | SelectionEvent::None => {}
            }
        }

        // Live selection rectangle, redrawn over the image every frame
        if let Some(rect) = session.drag.rect() {
            ui.painter().rect_stroke(
                rect.intersect(response.rect),
                0.0,
                egui::Stroke::new(2.0, egui::Color32::WHITE),
            );
        }
    }

    fn show_result_window(&mut self, ctx: &egui::Context) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(result) = session.result.as_mut() else {
            return;
        };

        let mut close = false;
        egui::Window::new("Finished Analysis")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                let report = &result.record.report;
                ui.heading(format!("Pixel area: {}", report.pixel_area));
                ui.label(format!(
                    "{} of {} detected objects kept by the {}x{} ROI",
                    report.objects_kept,
                    report.objects_detected,
                    report.roi.width,
                    report.roi.height
                ));
                ui.label(format!(
                    "Crop: {},{} {}x{} (source coordinates)",
                    report.crop.x, report.crop.y, report.crop.width, report.crop.height
                ));
                ui.separator();

                ui.label("Masked crop (background removed):");
                let thumb_size = viewer::fit_display_size(
                    result.masked_texture.size_vec2(),
                    egui::vec2(320.0, 240.0),
                );
                ui.image((result.masked_texture.id(), thumb_size));
                ui.separator();

                ui.horizontal(|ui| {
                    if ui.button("Append to CSV...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("CSV", &["csv"])
                            .set_file_name("results.csv")
                            .save_file()
                        {
                            result.csv_status = match append_csv(&path, &result.record) {
                                Ok(()) => Some(format!("Saved to {}", path.display())),
                                Err(e) => Some(e),
                            };
                        }
                    }
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });

                if let Some(status) = &result.csv_status {
                    ui.label(status);
                }
            });

        if close {
            session.result = None;
            session.drag.clear();
        }
    }

    fn show_controls(&mut self, ui: &mut egui::Ui) {
        ui.collapsing("Thresholding", |ui| {
            ui.label("Value-channel threshold (dark-object polarity):");
            ui.add(egui::Slider::new(&mut self.options.threshold, 0..=255).text("Threshold"));
            ui.label("Minimum region size kept in the mask:");
            ui.add(
                egui::DragValue::new(&mut self.options.fill_min_size)
                    .speed(50)
                    .range(0..=1_000_000),
            );
        });

        ui.collapsing("Region of interest", |ui| {
            ui.label("ROI size, centered in the selection:");
            ui.horizontal(|ui| {
                ui.add(
                    egui::DragValue::new(&mut self.options.roi.width)
                        .speed(1)
                        .range(1..=10_000),
                );
                ui.label("x");
                ui.add(
                    egui::DragValue::new(&mut self.options.roi.height)
                        .speed(1)
                        .range(1..=10_000),
                );
            });

            egui::ComboBox::from_label("ROI mode")
                .selected_text(match self.options.roi.mode {
                    RoiMode::Partial => "partial",
                    RoiMode::Cutto => "cutto",
                })
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.options.roi.mode, RoiMode::Partial, "partial");
                    ui.selectable_value(&mut self.options.roi.mode, RoiMode::Cutto, "cutto");
                });
        });

        if ui.button("Reset to configured defaults").clicked() {
            let defaults = &analysis_config_handle().config.defaults;
            self.options = defaults.to_options();
            self.min_selection_px = defaults.min_selection_px;
        }

        ui.separator();

        if let Some(session) = &self.session {
            ui.label(format!(
                "Original: {}x{}",
                session.image.width, session.image.height
            ));
            ui.label(format!(
                "Display copy: {}x{}",
                session.display.width, session.display.height
            ));
            if let Some(name) = session.path.file_name() {
                ui.label(format!("File: {}", name.to_string_lossy()));
            }
        } else {
            ui.label("Load an image to start a session.");
        }
    }
}
