use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError, channel};
use std::time::Duration;

use egui::{Rect, Vec2, vec2};
use log::{error, info, warn};

use crate::config::ServiceConfig;
use crate::editor::Editor;
use crate::element::ElementId;
use crate::file_handler::FileHandler;
use crate::panels;
use crate::panels::generate_panel::GenerateForm;
use crate::renderer::Renderer;
use crate::services::{
    BannerClient, EnhanceImage as _, FetchImage as _, GenerateBanner as _, ServiceError,
};
use crate::tools::{ImageSource, ToolDispatcher};

/// HD export renders the canvas at twice its on-screen resolution.
const EXPORT_MULTIPLIER: u32 = 2;

const MIN_ZOOM: f32 = 0.1;
const ZOOM_STEP: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum JobKind {
    Generate,
    Enhance,
    Fetch,
}

pub(crate) enum JobResult {
    Generated(Result<Vec<u8>, ServiceError>),
    Enhanced {
        old_id: ElementId,
        result: Result<Vec<u8>, ServiceError>,
    },
    Fetched(Result<Vec<u8>, ServiceError>),
}

pub(crate) struct PendingJob {
    kind: JobKind,
    rx: Receiver<JobResult>,
}

/// An in-progress drag of the active element, previewed without mutating
/// the document until the pointer is released.
pub(crate) struct DragState {
    pub id: ElementId,
    pub delta: Vec2,
}

pub struct BannerApp {
    pub(crate) editor: Editor,
    pub(crate) dispatcher: ToolDispatcher,
    pub(crate) renderer: Renderer,
    pub(crate) client: Arc<BannerClient>,
    pub(crate) form: GenerateForm,
    pub(crate) file_handler: FileHandler,

    // "Image from URL" input in the tools panel
    pub(crate) image_url: String,

    // Canvas view state
    pub(crate) canvas_size: Vec2,
    pub(crate) zoom: f32,
    pub(crate) drag: Option<DragState>,
    pub(crate) canvas_screen_rect: Rect,

    // Background service calls and one-shot status toast
    jobs: Vec<PendingJob>,
    export_pending: bool,
    pub(crate) status: Option<String>,
}

impl BannerApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = ServiceConfig::from_env();
        info!("banner backend at {}", config.base_url);
        let client = Arc::new(BannerClient::new(&config));

        // Log backend reachability once at startup.
        let probe = Arc::clone(&client);
        std::thread::spawn(move || match probe.health_check() {
            Ok(()) => info!("banner backend is reachable"),
            Err(err) => warn!("banner backend health check failed: {err}"),
        });

        Self {
            editor: Editor::new(),
            dispatcher: ToolDispatcher::new(),
            renderer: Renderer::new(),
            client,
            form: GenerateForm::default(),
            file_handler: FileHandler::new(),
            image_url: "https://via.placeholder.com/300".to_owned(),
            canvas_size: vec2(1200.0, 400.0),
            zoom: 1.0,
            drag: None,
            canvas_screen_rect: Rect::ZERO,
            jobs: Vec::new(),
            export_pending: false,
            status: None,
        }
    }

    pub(crate) fn is_busy(&self, kind: JobKind) -> bool {
        self.jobs.iter().any(|job| job.kind == kind)
    }

    /// Posts the current form to the generation service on a worker
    /// thread; the finished banner lands on the canvas.
    pub(crate) fn start_generate(&mut self) {
        let request = match self.form.to_request() {
            Ok(request) => request,
            Err(message) => {
                self.status = Some(message);
                return;
            }
        };
        let client = Arc::clone(&self.client);
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let result = client.generate(&request);
            let _ = tx.send(JobResult::Generated(result));
        });
        self.jobs.push(PendingJob {
            kind: JobKind::Generate,
            rx,
        });
    }

    /// Submits the active image to the enhancement service. The reply is
    /// applied whenever it arrives, even if the document changed meanwhile.
    pub(crate) fn start_enhance(&mut self) {
        let job = match self.dispatcher.begin_enhance(&self.editor) {
            Ok(job) => job,
            Err(err) => {
                self.status = Some(err.to_string());
                return;
            }
        };
        let client = Arc::clone(&self.client);
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let result = client.enhance_image(&job.data);
            let _ = tx.send(JobResult::Enhanced {
                old_id: job.id,
                result,
            });
        });
        self.jobs.push(PendingJob {
            kind: JobKind::Enhance,
            rx,
        });
    }

    /// Fetches a remote image on a worker thread and adds it to the
    /// canvas when it arrives.
    pub(crate) fn start_fetch_image(&mut self, url: String) {
        let client = Arc::clone(&self.client);
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let result = client.fetch_image(&url);
            let _ = tx.send(JobResult::Fetched(result));
        });
        self.jobs.push(PendingJob {
            kind: JobKind::Fetch,
            rx,
        });
    }

    fn poll_jobs(&mut self) {
        let mut finished = Vec::new();
        self.jobs.retain(|job| match job.rx.try_recv() {
            Ok(result) => {
                finished.push(Ok(result));
                false
            }
            Err(TryRecvError::Empty) => true,
            Err(TryRecvError::Disconnected) => {
                finished.push(Err(job.kind));
                false
            }
        });

        for outcome in finished {
            match outcome {
                Ok(JobResult::Generated(Ok(bytes))) => {
                    match self.dispatcher.add_image(
                        &mut self.editor,
                        ImageSource::Bytes(bytes),
                        &*self.client,
                        self.canvas_size,
                    ) {
                        Ok(_) => self.status = Some("Banner added to the canvas".to_owned()),
                        Err(err) => {
                            warn!("generated banner was unusable: {err}");
                            self.status = Some(format!("Failed to generate banner: {err}"));
                        }
                    }
                }
                Ok(JobResult::Generated(Err(err))) => {
                    warn!("generation failed: {err}");
                    self.status = Some(format!("Failed to generate banner: {err}"));
                }
                Ok(JobResult::Enhanced {
                    old_id,
                    result: Ok(bytes),
                }) => match self.dispatcher.finish_enhance(
                    &mut self.editor,
                    old_id,
                    bytes,
                    self.canvas_size,
                ) {
                    Ok(_) => self.status = Some("Image enhanced".to_owned()),
                    Err(err) => {
                        warn!("enhancement result was unusable: {err}");
                        self.status = Some(format!("Failed to enhance image: {err}"));
                    }
                },
                Ok(JobResult::Enhanced {
                    result: Err(err), ..
                }) => {
                    warn!("enhancement failed: {err}");
                    self.status = Some(format!("Failed to enhance image: {err}"));
                }
                Ok(JobResult::Fetched(Ok(bytes))) => {
                    match self.dispatcher.add_image(
                        &mut self.editor,
                        ImageSource::Bytes(bytes),
                        &*self.client,
                        self.canvas_size,
                    ) {
                        Ok(_) => self.status = Some("Image added to the canvas".to_owned()),
                        Err(err) => {
                            warn!("fetched image was unusable: {err}");
                            self.status = Some(format!("Could not add image: {err}"));
                        }
                    }
                }
                Ok(JobResult::Fetched(Err(err))) => {
                    warn!("image fetch failed: {err}");
                    self.status = Some(format!("Could not add image: {err}"));
                }
                Err(kind) => {
                    error!("{kind:?} worker dropped without a result");
                    self.status = Some("Background task failed".to_owned());
                }
            }
        }
    }

    /// Requests a frame screenshot; the cropped canvas region is written
    /// out when the event comes back.
    pub(crate) fn start_export(&mut self, ctx: &egui::Context) {
        if !self.editor.premium() {
            self.status = Some("Subscribe to unlock HD export!".to_owned());
            return;
        }
        self.export_pending = true;
        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
    }

    fn handle_screenshot(&mut self, ctx: &egui::Context) {
        if !self.export_pending {
            return;
        }
        let screenshot = ctx.input(|i| {
            i.raw.events.iter().find_map(|event| match event {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(screenshot) = screenshot else {
            return;
        };
        self.export_pending = false;

        let canvas = crop_screenshot(
            &screenshot,
            self.canvas_screen_rect,
            ctx.pixels_per_point(),
        );
        let hd = image::imageops::resize(
            &canvas,
            canvas.width() * EXPORT_MULTIPLIER,
            canvas.height() * EXPORT_MULTIPLIER,
            image::imageops::FilterType::CatmullRom,
        );

        let Some(path) = rfd::FileDialog::new()
            .set_file_name("banner-hd.png")
            .add_filter("PNG image", &["png"])
            .save_file()
        else {
            self.status = Some("Export cancelled".to_owned());
            return;
        };
        match hd.save(&path) {
            Ok(()) => {
                info!("exported HD banner to {}", path.display());
                self.status = Some(format!("Exported to {}", path.display()));
            }
            Err(err) => {
                error!("export failed: {err}");
                self.status = Some(format!("Export failed: {err}"));
            }
        }
    }

    pub(crate) fn zoom_in(&mut self) {
        self.zoom += ZOOM_STEP;
    }

    pub(crate) fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
    }

    pub(crate) fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        self.file_handler.preview_files_being_dropped(ctx);
        for bytes in self.file_handler.take_dropped_images(ctx) {
            if let Err(err) = self.dispatcher.add_image(
                &mut self.editor,
                ImageSource::Bytes(bytes),
                &*self.client,
                self.canvas_size,
            ) {
                warn!("dropped file rejected: {err}");
                self.status = Some(format!("Could not add image: {err}"));
            }
        }
    }
}

impl eframe::App for BannerApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_jobs();
        self.handle_screenshot(ctx);
        self.handle_dropped_files(ctx);

        panels::top_bar(self, ctx);
        panels::generate_panel::generate_panel(self, ctx);
        panels::tools_panel::tools_panel(self, ctx);
        panels::layers_panel::layers_panel(self, ctx);
        panels::central_panel::central_panel(self, ctx);

        if !self.jobs.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

/// Cuts the canvas region out of a full-window screenshot.
fn crop_screenshot(image: &egui::ColorImage, rect: Rect, pixels_per_point: f32) -> image::RgbaImage {
    let [img_w, img_h] = image.size;
    let x0 = ((rect.min.x * pixels_per_point).round().max(0.0) as usize).min(img_w);
    let y0 = ((rect.min.y * pixels_per_point).round().max(0.0) as usize).min(img_h);
    let x1 = ((rect.max.x * pixels_per_point).round().max(0.0) as usize).min(img_w);
    let y1 = ((rect.max.y * pixels_per_point).round().max(0.0) as usize).min(img_h);
    let (w, h) = (x1.saturating_sub(x0), y1.saturating_sub(y0));

    let mut out = image::RgbaImage::new(w.max(1) as u32, h.max(1) as u32);
    for y in 0..h {
        for x in 0..w {
            let px = image.pixels[(y0 + y) * img_w + x0 + x];
            out.put_pixel(x as u32, y as u32, image::Rgba(px.to_srgba_unmultiplied()));
        }
    }
    out
}
