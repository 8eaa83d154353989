#![warn(clippy::all, rust_2018_idioms)]

fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Banner Studio")
            .with_inner_size([1400.0, 900.0]),
        ..Default::default()
    };
    eframe::run_native(
        "banner_studio",
        native_options,
        Box::new(|cc| Ok(Box::new(banner_studio::BannerApp::new(cc)))),
    )
}
