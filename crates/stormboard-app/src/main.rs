//! Stormboard native entry point.

mod app;
mod canvas;
mod room;

use app::BoardApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // The lookup tables must cover every sticky type before any board
    // is opened.
    if let Err(err) = stormboard_core::config::validate() {
        eprintln!("invalid sticky configuration: {err}");
        std::process::exit(1);
    }

    let room = room::room_from_args(std::env::args().skip(1));
    log::info!("opening board for room {room:?}");

    let title = if room == room::DEFAULT_ROOM {
        "Stormboard".to_string()
    } else {
        format!("Stormboard - {room}")
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title(title),
        ..Default::default()
    };
    eframe::run_native(
        "stormboard",
        options,
        Box::new(move |cc| Ok(Box::new(BoardApp::new(cc, room)))),
    )
}
