// What you SEE now:
// • A window with a white drawing surface that follows the window size.
// • Hold Left Mouse to paint; E switches to the eraser, B back to the brush.
// • C clears, S saves drawing.png into the export dir. ESC quits.
//
// RUST_LOG=debug shows every resize; DOODLE_PAD_CONFIG points at a settings file.

use doodle_pad::Error;
use doodle_pad::app;
use doodle_pad::config::Settings;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load(Settings::locate().as_deref())?;
    app::run(&settings)
}
