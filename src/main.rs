// What you SEE now:
// • A toolbar strip (PEN / ERASER / SELECT, size slider, palette, CLEAR, SAVE).
// • A white canvas below it. Hold Left Mouse on the canvas to draw.
// • P/E/S switch tools, [ and ] change brush size, 1-7 pick a colour.
// • C clears the canvas, X saves it as a PNG. ESC quits.

use clap::Parser;
use sketchpad::app::App;
use sketchpad::config::{CanvasConfig, CliArgs};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Set `RUST_LOG` to control log levels (default: sketchpad=debug).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sketchpad=debug"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry().with(filter).with(fmt_layer.json()).init();
    } else {
        tracing_subscriber::registry().with(filter).with(fmt_layer).init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = CanvasConfig::try_from(args)?;
    tracing::info!(
        "Canvas {}x{} background {} pen {} {}px",
        config.width,
        config.height,
        config.background,
        config.tools.color,
        config.tools.brush_size.get()
    );

    App::new(&config)?.run()?;
    Ok(())
}
