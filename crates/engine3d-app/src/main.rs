use engine3d::logging::{init_logging, LoggingConfig};
use engine3d::EngineConfig;

fn main() {
    init_logging(LoggingConfig::default());

    log::info!("controls: mouse to look, P/O perspective/orthographic, F fullscreen, Esc quit");

    if let Err(err) = engine3d::run(EngineConfig::default()) {
        log::error!("engine3d failed: {err:#}");
        std::process::exit(1);
    }
}
