use std::env;
use std::path::PathBuf;

use log::{info, warn};

use kobo_anki::fbink::{FbinkSink, detect_screen, find_fbink};
use kobo_anki::scheduler::FsrsScheduler;
use kobo_anki::touch::{EvdevTouch, find_touch_device};
use kobo_anki_core::cards::CsvDeckStore;
use kobo_anki_core::config::{CORE_CONFIG_FILE, CoreConfig, UiConfig};
use kobo_anki_core::display::Compositor;
use kobo_anki_core::input::AxisTransform;
use kobo_anki_core::screens::ScreenManager;

fn init_logging() {
    // DEBUG=1 is what the launcher scripts set; RUST_LOG still wins
    let default_filter = if env::var("DEBUG").is_ok_and(|v| v == "1") {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() {
    init_logging();
    info!("Starting kobo-anki");

    let fbink = find_fbink();
    info!("Using {}", fbink.display());

    let core_config = CoreConfig::load(CORE_CONFIG_FILE);
    let scheduler = FsrsScheduler::new(&core_config);

    let ui_config = UiConfig::load(&UiConfig::search_paths(&core_config.data_dir));
    let screen = detect_screen(&fbink);

    // A data directory on the command line beats the config file
    let data_dir = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| core_config.data_dir.clone());
    info!("Decks from {}", data_dir.display());

    let transform = AxisTransform::for_screen(screen);
    let touch_path = find_touch_device();
    let mut touch = match EvdevTouch::open(touch_path.clone(), transform) {
        Ok(touch) => touch,
        Err(e) => {
            warn!("{e}, touch input disabled");
            EvdevTouch::disconnected(touch_path, transform)
        }
    };
    if let Err(e) = touch.grab() {
        warn!("Could not grab touch device, sharing it: {e}");
    }

    let sink = FbinkSink::new(fbink, Compositor::from_config(&ui_config, screen));
    let mut manager = ScreenManager::new(
        sink,
        touch,
        CsvDeckStore::new(data_dir),
        scheduler,
        ui_config,
        screen,
    )
    .with_reverse(core_config.reverse);

    manager.start();
    manager.run();

    let (_, mut touch) = manager.into_parts();
    touch.release();
    info!("Bye");
}
