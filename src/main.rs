use anyhow::Result;
use lerp_sketches::{app::App, config::Config};
use log::{info, warn};

fn main() -> Result<()> {
    env_logger::init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Could not load config ({:#}), using defaults", e);
            Config::default()
        }
    };
    info!("Starting {:?} sketch", config.scene);

    let mut app = App::new(config);
    app.run()?;

    Ok(())
}
