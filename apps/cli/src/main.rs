mod config;
mod display;
mod main_lib;

use config::Config;
use main_lib::{build_report, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let report = build_report(&config).await?;
    print!("{}", display::render_report(&report));
    Ok(())
}
