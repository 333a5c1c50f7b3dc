use anyhow::Context;
use app::DemoModel;
use clap::Parser;
use relm4::prelude::*;
use roundnav::config;
use roundnav::sys::runtime;

mod app;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Initial arc radius, overriding the config file
    #[arg(short, long)]
    radius: Option<f64>,

    /// Write the default config file if it does not exist and print its path
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.write_config {
        let path = config::write_default_config().context("Failed to write default config")?;
        println!("{}", path.display());
        return Ok(());
    }

    let mut config = config::load_or_default();
    if let Some(radius) = args.radius {
        config.radius = radius;
    }

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    // clap already consumed the arguments; keep GTK from parsing them again
    let app = RelmApp::new("org.snuffix.roundnav").with_args(Vec::new());
    app.run::<DemoModel>((config, rx));
    Ok(())
}
