use anyhow::{Context, Result};
use chaser_cli::{Args, HeadlessRunner};
use clap::Parser;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("Chaser fleet starting...");
    log::info!("Surface: {}x{}", args.width, args.height);
    log::info!("Cycles: {} ({} chasers)", args.cycles, args.cycles * 3);
    log::info!("Velocity: {}", args.velocity);

    let mut runner = HeadlessRunner::new(args.width, args.height, args.cycles, args.velocity)
        .context("Failed to initialize runner")?;

    runner.run(args.frames, |_| true);

    let status = runner.status();
    log::info!(
        "Done: {} frames, {} captures across {} chasers",
        status.frames,
        status.captures,
        status.chaser_count
    );

    if args.snapshot {
        let json = serde_json::to_string(&runner.snapshot())
            .context("Failed to serialize snapshot")?;
        println!("{}", json);
    }

    Ok(())
}
