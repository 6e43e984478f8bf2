use clap::Parser;
use log::{error, info};
use std::env;
use std::process::Command;

use reosnap::cameras::fetcher::HttpSnapshotFetcher;
use reosnap::configuration::config::{Args, Config};
use reosnap::scheduler::poll_scheduler::PollScheduler;

fn show_license() {
    println!("\n**************************************************");
    println!("\"reosnap\": Save live snapshots of Reolink camera feeds");
    println!("This program comes with ABSOLUTELY NO WARRANTY");
    println!("This is free software, and you are welcome to redistribute it");
    println!("under the conditions of the GNU General Public License v3.0");
    println!("**************************************************\n");
}

/// Re-invoke the current binary with the parsed arguments minus the detach
/// flag, leaving the child to run the loop on its own.
fn detach(args: &Args) -> std::io::Result<()> {
    let exe = env::current_exe()?;
    let child = Command::new(exe).args(args.relaunch_argv()).spawn()?;
    info!("Detached into process {}", child.id());
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.license {
        show_license();
        return;
    }

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_target(false)
        .init();

    if args.detach {
        if let Err(e) = detach(&args) {
            error!("Could not detach: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let fetcher = HttpSnapshotFetcher::new();
    let mut scheduler = PollScheduler::new(&config, fetcher);
    scheduler.run().await;
}
