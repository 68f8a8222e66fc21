use catalog_cleaner::cli::*;
use clap::Parser;
use log::*;
use std::process::exit;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let result = match &args.command {
        Some(Command::Fetch { url, out }) => fetch(url, out),
        None => run(&args).map(|courses| println!("{}", courses.summary())),
    };

    if let Err(e) = result {
        error!("{}", e);
        exit(1);
    }
}
