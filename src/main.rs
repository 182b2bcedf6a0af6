use anyhow::Result;
use clap::Parser;
use console::{Term, style};
use dirhash::cli::Args;
use dirhash::component::PathComparer;
use dirhash::config::Config;
use dirhash::menu::show_main_menu;
use dirhash::signal::setup_shutdown_signal;
use dirhash::{init, tools::FingerprintError};
use log::{error, info, warn};
use rust_i18n::t;
use std::process::ExitCode;

rust_i18n::i18n!("locales", fallback = "en-US");

const EXIT_DIFFERENT: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    init::init();
    let args = Args::parse();

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<FingerprintError>() {
                Some(FingerprintError::Cancelled) => warn!("Comparison cancelled"),
                Some(err) => error!(
                    "Fingerprint error at {}: {e:#}",
                    err.path().map_or_else(String::new, |p| p.display().to_string())
                ),
                None => error!("Program error: {e:#}"),
            }
            eprintln!("{} {:#}", style(t!("main.error_prefix")).red().bold(), e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let shutdown_signal = setup_shutdown_signal()?;
    let mut config = Config::new();
    rust_i18n::set_locale(args.language(&config.settings).as_str());

    if let (Some(first), Some(second)) = (&args.first, &args.second) {
        let comparer = PathComparer::new(args.compare_options(&config.settings), shutdown_signal);
        let comparison = comparer.run(first, second)?;
        return Ok(if comparison.is_identical() {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(EXIT_DIFFERENT)
        });
    }

    let term = Term::stdout();
    loop {
        match show_main_menu(&term, &shutdown_signal, &mut config) {
            Ok(true) => {}
            Ok(false) => {
                term.clear_screen()?;
                println!("\n{}", style(t!("main.goodbye")).green().bold());
                info!("Program exited normally");
                break;
            }
            Err(e) => {
                warn!("Program error: {e}");
                return Err(e);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
