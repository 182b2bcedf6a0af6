use crate::component::PathComparer;
use crate::component::path_comparer::CompareOptions;
use crate::config::Config;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use rust_i18n::t;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn run_path_comparer(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let comparer = PathComparer::new(
        CompareOptions::from_settings(&config.settings),
        Arc::clone(shutdown_signal),
    );

    if let Err(e) = comparer.run_interactive(config) {
        eprintln!("{} {:#}", style(t!("main.error_prefix")).red().bold(), e);
    }

    pause(term)?;
    Ok(())
}
