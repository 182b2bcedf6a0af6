use crate::config::save::save_settings;
use crate::config::types::{Config, Language, validate_workers};
use crate::menu::handlers::run_path_comparer;
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use rust_i18n::t;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn show_main_menu(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style(t!("main_menu.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let options = vec![
        t!("main_menu.opt_compare"),
        t!("main_menu.opt_settings"),
        t!("main_menu.exit"),
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("main_menu.prompt"))
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => {
            run_path_comparer(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(1) => {
            show_settings_menu(term, config)?;
            Ok(true)
        }
        Some(2) | None => Ok(false),
        _ => unreachable!(),
    }
}

/// 設定選單
fn show_settings_menu(term: &Term, config: &mut Config) -> Result<()> {
    loop {
        term.clear_screen()?;

        println!("{}", style(t!("settings.title")).cyan().bold());
        println!("{}", style(t!("common.esc_hint")).dim());

        let options = vec![
            t!("settings.opt_workers"),
            t!("settings.opt_color"),
            t!("settings.opt_language"),
            t!("settings.back"),
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("settings.prompt"))
            .items(&options)
            .default(0)
            .interact_on_opt(term)?;

        match selection {
            Some(0) => show_workers_menu(term, config)?,
            Some(1) => show_color_menu(term, config)?,
            Some(2) => show_language_menu(term, config)?,
            Some(3) | None => break,
            _ => unreachable!(),
        }
    }

    Ok(())
}

fn show_workers_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.workers.title")).cyan().bold());
    println!(
        "\n{} {}",
        style(t!("settings.current")).dim(),
        config.settings.workers
    );
    println!();

    let workers: usize = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.workers.prompt"))
        .default(config.settings.workers)
        .validate_with(|input: &usize| validate_workers(*input).map(|_| ()))
        .interact_text_on(term)?;

    if workers != config.settings.workers {
        config.settings.workers = workers;
        save_settings(&config.settings)?;
        println!("\n{}", style(t!("settings.saved")).green());
        crate::pause(term)?;
    }

    Ok(())
}

fn show_color_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.color.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let items = [t!("settings.color.on"), t!("settings.color.off")];
    let default_index = usize::from(!config.settings.color);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.color.prompt"))
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    let Some(selection) = selection else {
        return Ok(());
    };

    let color = selection == 0;
    if color != config.settings.color {
        config.settings.color = color;
        save_settings(&config.settings)?;
        println!("\n{}", style(t!("settings.saved")).green());
        crate::pause(term)?;
    }

    Ok(())
}

fn show_language_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.language.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let languages = Language::ALL;
    let items: Vec<String> = languages.iter().map(ToString::to_string).collect();

    let default_index = languages
        .iter()
        .position(|&l| l == config.settings.language)
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.language.prompt"))
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    let Some(selection) = selection else {
        return Ok(());
    };

    let selected_lang = languages[selection];
    if selected_lang != config.settings.language {
        config.settings.language = selected_lang;
        rust_i18n::set_locale(selected_lang.as_str());
        save_settings(&config.settings)?;
        println!("\n{}", style(t!("settings.saved")).green());
        crate::pause(term)?;
    }

    Ok(())
}
