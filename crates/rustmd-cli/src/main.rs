use anyhow::{Context, Result};
use rustmd_config::{Config, ConfigError};
use rustmd_engine::io;
use rustmd_preview::{
    ActiveDocument, Disposable, PageOptions, PanelRegistry, PanelSettings, PreviewPanel,
    ViewColumn,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::{env, process};

mod watch;

#[derive(Debug, PartialEq, Eq)]
struct Args {
    document: PathBuf,
    output: Option<PathBuf>,
    watch: bool,
    debug: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(Args),
    Help,
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut document = None;
    let mut output = None;
    let mut watch = false;
    let mut debug = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-w" | "--watch" => watch = true,
            "--debug" => debug = true,
            "-o" | "--output" => {
                let value = iter
                    .next()
                    .ok_or_else(|| format!("{arg} requires a file argument"))?;
                output = Some(PathBuf::from(value));
            }
            flag if flag.starts_with('-') => return Err(format!("Unknown option '{flag}'")),
            path => {
                if document.is_some() {
                    return Err(format!("Unexpected extra argument '{path}'"));
                }
                document = Some(PathBuf::from(path));
            }
        }
    }

    let document = document.ok_or_else(|| "No document provided".to_string())?;
    // Pages are written whole on every refresh; stdout would get them concatenated
    if watch && output.is_none() {
        return Err("--watch requires --output <file>".to_string());
    }
    Ok(Command::Run(Args {
        document,
        output,
        watch,
        debug,
    }))
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [--debug] [--output <file>] <document>\n       {program} --watch --output <file> [--debug] <document>"
    )
}

fn panel_settings(config: &Config, debug: bool) -> PanelSettings {
    let mut render = config.render_options();
    render.debug_highlighting |= debug;

    PanelSettings {
        render,
        page: PageOptions {
            stylesheets: config
                .stylesheets
                .iter()
                .map(|path| path.to_string_lossy().into_owned())
                .collect(),
            ..PageOptions::default()
        },
        debounce: config.debounce(),
        ..PanelSettings::default()
    }
}

fn load_document(path: &Path) -> Result<ActiveDocument> {
    let text = io::read_document(path)
        .with_context(|| format!("Failed to read document '{}'", path.display()))?;
    Ok(ActiveDocument::new(path, text))
}

fn emit(panel: &PreviewPanel, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            io::write_page(path, panel.html())
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            log::info!("Wrote preview to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(panel.html().as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Loads the config file, writing the defaults there on first run.
fn load_or_init_config(config_path: &Path) -> Result<Config, ConfigError> {
    if let Some(config) = Config::load_from_path(config_path)? {
        log::info!("Loaded config from {}", config_path.display());
        return Ok(config);
    }

    let config = Config::default();
    match config.save_to_path(config_path) {
        Ok(()) => log::info!(
            "Created default config file at {}",
            config_path.display()
        ),
        Err(e) => {
            log::warn!("Failed to create default config file: {e}");
            log::warn!("Will use default settings without persisting config");
        }
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("rustmd-cli");

    let args = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            println!("{}", usage(program));
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{}", usage(program));
            process::exit(1);
        }
    };

    let config = match load_or_init_config(&Config::config_path()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let document = load_document(&args.document)?;

    let mut registry = PanelRegistry::new();
    let panel = registry.create_or_reveal(ViewColumn::ONE, Some(&document), || {
        panel_settings(&config, args.debug)
    });
    emit(panel, args.output.as_deref())?;

    if args.watch
        && let Some(output) = args.output.as_deref()
    {
        let path = args.document.display().to_string();
        panel.register(Disposable::new("file watcher", move || {
            log::info!("Stopped watching {path}");
        }));
        watch::run(panel, document, output)?;
    }

    Ok(())
}
