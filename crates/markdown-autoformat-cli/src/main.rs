use anyhow::{Context, Result, bail};
use markdown_autoformat_config::Config;
use markdown_autoformat_engine::markdown::convert_from_plain_text;
use std::{
    env,
    io::{self, Read},
    path::PathBuf,
    process,
};

const USAGE: &str = "Usage: markdown-autoformat [--json] [--config <config.toml>] [file | -]";

#[derive(Debug, Default)]
struct Args {
    json: bool,
    config_path: Option<PathBuf>,
    input: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => parsed.json = true,
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                parsed.config_path = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                process::exit(0);
            }
            "-" => parsed.input = None,
            flag if flag.starts_with("--") => bail!("Unknown option '{flag}'"),
            path => {
                if parsed.input.is_some() {
                    bail!("Only one input file can be given");
                }
                parsed.input = Some(PathBuf::from(path));
            }
        }
    }

    Ok(parsed)
}

fn load_config(args: &Args) -> Result<Config> {
    let Some(path) = &args.config_path else {
        log::debug!("Config path: {}", Config::config_path().display());
        return Ok(Config::load()?.unwrap_or_default());
    };

    let path = Config::expand_path(path).unwrap_or_else(|| path.clone());
    match Config::load_from_path(&path)? {
        Some(config) => Ok(config),
        None => bail!("Config file '{}' does not exist", path.display()),
    }
}

fn read_input(args: &Args) -> Result<String> {
    match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let text = read_input(&args)?;

    let document = convert_from_plain_text(&text, &config.to_options())?;
    log::info!(
        "Converted {} bytes into {} blocks",
        text.len(),
        document.as_ref().map_or(0, |doc| doc.len())
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else if let Some(document) = document {
        println!("{}", document.outline());
    }

    Ok(())
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
