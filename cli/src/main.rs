use clap::Parser;
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use obj_interleave::convert::{self, convert_file, Config};
use obj_interleave::prelude::ConfigType;

#[derive(Parser)]
#[command(name = "obj-interleave")]
#[command(about = "Converts an obj model into a single interleaved vertex and index buffer, written through a text template")]
struct Cli {
    /// Model name without the .obj extension (prompted for when omitted)
    name: Option<String>,

    /// Template file
    #[arg(short, long, default_value = "template")]
    template: PathBuf,

    /// Output name without the .xml extension
    #[arg(short, long)]
    output: Option<String>,

    /// Print a JSON summary of the converted mesh
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let cfg = Config::default().with_template_path(cli.template.clone());

    match cli.name.clone() {
        Some(name) => {
            warn_if_template_missing(&cfg);
            let result = run(&cli, &cfg, &name);
            println!();
            result
        }
        None => run_interactive(&cli, &cfg),
    }
}

/// Prompts for a model name until a conversion succeeds.
fn run_interactive(cli: &Cli, cfg: &Config) -> Result<()> {
    loop {
        warn_if_template_missing(cfg);
        let name = prompt("Enter the name of model to process (without .obj): ")?;
        let result = run(cli, cfg, &name);
        if let Err(e) = &result {
            match e.downcast_ref::<convert::Err>() {
                Some(convert::Err::MissingInputFile(_)) => {
                    println!("File cannot be found in this folder, check spelling and try again.");
                }
                _ => println!("{:#}", e),
            }
        }
        println!();
        if result.is_ok() {
            return Ok(());
        }
    }
}

fn run(cli: &Cli, cfg: &Config, name: &str) -> Result<()> {
    let output = match &cli.output {
        Some(output) => Some(output.clone()),
        None if cfg.output_path(name).exists() => {
            let answer = prompt(&format!(
                "File {} already exists, choose a name (or press Enter if you want to overwrite): ",
                cfg.output_path(name).display()
            ))?;
            (!answer.is_empty()).then_some(answer)
        }
        None => None,
    };

    let conversion = convert_file(name, output.as_deref(), cfg)?;

    if cli.stats {
        let stats = serde_json::to_string_pretty(&conversion.stats)
            .context("Failed to serialize mesh statistics")?;
        println!("{}", stats);
    }
    println!("Finished writing to {}.", conversion.output.display());
    Ok(())
}

fn warn_if_template_missing(cfg: &Config) {
    if !cfg.get_template_path().is_file() {
        println!(
            "Template file is missing, make sure it's in the same directory \
             as this script and start again."
        );
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)
        .context("Failed to read from stdin")?;
    if read == 0 {
        anyhow::bail!("No input available on stdin");
    }
    Ok(line.trim().to_string())
}
