//! go-web-starter's application entry point.
//! Parses command-line arguments, builds the generation parameters and hands
//! them to the generator.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use go_web_starter::{
    cli::{build_config, get_args, Args, Command, ProjectOptions},
    config::Config,
    constants::APP_NAME,
    generator::{GenerateReport, Generator},
    logger::init_logger,
    renderer::MiniJinjaRenderer,
    templates::{DirTemplates, EmbeddedTemplates},
    version::default_go_version,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::New { output_dir, options } => {
            let config = build_config(&output_dir, &options)?;
            generate(&output_dir, config, &options).context("generate project")?;

            println!("Project generated at {}\n", output_dir.display());
            print_next_steps(&output_dir, true);
        }
        Command::Init { options } => {
            let output_dir = PathBuf::from(".");
            let config = build_config(&output_dir, &options)?;
            generate(&output_dir, config, &options).context("initialize project")?;

            println!("Project initialized in current directory\n");
            print_next_steps(&output_dir, false);
        }
        Command::Version => print_version(),
    }
    Ok(())
}

fn generate(
    output_dir: &Path,
    config: Config,
    options: &ProjectOptions,
) -> go_web_starter::error::Result<GenerateReport> {
    let renderer = MiniJinjaRenderer::new();
    match &options.templates {
        Some(dir) => {
            let source = DirTemplates::new(dir)?;
            Generator::new(&source, &renderer).generate(output_dir, config)
        }
        None => Generator::new(&EmbeddedTemplates, &renderer).generate(output_dir, config),
    }
}

fn print_next_steps(output_dir: &Path, include_cd: bool) {
    println!("Next steps:");
    if include_cd {
        println!("  cd {}", output_dir.display());
    }
    println!("  go mod tidy");
    println!("  # edit config/config.yml");
    println!("  go run ./app/main.go http");
}

fn print_version() {
    println!("AppName:    {APP_NAME}");
    println!("AppVersion: {}", env!("CARGO_PKG_VERSION"));
    println!("GoVersion:  {}", default_go_version());
}
