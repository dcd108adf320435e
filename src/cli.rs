//! Command-line interface implementation for go-web-starter.
//! Provides argument parsing with clap and turns the parsed options into a
//! [`Config`] for the generator.

use std::env;
use std::path::{Component, Path, PathBuf};

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};

use crate::config::{parse_db_flag, Config, Feature};
use crate::constants::DEFAULT_DB_FLAG;
use crate::error::{Error, Result};

/// Command-line arguments structure for go-web-starter.
#[derive(Parser, Debug)]
#[command(author, version, about = "go-web-starter: generate ready-to-use Go web projects", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a new web project from template
    New {
        /// Directory where the generated project will be created
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,

        #[command(flatten)]
        options: ProjectOptions,
    },
    /// Initialize a project in current directory (.git allowed)
    Init {
        #[command(flatten)]
        options: ProjectOptions,
    },
    /// Show starter version information
    Version,
}

/// Options shared by `new` and `init`.
#[derive(clap::Args, Debug, Clone)]
pub struct ProjectOptions {
    /// Go module path (default: example.com/<directory-name>)
    #[arg(short, long)]
    pub module: Option<String>,

    /// Binary name (default: inferred from directory name)
    #[arg(short, long)]
    pub binary: Option<String>,

    /// Database engines: mysql, mongodb, or mysql,mongodb
    #[arg(long, default_value = DEFAULT_DB_FLAG)]
    pub db: String,

    /// Go version written to go.mod (default: local toolchain version)
    #[arg(long)]
    pub go_version: Option<String>,

    /// Read templates from this directory instead of the bundled ones
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 and the help text if a subcommand or required
///   argument is missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::MissingSubcommand
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}

/// Builds the generation parameters for a project in `output_dir`.
///
/// The project name comes from the directory name, the module defaults to
/// `example.com/<project>` and the binary to the project name.
pub fn build_config(output_dir: &Path, options: &ProjectOptions) -> Result<Config> {
    let project_name = infer_project_name(output_dir)?;

    let module_name = match options.module.as_deref().map(str::trim) {
        Some(module) if !module.is_empty() => module.to_string(),
        _ => default_module_name(&project_name),
    };
    let binary_name = match options.binary.as_deref().map(str::trim) {
        Some(binary) if !binary.is_empty() => binary.to_string(),
        _ => project_name.clone(),
    };
    let (mysql, mongodb) = parse_db_flag(&options.db)?;

    Ok(Config::new(module_name, binary_name, project_name)
        .with_go_version(options.go_version.clone().unwrap_or_default())
        .with_feature(Feature::Mysql, mysql)
        .with_feature(Feature::Mongodb, mongodb))
}

/// Derives the project name from the last component of `output_dir`, or from
/// the current directory when `output_dir` is `.`.
pub fn infer_project_name(output_dir: &Path) -> Result<String> {
    let cleaned = clean_path(output_dir);
    if cleaned == Path::new(".") {
        let cwd = env::current_dir()
            .map_err(|e| Error::io("resolve current directory", output_dir, e))?;
        return sanitize_derived_project_name(base_name(&cwd), &cwd);
    }

    sanitize_derived_project_name(base_name(&cleaned), &cleaned)
}

fn sanitize_derived_project_name(name: &str, source: &Path) -> Result<String> {
    let name = name.trim();
    if name.is_empty() || name == "." || name == ".." {
        return Err(Error::validation(
            "project",
            format!(
                "cannot infer project name from {:?}: use a non-root/non-dot output directory",
                source.display().to_string()
            ),
        ));
    }
    if name.contains(['/', '\\']) {
        return Err(Error::validation(
            "project",
            format!(
                "cannot infer project name from {:?}: derived name {:?} is invalid",
                source.display().to_string(),
                name
            ),
        ));
    }
    Ok(name.to_string())
}

pub fn default_module_name(project_name: &str) -> String {
    format!("example.com/{project_name}")
}

fn base_name(path: &Path) -> &str {
    match path.components().next_back() {
        Some(Component::Normal(name)) => name.to_str().unwrap_or(""),
        Some(Component::ParentDir) => "..",
        Some(Component::CurDir) => ".",
        _ => "",
    }
}

/// Lexically removes `.` components and resolves `..` where possible.
fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => cleaned.push(".."),
            },
            other => cleaned.push(other.as_os_str()),
        }
    }
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}
