use clap::{Parser, Subcommand};
use edx_presenter::assemble::{Course, assemble};
use edx_presenter::error::CourseError;
use edx_presenter::group::Group;
use edx_presenter::{archive, config, output};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "edx-presenter")]
#[command(about = "Compile group submissions into an importable edX course")]
#[command(long_about = "\
Compile group submissions into an importable edX course

Every source is a directory holding a group.yaml:

  project: Project A
  group: Group 1
  authors:
    - name: mokaspar
      email: mokaspar@gmail.com
      edx: NotAvailable
  content:
    - pdf: docs/introduction.pdf      # copied to static/, page with viewer + download
    - html: docs/page.html            # copied verbatim
    - text: docs/notes.txt            # wrapped in HTML, line breaks kept
    - img: docs/figure.png            # inline image + download
    - file: docs/data.zip             # download link
    - video: http://www.youtube.com/watch?v=04ZOMuAg2bA
    - source: src/                    # archive + highlighted listings

Projects become chapters and groups become units, both sorted by name. Each
unit starts with an intro listing the authors and ends with a discussion.

Run 'edx-presenter gen-config' to generate a documented course.toml.")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Course settings file (see gen-config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assemble the course and write the import archive
    Build {
        /// Public course URL, enables the inline PDF viewer
        #[arg(short = 'u', long)]
        course_url: Option<String>,

        /// Import archive to write
        #[arg(short, long, default_value = "to_import.tar.gz")]
        output: PathBuf,

        /// Work in this directory and keep it, instead of a throwaway temp dir
        #[arg(long)]
        tmp: Option<PathBuf>,

        /// Where the per-group source archives go
        #[arg(long, default_value = ".")]
        archive_dir: PathBuf,

        /// Group directories
        #[arg(required = true)]
        sources: Vec<PathBuf>,
    },
    /// Load every group and print the course outline without writing anything
    Check {
        /// Group directories
        #[arg(required = true)]
        sources: Vec<PathBuf>,
    },
    /// Print a stock course.toml with all options documented
    GenConfig,
}

/// Scratch space for one build.
///
/// A system temp dir is removed on drop, also when the build fails. A
/// directory passed with `--tmp` is left in place for inspection.
enum Workspace {
    Temporary(TempDir),
    Kept(PathBuf),
}

impl Workspace {
    fn create(tmp: Option<PathBuf>) -> Result<Self, CourseError> {
        match tmp {
            Some(dir) => {
                std::fs::create_dir_all(&dir).map_err(|e| CourseError::io(&dir, e))?;
                warn!(dir = %dir.display(), "keeping working directory");
                Ok(Workspace::Kept(dir))
            }
            None => {
                let dir = TempDir::new().map_err(|e| CourseError::io(std::env::temp_dir(), e))?;
                Ok(Workspace::Temporary(dir))
            }
        }
    }

    fn path(&self) -> &Path {
        match self {
            Workspace::Temporary(dir) => dir.path(),
            Workspace::Kept(dir) => dir.as_path(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Build {
            course_url,
            output: archive_out,
            tmp,
            archive_dir,
            sources,
        } => {
            let config =
                config::load_config(cli.config.as_deref())?.with_course_base_url(course_url)?;
            let workspace = Workspace::create(tmp)?;
            info!(dir = %workspace.path().display(), "working directory");

            println!("==> Loading {} groups", sources.len());
            std::fs::create_dir_all(&archive_dir).map_err(|e| CourseError::io(&archive_dir, e))?;
            let mut groups = Vec::with_capacity(sources.len());
            for source in &sources {
                let group = load_group(source)?;
                let bundle = archive::archive_group(&group, &archive_dir)?;
                info!(bundle = %bundle.display(), "archived group source");
                groups.push(group);
            }
            let course = Course::from_groups(groups);
            output::print_course_outline(&course);

            let root = workspace.path().join(&config.display_name);
            println!("==> Assembling {}", root.display());
            let report = assemble(&course, &root, &config)?;
            output::print_build_report(&report);

            archive::archive_tree(&root, &archive_out)?;
            println!("==> Build complete: {}", archive_out.display());
        }
        Command::Check { sources } => {
            config::load_config(cli.config.as_deref())?;
            let groups = sources
                .iter()
                .map(|source| load_group(source))
                .collect::<Result<Vec<_>, _>>()?;
            output::print_course_outline(&Course::from_groups(groups));
            println!("==> Groups are valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load one source directory as a group.
fn load_group(source: &Path) -> Result<Group, CourseError> {
    if !source.is_dir() {
        return Err(CourseError::manifest(source, "not a local directory"));
    }
    Group::load(source)
}

/// Install the log subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match verbose {
        0 => "edx_presenter=warn",
        1 => "edx_presenter=info",
        _ => "edx_presenter=debug",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
