use clap::Parser;
use log::{error, info};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod build_number;
mod files;
mod header;
mod vcs;

use build_number::BuildNumberStore;
use files::{DiskFiles, FileAccess};
use header::VersionInfo;
use vcs::VcsMetadata;

/// Command line configuration
#[derive(Parser, Debug)]
#[command(author, about, long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_TAG"), ")"))]
struct Config {
    /// File holding the build counter; rewritten on every run
    #[arg(long, default_value = "VERSION")]
    counter_file: PathBuf,

    /// Repository metadata directory to read HEAD and ORIG_HEAD from
    #[arg(long, default_value = ".git")]
    git_dir: PathBuf,

    /// Path of the generated header
    #[arg(long, default_value = "src/version.h")]
    output: PathBuf,

    /// Major and minor version; the build counter is appended to it
    #[arg(long, default_value = "0.1")]
    version_prefix: String,

    /// Print the generated version information as JSON to stdout
    #[arg(long)]
    json: bool,
}

impl Config {
    fn settings(&self) -> Settings<'_> {
        Settings {
            counter_file: &self.counter_file,
            git_dir: &self.git_dir,
            output: &self.output,
            version_prefix: &self.version_prefix,
        }
    }
}

struct Settings<'a> {
    counter_file: &'a Path,
    git_dir: &'a Path,
    output: &'a Path,
    version_prefix: &'a str,
}

/// Advances the build counter, then regenerates the version header.
///
/// The counter is persisted before the repository metadata is read, so a
/// run that fails on missing metadata still consumes a build number.
fn run(files: &dyn FileAccess, settings: &Settings) -> anyhow::Result<VersionInfo> {
    let build_number = BuildNumberStore::new(settings.counter_file).bump(files)?;

    let vcs = VcsMetadata::new(settings.git_dir);
    let branch = vcs.branch_name(files)?;
    let commit_ref = vcs.commit_ref(files)?;

    let info = VersionInfo::new(settings.version_prefix, build_number, commit_ref, branch);
    info.write(files, settings.output)?;
    info!("Wrote {:?}: {}", settings.output, info.full_version());

    Ok(info)
}

fn real_main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_line_number(true)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();

    info!("Configuration: {config:?}");

    let info = run(&DiskFiles::new("."), &config.settings())?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    }

    Ok(())
}

fn main() -> std::process::ExitCode {
    match real_main() {
        Ok(()) => std::process::ExitCode::from(0),
        Err(err) => {
            error!("{err:#}");
            std::process::ExitCode::from(10)
        }
    }
}
