//! AppBuild CLI - lint, bundle and assemble a web application.

use anyhow::Result;
use appbuild_core::BuildType;
use appbuild_pipeline::{BuildRunner, Toolchain};
use appbuild_storage::JsonStore;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "appbuild")]
#[command(about = "Build the web application described by AppBuilder.json", long_about = None)]
#[command(version)]
struct Cli {
    /// Build type; only tasks of this type run (e.g. debug, release)
    #[arg(long = "type", value_name = "TYPE")]
    build_type: Option<BuildType>,
}

fn init_logging() {
    // Progress and diagnostics go to stderr, never stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version print and succeed; usage errors fail the build
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    init_logging();

    let root = std::env::current_dir()?;
    let runner = BuildRunner::new(JsonStore::new(&root), Toolchain::npx(&root), cli.build_type);
    let report = runner.run().await;

    tracing::debug!(
        "{} task(s) built, {} skipped",
        report.tasks_built,
        report.tasks_skipped
    );
    std::process::exit(report.exit_code());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_type_flag() {
        let cli = Cli::try_parse_from(["appbuild", "--type=release"]).unwrap();
        assert_eq!(cli.build_type, Some(BuildType::from("release")));

        let cli = Cli::try_parse_from(["appbuild"]).unwrap();
        assert_eq!(cli.build_type, None);
    }

    #[test]
    fn test_extra_arguments_are_rejected() {
        let err = Cli::try_parse_from(["appbuild", "--type=debug", "--watch"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert!(err.use_stderr());

        let err = Cli::try_parse_from(["appbuild", "--type=debug", "extra"]).unwrap_err();
        assert!(err.use_stderr());
    }
}
