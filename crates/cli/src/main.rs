use anyhow::Context;
use clap::Parser;
use seedlog_core::{Summarizer, SummaryOptions};
use seedlog_data::{normalize_locale, resolve_tables, TABLES_ENV};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::filter::EnvFilter;

/// Summarize Balatro seed-analysis logs, one line per interesting ante.
#[derive(Parser, Debug)]
#[command(name = "seedlog", version)]
struct Cli {
    /// Analysis logs to summarize.
    #[arg(required_unless_present = "tracked")]
    files: Vec<PathBuf>,

    /// Print only localized names instead of `localized(original)`.
    #[arg(short, long)]
    chinese_only: bool,

    /// Prefix jokers with their face-group emoji.
    #[arg(long)]
    face_emoji: bool,

    /// Print structured ante details as JSON instead of summary lines.
    #[arg(long)]
    json: bool,

    /// Translation locale (zh_CN or en_US).
    #[arg(short, long)]
    locale: Option<String>,

    /// Directory holding tracked.json and locale/*.json.
    #[arg(long, env = TABLES_ENV)]
    tables: Option<PathBuf>,

    /// Print the tracked name lists as JSON and exit.
    #[arg(long)]
    tracked: bool,
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    let stdout = io::stdout();
    let stderr = io::stderr();
    run(&cli, &mut stdout.lock(), &mut stderr.lock())
}

fn run(cli: &Cli, out: &mut impl Write, err: &mut impl Write) -> ExitCode {
    let summarizer = match build_summarizer(cli) {
        Ok(summarizer) => summarizer,
        Err(error) => {
            let _ = writeln!(err, "seedlog: {error:#}");
            return ExitCode::FAILURE;
        }
    };

    if cli.tracked {
        return match write_json(out, &summarizer.tracked_lists()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) if is_broken_pipe(&error) => ExitCode::SUCCESS,
            Err(error) => {
                let _ = writeln!(err, "seedlog: {error:#}");
                ExitCode::FAILURE
            }
        };
    }

    let options = SummaryOptions {
        chinese_only: cli.chinese_only,
        face_emoji: cli.face_emoji,
    };
    let mut failed = 0usize;
    for file in &cli.files {
        match process_file(&summarizer, file, &options, cli.json, out) {
            Ok(()) => {}
            Err(error) if is_broken_pipe(&error) => {
                tracing::debug!("stdout closed, stopping");
                break;
            }
            Err(error) => {
                let _ = writeln!(err, "Failed to process {}: {error:#}", file.display());
                failed += 1;
            }
        }
    }
    if failed > 0 {
        tracing::debug!(failed, total = cli.files.len(), "finished with failures");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn build_summarizer(cli: &Cli) -> anyhow::Result<Summarizer> {
    let locale = normalize_locale(cli.locale.as_deref());
    let tables = resolve_tables(cli.tables.as_deref(), Some(&locale))
        .with_context(|| format!("load lookup tables ({locale})"))?;
    Ok(Summarizer::new(tables)?)
}

fn process_file(
    summarizer: &Summarizer,
    path: &Path,
    options: &SummaryOptions,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    if json {
        let details = summarizer.details_for_file(&path)?;
        write_json(out, &details)
    } else {
        for line in summarizer.summarize_file(&path, options)? {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

fn write_json<T: serde::Serialize>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    let body = serde_json::to_string_pretty(value).context("serialize output")?;
    writeln!(out, "{body}")?;
    Ok(())
}

fn is_broken_pipe(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<io::Error>()
        .is_some_and(|error| error.kind() == io::ErrorKind::BrokenPipe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    const ANTE_LOG: &str = "==ANTE 1==\nBoss: The Ox\nVoucher: Director's Cut\nTags: Negative Tag, Uncommon Tag\nShop Queue:\n1) Blueprint\n";

    fn unique_temp_file(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "seedlog_cli_{label}_{}_{}.log",
            std::process::id(),
            nanos
        ))
    }

    const TABLES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/tables");

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["seedlog", "--tables", TABLES_DIR];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).expect("cli args")
    }

    fn run_with(cli: &Cli) -> (ExitCode, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(cli, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).expect("utf8 stdout"),
            String::from_utf8(err).expect("utf8 stderr"),
        )
    }

    #[test]
    fn failing_file_is_reported_and_the_rest_still_run() {
        let good = unique_temp_file("good");
        std::fs::write(&good, ANTE_LOG).expect("write log");
        let missing = unique_temp_file("missing");
        let cli = cli(&[
            "-c",
            missing.to_str().expect("path"),
            good.to_str().expect("path"),
        ]);
        let (code, out, err) = run_with(&cli);
        let _ = std::fs::remove_file(&good);

        assert_eq!(code, ExitCode::FAILURE);
        assert!(err.starts_with("Failed to process "), "{err}");
        assert!(err.contains("seedlog_cli_missing_"), "{err}");
        assert_eq!(err.lines().count(), 1);
        assert_eq!(out, "1：‼️☠️公牛🔄导演剪辑版 | ‼️🎞️负片标签 | 蓝图#1\n");
    }

    #[test]
    fn all_files_ok_exits_successfully() {
        let good = unique_temp_file("json");
        std::fs::write(&good, ANTE_LOG).expect("write log");
        let cli = cli(&["--json", good.to_str().expect("path")]);
        let (code, out, err) = run_with(&cli);
        let _ = std::fs::remove_file(&good);

        assert_eq!(code, ExitCode::SUCCESS);
        assert!(err.is_empty(), "{err}");
        let details: serde_json::Value = serde_json::from_str(&out).expect("json output");
        assert_eq!(details[0]["number"], "1");
        assert_eq!(details[0]["jesterCards"][0]["name"], "Blueprint");
    }

    #[test]
    fn tracked_flag_prints_lists_without_files() {
        let (code, out, _) = run_with(&cli(&["--tracked"]));
        assert_eq!(code, ExitCode::SUCCESS);
        let lists: serde_json::Value = serde_json::from_str(&out).expect("json output");
        assert!(lists["bosses"]
            .as_array()
            .is_some_and(|bosses| bosses.iter().any(|boss| boss == "The Ox")));
    }

    #[test]
    fn missing_tables_directory_is_fatal() {
        let cli = Cli::try_parse_from(["seedlog", "--tables", "/nonexistent/seedlog", "x.log"])
            .expect("cli args");
        let (code, out, err) = run_with(&cli);
        assert_eq!(code, ExitCode::FAILURE);
        assert!(out.is_empty());
        assert!(err.starts_with("seedlog: load lookup tables"), "{err}");
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn closed_stdout_ends_quietly() {
        let good = unique_temp_file("pipe");
        std::fs::write(&good, ANTE_LOG).expect("write log");
        let cli = cli(&["--json", good.to_str().expect("path")]);
        let mut err = Vec::new();
        let code = run(&cli, &mut ClosedPipe, &mut err);
        let _ = std::fs::remove_file(&good);

        assert_eq!(code, ExitCode::SUCCESS);
        assert!(err.is_empty());
    }
}
