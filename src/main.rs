use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};

use namedup::{AnalyzeOptions, AnalyzeWarning};

/// Find duplicate names in rosters, mailing lists, and spreadsheets.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Input files. Omit to read from stdin.
    #[arg()]
    files: Vec<PathBuf>,

    /// Write the report to a file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Format hint (e.g., txt, csv). Required when reading from stdin.
    #[arg(short, long, value_name = "FMT")]
    format: Option<String>,

    /// Emit the report as JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// Treat recoverable decode issues as hard errors.
    #[arg(long)]
    strict: bool,

    /// Grouping strategy. "gemini" merges near-spellings via the Gemini API
    /// and requires GEMINI_API_KEY.
    #[arg(long, value_enum, default_value_t = MatcherKind::Exact)]
    matcher: MatcherKind,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MatcherKind {
    Exact,
    Gemini,
}

fn print_warnings(warnings: &[AnalyzeWarning]) {
    for w in warnings {
        let loc = w
            .location
            .as_deref()
            .map(|l| format!(" ({l})"))
            .unwrap_or_default();
        eprintln!("warning: [{:?}] {}{}", w.code, w.message, loc);
    }
}

fn build_options(cli: &Cli) -> Result<AnalyzeOptions, ExitCode> {
    let mut options = AnalyzeOptions {
        strict: cli.strict,
        ..Default::default()
    };

    if cli.matcher == MatcherKind::Gemini {
        let matcher = namedup::gemini::GeminiMatcher::from_env().map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::from(2)
        })?;
        options.matcher = Some(Arc::new(matcher));
    }

    Ok(options)
}

fn render(cli: &Cli, report: &namedup::AnalyzeReport) -> String {
    if cli.json {
        let mut out = namedup::report::render_json(&report.duplicates);
        out.push('\n');
        out
    } else {
        namedup::report::render_table(&report.duplicates)
    }
}

fn render_error(cli: &Cli, output_buf: &mut String, error: &namedup::AnalyzeError) {
    if cli.json {
        output_buf.push_str(&namedup::report::render_json_error(&error.to_string()));
        output_buf.push('\n');
    }
}

fn run(cli: Cli) -> Result<ExitCode, ExitCode> {
    let options = build_options(&cli)?;

    let mut output_buf = String::new();
    let mut had_error = false;

    if cli.files.is_empty() {
        // Read from stdin
        let fmt = cli.format.as_deref().ok_or_else(|| {
            eprintln!("error: --format is required when reading from stdin");
            ExitCode::from(2)
        })?;

        let mut data = Vec::new();
        io::stdin().read_to_end(&mut data).map_err(|e| {
            eprintln!("error: stdin: {e}");
            ExitCode::from(1)
        })?;

        match namedup::analyze_bytes(&data, fmt, &options) {
            Ok(report) => {
                print_warnings(&report.warnings);
                output_buf.push_str(&render(&cli, &report));
            }
            Err(e) => {
                eprintln!("error: stdin: {e}");
                render_error(&cli, &mut output_buf, &e);
                had_error = true;
            }
        }
    } else {
        let multiple = cli.files.len() > 1;

        for (i, path) in cli.files.iter().enumerate() {
            // Insert separator between files
            if multiple && i > 0 {
                output_buf.push('\n');
            }
            if multiple && !cli.json {
                output_buf.push_str(&format!("# {}\n\n", path.display()));
            }

            // If --format is given, use analyze_bytes with that format override
            let result = if let Some(ref fmt) = cli.format {
                let data = match std::fs::read(path) {
                    Ok(d) => d,
                    Err(e) => {
                        eprintln!("error: {}: {e}", path.display());
                        had_error = true;
                        continue;
                    }
                };
                namedup::analyze_bytes(&data, fmt, &options)
            } else {
                namedup::analyze_file(path, &options)
            };

            match result {
                Ok(report) => {
                    print_warnings(&report.warnings);
                    output_buf.push_str(&render(&cli, &report));
                }
                Err(e) => {
                    eprintln!("error: {}: {e}", path.display());
                    render_error(&cli, &mut output_buf, &e);
                    had_error = true;
                }
            }
        }
    }

    // Write output
    if let Some(ref out_path) = cli.output {
        std::fs::write(out_path, &output_buf).map_err(|e| {
            eprintln!("error: {}: {e}", out_path.display());
            ExitCode::from(1)
        })?;
    } else {
        io::stdout().write_all(output_buf.as_bytes()).map_err(|e| {
            eprintln!("error: stdout: {e}");
            ExitCode::from(1)
        })?;
    }

    if had_error {
        Err(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(code) => code,
    }
}
