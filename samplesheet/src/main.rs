//! check_samplesheet - reformat a samplesheet file and check its contents
//!
//! ```bash
//! check_samplesheet samplesheet.csv samplesheet.valid.csv
//! ```
//!
//! Writes the reformatted samplesheet to `FILE_OUT` and the sample/group
//! table to `group_metadata.csv` in the working directory.
//!
//! Exit codes: 0 on success, 1 on any failure. Samplesheet violations are
//! reported on stdout; missing columns and I/O errors on stderr.

use clap::Parser;
use samplesheet::logging::{init_logging, LogConfig};
use samplesheet::{check_samplesheet, CheckOptions, PipelineError};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "check_samplesheet", version)]
#[command(about = "Reformat samplesheet file and check its contents.", long_about = None)]
#[command(after_help = "Example usage: check_samplesheet <FILE_IN> <FILE_OUT>")]
struct Cli {
    /// Input samplesheet file.
    #[arg(value_name = "FILE_IN")]
    file_in: PathBuf,

    /// Output file.
    #[arg(value_name = "FILE_OUT")]
    file_out: PathBuf,
}

fn main() -> ExitCode {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_config = LogConfig::default().with_ansi(io::stderr().is_terminal());
    if let Err(e) = init_logging(&log_config) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let options = CheckOptions::from_env();

    match check_samplesheet(&cli.file_in, &cli.file_out, &options) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(report_failure(&e, &mut io::stdout(), &mut io::stderr())),
    }
}

/// Print the diagnostic for a failed run and return the exit status.
fn report_failure(err: &PipelineError, out: &mut impl Write, err_out: &mut impl Write) -> u8 {
    let written = match err {
        PipelineError::Validation(e) if !e.is_structural() => writeln!(out, "{}", e.report()),
        PipelineError::Validation(e) => writeln!(err_out, "Error: {}", e),
        other => writeln!(err_out, "Error: {}", other),
    };
    // Nothing left to report to if the streams are closed
    written.ok();
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use samplesheet::{Check, LoadError, ValidationError};

    fn run(err: PipelineError) -> (u8, String, String) {
        let (mut out, mut err_out) = (Vec::new(), Vec::new());
        let code = report_failure(&err, &mut out, &mut err_out);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err_out).unwrap(),
        )
    }

    #[test]
    fn test_validation_report_on_stdout() {
        let err = ValidationError::new(Check::InvalidExtension, "FASTQ path has invalid extension")
            .with_context("Path", "a.fq");
        let (code, out, err_out) = run(err.into());

        assert_eq!(code, 1);
        assert_eq!(
            out,
            "ERROR: Please check samplesheet -> FASTQ path has invalid extension\nPath: 'a.fq'\n"
        );
        assert!(err_out.is_empty());
    }

    #[test]
    fn test_missing_columns_on_stderr() {
        let err = ValidationError::new(
            Check::RequiredColumns,
            "Design file must contain sample,read_1,read_2,group columns",
        );
        let (code, out, err_out) = run(err.into());

        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert_eq!(
            err_out,
            "Error: Design file must contain sample,read_1,read_2,group columns\n"
        );
    }

    #[test]
    fn test_load_error_on_stderr() {
        let (code, out, err_out) = run(LoadError::Empty.into());

        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert!(err_out.starts_with("Error: "));
        assert!(err_out.contains("empty"));
    }

    #[test]
    fn test_cli_arguments() {
        let cli = Cli::try_parse_from(["check_samplesheet", "in.csv", "out.csv"]).unwrap();
        assert_eq!(cli.file_in, PathBuf::from("in.csv"));
        assert_eq!(cli.file_out, PathBuf::from("out.csv"));

        assert!(Cli::try_parse_from(["check_samplesheet", "in.csv"]).is_err());
    }
}
