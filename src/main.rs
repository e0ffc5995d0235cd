use access2excel::convert::{ConsoleProgress, ConvertOptions, Converter, PartialOutput};
use access2excel::sheet::OutputFormat;
use clap::Parser;
use clap::error::ErrorKind;
use std::path::PathBuf;
use std::process::ExitCode;

/// Convert a Microsoft Access database into an Excel workbook
#[derive(Parser, Debug)]
#[command(name = "access2excel", version)]
struct Cli {
    /// Input database (.mdb or .accdb)
    #[arg(short = 'i', long = "inputFile", value_name = "PATH")]
    input_file: PathBuf,

    /// Output workbook; defaults to the input path with the format's extension
    #[arg(short = 'o', long = "outputFile", value_name = "PATH")]
    output_file: Option<PathBuf>,

    /// Output format: XLS or XLSX
    #[arg(short = 'f', long = "format", value_name = "FORMAT")]
    format: Option<String>,

    /// YAML options file
    #[arg(short = 'c', long = "config", value_name = "YAML")]
    config: Option<PathBuf>,

    /// Number format pattern for date cells
    #[arg(long = "date-format", value_name = "PATTERN")]
    date_format: Option<String>,

    /// What to do with a partially written output file: keep or delete
    #[arg(long = "on-error", value_name = "POLICY")]
    on_error: Option<PartialOutput>,

    /// Directory containing the mdbtools executables
    #[arg(long = "mdbtools-dir", value_name = "DIR")]
    mdbtools_dir: Option<PathBuf>,
}

impl Cli {
    /// Options file values, overridden by command line flags.
    fn options(&self) -> access2excel::Result<ConvertOptions> {
        let mut options = match &self.config {
            Some(path) => ConvertOptions::from_yaml_file(path)?,
            None => ConvertOptions::default(),
        };
        if let Some(format) = &self.format {
            options.format = format.parse::<OutputFormat>()?;
        }
        if let Some(pattern) = &self.date_format {
            options.date_format = pattern.clone();
        }
        if let Some(policy) = self.on_error {
            options.on_error = policy;
        }
        if let Some(dir) = &self.mdbtools_dir {
            options.mdbtools_dir = Some(dir.clone());
        }
        Ok(options)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        },
    };

    let options = match cli.options() {
        Ok(options) => options,
        Err(access2excel::Error::UnsupportedFormat(format)) => {
            eprintln!("{}", access2excel::Error::UnsupportedFormat(format));
            return ExitCode::FAILURE;
        },
        Err(e) => {
            eprintln!("{}", e.report_line());
            return ExitCode::FAILURE;
        },
    };

    let output = cli
        .output_file
        .clone()
        .unwrap_or_else(|| cli.input_file.with_extension(options.format.extension()));

    match Converter::new(options).run(&cli.input_file, &output, &mut ConsoleProgress) {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
