//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use empirica_cli::logging::LogFormat;
use empirica_model::{DatasetShape, RoleAssignment};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "empirica",
    version,
    about = "Profile tabular data, preprocess it and recommend econometric methods",
    long_about = "Profile tabular data, preprocess it and recommend econometric methods.\n\n\
                  Reads CSV, XLS and XLSX files, classifies variables, detects whether the\n\
                  data is cross-sectional, panel or time-series, and proposes estimators."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// When to emit ANSI colors in tables and logs.
    #[command(flatten)]
    pub color: Color,

    /// Log level; takes precedence over -v/-q.
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// How log events are rendered.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Append logs to this file rather than stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify variables and detect the dataset shape.
    Profile(ProfileArgs),

    /// Assign roles, preprocess and recommend methods.
    Analyze(AnalyzeArgs),

    /// List the methods recommended for a dataset shape.
    Methods(MethodsArgs),

    /// Print the default preprocessing configuration as TOML.
    Config,
}

#[derive(Parser)]
pub struct ProfileArgs {
    /// CSV, XLS or XLSX file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Number of rows to show in the preview.
    #[arg(long = "preview", default_value_t = 5)]
    pub preview: usize,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// CSV, XLS or XLSX file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Preprocessing configuration (TOML). Defaults apply when omitted.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the detected dataset shape.
    #[arg(long = "data-type", value_enum)]
    pub data_type: Option<DataTypeArg>,

    /// Dependent variable.
    #[arg(long = "dependent", value_name = "COLUMN")]
    pub dependent: Option<String>,

    /// Independent variables (repeat or comma-separate).
    #[arg(long = "independent", value_name = "COLUMN", value_delimiter = ',')]
    pub independent: Vec<String>,

    #[arg(long = "control", value_name = "COLUMN", value_delimiter = ',')]
    pub control: Vec<String>,

    #[arg(long = "instrument", value_name = "COLUMN", value_delimiter = ',')]
    pub instrument: Vec<String>,

    #[arg(long = "moderator", value_name = "COLUMN", value_delimiter = ',')]
    pub moderator: Vec<String>,

    #[arg(long = "mediator", value_name = "COLUMN", value_delimiter = ',')]
    pub mediator: Vec<String>,

    /// Grouping variables for heterogeneity analysis.
    #[arg(long = "group", value_name = "COLUMN", value_delimiter = ',')]
    pub group: Vec<String>,

    #[arg(long = "time", value_name = "COLUMN", value_delimiter = ',')]
    pub time: Vec<String>,

    #[arg(long = "id", value_name = "COLUMN", value_delimiter = ',')]
    pub id: Vec<String>,

    /// Method to select; must be one of the recommendations.
    #[arg(long = "method", value_name = "NAME")]
    pub method: Option<String>,

    /// Write the preprocessed table as CSV.
    #[arg(long = "output", value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Write the empirical-analysis request body as JSON.
    #[arg(long = "request", value_name = "JSON")]
    pub request: Option<PathBuf>,
}

impl AnalyzeArgs {
    pub fn roles(&self) -> RoleAssignment {
        RoleAssignment {
            dependent: self.dependent.clone(),
            independent: self.independent.clone(),
            control: self.control.clone(),
            instrumental: self.instrument.clone(),
            moderator: self.moderator.clone(),
            mediator: self.mediator.clone(),
            grouping: self.group.clone(),
            time: self.time.clone(),
            id: self.id.clone(),
            dummy: Vec::new(),
        }
    }
}

#[derive(Parser)]
pub struct MethodsArgs {
    #[arg(long = "data-type", value_enum)]
    pub data_type: DataTypeArg,

    /// An instrumental variable is available.
    #[arg(long = "instrumental")]
    pub instrumental: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DataTypeArg {
    CrossSection,
    Panel,
    TimeSeries,
}

impl From<DataTypeArg> for DatasetShape {
    fn from(arg: DataTypeArg) -> Self {
        match arg {
            DataTypeArg::CrossSection => Self::CrossSection,
            DataTypeArg::Panel => Self::Panel,
            DataTypeArg::TimeSeries => Self::TimeSeries,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
