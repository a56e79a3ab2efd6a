use std::fs;

use anyhow::{Context, Result, bail};
use empirica_ingest::write_csv;
use empirica_recommend::{RecommendationInput, recommend};

use empirica_cli::config::{default_config_toml, load_config};
use empirica_cli::pipeline::{AnalysisOptions, run_analysis, run_profile};

use crate::cli::{AnalyzeArgs, MethodsArgs, ProfileArgs};
use crate::summary::{print_analysis, print_profile, print_recommendations};

pub fn run_profile_command(args: &ProfileArgs) -> Result<()> {
    let report = run_profile(&args.file)?;
    print_profile(&report, args.preview);
    Ok(())
}

pub fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    if args.request.is_some() && args.dependent.is_none() {
        bail!("--request needs a dependent variable (--dependent)");
    }
    let options = AnalysisOptions {
        config: load_config(args.config.as_deref())?,
        data_type: args.data_type.map(Into::into),
        roles: args.roles(),
        selected_method: args.method.clone(),
    };
    let report = run_analysis(&args.file, &options)?;
    print_analysis(&report);

    if let Some(path) = &args.output {
        write_csv(&report.preprocessed.table, path)
            .with_context(|| format!("write {}", path.display()))?;
        println!("Preprocessed table: {}", path.display());
    }
    if let Some(path) = &args.request
        && let Some(request) = &report.request
    {
        let body = serde_json::to_string_pretty(request).context("serialize analysis request")?;
        fs::write(path, body).with_context(|| format!("write {}", path.display()))?;
        println!("Analysis request: {}", path.display());
    }
    Ok(())
}

pub fn run_methods(args: &MethodsArgs) -> Result<()> {
    let input =
        RecommendationInput::new(Some(args.data_type.into())).with_instrumental(args.instrumental);
    print_recommendations(&recommend(&input));
    Ok(())
}

pub fn run_config() -> Result<()> {
    print!("{}", default_config_toml()?);
    Ok(())
}
