//! The `run` and `validate` subcommands.

use std::fs;
use std::path::{Path, PathBuf};

use scoremerge_io::xlsx::{export_values, import_values};
use scoremerge_recon::{run, MergeConfig, MergeError, MergeReport};

use crate::exit_codes::{
    EXIT_MERGE_INVALID_CONFIG, EXIT_MERGE_RUNTIME, EXIT_MERGE_STRUCTURE, EXIT_USAGE,
};
use crate::CliError;

pub fn cmd_run(
    overwrite: PathBuf,
    extract: PathBuf,
    column: String,
    output: PathBuf,
    config: Option<PathBuf>,
    json: bool,
    report: Option<PathBuf>,
) -> Result<(), CliError> {
    // The two inputs play different roles; identical file names are almost
    // always a swapped or duplicated argument.
    if overwrite.file_name().is_some() && overwrite.file_name() == extract.file_name() {
        return Err(CliError {
            code: EXIT_USAGE,
            message: "overwrite and extract workbooks must have different file names".into(),
            hint: Some("pass the roster workbook first, then the results workbook".into()),
        });
    }

    let config = load_config(config.as_deref())?;

    let overwrite_wb = import_values(&overwrite).map_err(runtime_err)?;
    let extract_wb = import_values(&extract).map_err(runtime_err)?;

    let result = run(&config, &overwrite_wb, &extract_wb, &column).map_err(engine_err)?;

    export_values(&result.workbook, &output).map_err(runtime_err)?;

    if let Some(path) = &report {
        let body = report_json(&result.report)?;
        fs::write(path, body).map_err(|e| CliError {
            code: EXIT_MERGE_RUNTIME,
            message: format!("cannot write report {}: {e}", path.display()),
            hint: None,
        })?;
    }
    if json {
        println!("{}", report_json(&result.report)?);
    }

    let s = &result.report.summary;
    eprintln!(
        "merged {}: {} batches, {} members; {} matched, {} unmatched, {} cells written, {} cleared",
        output.display(),
        s.batches,
        s.members,
        s.matched,
        s.unmatched,
        s.rows_updated,
        s.rows_cleared
    );
    Ok(())
}

pub fn cmd_validate(config: PathBuf) -> Result<(), CliError> {
    load_config(Some(&config))?;
    eprintln!("{}: config is valid", config.display());
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<MergeConfig, CliError> {
    let Some(path) = path else {
        return Ok(MergeConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|e| CliError {
        code: EXIT_MERGE_INVALID_CONFIG,
        message: format!("cannot read config {}: {e}", path.display()),
        hint: None,
    })?;
    MergeConfig::from_toml(&text).map_err(engine_err)
}

fn report_json(report: &MergeReport) -> Result<String, CliError> {
    serde_json::to_string_pretty(report).map_err(|e| CliError {
        code: EXIT_MERGE_RUNTIME,
        message: format!("cannot encode report: {e}"),
        hint: None,
    })
}

fn runtime_err(message: String) -> CliError {
    CliError {
        code: EXIT_MERGE_RUNTIME,
        message,
        hint: None,
    }
}

fn engine_err(err: MergeError) -> CliError {
    let code = match &err {
        MergeError::ConfigParse(_) | MergeError::ConfigValidation(_) => EXIT_MERGE_INVALID_CONFIG,
        MergeError::MissingSheet { .. } | MergeError::InvalidColumn(_) => EXIT_MERGE_STRUCTURE,
    };
    let hint = match &err {
        MergeError::MissingSheet { .. } => {
            Some("sheet names are matched exactly; check for trailing spaces".into())
        }
        MergeError::InvalidColumn(_) => Some("pass column letters only, e.g. D or AB".into()),
        _ => None,
    };
    CliError {
        code,
        message: err.to_string(),
        hint,
    }
}
