use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use glob::glob;

use lanlight_core::{CaptureReport, InspectOptions};

use crate::error::CliError;
use crate::{InspectArgs, to_json};

pub fn cmd_pcap_inspect(args: &InspectArgs) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&args.input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;

    let report_path = if args.stdout {
        None
    } else {
        let path = args.report.clone().ok_or_else(|| {
            CliError::with_hint("missing output path", "use -o/--report or --stdout")
        })?;
        ensure_distinct_output(&path, &input_abs)?;
        Some(path)
    };

    if args.pretty && args.compact {
        return Err(CliError::with_hint(
            "cannot use --pretty and --compact together",
            "choose one output format",
        ));
    }

    let options = InspectOptions { port: args.port };
    log::debug!("inspecting {} on port {}", resolved_input.display(), options.port);
    let rep = lanlight_core::inspect_pcap_file(&resolved_input, &options)
        .context("PCAP/PCAPNG inspection failed")?;
    let json = to_json(&rep, args.pretty)?;

    match report_path {
        None => println!("{}", json),
        Some(report) => {
            write_report(&report, &json)?;
            if !args.quiet {
                eprintln!("OK: report written -> {}", report.display());
            }
        }
    }

    if args.list_issues && !args.quiet {
        print_issues(&rep);
    }
    if args.strict && !rep.issues.is_empty() {
        return Err(CliError::with_hint(
            format!("{} decode issue(s) detected", rep.issue_count()),
            "use --list-issues to inspect",
        ));
    }
    Ok(())
}

fn ensure_distinct_output(report_path: &Path, input_abs: &Path) -> Result<(), CliError> {
    let parent = match report_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let Ok(report_dir) = fs::canonicalize(parent) else {
        // Directory does not exist yet, so it cannot hold the input.
        return Ok(());
    };
    let file_name = report_path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid report path: {}", report_path.display()))?;
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::with_hint(
            format!(
                "report path must differ from input: {}",
                report_path.display()
            ),
            "choose a different output path",
        ));
    }
    Ok(())
}

fn write_report(report: &Path, json: &str) -> Result<(), CliError> {
    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;
    Ok(())
}

fn print_issues(rep: &CaptureReport) {
    eprintln!("Decode issues:");
    for issue in &rep.issues {
        eprintln!("  {} ({}): {}", issue.id, issue.count, issue.message);
        for example in &issue.examples {
            eprintln!("    {}", example);
        }
    }
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::with_hint(
            format!("input file not found: {}", input.display()),
            "use a .pcap or .pcapng file",
        ));
    }
    if !input.is_file() {
        return Err(CliError::with_hint(
            format!("input is not a file: {}", input.display()),
            "use a .pcap or .pcapng file",
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "pcap" && ext != "pcapng" {
        return Err(CliError::with_hint(
            format!("unsupported input format '{}'", input.display()),
            "expected a .pcap or .pcapng file",
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let paths = glob(&pattern).map_err(|err| {
        CliError::with_hint(
            format!("invalid input pattern '{}'", pattern),
            format!("pattern error: {}", err.msg),
        )
    })?;
    let mut matches = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::with_hint(
                format!("invalid input pattern '{}'", pattern),
                format!("pattern error: {}", err),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(CliError::with_hint(
            format!("no files match pattern '{}'", pattern),
            "check the path or quote the pattern; expected .pcap or .pcapng",
        )),
        1 => Ok(matches.remove(0)),
        count => {
            let mut listed = matches
                .iter()
                .take(3)
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            if count > 3 {
                listed.push_str(", ...");
            }
            Err(CliError::with_hint(
                format!(
                    "multiple files match pattern '{}' ({} matches); matches: {}",
                    pattern, count, listed
                ),
                "pass a single capture file, or run once per file",
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}

#[cfg(test)]
mod tests {
    use super::is_glob_pattern;

    #[test]
    fn glob_detection() {
        assert!(is_glob_pattern("captures/*.pcapng"));
        assert!(is_glob_pattern("cap?.pcap"));
        assert!(!is_glob_pattern("capture.pcapng"));
    }
}
