use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use lanlight_core::{InspectOptions, inspect_pcap_file};

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        let input = path.join("input.pcapng");
        if !path.is_dir() || !input.exists() {
            continue;
        }
        regenerate_one(&input, &path.join("expected_report.json"))?;
    }

    Ok(())
}

fn regenerate_one(input: &Path, output: &Path) -> Result<(), String> {
    let report = inspect_pcap_file(input, &InspectOptions::default())
        .map_err(|err| format!("inspection failed for {}: {}", input.display(), err))?;
    let json = serde_json::to_string_pretty(&report)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    fs::write(output, json + "\n")
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    println!("wrote {}", output.display());
    Ok(())
}
