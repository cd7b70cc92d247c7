//! File-level command: read, transform, write, report.

use crate::output::print_summary;
use crate::transform::{Rewrite, TransformOptions, Transformer};

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// What to do with one input file.
#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    /// Source file to read
    pub input: PathBuf,
    /// Destination file; unused in dry-run and check mode
    pub output: Option<PathBuf>,
    /// Print the rewritten source instead of writing it
    pub dry_run: bool,
    /// Only report whether anything would change
    pub check: bool,
    /// Emit a JSON summary
    pub json: bool,
}

/// JSON summary of one run.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    /// Source file
    pub input: &'a Path,
    /// Destination file, if one was written
    pub output: Option<&'a Path>,
    /// Whether any declaration was rewritten
    pub changed: bool,
    /// Rewritten declarations
    pub rewrites: &'a [Rewrite],
}

/// Transform one file according to `run`.
///
/// The output file is only written after the whole transformation succeeded.
/// Returns the process exit code: `1` in check mode when something would
/// change, `0` otherwise.
///
/// # Errors
///
/// Returns an error if reading, parsing or writing fails.
pub fn run_transform<W: Write>(
    options: &TransformOptions,
    run: &RunOptions,
    mut writer: W,
) -> Result<i32> {
    let source = fs::read_to_string(&run.input)
        .with_context(|| format!("failed to read {}", run.input.display()))?;

    let mut transformer = Transformer::new(options.clone())?;
    let result = transformer
        .transform(&source)
        .with_context(|| format!("failed to transform {}", run.input.display()))?;

    let written = if run.check || run.dry_run {
        None
    } else {
        let output = run
            .output
            .as_deref()
            .context("an output path is required unless --check or --dry-run is given")?;
        fs::write(output, &result.text)
            .with_context(|| format!("failed to write {}", output.display()))?;
        info!(
            input = %run.input.display(),
            output = %output.display(),
            rewrites = result.rewrites.len(),
            "wrote transformed source"
        );
        Some(output)
    };

    if run.dry_run {
        writer.write_all(result.text.as_bytes())?;
        writer.flush()?;
        return Ok(0);
    }

    if run.json {
        let summary = RunSummary {
            input: &run.input,
            output: written,
            changed: result.changed(),
            rewrites: &result.rewrites,
        };
        serde_json::to_writer_pretty(&mut writer, &summary)?;
        writeln!(writer)?;
    } else {
        print_summary(&mut writer, &run.input, written, &result, run.check)?;
    }

    if run.check && result.changed() {
        return Ok(1);
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup(source: &str) -> (TempDir, PathBuf, PathBuf) {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.js");
        let output = dir.path().join("out.js");
        fs::write(&input, source).unwrap();
        (dir, input, output)
    }

    #[test]
    fn test_writes_output() {
        let (_dir, input, output) = setup("const f = (x) => x + 1;\n");
        let run = RunOptions {
            input,
            output: Some(output.clone()),
            ..RunOptions::default()
        };
        let code = run_transform(&TransformOptions::default(), &run, Vec::new()).unwrap();
        assert_eq!(code, 0);
        assert_eq!(
            fs::read_to_string(output).unwrap(),
            "function f(x) { return x + 1; }\n"
        );
    }

    #[test]
    fn test_check_mode_writes_nothing() {
        let (_dir, input, output) = setup("const f = () => 1;");
        let run = RunOptions {
            input,
            output: Some(output.clone()),
            check: true,
            ..RunOptions::default()
        };
        let code = run_transform(&TransformOptions::default(), &run, Vec::new()).unwrap();
        assert_eq!(code, 1);
        assert!(!output.exists());
    }

    #[test]
    fn test_check_mode_clean_file() {
        let (_dir, input, _output) = setup("function f() { return 1; }");
        let run = RunOptions {
            input,
            check: true,
            ..RunOptions::default()
        };
        let code = run_transform(&TransformOptions::default(), &run, Vec::new()).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_dry_run_prints_source() {
        let (_dir, input, output) = setup("let g = (a) => { return a; };");
        let run = RunOptions {
            input,
            output: Some(output.clone()),
            dry_run: true,
            ..RunOptions::default()
        };
        let mut buffer = Vec::new();
        run_transform(&TransformOptions::default(), &run, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "function g(a) { return a; }"
        );
        assert!(!output.exists());
    }

    #[test]
    fn test_json_summary() {
        let (_dir, input, output) = setup("foo();\nconst f = () => 1;\n");
        let run = RunOptions {
            input,
            output: Some(output),
            json: true,
            ..RunOptions::default()
        };
        let mut buffer = Vec::new();
        run_transform(&TransformOptions::default(), &run, &mut buffer).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["changed"], true);
        assert_eq!(value["rewrites"][0]["functions"][0], "f");
        assert_eq!(value["rewrites"][0]["line"], 2);
        assert!(value["rewrites"][0].get("dropped_bindings").is_none());
    }

    #[test]
    fn test_missing_input_is_error() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out.js");
        let run = RunOptions {
            input: dir.path().join("missing.js"),
            output: Some(output.clone()),
            ..RunOptions::default()
        };
        let err = run_transform(&TransformOptions::default(), &run, Vec::new()).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
        assert!(!output.exists());
    }
}
