use crate::transform::TransformOutput;
use colored::Colorize;
use std::io::Write;
use std::path::Path;

/// Print the human-readable result of one run.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_summary(
    writer: &mut impl Write,
    input: &Path,
    output: Option<&Path>,
    result: &TransformOutput,
    check: bool,
) -> std::io::Result<()> {
    if !result.changed() {
        writeln!(
            writer,
            "{} {}",
            "[OK] No arrow-function declarations in".green(),
            input.display()
        )?;
        return Ok(());
    }

    let count = result.rewrites.len();
    let noun = if count == 1 {
        "declaration"
    } else {
        "declarations"
    };
    let headline = if check {
        format!("Would rewrite {count} {noun} in {}", input.display())
    } else {
        match output {
            Some(out) => format!(
                "Rewrote {count} {noun} in {} -> {}",
                input.display(),
                out.display()
            ),
            None => format!("Rewrote {count} {noun} in {}", input.display()),
        }
    };
    writeln!(writer, "{}", headline.cyan().bold())?;

    for rewrite in &result.rewrites {
        write!(
            writer,
            "  {} {}",
            format!("line {}:", rewrite.line).dimmed(),
            rewrite.functions.join(", ")
        )?;
        if rewrite.dropped_bindings.is_empty() {
            writeln!(writer)?;
        } else {
            writeln!(
                writer,
                " {}",
                format!("(dropped: {})", rewrite.dropped_bindings.join(", ")).yellow()
            )?;
        }
    }
    Ok(())
}
