//! CLI output formatting.
//!
//! Each surface has a `format_*` function (returns strings) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::batch::{ConversionReport, Outcome};
use crate::metadata::MetadataBlock;
use crate::pipeline::FileReport;

/// Progress line published while a file converts.
///
/// ```text
/// Converting: DSC_0042.dng (2/14)
/// ```
pub fn format_converting(file: &str, position: usize, total: usize) -> String {
    format!("Converting: {file} ({position}/{total})")
}

/// One line per completed file, with an indented diagnostic when the
/// metadata pass degraded.
///
/// ```text
/// DSC_0042.dng -> DSC_0042.jpg (6000x4000 -> 2448x1632, metadata carried)
/// ```
pub fn format_file_lines(report: &FileReport) -> Vec<String> {
    let (ow, oh) = report.original_dimensions;
    let size = if report.resized {
        let (nw, nh) = report.output_dimensions;
        format!("{ow}x{oh} -> {nw}x{nh}")
    } else {
        format!("{ow}x{oh}")
    };
    let metadata = if report.metadata_attached {
        "metadata carried"
    } else {
        "no metadata"
    };

    let mut lines = vec![format!(
        "{} -> {} ({size}, {metadata})",
        report.source, report.output
    )];
    if let Some(diagnostic) = &report.diagnostic {
        lines.push(format!("    note: {diagnostic}"));
    }
    lines
}

/// Terminal status line for the batch.
pub fn format_outcome(report: &ConversionReport) -> String {
    match &report.outcome {
        Outcome::Completed => format!(
            "Conversion complete: {} of {} files.",
            report.processed, report.total
        ),
        Outcome::NoInputFiles => "No .dng files found in the input folder.".to_string(),
        Outcome::Cancelled => format!(
            "Cancelled after {} of {} files.",
            report.processed, report.total
        ),
        Outcome::Failed { file, cause } => format!("Failed to convert {file}: {cause}"),
    }
}

/// Full end-of-batch report: per-file lines, then the terminal status.
pub fn format_report(report: &ConversionReport) -> Vec<String> {
    let mut lines: Vec<String> = report.files.iter().flat_map(format_file_lines).collect();
    lines.push(format_outcome(report));
    lines
}

pub fn print_report(report: &ConversionReport) {
    for line in format_report(report) {
        println!("{line}");
    }
}

/// Destination fields per group, for the `tags` inspection command.
///
/// ```text
/// Exif
///     0x829d = 28/10
/// GPS
///     0x0002 = [52/1, 30/1, 1234/100]
/// ```
pub fn format_metadata_block(block: &MetadataBlock) -> Vec<String> {
    let mut lines = Vec::new();
    for (group, entries) in block.groups() {
        if entries.is_empty() {
            continue;
        }
        lines.push(group.label().to_string());
        for (id, value) in entries {
            lines.push(format!("    0x{id:04x} = {value}"));
        }
    }
    lines
}
