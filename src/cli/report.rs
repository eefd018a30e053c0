//! Summary formatting and printing.
//!
//! Every run ends with one `✓` summary line reporting totals and anomaly
//! counts; warnings and per-file skips go to stderr so the summary stays
//! parseable. Colors honor `NO_COLOR` via the `colored` crate.

use std::path::Path;

use colored::Colorize;

use crate::catalog::GenerateOutcome;
use crate::extract::ExtractOutcome;
use crate::inject::InjectOutcome;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

pub fn print_warning(message: &str) {
    eprintln!("{} {message}", "warning:".bold().yellow());
}

pub fn print_extract(outcome: &ExtractOutcome, document_path: &Path, verbose: bool) {
    for skip in &outcome.skipped {
        print_warning(&format!("skipped {}: {}", skip.path.display(), skip.reason));
    }
    if verbose {
        eprintln!(
            "{} types: {}",
            "info:".bold().blue(),
            outcome
                .document
                .types()
                .map(|(name, items)| format!("{name} ({})", items.len()))
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    println!(
        "{} Extracted {} items across {} types into {} ({} files scanned, {} skipped, {} duplicate ids, {} without id)",
        SUCCESS_MARK.green(),
        outcome.document.item_count(),
        outcome.document.type_count(),
        document_path.display(),
        outcome.files_scanned,
        outcome.skipped.len(),
        outcome.duplicate_ids,
        outcome.dropped_no_id,
    );
}

pub fn print_generate(outcome: &GenerateOutcome, written: usize, catalog_path: &Path) {
    for warning in &outcome.warnings {
        print_warning(warning);
    }
    println!(
        "{} Generated {} candidate entries ({} distinct messages) from {} types into {}",
        SUCCESS_MARK.green(),
        outcome.entries.len(),
        written,
        outcome.types_processed,
        catalog_path.display(),
    );
}

pub fn print_inject(outcome: &InjectOutcome, output_path: &Path, culture_path: &Path) {
    for warning in &outcome.warnings {
        print_warning(warning);
    }
    let culture_note = if outcome.culture_output.is_some() {
        format!(", culture record in {}", culture_path.display())
    } else {
        String::new()
    };
    println!(
        "{} Injected {} translations into {} items, {} untranslated items omitted; wrote {}{}",
        SUCCESS_MARK.green(),
        outcome.substitutions,
        outcome.items_translated,
        outcome.items_omitted,
        output_path.display(),
        culture_note,
    );
}

pub fn print_init(path: &Path) {
    println!("{} Created {}", SUCCESS_MARK.green(), path.display());
}
