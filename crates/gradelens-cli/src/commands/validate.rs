//! The `gradelens validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(gradebook_path: PathBuf) -> Result<()> {
    let books = if gradebook_path.is_dir() {
        gradelens_core::parser::load_gradebook_directory(&gradebook_path)?
    } else {
        vec![gradelens_core::parser::parse_gradebook(&gradebook_path)?]
    };

    let mut total_warnings = 0;

    for book in &books {
        println!(
            "Gradebook: {} ({} subjects, {} assessments)",
            book.student.name,
            book.subjects.len(),
            book.assessments.len()
        );

        let warnings = gradelens_core::parser::validate_gradebook(book);
        for w in &warnings {
            let prefix = w
                .item
                .as_ref()
                .map(|item| format!("  [{item}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All gradebooks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
