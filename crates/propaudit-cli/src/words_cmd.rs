use std::path::Path;

use crate::cli::OutputFormat;
use crate::shared::{open_document, resolve_pages};

pub fn run(file: &Path, pages: Option<&str>, format: &OutputFormat) -> Result<(), i32> {
    let index = open_document(file)?;
    let page_indices = resolve_pages(pages, index.page_count())?;

    match format {
        OutputFormat::Text => {
            println!("page\tx0\ttop\tx1\tbottom\ttext");
            for &idx in &page_indices {
                for word in &index.pages()[idx].words {
                    println!(
                        "{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{}",
                        idx + 1,
                        word.bbox.x0,
                        word.bbox.top,
                        word.bbox.x1,
                        word.bbox.bottom,
                        word.text
                    );
                }
            }
        }
        OutputFormat::Json => {
            for &idx in &page_indices {
                for word in &index.pages()[idx].words {
                    let obj = serde_json::json!({
                        "page": idx + 1,
                        "x0": word.bbox.x0,
                        "top": word.bbox.top,
                        "x1": word.bbox.x1,
                        "bottom": word.bbox.bottom,
                        "text": word.text,
                    });
                    match serde_json::to_string(&obj) {
                        Ok(line) => println!("{line}"),
                        Err(e) => {
                            eprintln!("Error: failed to serialize word: {e}");
                            return Err(1);
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
