use std::path::Path;

use crate::shared::{open_document, resolve_pages};

pub fn run(file: &Path, pages: Option<&str>) -> Result<(), i32> {
    let index = open_document(file)?;
    let page_indices = resolve_pages(pages, index.page_count())?;

    for &idx in &page_indices {
        println!("--- Page {} ---", idx + 1);
        println!("{}", index.pages()[idx].text);
    }

    Ok(())
}
