//! File helpers shared by commands that read ground-truth files or trial
//! logs and write results.
//!
//! Inputs ending in `.zst` are decompressed transparently and a leading
//! UTF-8 BOM is dropped, so files produced by other tooling parse cleanly.

/// Read a text file, decompressing `.zst` inputs.
///
/// # Example
///
/// ```rust,no_run
/// # use stagedice_cli::io_utils::read_text_auto;
/// let truth = read_text_auto("tests/ground_truth.json").unwrap();
/// let trials = read_text_auto("data/trials.jsonl.zst").unwrap();
/// ```
pub fn read_text_auto(path: &str) -> Result<String, String> {
    let mut content = if path.ends_with(".zst") {
        let comp = std::fs::read(path).map_err(|e| e.to_string())?;
        let dec = zstd::bulk::decompress(&comp, 8 * 1024 * 1024).map_err(|e| e.to_string())?;
        String::from_utf8(dec).map_err(|e| e.to_string())?
    } else {
        std::fs::read_to_string(path).map_err(|e| e.to_string())?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &std::path::Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}

/// Write `contents` to `path`, creating parent directories first.
pub fn write_text(path: &str, contents: &str) -> Result<(), String> {
    let p = std::path::Path::new(path);
    ensure_parent_dir(p)?;
    std::fs::write(p, contents).map_err(|e| format!("Failed to write {}: {}", path, e))
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
