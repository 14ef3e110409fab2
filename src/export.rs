//! CSV export of the search trace.

use crate::error::ExportError;
use crate::solver::TraceEntry;
use std::io;

pub const HEADER: [&str; 4] = ["Step", "Configuration", "Threats", "Move"];

pub fn file_name(n: usize) -> String {
    format!("queens_{}_trace.csv", n)
}

/// Writes a header row plus one row per step and hands the writer back.
pub fn write_trace<W: io::Write>(writer: W, trace: &[TraceEntry]) -> Result<W, ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for entry in trace {
        wtr.write_record(&[
            entry.step.to_string(),
            entry.board.to_string(),
            entry.score.to_string(),
            entry.kind.label().to_owned(),
        ])?;
    }
    wtr.flush()?;
    wtr.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

pub fn trace_to_string(trace: &[TraceEntry]) -> Result<String, ExportError> {
    let bytes = write_trace(Vec::new(), trace)?;
    // csv only emits the UTF-8 text it was given.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Asks for a destination and writes the trace there.
///
/// Returns the chosen path, or `None` if the dialog was cancelled.
#[cfg(not(target_arch = "wasm32"))]
pub fn save_with_dialog(
    trace: &[TraceEntry],
    n: usize,
) -> Result<Option<std::path::PathBuf>, ExportError> {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("CSV", &["csv"])
        .set_file_name(file_name(n))
        .save_file()
    else {
        return Ok(None);
    };
    let file = std::fs::File::create(&path)?;
    write_trace(file, trace)?;
    log::info!("exported {} steps to {}", trace.len(), path.display());
    Ok(Some(path))
}

/// Offers the trace to the browser as a file download.
#[cfg(target_arch = "wasm32")]
pub fn download(trace: &[TraceEntry], n: usize) -> Result<(), ExportError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::JsValue;

    let browser = |e: JsValue| ExportError::Browser(format!("{:?}", e));
    let missing = |what: &str| ExportError::Browser(format!("no {}", what));

    let csv_content = trace_to_string(trace)?;
    let window = web_sys::window().ok_or_else(|| missing("window"))?;
    let document = window.document().ok_or_else(|| missing("document"))?;
    let parts = js_sys::Array::of1(&JsValue::from_str(&csv_content));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/csv");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options).map_err(browser)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(browser)?;
    let a = document
        .create_element("a")
        .map_err(browser)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| missing("anchor element"))?;
    a.set_href(&url);
    a.set_download(&file_name(n));
    a.click();
    web_sys::Url::revoke_object_url(&url).map_err(browser)?;
    log::info!("offered {} steps for download", trace.len());
    Ok(())
}
