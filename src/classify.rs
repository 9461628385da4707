//! Pure classification helpers: source extraction and file-type labeling.
//!
//! Both functions are heuristics over the query and link text only; no
//! network access, no content inspection.

use url::Url;

use crate::models::FileType;

/// Query filter token that forces a PDF classification.
const PDF_FILTER_TOKEN: &str = "filetype:pdf";

/// Extract the host component of a link, including an explicit port.
///
/// Fails closed: an unparseable link (or one with no host, like `mailto:`)
/// yields the empty string so downstream grouping can tolerate it.
pub fn extract_domain(link: &str) -> String {
    let Ok(url) = Url::parse(link) else {
        return String::new();
    };
    let Some(host) = url.host_str() else {
        return String::new();
    };
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

/// Classify a result link as pdf, doc, or html.
///
/// In order: the query carrying the PDF filter token or the link ending
/// case-insensitively in `.pdf` means [`FileType::Pdf`]; a `.doc`/`.docx`
/// suffix means [`FileType::Doc`]; everything else defaults to
/// [`FileType::Html`] without any further check.
pub fn classify(query: &str, link: &str) -> FileType {
    let link_lower = link.to_ascii_lowercase();
    if query.contains(PDF_FILTER_TOKEN) || link_lower.ends_with(".pdf") {
        FileType::Pdf
    } else if link_lower.ends_with(".doc") || link_lower.ends_with(".docx") {
        FileType::Doc
    } else {
        FileType::Html
    }
}
