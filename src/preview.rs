//! Preview collaborator
//!
//! Fetches full node detail (content, size) for the preview pane and
//! exposes the static extension lookup tables (icon, icon class, human
//! label). Unknown extensions map to a default entry.

use crate::error::Error;
use crate::node::Node;
use crate::store::remote::RemoteNodes;
use crate::types::NodeId;
use std::sync::Arc;

/// Read-side collaborator backing the file preview pane.
pub struct PreviewService {
    remote: Arc<dyn RemoteNodes>,
}

impl PreviewService {
    pub fn new(remote: Arc<dyn RemoteNodes>) -> Self {
        PreviewService { remote }
    }

    /// Fetch the full node record for a previewed file.
    pub async fn file_detail(&self, id: &NodeId) -> Result<Node, Error> {
        self.remote.fetch(id).await
    }
}

/// Lowercased extension; a name with no dot yields the whole name.
pub fn file_extension(name: &str) -> String {
    name.rsplit('.').next().unwrap_or("").to_lowercase()
}

/// Material icon name for a file.
pub fn file_icon(name: &str) -> &'static str {
    match file_extension(name).as_str() {
        "pdf" => "picture_as_pdf",
        "doc" | "docx" | "txt" => "description",
        "xls" | "xlsx" | "csv" => "table_chart",
        "jpg" | "jpeg" | "png" => "image",
        "gif" => "gif",
        "mp4" => "video_library",
        "mp3" => "audio_file",
        "zip" | "rar" => "folder_zip",
        _ => "insert_drive_file",
    }
}

/// CSS icon class for the preview header.
pub fn icon_class(name: &str) -> &'static str {
    match file_extension(name).as_str() {
        "pdf" => "icon-pdf",
        "doc" | "docx" => "icon-document",
        "xls" | "xlsx" | "csv" => "icon-spreadsheet",
        "zip" | "rar" => "icon-archive",
        "jpg" | "jpeg" | "png" | "gif" => "icon-image",
        _ => "icon-default",
    }
}

/// Human-readable file type label.
pub fn type_label(name: &str) -> &'static str {
    match file_extension(name).as_str() {
        "pdf" => "PDF Document",
        "doc" | "docx" => "Word Document",
        "xls" | "xlsx" | "csv" => "Spreadsheet",
        "txt" => "Text File",
        "jpg" | "jpeg" | "png" | "gif" => "Image",
        "mp4" => "Video",
        "mp3" => "Audio",
        "zip" | "rar" => "Archive",
        _ => "File",
    }
}

/// Format a byte count as "1.5 KB" (one decimal, trailing zeros kept by
/// the formatter, B/KB/MB/GB).
pub fn format_file_size(bytes: Option<u64>) -> String {
    let Some(bytes) = bytes.filter(|b| *b > 0) else {
        return String::new();
    };
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}
