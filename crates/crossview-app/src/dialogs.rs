//! Native file pickers and message boxes.

use std::path::{Path, PathBuf};

use crossview_core::decode::SUPPORTED_EXTENSIONS;
use crossview_core::encode::ExportFormat;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

const DEFAULT_SAVE_NAME: &str = "composite.png";

/// Filters offered by the open dialog. Only raster images are selectable.
fn source_filters() -> [(&'static str, &'static [&'static str]); 1] {
    [("Image Files", SUPPORTED_EXTENSIONS)]
}

/// Ask for a photograph to open.
pub fn pick_source() -> Option<PathBuf> {
    let mut dialog = FileDialog::new().set_title("Select an image");
    for (name, extensions) in source_filters() {
        dialog = dialog.add_filter(name, extensions);
    }
    dialog.pick_file()
}

/// Ask where to write the composite, starting next to the source if known.
pub fn pick_destination(source: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Save composite")
        .set_file_name(DEFAULT_SAVE_NAME);

    if let Some(dir) = source.and_then(Path::parent) {
        dialog = dialog.set_directory(dir);
    }
    for format in ExportFormat::ALL {
        dialog = dialog.add_filter(format.label(), format.extensions());
    }
    dialog.add_filter("All Files", &["*"]).save_file()
}

/// Modal error box.
pub fn show_error(title: &str, message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}

/// Modal confirmation box.
pub fn show_info(title: &str, message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
