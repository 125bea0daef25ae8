//! Modal save dialog.

use std::path::PathBuf;

use veneer_core::logging::targets;

use crate::backend::{Backend, FileDialogAction, FileDialogRequest, FileFilter};

/// Known save formats: pattern fragment, filter label, extension.
const KNOWN_FORMATS: &[(&str, &str, &str)] = &[
    ("png", "Image (*.png)", ".png"),
    ("avi", "Movie (*.avi)", ".avi"),
    ("npz", "Numpy Compressed Archive (*.npz)", ".npz"),
];

/// A file chooser asking where to save.
///
/// An optional filter pattern narrows the listing. Patterns mentioning a
/// known format (`png`, `avi`, `npz`) get a descriptive label, and a
/// confirmed path missing that format's extension has it appended. Other
/// patterns are shown as-is and leave the path untouched.
///
/// ```
/// use std::path::PathBuf;
/// use std::sync::Arc;
/// use veneer::SaveDialog;
/// use veneer::backend::{Backend, HeadlessBackend};
///
/// let headless = Arc::new(HeadlessBackend::new());
/// let backend: Backend = headless.clone();
/// headless.push_dialog_response(Some(PathBuf::from("/tmp/shot")));
///
/// let dialog = SaveDialog::new(&backend, "Save File", Some("*.png"));
/// assert_eq!(dialog.get_path(), Some(PathBuf::from("/tmp/shot.png")));
/// ```
pub struct SaveDialog {
    backend: Backend,
    title: String,
    filter: Option<FileFilter>,
    extension: Option<&'static str>,
}

impl SaveDialog {
    /// Prepare a dialog titled `title`, optionally filtered by a glob pattern.
    pub fn new(backend: &Backend, title: &str, selected_filter: Option<&str>) -> Self {
        let known = selected_filter.and_then(|pattern| {
            KNOWN_FORMATS
                .iter()
                .find(|(fragment, _, _)| pattern.contains(fragment))
        });
        let filter = selected_filter.map(|pattern| FileFilter {
            label: known.map_or_else(|| pattern.to_string(), |(_, label, _)| (*label).to_string()),
            pattern: pattern.to_string(),
        });
        Self {
            backend: backend.clone(),
            title: title.to_string(),
            filter,
            extension: known.map(|(_, _, extension)| *extension),
        }
    }

    /// The extension appended to confirmed paths, if any.
    pub fn extension(&self) -> Option<&'static str> {
        self.extension
    }

    /// The request handed to the toolkit.
    pub fn request(&self) -> FileDialogRequest {
        FileDialogRequest {
            title: self.title.clone(),
            action: FileDialogAction::Save,
            filters: self.filter.iter().cloned().collect(),
        }
    }

    /// Run the dialog, blocking until the user answers.
    ///
    /// Returns `None` if the user cancelled.
    pub fn get_path(&self) -> Option<PathBuf> {
        let Some(path) = self.backend.run_file_dialog(&self.request()) else {
            tracing::debug!(target: targets::DIALOG, title = %self.title, "save dialog cancelled");
            return None;
        };
        let path = match self.extension {
            Some(extension) if !path.to_string_lossy().ends_with(extension) => {
                let mut raw = path.into_os_string();
                raw.push(extension);
                PathBuf::from(raw)
            }
            _ => path,
        };
        tracing::debug!(target: targets::DIALOG, path = %path.display(), "save dialog confirmed");
        Some(path)
    }
}

impl std::fmt::Debug for SaveDialog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveDialog")
            .field("title", &self.title)
            .field("filter", &self.filter)
            .finish()
    }
}
