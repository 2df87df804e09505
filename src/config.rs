//! Build configuration.
//!
//! All filesystem roots and recognition sets are passed in explicitly;
//! nothing is read from process-wide state, so two builds with
//! different configs can run side by side.

/// Image extensions recognized as pages, lower-case without the dot.
pub const IMAGE_EXTS: &[&str] = &["webp", "jpg", "jpeg", "png", "gif"];

/// Subfolder names that hold generated thumbnails, never pages.
pub const THUMB_ALIASES: &[&str] = &["thumbs", "thumb", "thumbnails", "tn"];

/// Settings for a build run.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Recognized image extensions (lower-case, no dot).
    pub image_exts: Vec<String>,
    /// Lower-cased subfolder names to skip when resolving a page source.
    pub thumb_aliases: Vec<String>,
    /// File name of the generated viewer, written into each book dir.
    pub output_name: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            image_exts: IMAGE_EXTS.iter().map(|s| s.to_string()).collect(),
            thumb_aliases: THUMB_ALIASES.iter().map(|s| s.to_string()).collect(),
            output_name: "viewer.html".to_string(),
        }
    }
}

impl BuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recognize an additional image extension.
    pub fn with_image_ext(mut self, ext: impl Into<String>) -> Self {
        self.image_exts.push(ext.into().to_lowercase());
        self
    }

    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = name.into();
        self
    }

    /// Check whether a file name has a recognized image extension.
    pub fn is_image_name(&self, name: &str) -> bool {
        match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => {
                let ext = ext.to_lowercase();
                self.image_exts.iter().any(|e| *e == ext)
            }
            _ => false,
        }
    }

    /// Check whether a directory name is a thumbnail alias.
    pub fn is_thumb_dir(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.thumb_aliases.iter().any(|a| *a == name)
    }
}
