//! # Media Discovery Module
//!
//! Questo modulo gestisce la discovery dei file media da caricare.
//!
//! ## Responsabilità:
//! - Discovery ricorsiva di file media in directory
//! - Filtro per estensioni supportate da Google Photos
//! - Derivazione del display name (basename del path)
//! - Formattazione human-readable delle dimensioni
//!
//! ## Formati supportati:
//! - **Immagini**: JPG, JPEG, PNG, GIF, WebP, BMP, HEIC, HEIF
//! - **Video**: MP4, MOV, AVI, MKV, WebM, MPG, M4V
//!
//! ## Garanzie:
//! - `find_media_files()` restituisce i path in ordine deterministico
//! - `display_name()` è una funzione pura del path: stesso input,
//!   stesso output, sempre
//!
//! ## Esempio:
//! ```rust
//! use gphotos_bulk_uploader::media_finder::MediaFinder;
//!
//! let files = MediaFinder::find_media_files(std::path::Path::new(".")).unwrap();
//! for file in files {
//!     println!("{}", MediaFinder::display_name(&file));
//! }
//! ```

use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Discovers candidate media files and derives their display names
pub struct MediaFinder;

impl MediaFinder {
    /// Find all supported media files under a directory, in deterministic order
    pub fn find_media_files(media_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(media_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            if Self::is_supported_format(path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Check if a file format is supported by the remote library
    pub fn is_supported_format(path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            matches!(
                ext_lower.as_str(),
                "jpg"
                    | "jpeg"
                    | "png"
                    | "gif"
                    | "webp"
                    | "bmp"
                    | "heic"
                    | "heif"
                    | "mp4"
                    | "mov"
                    | "avi"
                    | "mkv"
                    | "webm"
                    | "mpg"
                    | "m4v"
            )
        } else {
            false
        }
    }

    /// Display name for a file: its basename. Pure function of the path.
    pub fn display_name(path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned())
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_supported_format() {
        assert!(MediaFinder::is_supported_format(Path::new("photo.jpg")));
        assert!(MediaFinder::is_supported_format(Path::new("photo.JPEG")));
        assert!(MediaFinder::is_supported_format(Path::new("clip.mp4")));
        assert!(MediaFinder::is_supported_format(Path::new("img.heic")));
        assert!(!MediaFinder::is_supported_format(Path::new("notes.txt")));
        assert!(!MediaFinder::is_supported_format(Path::new("archive.zip")));
        assert!(!MediaFinder::is_supported_format(Path::new("noextension")));
    }

    #[test]
    fn test_display_name_is_basename() {
        assert_eq!(
            MediaFinder::display_name(Path::new("/photos/2024/beach.jpg")),
            "beach.jpg"
        );
        assert_eq!(MediaFinder::display_name(Path::new("beach.jpg")), "beach.jpg");
    }

    #[test]
    fn test_display_name_is_pure() {
        let path = Path::new("/some/dir/img_001.png");
        assert_eq!(
            MediaFinder::display_name(path),
            MediaFinder::display_name(path)
        );
    }

    #[test]
    fn test_find_media_files_filters_and_orders() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        std::fs::create_dir(root.join("sub")).unwrap();
        std::fs::write(root.join("b.jpg"), b"x").unwrap();
        std::fs::write(root.join("a.png"), b"x").unwrap();
        std::fs::write(root.join("notes.txt"), b"x").unwrap();
        std::fs::write(root.join("sub").join("c.mp4"), b"x").unwrap();

        let files = MediaFinder::find_media_files(root).unwrap();
        let names: Vec<String> = files.iter().map(|p| MediaFinder::display_name(p)).collect();

        assert_eq!(files.len(), 3);
        assert_eq!(names, vec!["a.png", "b.jpg", "c.mp4"]);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(MediaFinder::format_size(512), "512 B");
        assert_eq!(MediaFinder::format_size(2048), "2.00 KB");
        assert_eq!(MediaFinder::format_size(5 * 1024 * 1024), "5.00 MB");
    }
}
