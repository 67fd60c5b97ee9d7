//! Output formatting for CLI display
//!
//! Image lines, album rows and layout grids. Quiet mode strips decoration so
//! results can be piped.

use crate::api::ImageRecord;
use crate::layout::LayoutAssignment;
use crate::library::AlbumSummary;
use colored::Colorize;

/// Format one image for display
///
/// Non-quiet output starts with a swatch in the image's placeholder color.
#[must_use]
pub fn image_line(image: &ImageRecord, quiet: bool) -> String {
    if quiet {
        return format!("{}\t{}", image.id, image.download_url());
    }
    let (r, g, b) = image.placeholder_rgb();
    let swatch = "  ".on_truecolor(r, g, b);
    format!(
        "{swatch} {:>9}  {:>5}x{:<5} {}  {}",
        image.id.to_string().bold(),
        image.width,
        image.height,
        image.photographer.cyan(),
        image.download_url().dimmed()
    )
}

/// Format an indexed image line (position in the loaded list)
#[must_use]
pub fn indexed_image_line(index: usize, image: &ImageRecord, quiet: bool) -> String {
    if quiet {
        image_line(image, true)
    } else {
        format!("{:>4}. {}", index + 1, image_line(image, false))
    }
}

/// Format an album with its image count
#[must_use]
pub fn album_with_count(album: &AlbumSummary, quiet: bool) -> String {
    if quiet {
        album.name.clone()
    } else {
        format!("  {} ({} image(s))", album.name.bold(), album.count)
    }
}

/// Render a layout assignment as rows of image indices
///
/// Each row lists the image index shown in every column; empty cells in the
/// last row are left blank.
#[must_use]
pub fn layout_grid(assignment: &LayoutAssignment) -> Vec<String> {
    let width = assignment.len().max(1).to_string().len();
    (0..assignment.rows())
        .map(|row| {
            (0..assignment.column_count())
                .map(|column| match assignment.index_at(column, row) {
                    Some(index) => format!("{index:>width$}"),
                    None => " ".repeat(width),
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect()
}

/// Success marker line
#[must_use]
pub fn success(message: &str) -> String {
    format!("{} {message}", "✓".green())
}

/// Warning marker line
#[must_use]
pub fn warning(message: &str) -> String {
    format!("{} {message}", "!".yellow().bold())
}
