//! Show command - print one photo

use crate::{ScatchError, config::ScatchConfig, output};

type Result<T> = std::result::Result<T, ScatchError>;

/// Execute the show command
///
/// Looks the photo up in the local library first and falls back to the API.
///
/// # Errors
/// Returns an error if the photo cannot be fetched or opened.
pub fn execute(config: &ScatchConfig, id: u64, open: bool, quiet: bool) -> Result<()> {
    let library = super::open_library(config)?;
    let image = match library.image(id)? {
        Some(image) => image,
        None => super::remote_source(config)?.fetch_photo(id)?,
    };

    println!("{}", output::image_line(&image, quiet));
    if !quiet {
        println!("  orientation: {}", if image.is_portrait() { "portrait" } else { "landscape" });
        println!("  favorite:    {}", library.is_favorite(id)?);
    }

    if open {
        open::that(image.download_url())?;
    }
    Ok(())
}
