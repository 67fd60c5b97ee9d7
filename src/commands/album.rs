//! Album command - manage local albums

use crate::{
    ScatchError,
    api::{ImageRecord, ProxyFetcher},
    cli::AlbumCommands,
    library::Library,
    output,
};
use dialoguer::Confirm;

type Result<T> = std::result::Result<T, ScatchError>;

/// Execute the album command
///
/// `lookup` resolves a photo id the library does not know yet; it is only
/// called by `save`.
///
/// # Errors
/// Returns an error if library operations, the photo lookup, or user
/// interaction fail.
pub fn execute<F>(library: &Library, command: &AlbumCommands, lookup: F, quiet: bool) -> Result<()>
where
    F: FnOnce(u64) -> Result<ImageRecord>,
{
    match command {
        AlbumCommands::List => list_albums(library, quiet),
        AlbumCommands::Show { name, page } => show_album(library, name, *page, quiet),
        AlbumCommands::Save { name, id } => {
            let image = match library.image(*id)? {
                Some(image) => image,
                None => lookup(*id)?,
            };
            if library.save_to_album(name, &image)? {
                if !quiet {
                    println!("{}", output::success(&format!("Saved {id} to '{name}'")));
                }
            } else if !quiet {
                println!("{}", output::warning(&format!("{id} is already in '{name}'")));
            }
            Ok(())
        }
        AlbumCommands::Remove { name, id } => {
            if !library.remove_from_album(name, *id)? {
                return Err(ScatchError::InvalidInput(format!("{id} is not in album '{name}'")));
            }
            if !quiet {
                println!("{}", output::success(&format!("Removed {id} from '{name}'")));
            }
            Ok(())
        }
        AlbumCommands::Delete { name, yes } => delete_album(library, name, *yes || quiet, quiet),
    }
}

/// Fetch a photo through the API for `album save` and `favorite add`
///
/// # Errors
/// Returns an error if the photo cannot be fetched.
pub fn remote_lookup(source: &ProxyFetcher, id: u64) -> Result<ImageRecord> {
    Ok(source.fetch_photo(id)?)
}

fn list_albums(library: &Library, quiet: bool) -> Result<()> {
    let albums = library.list_albums()?;
    if albums.is_empty() {
        if !quiet {
            println!("No albums yet. Save a photo with 'scatch album save <NAME> <ID>'.");
        }
        return Ok(());
    }
    if !quiet {
        println!("Albums:");
    }
    for album in &albums {
        println!("{}", output::album_with_count(album, quiet));
    }
    Ok(())
}

fn show_album(library: &Library, name: &str, page: u32, quiet: bool) -> Result<()> {
    let result = library.album_page(name, page)?;
    if result.images.is_empty() {
        if !quiet {
            println!("Album '{name}' has no images on page {page}.");
        }
        return Ok(());
    }
    let offset = (page as usize - 1) * crate::PER_PAGE;
    for (i, image) in result.images.iter().enumerate() {
        println!("{}", output::indexed_image_line(offset + i, image, quiet));
    }
    if result.has_more && !quiet {
        println!("More images on page {}.", result.next_cursor);
    }
    Ok(())
}

fn delete_album(library: &Library, name: &str, confirmed: bool, quiet: bool) -> Result<()> {
    if !confirmed {
        let proceed = Confirm::new()
            .with_prompt(format!("Delete album '{name}'?"))
            .default(false)
            .interact()
            .map_err(|e| ScatchError::InvalidInput(format!("Failed to read input: {e}")))?;
        if !proceed {
            println!("Cancelled.");
            return Ok(());
        }
    }
    let removed = library.delete_album(name)?;
    if !quiet {
        println!(
            "{}",
            output::success(&format!("Deleted album '{name}' ({removed} image(s))"))
        );
    }
    Ok(())
}
