//! Favorite command - manage favorites

use crate::{ScatchError, api::ImageRecord, cli::FavoriteCommands, library::Library, output};

type Result<T> = std::result::Result<T, ScatchError>;

/// Execute the favorite command
///
/// # Errors
/// Returns an error if library operations or the photo lookup fail.
pub fn execute<F>(library: &Library, command: &FavoriteCommands, lookup: F, quiet: bool) -> Result<()>
where
    F: FnOnce(u64) -> Result<ImageRecord>,
{
    match command {
        FavoriteCommands::List { page } => {
            let result = library.favorites_page(*page)?;
            if result.images.is_empty() {
                if !quiet {
                    println!("No favorites on page {page}.");
                }
                return Ok(());
            }
            let offset = (*page as usize - 1) * crate::PER_PAGE;
            for (i, image) in result.images.iter().enumerate() {
                println!("{}", output::indexed_image_line(offset + i, image, quiet));
            }
            if result.has_more && !quiet {
                println!("More favorites on page {}.", result.next_cursor);
            }
        }
        FavoriteCommands::Add { id } => {
            let image = match library.image(*id)? {
                Some(image) => image,
                None => lookup(*id)?,
            };
            let added = library.add_favorite(&image)?;
            if !quiet {
                if added {
                    println!("{}", output::success(&format!("Added {id} to favorites")));
                } else {
                    println!("{}", output::warning(&format!("{id} is already a favorite")));
                }
            }
        }
        FavoriteCommands::Remove { id } => {
            if !library.remove_favorite(*id)? {
                return Err(ScatchError::InvalidInput(format!("{id} is not a favorite")));
            }
            if !quiet {
                println!("{}", output::success(&format!("Removed {id} from favorites")));
            }
        }
    }
    Ok(())
}
