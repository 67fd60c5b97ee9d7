//! Layout command - print the column assignment for a width

use crate::{ScatchError, layout::ColumnLayout, output};

type Result<T> = std::result::Result<T, ScatchError>;

/// Execute the layout command
///
/// # Errors
/// Returns `ScatchError::InvalidInput` for a zero minimum column width.
pub fn execute(width: u32, count: usize, min_column_width: u32, quiet: bool) -> Result<()> {
    if min_column_width == 0 {
        return Err(ScatchError::InvalidInput(
            "minimum column width must be positive".into(),
        ));
    }
    let assignment = ColumnLayout::new(min_column_width).assign(width, count);

    if !quiet {
        println!(
            "{} column(s), {} row(s) for {count} image(s) at width {width} (min column {min_column_width})",
            assignment.column_count(),
            assignment.rows()
        );
    }
    for line in output::layout_grid(&assignment) {
        println!("{line}");
    }
    Ok(())
}
