use carcassonne::Grid;

/// Draws the grid as a box of characters, one per cell, with free cells as `·`.
///
/// `glyph` decides how each tile is drawn. Rows are labelled with their `y`
/// coordinate, the header shows the `x` coordinate of the first column.
pub fn visualize_grid<T>(grid: &Grid<T>, glyph: impl Fn(&T) -> char) -> String {
    let mut result = format!("    {:>2}", 0);
    result += "\n    ╭";
    for _ in 0..grid.width() {
        result += "──";
    }
    result += "╮\n";

    for y in 0..grid.height() as i32 {
        result += &format!("{:>3} │", y);
        for x in 0..grid.width() as i32 {
            // Both coordinates are in range, so the lookup can't fail
            match grid.get_tile(x, y) {
                Ok(Some(tile)) => result.push(glyph(tile)),
                _ => result.push('·'),
            }
            result.push(' ');
        }
        result += "│\n";
    }

    // Draw the bottom of the box
    result += "    ╰";
    for _ in 0..grid.width() {
        result += "──";
    }
    result += "╯";
    result
}
