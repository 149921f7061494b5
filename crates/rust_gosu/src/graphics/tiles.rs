//! Splitting tile sheets into images
//!
//! Tile sizes follow one convention everywhere: a positive value is the size
//! of one tile in pixels, a negative value `-n` divides the bitmap into `n`
//! columns (or rows). Partial tiles at the right and bottom are dropped.

use std::path::Path;

use super::bitmap::Bitmap;
use super::image::Image;
use super::image_data::EdgeFlags;
use super::{Graphics, ImageError, ImageResult};

/// Tile pixel size and tile count along one axis
fn split_axis(extent: u32, tile: i32) -> Option<(u32, u32)> {
    match tile {
        0 => None,
        t if t > 0 => {
            let size = t.unsigned_abs();
            Some((size, extent / size))
        }
        t => {
            let count = t.unsigned_abs();
            Some((extent / count, count))
        }
    }
}

/// Split a bitmap into tiles, row by row
pub fn load_tiles(
    graphics: &Graphics,
    bitmap: &Bitmap,
    tile_width: i32,
    tile_height: i32,
    edges: EdgeFlags,
) -> ImageResult<Vec<Image>> {
    let invalid = || ImageError::InvalidTileSize {
        tile_width,
        tile_height,
    };
    let (width, columns) = split_axis(bitmap.width(), tile_width).ok_or_else(invalid)?;
    let (height, rows) = split_axis(bitmap.height(), tile_height).ok_or_else(invalid)?;

    if width == 0 || height == 0 {
        // More rows or columns requested than there are pixels
        return Err(invalid());
    }

    log::debug!(
        "Splitting {}x{} bitmap into {}x{} tiles of {}x{}",
        bitmap.width(),
        bitmap.height(),
        columns,
        rows,
        width,
        height
    );

    let mut tiles = Vec::with_capacity(columns as usize * rows as usize);
    for row in 0..rows {
        for column in 0..columns {
            tiles.push(Image::from_bitmap_region(
                graphics,
                bitmap,
                column * width,
                row * height,
                width,
                height,
                edges,
            )?);
        }
    }
    Ok(tiles)
}

/// Load a PNG or BMP file and split it into tiles
pub fn load_tiles_from_file<P: AsRef<Path>>(
    graphics: &Graphics,
    path: P,
    tile_width: i32,
    tile_height: i32,
    edges: EdgeFlags,
) -> ImageResult<Vec<Image>> {
    let bitmap = Bitmap::from_file(path)?;
    load_tiles(graphics, &bitmap, tile_width, tile_height, edges)
}

/// Split a bitmap into tiles and append them to `append_to`
pub fn images_from_tiled_bitmap<C: Extend<Image>>(
    graphics: &Graphics,
    bitmap: &Bitmap,
    tile_width: i32,
    tile_height: i32,
    edges: EdgeFlags,
    append_to: &mut C,
) -> ImageResult<()> {
    append_to.extend(load_tiles(graphics, bitmap, tile_width, tile_height, edges)?);
    Ok(())
}

/// Load a file, split it into tiles and append them to `append_to`
pub fn images_from_tiled_file<P: AsRef<Path>, C: Extend<Image>>(
    graphics: &Graphics,
    path: P,
    tile_width: i32,
    tile_height: i32,
    edges: EdgeFlags,
    append_to: &mut C,
) -> ImageResult<()> {
    append_to.extend(load_tiles_from_file(graphics, path, tile_width, tile_height, edges)?);
    Ok(())
}
