use crate::db::cluster::cluster;
use crate::db::paths::PathSet;
use crate::geom::bounds::BoardBounds;
use crate::geom::point::Point;
use anyhow::Result;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect as ImageRect;
use std::path::Path;

const TILE_DARK: Rgb<u8> = Rgb([0xcd, 0x91, 0x3b]);
const TILE_LIGHT: Rgb<u8> = Rgb([0xd7, 0xa0, 0x53]);
const PATH_BLUE: Rgb<u8> = Rgb([0x5f, 0x65, 0xba]);
const PIN_RED: Rgb<u8> = Rgb([0xca, 0x28, 0x01]);
const HOLE: Rgb<u8> = Rgb([20, 20, 20]);

// Extra components are drawn in these when the board is not connected.
const CLUSTER_COLORS: [Rgb<u8>; 5] = [
    Rgb([0x2a, 0x9d, 0x8f]),
    Rgb([0x8e, 0x44, 0xad]),
    Rgb([0x27, 0x6f, 0xbf]),
    Rgb([0x6a, 0x99, 0x4e]),
    Rgb([0x44, 0x44, 0x44]),
];

/// Renders pins and (deduplicated) paths on the board as a PNG.
pub fn draw_board(
    pins: &[Point],
    paths: &PathSet,
    bounds: BoardBounds,
    filename: &str,
    tile_px: u32,
) -> Result<()> {
    let tile = tile_px.max(8) as f32;
    let side = ((bounds.size + 1) as f32 * tile) as u32;
    let mut img = RgbImage::from_pixel(side, side, TILE_DARK);

    // Board coordinates have a half-tile margin and y pointing up.
    let map = |x: f32, y: f32| (((x + 0.5) * tile), (side as f32 - (y + 0.5) * tile));

    let border = (tile / 24.0).max(1.0) as i32;
    for i in 0..bounds.size {
        for j in 0..bounds.size {
            let (x0, y0) = map(i as f32, (j + 1) as f32);
            let outer = ImageRect::at(x0 as i32, y0 as i32).of_size(tile as u32, tile as u32);
            draw_filled_rect_mut(&mut img, outer, TILE_LIGHT);
            let inner_size = (tile as i32 - 2 * border).max(1) as u32;
            let inner = ImageRect::at(x0 as i32 + border, y0 as i32 + border).of_size(inner_size, inner_size);
            draw_filled_rect_mut(&mut img, inner, TILE_DARK);
        }
    }

    for x in 0..=bounds.size {
        for y in 0..=bounds.size {
            let (px, py) = map(x as f32, y as f32);
            draw_filled_circle_mut(&mut img, (px as i32, py as i32), 1, HOLE);
        }
    }

    let unique = paths.dedup();
    if !unique.is_empty() {
        let labels = cluster(unique.as_slice(), pins)?;
        let main_label = pins.first().and_then(|p| labels.pins.get(p)).copied();

        let inset = 0.15;
        let half_width = (tile / 16.0).max(1.0) as i32;
        for seg in &unique {
            let color = match labels.points.get(&seg.start) {
                Some(label) if Some(*label) != main_label => {
                    CLUSTER_COLORS[label.index() % CLUSTER_COLORS.len()]
                }
                _ => PATH_BLUE,
            };
            let (a, b) = seg.canonical();
            let (ax, ay, bx, by) = if seg.is_horizontal() {
                (a.x as f32 + inset, a.y as f32, b.x as f32 - inset, b.y as f32)
            } else {
                (a.x as f32, a.y as f32 + inset, b.x as f32, b.y as f32 - inset)
            };
            let (x1, y1) = map(ax, ay);
            let (x2, y2) = map(bx, by);
            for off in -half_width..=half_width {
                let off = off as f32;
                let (dx, dy) = if seg.is_horizontal() { (0.0, off) } else { (off, 0.0) };
                draw_line_segment_mut(&mut img, (x1 + dx, y1 + dy), (x2 + dx, y2 + dy), color);
            }
        }
    }

    let radius = (tile / 5.0) as i32;
    for pin in pins {
        let (px, py) = map(pin.x as f32, pin.y as f32);
        draw_filled_circle_mut(&mut img, (px as i32, py as i32), radius, PIN_RED);
    }

    if let Some(parent) = Path::new(filename).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    img.save(Path::new(filename))?;
    Ok(())
}
