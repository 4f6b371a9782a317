//! External-region extraction on a binary mask.
//!
//! Foreground is any nonzero pixel. Regions are 8-connected foreground
//! components, and only *external* components are reported: a component
//! enclosed inside a hole of another component is skipped, so the result
//! matches the outermost-boundaries-only convention of classical contour
//! retrieval.

use crate::image::GrayImageView;

/// Axis-aligned bounding box of a region, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// One connected foreground region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
    /// Number of foreground pixels in the region.
    pub area: usize,
}

impl Region {
    /// The smallest axis-aligned rectangle enclosing the region.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox {
            x: self.min_x,
            y: self.min_y,
            width: self.max_x - self.min_x + 1,
            height: self.max_y - self.min_y + 1,
        }
    }
}

// Pixel states during the sweep.
const UNTOUCHED: u8 = 0;
const OUTER_BG: u8 = 1;
const LABELED: u8 = 2;

/// Find the external foreground regions of a binary mask.
///
/// The background 4-connected to the image border is flooded first; a
/// foreground component is external when it lies on the border or touches
/// that outer background. Components reachable only through a hole of
/// another component never touch it and are dropped.
pub fn find_external_regions(mask: &GrayImageView<'_>) -> Vec<Region> {
    let (w, h) = (mask.width, mask.height);
    debug_assert_eq!(mask.data.len(), w * h);
    if w == 0 || h == 0 {
        return Vec::new();
    }

    let mut state = vec![UNTOUCHED; w * h];
    flood_outer_background(mask, &mut state);

    let mut regions = Vec::new();
    let mut stack = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            if mask.data[idx] == 0 || state[idx] != UNTOUCHED {
                continue;
            }

            // Grow one 8-connected component.
            let mut region = Region {
                min_x: x,
                min_y: y,
                max_x: x,
                max_y: y,
                area: 0,
            };
            let mut external = false;

            state[idx] = LABELED;
            stack.push((x, y));
            while let Some((cx, cy)) = stack.pop() {
                region.min_x = region.min_x.min(cx);
                region.min_y = region.min_y.min(cy);
                region.max_x = region.max_x.max(cx);
                region.max_y = region.max_y.max(cy);
                region.area += 1;

                if cx == 0 || cy == 0 || cx == w - 1 || cy == h - 1 {
                    external = true;
                }

                for (nx, ny) in neighbors8(cx, cy, w, h) {
                    let nidx = ny * w + nx;
                    if mask.data[nidx] == 0 {
                        if state[nidx] == OUTER_BG {
                            external = true;
                        }
                    } else if state[nidx] == UNTOUCHED {
                        state[nidx] = LABELED;
                        stack.push((nx, ny));
                    }
                }
            }

            if external {
                regions.push(region);
            }
        }
    }

    regions
}

/// Sort regions top-to-bottom, then left-to-right by bounding-box origin.
pub fn sort_reading_order(regions: &mut [Region]) {
    regions.sort_by_key(|r| (r.min_y, r.min_x));
}

/// Flood the zero pixels 4-connected to the image border.
fn flood_outer_background(mask: &GrayImageView<'_>, state: &mut [u8]) {
    let (w, h) = (mask.width, mask.height);
    let mut stack = Vec::new();

    let seed = |x: usize, y: usize, state: &mut [u8], stack: &mut Vec<(usize, usize)>| {
        let idx = y * w + x;
        if mask.data[idx] == 0 && state[idx] == UNTOUCHED {
            state[idx] = OUTER_BG;
            stack.push((x, y));
        }
    };

    for x in 0..w {
        seed(x, 0, state, &mut stack);
        seed(x, h - 1, state, &mut stack);
    }
    for y in 0..h {
        seed(0, y, state, &mut stack);
        seed(w - 1, y, state, &mut stack);
    }

    while let Some((x, y)) = stack.pop() {
        let visit = |nx: usize, ny: usize, state: &mut [u8], stack: &mut Vec<(usize, usize)>| {
            let nidx = ny * w + nx;
            if mask.data[nidx] == 0 && state[nidx] == UNTOUCHED {
                state[nidx] = OUTER_BG;
                stack.push((nx, ny));
            }
        };
        if x > 0 {
            visit(x - 1, y, state, &mut stack);
        }
        if x + 1 < w {
            visit(x + 1, y, state, &mut stack);
        }
        if y > 0 {
            visit(x, y - 1, state, &mut stack);
        }
        if y + 1 < h {
            visit(x, y + 1, state, &mut stack);
        }
    }
}

fn neighbors8(
    x: usize,
    y: usize,
    w: usize,
    h: usize,
) -> impl Iterator<Item = (usize, usize)> {
    const OFFSETS: [(i64, i64); 8] = [
        (-1, -1),
        (0, -1),
        (1, -1),
        (-1, 0),
        (1, 0),
        (-1, 1),
        (0, 1),
        (1, 1),
    ];
    OFFSETS.into_iter().filter_map(move |(dx, dy)| {
        let nx = x as i64 + dx;
        let ny = y as i64 + dy;
        (nx >= 0 && ny >= 0 && (nx as usize) < w && (ny as usize) < h)
            .then(|| (nx as usize, ny as usize))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::GrayImage;

    fn mask_from_rows(rows: &[&str]) -> GrayImage {
        let height = rows.len();
        let width = rows[0].len();
        let mut data = Vec::with_capacity(width * height);
        for row in rows {
            assert_eq!(row.len(), width);
            for c in row.bytes() {
                data.push(if c == b'#' { 255 } else { 0 });
            }
        }
        GrayImage {
            width,
            height,
            data,
        }
    }

    #[test]
    fn empty_mask_has_no_regions() {
        let mask = mask_from_rows(&["....", "....", "...."]);
        assert!(find_external_regions(&mask.view()).is_empty());
    }

    #[test]
    fn single_rectangle() {
        let mask = mask_from_rows(&[
            "......",
            ".###..",
            ".###..",
            "......",
        ]);
        let regions = find_external_regions(&mask.view());
        assert_eq!(regions.len(), 1);
        let bbox = regions[0].bounding_box();
        assert_eq!(
            bbox,
            BoundingBox {
                x: 1,
                y: 1,
                width: 3,
                height: 2
            }
        );
        assert_eq!(regions[0].area, 6);
    }

    #[test]
    fn diagonal_pixels_join_one_region() {
        let mask = mask_from_rows(&[
            "#...",
            ".#..",
            "..#.",
        ]);
        let regions = find_external_regions(&mask.view());
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].area, 3);
    }

    #[test]
    fn separate_rectangles_are_separate_regions() {
        let mask = mask_from_rows(&[
            "##..##",
            "##..##",
            "......",
            "...##.",
        ]);
        let regions = find_external_regions(&mask.view());
        assert_eq!(regions.len(), 3);
    }

    #[test]
    fn region_inside_hole_is_not_external() {
        // A ring with a smaller blob inside its hole. Only the ring is
        // reachable from the border-connected background.
        let mask = mask_from_rows(&[
            ".........",
            ".#######.",
            ".#.....#.",
            ".#..#..#.",
            ".#.....#.",
            ".#######.",
            ".........",
        ]);
        let regions = find_external_regions(&mask.view());
        assert_eq!(regions.len(), 1);
        let bbox = regions[0].bounding_box();
        assert_eq!(bbox.width, 7);
        assert_eq!(bbox.height, 5);
    }

    #[test]
    fn region_touching_border_is_external() {
        let mask = mask_from_rows(&[
            "##..",
            "##..",
        ]);
        let regions = find_external_regions(&mask.view());
        assert_eq!(regions.len(), 1);
    }

    #[test]
    fn full_foreground_is_one_region() {
        let mask = mask_from_rows(&["###", "###"]);
        let regions = find_external_regions(&mask.view());
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].area, 6);
    }

    #[test]
    fn reading_order_sorts_by_row_then_column() {
        let mut regions = vec![
            Region {
                min_x: 5,
                min_y: 3,
                max_x: 6,
                max_y: 4,
                area: 4,
            },
            Region {
                min_x: 0,
                min_y: 3,
                max_x: 1,
                max_y: 4,
                area: 4,
            },
            Region {
                min_x: 2,
                min_y: 0,
                max_x: 3,
                max_y: 1,
                area: 4,
            },
        ];
        sort_reading_order(&mut regions);
        assert_eq!(regions[0].min_y, 0);
        assert_eq!((regions[1].min_y, regions[1].min_x), (3, 0));
        assert_eq!((regions[2].min_y, regions[2].min_x), (3, 5));
    }
}
