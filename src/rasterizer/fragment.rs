//! Fragment generation, depth testing, shading and writeback

use crate::color::gamma_correct;
use crate::framebuffer::Image;
use crate::geometry::Coordinate;
use crate::pipeline::shader::Neighbor;
use crate::pipeline::{Fragment, InFragmentInfo, OutFragmentInfo, Pipeline, Triangle};

use super::arena::{vertex_record, FragmentCell, NeighborLink};
use super::DrawStats;

/// Fills `fragments` with the classified grid covering the triangle's bounds, row by row from the bottom.
///
/// Returns the number of fragments inside the triangle.
pub(crate) fn classify_fragments(triangle: &mut Triangle, fragments: &mut Vec<FragmentCell>) -> usize {
    let start = fragments.len();
    let mut inside = 0;

    for pixel in triangle.bounds.pixels() {
        let bar = triangle.helper.coordinates(pixel);
        let is_inside = triangle.helper.is_inside(&bar);

        inside += is_inside as usize;

        fragments.push(FragmentCell { bar, inside: is_inside, next_x: None, next_y: None });
    }

    triangle.fragments = start..fragments.len();

    inside
}

/// Links every inside fragment to the +X (else -X) and +Y (else -Y) neighbor that is also inside.
pub(crate) fn link_neighbors(triangle: &Triangle, fragments: &mut [FragmentCell]) {
    let grid = &mut fragments[triangle.fragments.clone()];

    let width = triangle.bounds.width() as usize;
    let height = triangle.bounds.height() as usize;

    for y in 0..height {
        for x in 0..width {
            let index = y * width + x;

            if !grid[index].inside {
                continue;
            }

            let next_x = if x + 1 < width && grid[index + 1].inside {
                Some(NeighborLink { index: index + 1, mult: 1.0 })
            } else if x > 0 && grid[index - 1].inside {
                Some(NeighborLink { index: index - 1, mult: -1.0 })
            } else {
                None
            };

            let next_y = if y + 1 < height && grid[index + width].inside {
                Some(NeighborLink { index: index + width, mult: 1.0 })
            } else if y > 0 && grid[index - width].inside {
                Some(NeighborLink { index: index - width, mult: -1.0 })
            } else {
                None
            };

            grid[index].next_x = next_x;
            grid[index].next_y = next_y;
        }
    }
}

/// Depth tests, shades, blends and writes every inside fragment of a classified triangle.
pub(crate) fn shade_fragments<I>(pipeline: &Pipeline,
                                 triangle: &Triangle,
                                 fragments: &[FragmentCell],
                                 varyings: &[f32],
                                 stride: usize,
                                 constants: &[u8],
                                 image: &mut I,
                                 stats: &mut DrawStats) where I: Image + ?Sized {
    let grid = &fragments[triangle.fragments.clone()];

    let records = [
        vertex_record(varyings, stride, triangle.vertices[0]),
        vertex_record(varyings, stride, triangle.vertices[1]),
        vertex_record(varyings, stride, triangle.vertices[2]),
    ];

    let depth_state = *pipeline.depth_state();
    let shader = pipeline.fragment_shader();

    let resolve = |link: Option<NeighborLink>| link.map(|link| Neighbor { bar: grid[link.index].bar, mult: link.mult });

    for (cell, pixel) in grid.iter().zip(triangle.bounds.pixels()) {
        if !cell.inside {
            continue;
        }

        let depth = triangle.interpolate_depth(&cell.bar);

        let info = InFragmentInfo {
            triangle,
            pixel,
            bar: cell.bar,
            w: triangle.interpolate_w(&cell.bar),
            depth,
            varyings: records,
            constants,
            next_x: resolve(cell.next_x),
            next_y: resolve(cell.next_y),
        };

        let mut out = OutFragmentInfo::new(depth);

        if !depth_state.enabled {
            stats.fragments_shaded += 1;

            if shader(triangle, &info, &mut out) == Fragment::Keep {
                write_color(pipeline, image, pixel, &out, stats);
            }
        } else if !depth_state.fragment_shader_writes_depth {
            // Early depth test, fragments behind the stored depth are never shaded
            if !pipeline.depth_test(depth, image.pixel_depth(pixel)) {
                continue;
            }

            image.set_pixel_depth(pixel, depth);

            stats.fragments_shaded += 1;

            if shader(triangle, &info, &mut out) == Fragment::Keep {
                write_color(pipeline, image, pixel, &out, stats);
            }
        } else {
            stats.fragments_shaded += 1;

            if shader(triangle, &info, &mut out) == Fragment::Discard {
                continue;
            }

            if !pipeline.depth_test(out.depth, image.pixel_depth(pixel)) {
                continue;
            }

            image.set_pixel_depth(pixel, out.depth);

            write_color(pipeline, image, pixel, &out, stats);
        }
    }
}

#[inline]
fn write_color<I>(pipeline: &Pipeline, image: &mut I, pixel: Coordinate, out: &OutFragmentInfo, stats: &mut DrawStats)
    where I: Image + ?Sized {
    let mut color = pipeline.blend(out.color, image.pixel_color(pixel));

    if pipeline.gamma_correction() {
        color = gamma_correct(color, pipeline.gamma());
    }

    image.set_pixel_color(pixel, color);

    stats.fragments_written += 1;
}
