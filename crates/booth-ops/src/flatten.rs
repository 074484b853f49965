//! CPU reference surface.
//!
//! Paints a [`DrawLayer`] list onto an RGBA8 canvas the way a display
//! surface would: each layer is clipped to its frame rectangle, the source
//! is sampled nearest-neighbour at the scaled position and blended with
//! Porter-Duff Over (straight alpha).
//!
//! Used by the CLI to export composites and by tests to check the layer
//! contract end to end.

use crate::composite::DrawLayer;
use booth_core::{CHANNELS, RasterImage, Rect, Rgba8};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Paints `layers` in order onto a new `width x height` canvas filled
/// with `background`.
pub fn flatten(layers: &[DrawLayer], width: u32, height: u32, background: Rgba8) -> RasterImage {
    let mut canvas = RasterImage::filled(width, height, background);
    flatten_onto(&mut canvas, layers);
    canvas
}

/// Paints `layers` in order onto an existing canvas.
pub fn flatten_onto(canvas: &mut RasterImage, layers: &[DrawLayer]) {
    let bounds = canvas.bounds();
    let row_bytes = canvas.row_bytes();
    trace!(layers = layers.len(), width = bounds.width, height = bounds.height, "flatten");

    for layer in layers {
        let Some(clip) = Rect::snap(layer.x, layer.y, layer.clip_width, layer.clip_height).intersect(&bounds) else {
            continue;
        };
        if layer.image.is_empty() || layer.width <= 0.0 || layer.height <= 0.0 {
            continue;
        }

        let start = clip.y as usize * row_bytes;
        let end = clip.bottom() as usize * row_bytes;
        let rows = &mut canvas.data_mut()[start..end];

        #[cfg(feature = "parallel")]
        rows.par_chunks_mut(row_bytes)
            .enumerate()
            .for_each(|(i, row)| paint_row(row, clip.y + i as u32, &clip, layer));

        #[cfg(not(feature = "parallel"))]
        rows.chunks_mut(row_bytes)
            .enumerate()
            .for_each(|(i, row)| paint_row(row, clip.y + i as u32, &clip, layer));
    }
}

fn paint_row(row: &mut [u8], py: u32, clip: &Rect, layer: &DrawLayer) {
    let (img_w, img_h) = layer.image.dimensions();
    let sy = source_coord(py, layer.y, layer.offset_y, img_h, layer.height);
    for px in clip.x..clip.right() {
        let sx = source_coord(px, layer.x, layer.offset_x, img_w, layer.width);
        let src = layer.image.pixel(sx, sy);
        let i = px as usize * CHANNELS;
        let dst = [row[i], row[i + 1], row[i + 2], row[i + 3]];
        row[i..i + CHANNELS].copy_from_slice(&over_pixel(src, dst));
    }
}

/// Maps a canvas pixel center to a source column/row.
#[inline]
fn source_coord(p: u32, origin: f64, offset: f64, image_len: u32, draw_len: f64) -> u32 {
    let s = (p as f64 + 0.5 - origin + offset) * image_len as f64 / draw_len;
    (s.floor().max(0.0) as u32).min(image_len - 1)
}

/// Porter-Duff Over on straight-alpha RGBA8: `fg + bg * (1 - fg.alpha)`.
#[inline]
pub fn over_pixel(fg: Rgba8, bg: Rgba8) -> Rgba8 {
    match fg[3] {
        255 => return fg,
        0 => return bg,
        _ => {}
    }
    let fg_a = fg[3] as f32 / 255.0;
    let bg_a = bg[3] as f32 / 255.0;
    let out_a = fg_a + bg_a * (1.0 - fg_a);

    let mut out = [0u8; CHANNELS];
    for c in 0..3 {
        let v = (fg[c] as f32 * fg_a + bg[c] as f32 * bg_a * (1.0 - fg_a)) / out_a;
        out[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composite::LayerKind;

    const RED: Rgba8 = [255, 0, 0, 255];
    const BLUE: Rgba8 = [0, 0, 255, 255];
    const CLEAR: Rgba8 = [0, 0, 0, 0];

    fn layer(image: RasterImage, x: f64, y: f64, w: f64, h: f64, off: (f64, f64), clip: (f64, f64)) -> DrawLayer {
        DrawLayer {
            kind: LayerKind::Photo { frame_id: "f".into() },
            image,
            x,
            y,
            width: w,
            height: h,
            offset_x: off.0,
            offset_y: off.1,
            clip_width: clip.0,
            clip_height: clip.1,
        }
    }

    #[test]
    fn test_opaque_layer_fills_clip_exactly() {
        let l = layer(RasterImage::filled(4, 4, RED), 2.0, 3.0, 8.0, 8.0, (2.0, 2.0), (4.0, 4.0));
        let out = flatten(&[l], 10, 10, CLEAR);
        for y in 0..10 {
            for x in 0..10 {
                let inside = (2..6).contains(&x) && (3..7).contains(&y);
                assert_eq!(out.pixel(x, y), if inside { RED } else { CLEAR }, "at {},{}", x, y);
            }
        }
    }

    #[test]
    fn test_nearest_sampling_and_offset() {
        let mut img = RasterImage::new(2, 1);
        img.set_pixel(0, 0, RED);
        img.set_pixel(1, 0, BLUE);

        let out = flatten(&[layer(img.clone(), 0.0, 0.0, 4.0, 1.0, (0.0, 0.0), (4.0, 1.0))], 4, 1, CLEAR);
        assert_eq!([out.pixel(0, 0), out.pixel(1, 0), out.pixel(2, 0), out.pixel(3, 0)], [RED, RED, BLUE, BLUE]);

        // Offset 2 shows the right half of the drawn image
        let out = flatten(&[layer(img, 0.0, 0.0, 4.0, 1.0, (2.0, 0.0), (2.0, 1.0))], 4, 1, CLEAR);
        assert_eq!([out.pixel(0, 0), out.pixel(1, 0), out.pixel(2, 0)], [BLUE, BLUE, CLEAR]);
    }

    #[test]
    fn test_clip_outside_canvas() {
        let l = layer(RasterImage::filled(2, 2, RED), 8.0, 8.0, 4.0, 4.0, (0.0, 0.0), (4.0, 4.0));
        let out = flatten(&[l], 10, 10, CLEAR);
        assert_eq!(out.pixel(9, 9), RED);
        assert_eq!(out.pixel(7, 7), CLEAR);

        let off = layer(RasterImage::filled(2, 2, RED), 20.0, 0.0, 4.0, 4.0, (0.0, 0.0), (4.0, 4.0));
        assert_eq!(flatten(&[off], 10, 10, CLEAR).data(), RasterImage::new(10, 10).data());
    }

    #[test]
    fn test_very_wide_frame_is_clipped_to_canvas() {
        use crate::composite::{build_layers, Session};
        use booth_core::{Frame, Template};
        use std::collections::HashMap;

        let template = Template::new(None, vec![Frame::new("f", 1.0, 0.0, 5.0e9, 10.0).with_photo("p")]);
        let mut photos = HashMap::new();
        photos.insert("p".to_string(), RasterImage::filled(4, 4, RED));

        let composite = build_layers(&template, &photos, None, Session::default());
        assert!(composite.conditions.is_empty());
        let out = flatten(&composite.layers, 8, 8, CLEAR);
        for y in 0..8 {
            assert_eq!(out.pixel(0, y), CLEAR);
            for x in 1..8 {
                assert_eq!(out.pixel(x, y), RED, "at {},{}", x, y);
            }
        }
    }

    #[test]
    fn test_later_layers_on_top() {
        let under = layer(RasterImage::filled(1, 1, RED), 0.0, 0.0, 4.0, 4.0, (0.0, 0.0), (4.0, 4.0));
        let mut hole = RasterImage::filled(4, 4, BLUE);
        hole.set_pixel(1, 1, CLEAR);
        let over = layer(hole, 0.0, 0.0, 4.0, 4.0, (0.0, 0.0), (4.0, 4.0));
        let out = flatten(&[under, over], 4, 4, CLEAR);
        assert_eq!(out.pixel(0, 0), BLUE);
        assert_eq!(out.pixel(1, 1), RED);
    }

    #[test]
    fn test_over_pixel() {
        assert_eq!(over_pixel(RED, BLUE), RED);
        assert_eq!(over_pixel(CLEAR, BLUE), BLUE);

        let half = over_pixel([255, 0, 0, 128], BLUE);
        assert_eq!(half[3], 255);
        assert!((half[0] as i32 - 128).abs() <= 1);
        assert!((half[2] as i32 - 127).abs() <= 1);

        let onto_clear = over_pixel([255, 0, 0, 128], CLEAR);
        assert_eq!(onto_clear, [255, 0, 0, 128]);
    }
}
