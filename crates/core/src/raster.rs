//! Software rasterizer: landscape fill, circle stencil, sprite compositing.
//!
//! All three write straight into a caller-owned [`PixelBuffer`] and clip
//! every access to `[0, width) x [0, height)`.

use crate::energy::EnergyField;
use crate::palette::ContourPalette;
use crate::pixel::{PixelBuffer, BYTES_PER_PIXEL, WHITE};
use crate::state::SimState;

/// Paints the energy landscape seen through `state`'s view offset.
///
/// Rows are scanned top to bottom and columns left to right. The running
/// maximum in `state` is raised before each pixel is normalized, so a new
/// peak brightens the rest of the scan immediately and earlier pixels on the
/// next frame.
pub fn fill_landscape(
    buffer: &mut PixelBuffer,
    state: &mut SimState,
    field: &EnergyField,
    palette: &ContourPalette,
) {
    let (w, h) = (buffer.width(), buffer.height());
    let previous_max = state.max_energy_observed;
    let offset = state.view_offset;

    for py in 0..h {
        let ry = 2.0 * py as f32 / h as f32 - 1.0 + offset.y;
        let row = buffer.row_mut(py);
        for (px, dst) in row.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
            let rx = 2.0 * px as f32 / w as f32 - 1.0 + offset.x;
            let energy = field.energy_at(rx, ry);
            if energy > state.max_energy_observed {
                state.max_energy_observed = energy;
            }
            dst.copy_from_slice(&palette.color(energy / state.max_energy_observed));
        }
    }

    if state.max_energy_observed > previous_max {
        log::debug!(
            "max energy raised {previous_max} -> {}",
            state.max_energy_observed
        );
    }
}

/// Stamps a solid white disc of `radius` pixels centered on `(cx, cy)`.
///
/// Pixels with `dx² + dy² <= radius²` become opaque white; every other pixel
/// keeps its value. Centers may lie anywhere, including off the buffer.
pub fn draw_circle(buffer: &mut PixelBuffer, radius: i64, cx: i64, cy: i64) {
    if radius < 0 {
        return;
    }
    let (w, h) = (buffer.width() as i64, buffer.height() as i64);
    let x0 = cx.saturating_sub(radius).max(0);
    let x1 = cx.saturating_add(radius).min(w - 1);
    let y0 = cy.saturating_sub(radius).max(0);
    let y1 = cy.saturating_add(radius).min(h - 1);
    let r_sq = radius.saturating_mul(radius);

    for y in y0..=y1 {
        let dy = y.saturating_sub(cy);
        for x in x0..=x1 {
            let dx = x.saturating_sub(cx);
            if dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy)) <= r_sq {
                buffer.set(y as usize, x as usize, WHITE);
            }
        }
    }
}

/// Copies `src` onto `dest` with its top-left corner at `(x, y)`.
///
/// Source pixels with alpha 0 are skipped; all others replace the
/// destination pixel verbatim, alpha included. Parts of `src` falling
/// outside `dest` are clipped.
pub fn composite_sprite(dest: &mut PixelBuffer, src: &PixelBuffer, x: i64, y: i64) {
    let (dw, dh) = (dest.width() as i64, dest.height() as i64);
    let (sw, sh) = (src.width() as i64, src.height() as i64);

    let sx0 = x.saturating_neg().clamp(0, sw);
    let sx1 = dw.saturating_sub(x).clamp(0, sw);
    let sy0 = y.saturating_neg().clamp(0, sh);
    let sy1 = dh.saturating_sub(y).clamp(0, sh);

    for sy in sy0..sy1 {
        let dy = (y + sy) as usize;
        for sx in sx0..sx1 {
            let px = src.get(sy as usize, sx as usize);
            if px[3] == 0 {
                continue;
            }
            dest.set(dy, (x + sx) as usize, px);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::{Rgba, TRANSPARENT};
    use glam::Vec2;

    const GREY: Rgba = [0x40, 0x40, 0x40, 0xff];

    fn grey_buffer(w: usize, h: usize) -> PixelBuffer {
        let mut buf = PixelBuffer::new(w, h).unwrap();
        buf.fill(GREY);
        buf
    }

    // ── fill_landscape ─────────────────────────────────────────────

    #[test]
    fn landscape_is_opaque_and_within_palette() {
        let mut buf = PixelBuffer::new(64, 64).unwrap();
        let mut state = SimState::default();
        let palette = ContourPalette::default();
        fill_landscape(&mut buf, &mut state, &EnergyField, &palette);
        for row in 0..64 {
            for col in 0..64 {
                let [r, g, b, a] = buf.get(row, col);
                assert_eq!(a, 0xff);
                assert!(r <= palette.r && g <= palette.g && b <= palette.b);
            }
        }
    }

    #[test]
    fn landscape_raises_running_max() {
        let mut buf = PixelBuffer::new(32, 32).unwrap();
        let mut state = SimState::default();
        fill_landscape(&mut buf, &mut state, &EnergyField, &ContourPalette::default());
        // The grid passes close to (0.3, 0.3), where the field exceeds 1.
        assert!(state.max_energy_observed > 1.0);
        let after_first = state.max_energy_observed;
        fill_landscape(&mut buf, &mut state, &EnergyField, &ContourPalette::default());
        assert_eq!(state.max_energy_observed, after_first);
    }

    #[test]
    fn landscape_pixel_matches_field_at_mapped_coordinate() {
        let mut buf = PixelBuffer::new(10, 10).unwrap();
        let mut state = SimState {
            max_energy_observed: 100.0,
            ..SimState::default()
        };
        let palette = ContourPalette::default();
        fill_landscape(&mut buf, &mut state, &EnergyField, &palette);
        // Pixel (5, 5) maps to field (0, 0).
        let expected = palette.color(EnergyField.energy_at(0.0, 0.0) / 100.0);
        assert_eq!(buf.get(5, 5), expected);
    }

    #[test]
    fn landscape_follows_view_offset() {
        let palette = ContourPalette::default();
        let mut shifted = PixelBuffer::new(16, 16).unwrap();
        let mut state = SimState {
            view_offset: Vec2::new(0.25, 0.0),
            max_energy_observed: 10.0,
            ..SimState::default()
        };
        fill_landscape(&mut shifted, &mut state, &EnergyField, &palette);

        let mut plain = PixelBuffer::new(16, 16).unwrap();
        let mut state = SimState {
            max_energy_observed: 10.0,
            ..SimState::default()
        };
        fill_landscape(&mut plain, &mut state, &EnergyField, &palette);

        // An offset of 0.25 in field units is 2 pixels at width 16.
        for row in 0..16 {
            for col in 0..14 {
                assert_eq!(shifted.get(row, col), plain.get(row, col + 2));
            }
        }
    }

    #[test]
    fn landscape_skips_row_padding() {
        let mut buf = PixelBuffer::with_pitch(4, 4, 24).unwrap();
        fill_landscape(
            &mut buf,
            &mut SimState::default(),
            &EnergyField,
            &ContourPalette::default(),
        );
        for row in 0..4 {
            let start = row * 24 + 16;
            assert!(buf.as_bytes()[start..start + 8].iter().all(|&b| b == 0));
        }
    }

    /// `w` x `h` grey pixels with 8 zeroed padding bytes after each row.
    fn padded_grey_buffer(w: usize, h: usize) -> PixelBuffer {
        let mut buf = PixelBuffer::with_pitch(w, h, w * 4 + 8).unwrap();
        buf.fill(GREY);
        buf
    }

    fn padding_is_untouched(buf: &PixelBuffer) -> bool {
        let visible = buf.width() * 4;
        (0..buf.height()).all(|row| {
            let start = row * buf.pitch() + visible;
            buf.as_bytes()[start..start + buf.pitch() - visible]
                .iter()
                .all(|&b| b == 0)
        })
    }

    // ── draw_circle ────────────────────────────────────────────────

    #[test]
    fn circle_sets_exactly_the_disc() {
        let mut buf = grey_buffer(32, 32);
        draw_circle(&mut buf, 5, 16, 16);
        for row in 0..32_i64 {
            for col in 0..32_i64 {
                let inside = (col - 16).pow(2) + (row - 16).pow(2) <= 25;
                let expected = if inside { WHITE } else { GREY };
                assert_eq!(buf.get(row as usize, col as usize), expected, "at ({col}, {row})");
            }
        }
    }

    #[test]
    fn circle_includes_boundary_points() {
        let mut buf = grey_buffer(32, 32);
        draw_circle(&mut buf, 5, 16, 16);
        assert_eq!(buf.get(16, 16), WHITE);
        assert_eq!(buf.get(16, 21), WHITE);
        assert_eq!(buf.get(11, 16), WHITE);
        // (3, 4, 5) triangle lands exactly on the rim.
        assert_eq!(buf.get(20, 19), WHITE);
        assert_eq!(buf.get(16, 22), GREY);
        assert_eq!(buf.get(21, 20), GREY);
    }

    #[test]
    fn circle_clips_at_edges() {
        let mut buf = grey_buffer(8, 8);
        draw_circle(&mut buf, 3, 0, 0);
        assert_eq!(buf.get(0, 0), WHITE);
        assert_eq!(buf.get(0, 3), WHITE);
        assert_eq!(buf.get(3, 3), GREY);
    }

    #[test]
    fn circle_far_off_buffer_is_noop() {
        let mut buf = grey_buffer(8, 8);
        let before = buf.clone();
        draw_circle(&mut buf, 4, -100, 3);
        draw_circle(&mut buf, 4, 3, 1_000);
        draw_circle(&mut buf, 10, i64::MIN, i64::MAX);
        assert_eq!(buf, before);
    }

    #[test]
    fn circle_on_padded_buffer_clips_before_padding() {
        let mut buf = padded_grey_buffer(6, 6);
        draw_circle(&mut buf, 3, 5, 2);
        assert_eq!(buf.get(2, 5), WHITE);
        assert_eq!(buf.get(5, 5), WHITE);
        assert_eq!(buf.get(2, 2), WHITE);
        assert_eq!(buf.get(2, 1), GREY);
        assert!(padding_is_untouched(&buf));
    }

    #[test]
    fn circle_radius_zero_sets_single_pixel() {
        let mut buf = grey_buffer(4, 4);
        draw_circle(&mut buf, 0, 2, 1);
        assert_eq!(buf.get(1, 2), WHITE);
        let white_count = (0..4)
            .flat_map(|r| (0..4).map(move |c| (r, c)))
            .filter(|&(r, c)| buf.get(r, c) == WHITE)
            .count();
        assert_eq!(white_count, 1);
    }

    // ── composite_sprite ───────────────────────────────────────────

    /// 4x4 sprite: left half opaque red, right half transparent.
    fn half_sprite() -> PixelBuffer {
        let mut sprite = PixelBuffer::new(4, 4).unwrap();
        for row in 0..4 {
            for col in 0..2 {
                sprite.set(row, col, [0xff, 0, 0, 0x80]);
            }
        }
        sprite
    }

    #[test]
    fn composite_copies_opaque_and_skips_transparent() {
        let mut dest = grey_buffer(10, 10);
        composite_sprite(&mut dest, &half_sprite(), 3, 2);
        for row in 0..10 {
            for col in 0..10 {
                let in_opaque_half = (2..6).contains(&row) && (3..5).contains(&col);
                let expected = if in_opaque_half {
                    [0xff, 0, 0, 0x80]
                } else {
                    GREY
                };
                assert_eq!(dest.get(row, col), expected, "at ({col}, {row})");
            }
        }
    }

    #[test]
    fn composite_clips_negative_offsets() {
        let mut dest = grey_buffer(6, 6);
        composite_sprite(&mut dest, &half_sprite(), -1, -2);
        // Sprite column 1 lands on dest column 0; rows 2..4 land on 0..2.
        assert_eq!(dest.get(0, 0), [0xff, 0, 0, 0x80]);
        assert_eq!(dest.get(1, 0), [0xff, 0, 0, 0x80]);
        assert_eq!(dest.get(2, 0), GREY);
        assert_eq!(dest.get(0, 1), GREY);
    }

    #[test]
    fn composite_clips_far_edge_overrun() {
        let mut dest = grey_buffer(6, 6);
        composite_sprite(&mut dest, &half_sprite(), 5, 4);
        assert_eq!(dest.get(4, 5), [0xff, 0, 0, 0x80]);
        assert_eq!(dest.get(5, 5), [0xff, 0, 0, 0x80]);
        assert_eq!(dest.get(3, 5), GREY);
    }

    #[test]
    fn composite_on_padded_buffer_clips_before_padding() {
        let mut dest = padded_grey_buffer(6, 6);
        // Opaque half covers dest columns 4 and 5; the transparent half would
        // fall in the padding.
        composite_sprite(&mut dest, &half_sprite(), 4, 1);
        for row in 1..5 {
            assert_eq!(dest.get(row, 4), [0xff, 0, 0, 0x80]);
            assert_eq!(dest.get(row, 5), [0xff, 0, 0, 0x80]);
        }
        assert_eq!(dest.get(0, 4), GREY);
        assert_eq!(dest.get(1, 3), GREY);
        assert!(padding_is_untouched(&dest));

        // Shifted one column further, opaque sprite pixels overrun into padding.
        let mut dest = padded_grey_buffer(6, 6);
        composite_sprite(&mut dest, &half_sprite(), 5, 0);
        assert_eq!(dest.get(0, 5), [0xff, 0, 0, 0x80]);
        assert!(padding_is_untouched(&dest));
    }

    #[test]
    fn composite_entirely_outside_is_noop() {
        let mut dest = grey_buffer(6, 6);
        let before = dest.clone();
        composite_sprite(&mut dest, &half_sprite(), 100, 0);
        composite_sprite(&mut dest, &half_sprite(), -4, -4);
        assert_eq!(dest, before);
    }

    #[test]
    fn composite_of_transparent_sprite_changes_nothing() {
        let mut dest = grey_buffer(6, 6);
        let before = dest.clone();
        let mut sprite = PixelBuffer::new(3, 3).unwrap();
        sprite.fill(TRANSPARENT);
        composite_sprite(&mut dest, &sprite, 1, 1);
        assert_eq!(dest, before);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn circle_never_panics(
                radius in -5_i64..40,
                cx in -100_i64..100,
                cy in -100_i64..100,
            ) {
                let mut buf = grey_buffer(16, 12);
                draw_circle(&mut buf, radius, cx, cy);
            }

            #[test]
            fn composite_never_panics(x in -20_i64..20, y in -20_i64..20) {
                let mut dest = grey_buffer(9, 7);
                composite_sprite(&mut dest, &half_sprite(), x, y);
            }
        }
    }
}
