// raster_core/src/fixed.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Fixed-point conversions backing the reference active-edge filler.
//!
//! The tile binner and fine rasterizer never touch this module: they work exclusively in
//! `f32`. This is the second, independent numeric representation the reference filler uses so
//! the two pipelines cannot share a rounding bug (see the design notes on float/fixed duality).

use crate::edge::MonotonicEdge;

/// Sub-pixel fractional bit depth for a given AA shift `k` (spec §4.1, `k ∈ {0,1,2}`). `k = 2`
/// (4x AA, the common case) yields the spec's named "Q6" format; lower shifts narrow the
/// sub-pixel grid a bit at a time rather than jumping straight to 1 bit.
#[inline]
pub fn fractional_bits(aa_shift: u8) -> u32 {
    4 + aa_shift.min(2) as u32
}

/// `v * 2^bits`, rounded to the nearest integer.
#[inline]
pub fn f32_to_fixed(v: f32, bits: u32) -> i32 {
    (v * (1u32 << bits) as f32).round() as i32
}

#[inline]
pub fn fixed_to_f32(v: i32, bits: u32) -> f32 {
    v as f32 / (1u32 << bits) as f32
}

/// Floors a fixed-point value to the nearest whole pixel, expressed as a plain `i32`.
#[inline]
pub fn fixed_floor(v: i32, bits: u32) -> i32 {
    v >> bits
}

/// Ceils a fixed-point value to the nearest whole pixel, expressed as a plain `i32`.
#[inline]
pub fn fixed_ceil(v: i32, bits: u32) -> i32 {
    -(fixed_floor(-v, bits))
}

/// Rounds a fixed-point value to the nearest whole pixel, expressed as a plain `i32`.
#[inline]
pub fn fixed_round(v: i32, bits: u32) -> i32 {
    (v + (1 << (bits - 1))) >> bits
}

/// Widens a `bits`-fractional-bit fixed-point value to Q16.16.
#[inline]
pub fn fixed_to_q16_16(v: i32, bits: u32) -> i32 {
    v.wrapping_shl(16 - bits)
}

#[inline]
pub fn f32_to_q16_16(v: f32) -> i32 {
    (v * 65536.0).round() as i32
}

#[inline]
pub fn q16_16_to_f32(v: i32) -> f32 {
    v as f32 / 65536.0
}

/// Divides two fixed-point values sharing the same fractional bit depth, producing a Q16.16
/// result. Because numerator and denominator carry the same scale factor, it cancels out of the
/// ratio, so this needs no `bits` argument. Division by zero clamps to `±i32::MAX` (the sign of
/// the numerator), matching the reference filler's "aligned with edge" treatment of vertical
/// segments.
#[inline]
pub fn fixed_div_to_q16_16(numerator: i32, denominator: i32) -> i32 {
    if denominator == 0 {
        return if numerator >= 0 { i32::MAX } else { -i32::MAX };
    }
    let scaled = (numerator as i64) << 16;
    (scaled / denominator as i64) as i32
}

/// Multiplies two Q16.16 values, producing a Q16.16 result via a 64-bit intermediate with
/// round-to-nearest on the final shift.
#[inline]
pub fn q16_16_mul(a: i32, b: i32) -> i32 {
    let product = a as i64 * b as i64;
    let rounded = product + (1i64 << 15);
    (rounded >> 16) as i32
}

/// An edge in fixed-point form, used only by the reference active-edge filler.
#[derive(Clone, Copy, Debug)]
pub struct FixedEdge {
    /// Q22.10: the top (lesser) y-coordinate.
    pub y_top: i32,
    /// Q22.10: the bottom (greater) y-coordinate.
    pub y_bottom: i32,
    /// Q16.16: the x-coordinate at `y_top`.
    pub x_at_top: i32,
    /// Q16.16: `dx/dy`, the slope.
    pub dx_dy: i32,
    pub sign: i32,
}

impl FixedEdge {
    /// Builds a `FixedEdge` from a device-space monotonic edge. `aa_shift` selects the
    /// sub-pixel bit depth (`fractional_bits`) used for the internal slope computation; it does
    /// not affect the Q22.10 row-extent fields, which are always 10 fractional bits regardless
    /// of AA shift.
    pub fn from_monotonic(edge: &MonotonicEdge, aa_shift: u8) -> FixedEdge {
        let bits = fractional_bits(aa_shift);
        let y_top = (edge.p0.y * 1024.0).round() as i32;
        let y_bottom = (edge.p1.y * 1024.0).round() as i32;
        let dy_fixed = f32_to_fixed(edge.p1.y - edge.p0.y, bits);
        let dx_fixed = f32_to_fixed(edge.p1.x - edge.p0.x, bits);
        FixedEdge {
            y_top,
            y_bottom,
            x_at_top: f32_to_q16_16(edge.p0.x),
            dx_dy: fixed_div_to_q16_16(dx_fixed, dy_fixed),
            sign: edge.sign,
        }
    }

    /// X position (Q16.16) at fixed-point `y` (Q22.10), by linear extrapolation from `y_top`.
    pub fn x_at_y(&self, y_q22_10: i32) -> i32 {
        // (y - y_top) is Q22.10; widen to Q16.16 scale (shift by 6) before multiplying by the
        // Q16.16 slope, then rescale the Q32.32 product back down.
        let dy = (y_q22_10 - self.y_top) as i64;
        let dy_q16_16 = dy << 6;
        let product = dy_q16_16 * self.dx_dy as i64;
        let scaled = (product + (1i64 << 15)) >> 16;
        self.x_at_top.wrapping_add(scaled as i32)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trip_within_one_ulp_at_default_bit_depth() {
        let bits = fractional_bits(2);
        for v in [0.0f32, 1.0, -1.0, 3.5, -7.25, 100.015625] {
            let fixed = f32_to_fixed(v, bits);
            let back = fixed_to_f32(fixed, bits);
            assert!((back - v).abs() <= 1.0 / (1u32 << bits) as f32);
        }
    }

    #[test]
    fn floor_ceil_round_on_exact_pixel() {
        let bits = fractional_bits(2);
        let fixed = f32_to_fixed(4.0, bits);
        assert_eq!(fixed_floor(fixed, bits), 4);
        assert_eq!(fixed_ceil(fixed, bits), 4);
        assert_eq!(fixed_round(fixed, bits), 4);
    }

    #[test]
    fn floor_ceil_bracket_fractional_pixel() {
        let bits = fractional_bits(2);
        let fixed = f32_to_fixed(4.25, bits);
        assert_eq!(fixed_floor(fixed, bits), 4);
        assert_eq!(fixed_ceil(fixed, bits), 5);
    }

    #[test]
    fn widening_to_q16_16_matches_plain_conversion() {
        let bits = fractional_bits(2);
        let fixed = f32_to_fixed(2.0, bits);
        assert_eq!(fixed_to_q16_16(fixed, bits), f32_to_q16_16(2.0));
    }

    #[test]
    fn fractional_bits_grows_with_aa_shift() {
        // k=2 is the spec's named "Q6" format; k=0/1 narrow it by a bit each, so the knob is
        // live rather than a fixed constant dressed up as configurable.
        assert_eq!(fractional_bits(0), 4);
        assert_eq!(fractional_bits(1), 5);
        assert_eq!(fractional_bits(2), 6);
    }

    #[test]
    fn division_by_zero_clamps_to_signed_max() {
        assert_eq!(fixed_div_to_q16_16(64, 0), i32::MAX);
        assert_eq!(fixed_div_to_q16_16(-64, 0), -i32::MAX);
    }

    #[test]
    fn q16_16_multiply_identity() {
        let one = f32_to_q16_16(1.0);
        let five = f32_to_q16_16(5.0);
        assert_eq!(q16_16_mul(one, five), five);
    }
}
