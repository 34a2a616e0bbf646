// raster_core/src/options.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Options that control how a single `Fill()` call is performed.

use crate::alpha::AlphaRuns;
use raster_geometry::transform2d::Transform2F;
use raster_paths::fill::FillRule;

/// A sink for the scanlines a `Fill()` call produces.
///
/// The callback is invoked synchronously, once per scanline, strictly in ascending `y` order. It
/// MUST NOT retain the passed `&AlphaRuns` beyond its own return: the container is reused for the
/// next scanline.
pub struct ScanlineListener<'a> {
    send_fn: ScanlineSendFunction<'a>,
}

/// The callback function that receives one scanline's worth of alpha runs.
pub type ScanlineSendFunction<'a> = Box<dyn FnMut(i32, &AlphaRuns) + 'a>;

impl<'a> ScanlineListener<'a> {
    /// Wraps a scanline callback in a `ScanlineListener`.
    #[inline]
    pub fn new(send_fn: ScanlineSendFunction<'a>) -> ScanlineListener<'a> {
        ScanlineListener { send_fn }
    }

    #[inline]
    pub(crate) fn send(&mut self, y: i32, runs: &AlphaRuns) {
        (self.send_fn)(y, runs)
    }
}

/// Options that control a single `Fill()` call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillOptions {
    /// The affine transform applied to the path before flattening.
    pub transform: Transform2F,
    /// Maximum chordal deviation tolerated when flattening quadratic/cubic curves, in device
    /// pixels at 1x AA scale.
    pub tolerance: f32,
    /// The antialiasing sub-pixel shift: 0 (no AA), 1, or 2 (4x AA, the common case). Narrows
    /// `tolerance` (via `edge::scaled_tolerance`) and the fixed-point sub-pixel bit depth the
    /// reference filler builds its active edges in (`fixed::fractional_bits`) as it grows.
    pub aa_shift: u8,
    /// The fill rule applied when resolving winding accumulation to coverage.
    pub fill_rule: FillRule,
}

impl Default for FillOptions {
    #[inline]
    fn default() -> FillOptions {
        FillOptions {
            transform: Transform2F::default(),
            tolerance: 0.25,
            aa_shift: 2,
            fill_rule: FillRule::NonZero,
        }
    }
}
