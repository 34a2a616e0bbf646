// raster_paths/src/fill.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The fill rule, which determines how self-intersecting paths are filled.

use std::fmt;

/// The fill rule, which determines how self-intersecting paths are filled.
///
/// Paths that don't intersect themselves (and have no holes) are unaffected by the choice of fill
/// rule.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FillRule {
    /// The nonzero rule: <https://en.wikipedia.org/wiki/Nonzero-rule>
    NonZero,
    /// The even-odd rule: <https://en.wikipedia.org/wiki/Even%E2%80%93odd_rule>
    EvenOdd,
}

impl FillRule {
    /// Applies this fill rule to a signed, unnormalized winding-area accumulation and returns a
    /// coverage fraction in `[0, 1]`.
    #[inline]
    pub fn resolve(self, area: f32) -> f32 {
        match self {
            FillRule::NonZero => area.abs().min(1.0),
            FillRule::EvenOdd => {
                let remainder = area - 2.0 * (area / 2.0).round();
                remainder.abs()
            }
        }
    }
}

impl fmt::Display for FillRule {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            FillRule::NonZero => "NonZero",
            FillRule::EvenOdd => "EvenOdd",
        };
        formatter.write_str(name)
    }
}

impl Default for FillRule {
    #[inline]
    fn default() -> FillRule {
        FillRule::NonZero
    }
}
