// raster_paths/src/lib.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Path, segment and fill-rule types consumed by the tile rasterizer.

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;

pub mod fill;
pub mod path;
pub mod segment;
