//! The fontsmith subcommands
//!
//! `cmap-diff` and `diff` read compiled fonts directly. `convert`,
//! `merge-svg` and `optimize` describe their work as an engine job and hand
//! it to a [`FontEngine`](crate::engine::FontEngine).

pub mod cmap_diff;
pub mod compare;
pub mod convert;
pub mod diff;
pub mod merge_svg;
pub mod optimize;
