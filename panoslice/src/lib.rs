//! Panoslice - slice large panoramic images into printable pages.
//!
//! The core of this library is the pure page layout engine in
//! [`layout`], which partitions an arbitrary-sized image into an
//! ordered grid of page rectangles sized to a physical sheet aspect
//! ratio (landscape US letter by default). The surrounding modules
//! consume that layout: [`export`] crops and writes page image files,
//! [`print`] resolves page selections and fit-to-page placement, and
//! [`config`] persists user defaults.
//!
//! The engine is synchronous and allocation-light; recomputing a layout
//! on every settings change is cheap enough that no caching layer
//! exists or is needed.

pub mod config;
pub mod export;
pub mod layout;
pub mod print;
