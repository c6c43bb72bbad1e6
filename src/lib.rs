// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Graphics math allowances — casts and float comparisons are intentional
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::module_name_repetitions)]

//! Interactive 3D navigation header built on wgpu.
//!
//! Ripplenav renders a row of clickable extruded text labels inside a
//! real-time scene. A dual-focus spiral ripple shader distorts the
//! glyphs in screen space; clicking a label plays a scale/distortion
//! feedback animation and then hands the label's route to a
//! host-supplied [`navigation::Navigator`].
//!
//! # Key entry points
//!
//! - [`engine::NavRenderEngine`] - the rendering engine and event sink
//! - [`scene::NavItem`] - a label/route pair
//! - [`options::Options`] - runtime configuration (display, shader,
//!   animation, camera)
//! - [`Viewer`] - standalone winit window (feature `viewer`)
//!
//! # Lifecycle
//!
//! Label geometry depends on an asynchronously loaded font-outline
//! file, so the engine starts in a `Loading` phase where rendering
//! clears the background and hit tests always miss. Once the font
//! resolves the full label set is built exactly once; if loading fails
//! the component stays inert rather than crashing the host.

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod font;
pub mod geometry;
pub mod gpu;
pub mod input;
pub mod layout;
pub mod navigation;
pub mod options;
pub mod picking;
pub mod renderer;
pub mod scene;
pub mod util;

#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::NavRenderEngine;
pub use error::NavError;
pub use input::{InputEvent, MouseButton};
pub use scene::NavItem;

#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
