//! GPU plumbing: device/surface ownership and shared per-frame uniforms.

pub mod globals;
pub mod render_context;

pub use globals::Globals;
pub use render_context::{RenderContext, RenderContextError};
