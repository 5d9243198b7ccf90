//! Terminal rendering with theme support.
//!
//! ```text
//! state → compute_screen → ScreenViewModel → render → ANSI output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready screen data
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Header, flashes, page bodies, search overlay, footer
//! - [`helpers`]: Text shaping shared by components
//! - [`theme`]: Color schemes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{compute_screen, ScreenViewModel, SearchPanel};
