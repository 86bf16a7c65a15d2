pub mod error;
pub mod export;
pub mod input;
pub mod render;
pub mod session;
pub mod solver;
pub mod stats;

pub use error::{Error, Result};
pub use input::{Field, Fields};
pub use render::{PlotSpec, RenderOptions, RenderedFigure, Viewport};
pub use session::Session;
pub use solver::{solve, Solution};
