//! Rendering module
//!
//! The scene is drawn through the canvas-like [`Surface`] trait. The browser
//! backs it with a 2D canvas; [`MeshSurface`] tessellates into vertex lists.

pub mod mesh;
pub mod scene;
pub mod shapes;
pub mod sprites;
pub mod surface;
pub mod vertex;

pub use mesh::{DrawOp, MeshSurface};
pub use scene::{Hud, Scene, draw_scene};
pub use sprites::{Draw, DrawContext};
pub use surface::{Color, Surface, TextAlign, TextBaseline, TextStyle, colors};
pub use vertex::Vertex;
