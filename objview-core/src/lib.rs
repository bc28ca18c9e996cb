/// objview core library - OBJ loading and software rendering
///
/// Parses Wavefront OBJ/MTL text into triangles and draws them with a
/// flat-shaded painter's algorithm into an off-screen buffer. Windowing and
/// input live in the front ends; they feed events to a [`Viewer`] and supply
/// a [`Surface`] to present frames on.

pub mod assemble;
pub mod config;
pub mod framebuffer;
pub mod geometry;
pub mod loader;
pub mod mtl;
pub mod obj;
pub mod raster;
pub mod renderer;
pub mod shading;
pub mod surface;
pub mod transform;
pub mod viewer;

// Re-export commonly used types
pub use assemble::{assemble, AssembleError, TriangulationPolicy};
pub use config::{ConfigError, RenderMode, ViewerConfig};
pub use framebuffer::FrameBuffer;
pub use geometry::{GeometryError, Mesh, Triangle};
pub use loader::{load_model, LoadError, LoadedModel};
pub use mtl::{Material, MaterialLibrary};
pub use obj::ObjModel;
pub use renderer::{Renderer, SolidRenderer, WireframeRenderer};
pub use shading::Light;
pub use surface::{Presenter, RenderError, Surface};
pub use transform::{RotationState, Transform, ViewState};
pub use viewer::{Viewer, ViewerEvent};
