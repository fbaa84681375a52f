pub mod renderer_factory;

pub use renderer_factory::{RendererFactory, RendererType};
