pub mod console_renderer;
pub mod json_renderer;

pub use console_renderer::ConsoleRenderer;
pub use json_renderer::JsonRenderer;
