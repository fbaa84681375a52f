use crate::adapters::outbound::renderers::{ConsoleRenderer, JsonRenderer};
use crate::ports::outbound::DashboardRenderer;

/// Renderer types supported by the factory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererType {
    Console,
    Json,
}

/// RendererFactory - creates renderer instances for the requested output
/// form, keeping the wiring layer free of concrete renderer knowledge.
pub struct RendererFactory;

impl RendererFactory {
    /// Creates a renderer for the specified type
    pub fn create(renderer_type: RendererType) -> Box<dyn DashboardRenderer> {
        match renderer_type {
            RendererType::Console => Box::new(ConsoleRenderer::new()),
            RendererType::Json => Box::new(JsonRenderer::new()),
        }
    }

    /// Returns the progress message for the specified renderer type
    pub fn progress_message(renderer_type: RendererType) -> &'static str {
        match renderer_type {
            RendererType::Console => "📝 Rendering dashboard view...",
            RendererType::Json => "📝 Rendering JSON frame document...",
        }
    }
}
