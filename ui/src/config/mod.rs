mod detect;
mod render;
mod sim;

pub use detect::*;
pub use render::*;
pub use sim::*;

#[derive(Debug, Default, Clone)]
pub struct Config {
    pub sim: SimConfig,
    pub detect: DetectConfig,
    pub render: RenderConfig,
}
