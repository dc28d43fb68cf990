#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Whether to print the final frame.
    pub final_frame: bool,
    /// Whether to print the previous and current generations side by side
    /// after every step.
    pub debug_generations: bool,
    /// Largest number of rows or columns that will be printed.
    pub max_size: usize,
}
impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            final_frame: false,
            debug_generations: false,
            max_size: 50,
        }
    }
}
