use lifescan_core::pattern::PatternId;

#[derive(Debug, Clone)]
pub struct DetectConfig {
    /// Patterns to highlight after each step.
    pub patterns: Vec<PatternId>,
}
impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            patterns: PatternId::ALL.to_vec(),
        }
    }
}
