//! Prompt templates for analysis and sales-prep generation

/// Prompt builder; plain concatenation, no truncation
pub struct PromptComposer;

impl PromptComposer {
    /// Instruction followed by the transcript text
    pub fn analysis(prompt: &str, transcript: &str) -> String {
        format!("{}\n\n{}", prompt, transcript)
    }

    /// Instruction, profile payload, then presentation text
    pub fn sales_prep(prompt: &str, profile: &serde_json::Value, presentations: &str) -> String {
        format!(
            "{}\n\nLinkedin Content - {}\n\nSales Content - {}",
            prompt, profile, presentations
        )
    }
}
