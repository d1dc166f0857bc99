//! Model executor port

/// Runs a prompt against a language model
pub trait ModelExecutor: Send + Sync {
    /// Execute the prompt and return the model's literal text answer
    fn execute(&self, prompt: &str) -> anyhow::Result<String>;

    /// Model name, for status reporting
    fn name(&self) -> String;
}
