/// Represents the provider (backend) used for large language model (LLM) inference.
///
/// Currently only Google's Gemini REST API is supported; the enum exists so
/// that additional backends (e.g., OpenAI, local Ollama) can be added later
/// without reshaping the configuration surface.
///
/// # Examples
///
/// ```
/// use llm_service::LlmProvider;
///
/// fn print_provider(provider: LlmProvider) {
///     match provider {
///         LlmProvider::Gemini => println!("Using Google Gemini API"),
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// Google Gemini generative-language API.
    Gemini,
}
