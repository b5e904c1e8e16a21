// LLM layer: Gemini generateContent client with ordered model fallback

pub mod gemini;

pub use gemini::{GeminiClient, GeminiError};
