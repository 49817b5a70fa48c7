//! Prompt construction for each [`DemoVariant`].

use lectern_types::chat::DemoVariant;
use lectern_types::llm::Message;

/// Instruction prefix for the single-message strategy. The user prompt is
/// appended verbatim.
pub const INLINE_INSTRUCTION: &str =
    "Identify and return a JSON list of the most important 3 key phrases from the following text: ";

/// System instruction for the two-message strategy.
pub const SYSTEM_INSTRUCTION: &str =
    "You will identify and return a JSON list of the most important 3 key phrases from the users input";

/// Name and description of the structured-output schema.
pub const SCHEMA_NAME: &str = "ChatResponse";
pub const SCHEMA_DESCRIPTION: &str = "Chat response schema";

/// Build the conversation sent to the model for `prompt`.
pub fn build_messages(variant: DemoVariant, prompt: &str) -> Vec<Message> {
    match variant {
        DemoVariant::Demo01 => vec![Message::user(format!("{INLINE_INSTRUCTION}{prompt}"))],
        DemoVariant::Demo02 => vec![
            Message::system(SYSTEM_INSTRUCTION),
            Message::user(prompt),
        ],
    }
}
