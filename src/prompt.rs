use crate::llm::ChatMessage;

// Persona and reply-style constraints passed to the model. The style rules
// (no asterisk emphasis, no double quotes) are a request to the model, not
// something enforced on the returned text.
pub const SYSTEM_INSTRUCTION: &str = "You are an intelligent chatbot for St Joseph Convent School, \
Varanasi. Use the provided school data to answer concisely and meaningfully. Do not use *** or \
double quotes in your answers.";

const SCHOOL_PROFILE: &str = "St Joseph Convent School, Varanasi was founded in 1950 by Our Lady \
of Providence. The institution serves students from all backgrounds in both English and Hindi \
medium. Current Principal: Sister Arul. Manager: Sister Vimala.";

/// Assembles the three-part prompt: persona instruction, profile plus scraped
/// context, then the user's message verbatim. Part order matters to the model.
pub fn build_messages(scraped_context: &str, user_message: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::new("system", SYSTEM_INSTRUCTION),
        ChatMessage::new("system", profile_with_context(scraped_context)),
        ChatMessage::new("user", user_message),
    ]
}

fn profile_with_context(scraped_context: &str) -> String {
    format!(
        "{}\nOther information:\n{}",
        SCHOOL_PROFILE, scraped_context
    )
}
