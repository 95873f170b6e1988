//! Reply prompt builder for Riposte.
//!
//! Assembles the system instruction and user-turn content for one reply.
//! Two modes share the builder: free generation (stance directive, optional
//! recalled context) and rephrase (the caller supplied a draft to recast in
//! the persona's voice; stance and context do not apply).

use riposte_types::generate::ComposedPrompt;
use riposte_types::persona::Persona;
use riposte_types::stance::Stance;

/// Output-format directive appended to every reply prompt.
const TEXTING_DIRECTIVE: &str =
    "Write as if texting - use natural conversational language without asterisks, underscores, \
     quotation marks for emphasis, or any special formatting. Output should be plain text ready \
     to copy and paste directly into a chat.";

/// Guidance attached when recalled context is present in the user turn.
const MEMORY_INSTRUCTION: &str =
    "Context from past conversations is shown above. Only reference it if directly relevant to \
     answering the current question. If the current message is a new topic, respond independently.";

/// Builds the composed prompt for a single reply.
///
/// The system instruction is the persona voice followed by task directives
/// (stance, length, output format). The user content carries the message,
/// prefixed by recalled context in free mode or combined with the draft in
/// rephrase mode.
pub struct ReplyPromptBuilder;

impl ReplyPromptBuilder {
    /// Compose the prompt for `message`.
    ///
    /// `memory_context` is the recalled-context block (may be empty) and is
    /// only used in free mode. `response_hint` switches to rephrase mode.
    pub fn build(
        persona: &Persona,
        message: &str,
        stance: &Stance,
        memory_context: &str,
        response_hint: Option<&str>,
    ) -> ComposedPrompt {
        let length = Self::length_instruction(message);

        match response_hint {
            Some(hint) => {
                let task = format!(
                    "The user wants to reply with: '{hint}'. Rephrase this response in your \
                     persona's voice and style while keeping the same core meaning. Make it sound \
                     natural and characteristic of your persona."
                );
                ComposedPrompt {
                    system: format!("{} {length} {TEXTING_DIRECTIVE}", persona.voice),
                    user_content: format!(
                        "Incoming message: {message}\n\nUser's draft response: {hint}\n\n{task}"
                    ),
                }
            }
            None => {
                let stance_directive = format!(
                    "Your response MUST {} with the user's message.",
                    stance.directive_label()
                );
                let mut directives =
                    format!("{stance_directive} {length} {TEXTING_DIRECTIVE}");
                let user_content = if memory_context.is_empty() {
                    message.to_string()
                } else {
                    directives.push_str(&format!(" {MEMORY_INSTRUCTION}"));
                    format!("{memory_context}Current message: {message}")
                };
                ComposedPrompt {
                    system: format!("{} {directives}", persona.voice),
                    user_content,
                }
            }
        }
    }

    /// Length tier from the whitespace-split word count of the raw message.
    fn length_instruction(message: &str) -> &'static str {
        let words = message.split_whitespace().count();
        if words < 15 {
            "Keep your response to 1-2 sentences maximum (under 30 words)."
        } else if words < 30 {
            "Keep your response to 2-3 sentences (under 50 words)."
        } else {
            "Keep your response concise (under 80 words)."
        }
    }
}
