//! Record block builder for narrative prompts.
//!
//! Wraps the flattened inspection narrative in a tagged block so the model
//! can tell the field record apart from the instruction preceding it.

/// Build the user message: the instruction followed by the record block.
///
/// An empty narrative still produces an (empty) block so the model sees
/// that no fields were recorded.
pub fn build_user_message(instruction: &str, narrative: &str) -> String {
    let mut message = String::from(instruction.trim_end());
    message.push_str("\n\n<inspection_record>\n");
    message.push_str(narrative);
    if !narrative.is_empty() && !narrative.ends_with('\n') {
        message.push('\n');
    }
    message.push_str("</inspection_record>");
    message
}
