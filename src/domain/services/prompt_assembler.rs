/// Header introducing the conversational turn inside the prompt.
const CONVERSATION_HEADER: &str = "Current conversation:";

/// Join the instruction blocks and the user message into one prompt.
///
/// Sections appear in a fixed order separated by blank lines, followed by a
/// `User:` turn and an empty `Assistant:` turn for the model to complete.
/// The result is trimmed, so empty sections at the edges leave no padding.
pub fn assemble(system: &str, style: &str, safety: &str, user_message: &str) -> String {
    let prompt = format!(
        "{system}\n\n{style}\n\n{safety}\n\n{CONVERSATION_HEADER}\nUser: {user_message}\nAssistant: "
    );
    prompt.trim().to_string()
}
