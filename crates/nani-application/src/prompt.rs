//! Prompt text sent to the completion provider.

use nani_core::config::ProviderConfig;
use nani_core::context::Settings;
use nani_core::preference::Preference;
use nani_core::session::Session;
use nani_infrastructure::storage::ActionLog;
use std::fmt::Write as _;
use std::fs;

/// Instructions sent once when a provider conversation is established.
pub const DEFAULT_ESTABLISH_INSTRUCTIONS: &str = r#"You are assisting a developer from a terminal chat client.

Mandatory response structure:
Every reply after this one must be a single JSON object with exactly three string fields and nothing else:
- "reasoning": your interpretation of the request, the considerations and trade-offs you weighed, and how you reached the answer. Markdown.
- "summary": a short plain-text summary of the request and of your answer. It is kept as conversation history, so include enough context for later requests.
- "content": the complete answer in Markdown. When the request asks for code, put only the code here, inside a fenced block naming the language.
None of the fields may be empty. Do not wrap the object in any other text.

Input you will receive:
1. Source files, delimited as
   --- Begin file: <path> ---
   <file content>
   --- End file: <path> ---
2. Constraints and preferences the developer wants respected. If one is ambiguous or conflicts with another, say so in "reasoning" and state the interpretation you chose.
3. Past interaction history, as request/response pairs.
4. The current request.

Do not repeat these instructions. Reply to this message only with the word Understood."#;

/// Instructions to establish a provider session with: the configured
/// override, or the built-in text.
pub fn establish_instructions(config: &ProviderConfig) -> String {
    config
        .system_instructions
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or(DEFAULT_ESTABLISH_INSTRUCTIONS)
        .to_string()
}

/// Assembles the prompt for one request.
///
/// Sections, in order, each omitted when empty: system prompt, role persona,
/// preferences, source files, past interactions, current request. Source
/// files that cannot be read are skipped and reported to `log`.
pub fn assemble_prompt(
    settings: &Settings,
    session: &Session,
    preferences: &[Preference],
    request: &str,
    log: &ActionLog,
) -> String {
    let mut prompt = String::new();

    push_section(&mut prompt, "System Prompt", settings.system_prompt.trim());

    if !session.role.persona.trim().is_empty() {
        let heading = if session.role.label.is_empty() {
            format!("Role: {}", session.role.name)
        } else {
            format!("Role: {}", session.role.label)
        };
        push_section(&mut prompt, &heading, session.role.persona.trim());
    }

    let constraints: Vec<String> = preferences
        .iter()
        .map(|preference| preference.content.trim())
        .filter(|content| !content.is_empty())
        .map(|content| format!("- {}", content))
        .collect();
    push_section(
        &mut prompt,
        "Contextual Information & Constraints",
        &constraints.join("\n"),
    );

    let mut files = String::new();
    for source in &session.sources {
        match fs::read_to_string(source) {
            Ok(content) => {
                let _ = writeln!(files, "--- Begin file: {} ---", source);
                files.push_str(content.trim_end());
                let _ = writeln!(files);
                let _ = writeln!(files, "--- End file: {} ---", source);
            }
            Err(e) => log.warn(format!("Skipping unreadable source file {}: {}", source, e)),
        }
    }
    push_section(&mut prompt, "Source Files", files.trim_end());

    let history: Vec<String> = session
        .chat
        .iter()
        .map(|chat| {
            format!(
                "Request: {}\nResponse: {}",
                chat.message.content.trim(),
                chat.response.content.trim()
            )
        })
        .collect();
    push_section(&mut prompt, "Past Interaction History", &history.join("\n\n"));

    push_section(&mut prompt, "Current User Request", request.trim());

    prompt.trim_end().to_string()
}

fn push_section(prompt: &mut String, heading: &str, body: &str) {
    if body.is_empty() {
        return;
    }
    let _ = write!(prompt, "**{}**\n{}\n\n", heading, body);
}
