//! Scripted travel-assistant conversation
//!
//! Seeds the system prompts, then runs three rounds of: print an assistant
//! prompt, read one line, reply. Ends with the full transcript.

use std::io::{BufRead, Write};

use crate::chat::conversation::Conversation;
use crate::chat::session::ChatSession;
use crate::errors::Result;
use crate::types::ChatTurn;

/// System turns that open every conversation
pub const SYSTEM_PROMPTS: [&str; 2] = [
    "You are a helpful travel assistant.",
    "Recommend a destination to the traveler based on their background and preferences.",
];

/// Assistant prompts, one per round
pub const SCRIPTED_PROMPTS: [&str; 3] = [
    "Tell me about your travel plans.",
    "Would you like some activity recommendations?",
    "Would you like some helpful phrases in the local language?",
];

/// Conversation seeded with the system prompts
pub fn opening() -> Conversation {
    Conversation::with_system_prompts(SYSTEM_PROMPTS)
}

/// Read one line, without its line terminator; EOF reads as empty
pub fn read_input<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

/// Write the closing banner and one `role: content` line per turn
pub fn write_transcript<W: Write>(output: &mut W, conversation: &Conversation) -> Result<()> {
    writeln!(output, "Chat Ended.\n")?;
    writeln!(output, "Chat History:")?;
    write!(output, "{}", conversation.transcript())?;
    Ok(())
}

/// Run the three scripted rounds and print the transcript
pub async fn run<R, W>(session: &ChatSession, input: &mut R, output: &mut W) -> Result<Conversation>
where
    R: BufRead,
    W: Write,
{
    let mut conversation = opening();

    for prompt in SCRIPTED_PROMPTS {
        writeln!(output, "{}", prompt)?;
        output.flush()?;
        conversation = conversation.with_turn(ChatTurn::assistant(prompt));

        let user_text = read_input(input)?;
        let reply = session.reply(&conversation, &user_text).await?;
        writeln!(output, "{}", reply.turn.content)?;
        conversation = reply.conversation;
    }

    write_transcript(output, &conversation)?;
    Ok(conversation)
}
