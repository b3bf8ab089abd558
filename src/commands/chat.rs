//! `portfolio-chat chat`: one terminal session, one conversation store,
//! one dispatcher. Each stdin line is a send.

use std::io::{BufRead, Write};
use std::sync::Mutex;

use crate::chat::ChatWidgetConfig;
use crate::config::RelayConfig;
use crate::models::MessageRole;
use crate::pipeline::relay::{AiRelay, Relay, RemoteRelay};
use crate::pipeline::{ConversationStore, Dispatcher, FallbackResponder, RejectReason, SendOutcome};

use super::{load_context, ChatArgs, CommandError};

const QUIT_COMMANDS: &[&str] = &["/quit", "/exit"];

/// Run an interactive session on stdin/stdout.
pub fn chat(args: &ChatArgs) -> Result<(), CommandError> {
    let relay_config = RelayConfig::from_env()?;

    let relay: Box<dyn Relay + Send + Sync> = match &args.server {
        Some(url) => {
            tracing::info!(server = %url, "Relaying through remote chat API");
            Box::new(RemoteRelay::new(url, relay_config.timeout_secs)?)
        }
        None => {
            let context = load_context(args.context.as_deref())?;
            if !relay_config.api_key.is_configured() {
                tracing::warn!("No provider credential set; answers will come from the keyword fallback");
            }
            Box::new(AiRelay::from_config(relay_config, &context)?)
        }
    };

    let dispatcher = Dispatcher::new(relay, FallbackResponder::portfolio());
    let widget = ChatWidgetConfig::default();
    let store = Mutex::new(ConversationStore::with_greeting(&widget.greeting));

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let sends = run_session(&dispatcher, &widget, &store, stdin.lock(), stdout.lock())?;
    tracing::debug!(sends, "Chat session ended");
    Ok(())
}

/// Drive a session over any line source and sink. Returns the number of
/// completed send cycles.
pub fn run_session<R, I, O>(
    dispatcher: &Dispatcher<R>,
    widget: &ChatWidgetConfig,
    store: &Mutex<ConversationStore>,
    input: I,
    mut output: O,
) -> Result<usize, CommandError>
where
    R: Relay,
    I: BufRead,
    O: Write,
{
    {
        let guard = store.lock().unwrap_or_else(|e| e.into_inner());
        for message in guard.messages() {
            writeln!(output, "{}", render(message.role, &message.content))?;
        }
        let suggestions = widget.suggestions_for(guard.len(), guard.is_awaiting_reply());
        if !suggestions.is_empty() {
            writeln!(output, "Try: {}", suggestions.join(" | "))?;
        }
    }

    let mut completed = 0;
    write!(output, "you> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        if QUIT_COMMANDS.contains(&line.trim()) {
            break;
        }

        match dispatcher.send(store, &line) {
            SendOutcome::Replied(source) => {
                completed += 1;
                let guard = store.lock().unwrap_or_else(|e| e.into_inner());
                if let Some(reply) = guard.last() {
                    tracing::debug!(?source, "Reply appended");
                    writeln!(output, "{}", render(reply.role, &reply.content))?;
                }
            }
            SendOutcome::Rejected(RejectReason::EmptyInput) => {}
            SendOutcome::Rejected(RejectReason::Busy) => {
                writeln!(output, "(still waiting on the last reply)")?;
            }
        }

        write!(output, "you> ")?;
        output.flush()?;
    }

    writeln!(output)?;
    Ok(completed)
}

fn render(role: MessageRole, content: &str) -> String {
    match role {
        MessageRole::User => format!("you> {content}"),
        MessageRole::Assistant => format!("twin> {content}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::chat::APOLOGY_MESSAGE;
    use crate::pipeline::relay::testing::{PanickingRelay, ScriptedRelay};

    fn session_output<R: Relay>(
        dispatcher: &Dispatcher<R>,
        store: &Mutex<ConversationStore>,
        input: &str,
    ) -> (usize, String) {
        let widget = ChatWidgetConfig::default();
        let mut out = Vec::new();
        let sends = run_session(dispatcher, &widget, store, Cursor::new(input), &mut out).unwrap();
        (sends, String::from_utf8(out).unwrap())
    }

    #[test]
    fn greeting_and_suggestions_are_shown_first() {
        let widget = ChatWidgetConfig::default();
        let store = Mutex::new(ConversationStore::with_greeting(&widget.greeting));
        let dispatcher = Dispatcher::new(ScriptedRelay::replying("ok"), FallbackResponder::portfolio());

        let (sends, out) = session_output(&dispatcher, &store, "");
        assert_eq!(sends, 0);
        assert!(out.starts_with(&format!("twin> {}", widget.greeting)));
        assert!(out.contains("Try: What's Daniel's tech stack?"));
    }

    #[test]
    fn each_line_is_one_cycle() {
        let store = Mutex::new(ConversationStore::new());
        let dispatcher = Dispatcher::new(
            ScriptedRelay::replying("He is based in Johannesburg."),
            FallbackResponder::portfolio(),
        );

        let (sends, out) = session_output(&dispatcher, &store, "where is he?\nand why?\n");
        assert_eq!(sends, 2);
        assert_eq!(store.lock().unwrap().len(), 4);
        assert_eq!(out.matches("twin> He is based in Johannesburg.").count(), 2);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let store = Mutex::new(ConversationStore::new());
        let dispatcher = Dispatcher::new(ScriptedRelay::replying("hi"), FallbackResponder::portfolio());

        let (sends, _) = session_output(&dispatcher, &store, "\n   \nhello\n");
        assert_eq!(sends, 1);
        assert_eq!(dispatcher.relay().calls(), 1);
    }

    #[test]
    fn quit_stops_reading() {
        let store = Mutex::new(ConversationStore::new());
        let dispatcher = Dispatcher::new(ScriptedRelay::replying("hi"), FallbackResponder::portfolio());

        let (sends, _) = session_output(&dispatcher, &store, "hello\n/quit\nignored\n");
        assert_eq!(sends, 1);
        assert_eq!(store.lock().unwrap().len(), 2);
    }

    #[test]
    fn failed_relay_prints_fallback() {
        let store = Mutex::new(ConversationStore::new());
        let fallback = FallbackResponder::portfolio();
        let expected = fallback.respond("how do I contact him?");
        let dispatcher = Dispatcher::new(ScriptedRelay::failing("missing credential"), fallback);

        let (_, out) = session_output(&dispatcher, &store, "how do I contact him?\n");
        assert!(out.contains(&format!("twin> {expected}")));
    }

    #[test]
    fn relay_fault_prints_apology_and_continues() {
        let store = Mutex::new(ConversationStore::new());
        let dispatcher = Dispatcher::new(PanickingRelay, FallbackResponder::portfolio());

        let (sends, out) = session_output(&dispatcher, &store, "one\ntwo\n");
        assert_eq!(sends, 2);
        assert_eq!(out.matches(APOLOGY_MESSAGE).count(), 2);
    }
}
