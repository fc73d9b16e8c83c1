//! `ragchat chat` and `ragchat ask`.
//!
//! The REPL reads one question per line. Lines starting with `/` are
//! commands:
//!
//! | Command | Effect |
//! |---------|--------|
//! | `/quit`, `/exit` | Leave the chat |
//! | `/clear` | Forget the conversation |
//! | `/retry` | Reset after an error (resubmit the question yourself) |
//! | `/help` | List commands |

use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::debug;

use ragchat_core::models::Message;
use ragchat_core::store::knowledge::react_knowledge_base;

use crate::chat::{ChatController, ChatError, ChatState};
use crate::config::Config;
use crate::pipeline::simulated_pipeline;
use crate::progress::{ChatProgressEvent, ChatProgressReporter, ProgressMode};
use crate::session::ChatSession;

const HELP: &str = "Commands: /clear, /retry, /help, /quit";

/// Build a session over the built-in knowledge base.
pub fn build_session(config: &Config) -> ChatSession {
    let (retriever, generator) = simulated_pipeline(Arc::new(react_knowledge_base()), config);
    ChatSession::new(ChatController::new(retriever, generator))
}

/// Forward every controller transition to `reporter` until the session is
/// dropped.
fn spawn_state_forwarder(
    session: &ChatSession,
    reporter: Arc<dyn ChatProgressReporter>,
) -> JoinHandle<()> {
    let mut rx = session.controller().subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(state) => reporter.report(&ChatProgressEvent::State(state)),
                Err(RecvError::Lagged(skipped)) => debug!(skipped, "progress lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    })
}

fn report_failure(reporter: &dyn ChatProgressReporter, mode: ProgressMode, err: &ChatError) {
    match err {
        ChatError::Generation(message) => {
            reporter.report(&ChatProgressEvent::Failed(message.clone()));
            if mode == ProgressMode::Off {
                eprintln!("Error: {err}");
            }
        }
        ChatError::Busy => eprintln!("Error: {err}"),
    }
}

/// Drive a chat session from `input`, writing answers to `out`.
///
/// Returns the conversation when `/quit` is read or `input` is exhausted.
pub async fn run_chat_loop<R, W>(
    session: ChatSession,
    input: R,
    out: &mut W,
    mode: ProgressMode,
    prompt: bool,
) -> Result<Vec<Message>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let reporter: Arc<dyn ChatProgressReporter> = Arc::from(mode.reporter());
    chat_loop(session, input, out, reporter, mode, prompt).await
}

async fn chat_loop<R, W>(
    mut session: ChatSession,
    input: R,
    out: &mut W,
    reporter: Arc<dyn ChatProgressReporter>,
    mode: ProgressMode,
    prompt: bool,
) -> Result<Vec<Message>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let forwarder = spawn_state_forwarder(&session, reporter.clone());
    let mut lines = input.lines();

    loop {
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match line.trim() {
            "" => continue,
            "/quit" | "/exit" => break,
            "/help" => writeln!(out, "{HELP}")?,
            "/clear" => {
                session.clear();
                writeln!(out, "Conversation cleared.")?;
            }
            "/retry" => {
                if session.state() == ChatState::Error {
                    session.retry();
                    writeln!(out, "Ready. Ask your question again.")?;
                } else {
                    writeln!(out, "Nothing to retry.")?;
                }
            }
            cmd if cmd.starts_with('/') => writeln!(out, "Unknown command: {cmd}. {HELP}")?,
            question => match session.submit(question).await {
                Ok(Some(reply)) => writeln!(out, "{}\n", reply.content)?,
                Ok(None) => {}
                Err(e) => report_failure(reporter.as_ref(), mode, &e),
            },
        }
        out.flush()?;
    }

    Ok(finish(session, forwarder).await)
}

/// Close the session's transition channel and wait until every pending
/// transition has been reported.
async fn finish(session: ChatSession, forwarder: JoinHandle<()>) -> Vec<Message> {
    let messages = session.into_messages();
    let _ = forwarder.await;
    messages
}

/// Interactive chat on stdin/stdout.
pub async fn run_chat(config: &Config, mode: Option<ProgressMode>) -> Result<()> {
    let mode = mode.unwrap_or_else(ProgressMode::default_for_tty);
    let interactive = atty::is(atty::Stream::Stdin);
    let session = build_session(config);

    if interactive {
        println!("Converse com seus Documentos. Ask about React hooks and components.");
        println!("{HELP}");
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_chat_loop(session, stdin, &mut stdout, mode, interactive).await?;
    Ok(())
}

/// Answer a single question and print the reply.
pub async fn run_ask(config: &Config, question: &str, mode: Option<ProgressMode>) -> Result<()> {
    let mode = mode.unwrap_or_else(ProgressMode::default_for_tty);
    let reporter: Arc<dyn ChatProgressReporter> = Arc::from(mode.reporter());
    let mut session = build_session(config);
    let forwarder = spawn_state_forwarder(&session, reporter.clone());

    let result = session
        .submit(question)
        .await
        .map(|reply| reply.map(|m| m.content.clone()));
    finish(session, forwarder).await;

    match result {
        Ok(Some(reply)) => {
            println!("{reply}");
            Ok(())
        }
        Ok(None) => bail!("question must not be empty"),
        Err(e) => {
            report_failure(reporter.as_ref(), mode, &e);
            Err(e.into())
        }
    }
}
