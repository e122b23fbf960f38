//! Line-oriented terminal front end for the vote engine.
//!
//! Each input line is one [`Command`]. Drags are simulated from a start point
//! at the origin, so `drag 150` is a right swipe past the default threshold.

use std::fmt::Write as _;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use swipe_vote_engine::{DragOutcome, EngineError, VoteEngine};
use swipe_vote_shared::types::{VoteDirection, VoteValue};

use crate::errors::AppError;

const HELP: &str = "\
Commands:
  like | l          vote up the current caption
  dislike | d       vote down the current caption
  drag <dx> [dy]    swipe by the given offset (right likes, left dislikes)
  undo | u          take back the last vote
  restart           start again from the first caption
  show | s          print the current caption
  help | h          print this help
  quit | q          leave";

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Like,
    Dislike,
    Drag { dx: f64, dy: f64 },
    Undo,
    Restart,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let Some(head) = parts.next() else {
            return Err("empty command".to_string());
        };

        let command = match head.to_lowercase().as_str() {
            "like" | "l" => Command::Like,
            "dislike" | "d" => Command::Dislike,
            "drag" => {
                let dx = parse_coordinate(parts.next(), "dx")?;
                let dy = match parts.next() {
                    Some(raw) => parse_coordinate(Some(raw), "dy")?,
                    None => 0.0,
                };
                Command::Drag { dx, dy }
            }
            "undo" | "u" => Command::Undo,
            "restart" => Command::Restart,
            "show" | "s" => Command::Show,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(format!("unknown command: {other}")),
        };

        if parts.next().is_some() {
            return Err(format!("too many arguments for {head}"));
        }
        Ok(command)
    }
}

fn parse_coordinate(raw: Option<&str>, name: &str) -> Result<f64, String> {
    let raw = raw.ok_or_else(|| format!("drag needs {name}"))?;
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| format!("invalid {name}: {raw}"))
}

/// Drives a [`VoteEngine`] from text commands and renders its state.
pub struct TerminalSession {
    engine: VoteEngine,
}

impl TerminalSession {
    pub fn new(engine: VoteEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &VoteEngine {
        &self.engine
    }

    /// Executes one command and returns the text to print, or `None` when
    /// the session should end.
    pub async fn execute(&mut self, command: Command) -> Option<String> {
        let mut out = String::new();

        match command {
            Command::Quit => return None,
            Command::Help => {
                out.push_str(HELP);
                out.push('\n');
            }
            Command::Show => {}
            Command::Like => self.vote(VoteDirection::Like, &mut out).await,
            Command::Dislike => self.vote(VoteDirection::Dislike, &mut out).await,
            Command::Drag { dx, dy } => self.drag(dx, dy, &mut out).await,
            Command::Undo => match self.engine.undo().await {
                Ok(receipt) => {
                    let _ = writeln!(
                        out,
                        "Undid {} vote, now {}",
                        vote_label(receipt.undone),
                        vote_label(receipt.restored)
                    );
                }
                Err(e) => self.report(e, &mut out),
            },
            Command::Restart => match self.engine.restart() {
                Ok(()) => out.push_str("Back to the first caption\n"),
                Err(e) => self.report(e, &mut out),
            },
        }

        if command != Command::Help {
            self.render(&mut out);
        }
        Some(out)
    }

    /// Reads commands from `input` until it ends or `quit` is entered.
    pub async fn run<R, W>(&mut self, input: R, output: &mut W) -> Result<(), AppError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut intro = String::new();
        self.render(&mut intro);
        output.write_all(intro.as_bytes()).await?;
        output.write_all(b"Type `help` for commands.\n").await?;
        output.flush().await?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let reply = match line.parse::<Command>() {
                Ok(command) => match self.execute(command).await {
                    Some(reply) => reply,
                    None => break,
                },
                Err(e) => format!("{e} (try `help`)\n"),
            };

            output.write_all(reply.as_bytes()).await?;
            output.flush().await?;
        }

        Ok(())
    }

    async fn vote(&mut self, direction: VoteDirection, out: &mut String) {
        match self.engine.vote(direction).await {
            Ok(receipt) => {
                let _ = writeln!(out, "Vote saved: {}", vote_label(receipt.vote));
            }
            Err(e) => self.report(e, out),
        }
    }

    async fn drag(&mut self, dx: f64, dy: f64, out: &mut String) {
        if !self.engine.on_drag_start(0.0, 0.0) {
            out.push_str("Swiping is not available right now\n");
            return;
        }
        self.engine.on_drag_move(dx, dy);

        match self.engine.on_drag_end().await {
            Ok(DragOutcome::Committed(receipt)) => {
                let _ = writeln!(out, "Vote saved: {}", vote_label(receipt.vote));
            }
            Ok(DragOutcome::Cancelled) => out.push_str("Swipe too short, card snapped back\n"),
            Ok(DragOutcome::Ignored) => {}
            Err(e) => self.report(e, out),
        }
    }

    fn report(&self, error: EngineError, out: &mut String) {
        if error.is_user_visible() {
            let _ = writeln!(out, "Error: {error}");
        } else {
            debug!(error = %error, "Command ignored");
        }
    }

    fn render(&self, out: &mut String) {
        let queue = self.engine.queue();

        match self.engine.current() {
            Some(item) => {
                let _ = writeln!(out, "[{}/{}] {}", queue.cursor() + 1, queue.len(), item.content);
                if let Some(url) = &item.media_url {
                    let _ = writeln!(out, "  media: {url}");
                }
                let _ = writeln!(
                    out,
                    "  likes: {}  dislikes: {}  your vote: {}",
                    item.like_count,
                    item.dislike_count,
                    vote_label(item.user_vote)
                );
            }
            None if queue.is_empty() => out.push_str("No captions to vote on\n"),
            None => out.push_str("You have seen every caption. Type `restart` to go again\n"),
        }

        if !self.engine.is_authenticated() {
            out.push_str("  (read only: set SWIPE_USER_ID to vote)\n");
        }
    }
}

fn vote_label(vote: VoteValue) -> &'static str {
    match vote {
        VoteValue::Up => "up",
        VoteValue::Down => "down",
        VoteValue::Neutral => "none",
    }
}
