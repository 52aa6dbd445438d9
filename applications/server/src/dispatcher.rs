//! Turns one input line into one reply

use crate::commands::{self, CommandKind};
use crate::state::AppState;

/// Split a command line into tokens
///
/// Whitespace separates tokens. A single- or double-quoted segment keeps
/// its whitespace and loses its quotes, so `"Road Trip"` is one token. A
/// quote only opens a segment at the start of a token; inside a word it is
/// kept as is, so `Don't` stays one token. An unterminated quote runs to the
/// end of the line.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if !in_token && (c == '"' || c == '\'') => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        tokens.push(current);
    }

    tokens
}

/// Routes lines to command handlers
#[derive(Clone)]
pub struct Dispatcher {
    state: AppState,
}

impl Dispatcher {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Execute one command line
    ///
    /// Returns `None` for a blank line. The session lock is held for the
    /// whole command.
    pub async fn dispatch(&self, line: &str) -> Option<String> {
        let mut tokens = tokenize(line);
        if tokens.is_empty() {
            return None;
        }
        let name = tokens.remove(0);

        let Some(kind) = CommandKind::from_name(&name) else {
            tracing::debug!(command = %name, "Unsupported command");
            return Some(format!("unsupported command {}", line.trim()));
        };

        let reply = {
            let mut session = self.state.session.lock().await;
            commands::execute(kind, &self.state, &mut session, &tokens).await
        };

        log_command(kind, &tokens);

        Some(reply)
    }
}

fn log_command(kind: CommandKind, args: &[String]) {
    if kind.is_memento() {
        tracing::info!(command = kind.name(), "Memento command executed");
    } else {
        tracing::debug!(command = kind.name(), ?args, "Command executed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(
            tokenize("  add_track_to_playlist  Mix\tSong /a.mp3 "),
            vec!["add_track_to_playlist", "Mix", "Song", "/a.mp3"]
        );
    }

    #[test]
    fn quoted_segments_are_single_tokens() {
        assert_eq!(
            tokenize(r#"add_track_to_playlist "Road Trip" 'Song A' /music/a.mp3"#),
            vec!["add_track_to_playlist", "Road Trip", "Song A", "/music/a.mp3"]
        );
    }

    #[test]
    fn quotes_inside_other_kind_are_literal() {
        assert_eq!(
            tokenize(r#"play_track "Rock 'n' Roll" Intro"#),
            vec!["play_track", "Rock 'n' Roll", "Intro"]
        );
    }

    #[test]
    fn apostrophe_inside_word_is_literal() {
        assert_eq!(
            tokenize("add_playlist Don't Stop"),
            vec!["add_playlist", "Don't", "Stop"]
        );
        assert_eq!(
            tokenize("add_track_to_playlist Mix Don't /a.mp3"),
            vec!["add_track_to_playlist", "Mix", "Don't", "/a.mp3"]
        );
    }

    #[test]
    fn quote_after_word_start_does_not_swallow_line() {
        assert_eq!(
            tokenize(r#"play_track 12"Remix Mix"#),
            vec!["play_track", r#"12"Remix"#, "Mix"]
        );
    }

    #[test]
    fn empty_quotes_give_empty_token() {
        assert_eq!(tokenize(r#"add_playlist """#), vec!["add_playlist", ""]);
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        assert_eq!(
            tokenize(r#"add_playlist "Late Night"#),
            vec!["add_playlist", "Late Night"]
        );
    }

    #[test]
    fn blank_line_has_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \t \r").is_empty());
    }
}
