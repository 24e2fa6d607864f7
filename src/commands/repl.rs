//! Interactive substitution session
//!
//! Shows the ciphertext above the current partial plaintext and applies one
//! command per line:
//!
//! - `A=z` maps cipher letter `A` to plain letter `z`
//! - `A=` forgets the mapping for `A`
//! - `reset` forgets every mapping
//! - `quit` ends the session

use crate::solver::ByteMap;
use std::io::{self, BufRead, Write};

/// Placeholder for cipher letters that have no mapping yet
pub const UNSOLVED: char = '_';

/// One parsed REPL line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    Assign { cipher: u8, plain: u8 },
    Clear(u8),
    Reset,
    Quit,
}

impl ReplCommand {
    /// Parse a line; `None` for anything unrecognised
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "quit" | "q" | "exit" => return Some(Self::Quit),
            "reset" => return Some(Self::Reset),
            _ => {}
        }

        let (cipher, plain) = line.split_once('=')?;
        let cipher = single_letter(cipher.trim())?.to_ascii_uppercase();
        match plain.trim() {
            "" => Some(Self::Clear(cipher)),
            plain => single_letter(plain).map(|plain| Self::Assign { cipher, plain }),
        }
    }
}

fn single_letter(text: &str) -> Option<u8> {
    match text.as_bytes() {
        [letter] if letter.is_ascii_alphabetic() => Some(*letter),
        _ => None,
    }
}

/// A ciphertext and the mappings entered so far
#[derive(Debug, Clone)]
pub struct ReplSession {
    ciphertext: String,
    key: ByteMap,
}

impl ReplSession {
    #[must_use]
    pub fn new(ciphertext: &str) -> Self {
        Self {
            ciphertext: ciphertext.to_ascii_uppercase(),
            key: ByteMap::new(),
        }
    }

    #[must_use]
    pub fn ciphertext(&self) -> &str {
        &self.ciphertext
    }

    #[must_use]
    pub const fn key(&self) -> &ByteMap {
        &self.key
    }

    /// The plaintext as far as it is known
    #[must_use]
    pub fn plaintext(&self) -> String {
        self.key.partial_decipher(&self.ciphertext, UNSOLVED)
    }

    /// Apply a command; returns false once the session should end
    pub fn apply(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Assign { cipher, plain } => {
                self.key.assign(cipher, plain);
            }
            ReplCommand::Clear(cipher) => self.key.clear(cipher),
            ReplCommand::Reset => self.key = ByteMap::new(),
            ReplCommand::Quit => return false,
        }
        true
    }
}

/// Run a session over arbitrary input and output streams
///
/// Ends on `quit` or end of input and returns the final mappings.
///
/// # Errors
/// Propagates read and write errors.
pub fn run_repl<R: BufRead, W: Write>(ciphertext: &str, input: R, mut output: W) -> io::Result<ByteMap> {
    let mut session = ReplSession::new(ciphertext);
    let mut lines = input.lines();

    loop {
        writeln!(output, "{}", session.ciphertext())?;
        writeln!(output, "{}", session.plaintext())?;
        write!(output, "? ")?;
        output.flush()?;

        let Some(line) = lines.next().transpose()? else {
            writeln!(output)?;
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match ReplCommand::parse(&line) {
            Some(command) => {
                if !session.apply(command) {
                    break;
                }
            }
            None => writeln!(output, "unrecognised command: {}", line.trim())?,
        }
    }

    Ok(*session.key())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(
            ReplCommand::parse("A=z"),
            Some(ReplCommand::Assign {
                cipher: b'A',
                plain: b'z'
            })
        );
        assert_eq!(
            ReplCommand::parse(" q = E \n"),
            Some(ReplCommand::Assign {
                cipher: b'Q',
                plain: b'E'
            })
        );
        assert_eq!(ReplCommand::parse("B="), Some(ReplCommand::Clear(b'B')));
        assert_eq!(ReplCommand::parse("RESET"), Some(ReplCommand::Reset));
        assert_eq!(ReplCommand::parse("quit"), Some(ReplCommand::Quit));
        assert_eq!(ReplCommand::parse("AB=c"), None);
        assert_eq!(ReplCommand::parse("1=c"), None);
        assert_eq!(ReplCommand::parse("hello"), None);
    }

    #[test]
    fn session_tracks_partial_plaintext() {
        let mut session = ReplSession::new("xyy, z");
        assert_eq!(session.plaintext(), "___, _");

        session.apply(ReplCommand::Assign {
            cipher: b'Y',
            plain: b'e',
        });
        assert_eq!(session.plaintext(), "_ee, _");

        session.apply(ReplCommand::Clear(b'Y'));
        assert_eq!(session.plaintext(), "___, _");
    }

    #[test]
    fn runs_scripted_session() {
        let script = "X=s\nY=e\nnonsense\n\nZ=a\nreset\nX=h\nquit\nY=o\n";
        let mut out = Vec::new();
        let key = run_repl("XY", script.as_bytes(), &mut out).unwrap();

        assert_eq!(key.get(b'X'), Some(b'h'));
        assert_eq!(key.get(b'Y'), None);

        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("se\n"));
        assert!(transcript.contains("unrecognised command: nonsense"));
        assert!(transcript.contains("h_\n"));
    }

    #[test]
    fn ends_at_end_of_input() {
        let mut out = Vec::new();
        let key = run_repl("AB", "A=x\n".as_bytes(), &mut out).unwrap();
        assert_eq!(key.len(), 1);
    }
}
