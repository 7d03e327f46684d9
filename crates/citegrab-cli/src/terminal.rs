//! [`UserInteraction`] for a real terminal.
//!
//! When both stdin and stdout are terminals the prompt goes through `dialoguer`, which
//! gives line editing. Otherwise (piped input, scripts, tests) lines are read straight
//! from stdin so `echo exit | citegrab` behaves as expected.

use std::io::{BufRead, IsTerminal, Write};

use console::{style, Term};
use dialoguer::Input;

use super::*;

/// The process's stdin/stdout.
#[derive(Debug)]
pub struct Terminal {
  /// Whether to prompt through `dialoguer`.
  interactive: bool,
}

impl Terminal {
  /// Detects whether the process is attached to a terminal.
  pub fn new() -> Self {
    Self { interactive: std::io::stdin().is_terminal() && Term::stdout().is_term() }
  }
}

impl Default for Terminal {
  fn default() -> Self { Self::new() }
}

impl UserInteraction for Terminal {
  fn prompt(&mut self, message: &str) -> Result<Option<String>> {
    if self.interactive {
      let input: String = Input::new().with_prompt(message).allow_empty(true).interact_text()?;
      return Ok(Some(input));
    }

    let mut stdout = std::io::stdout();
    write!(stdout, "{}{message}: ", style(PROMPT_PREFIX).cyan())?;
    stdout.flush()?;

    let mut line = String::new();
    if std::io::stdin().lock().read_line(&mut line)? == 0 {
      writeln!(stdout)?;
      return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
  }

  fn reply(&mut self, content: ResponseContent) -> Result<()> {
    println!("{content}");
    Ok(())
  }
}
