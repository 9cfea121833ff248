//! 누락 입력을 터미널에서 받는 포트 구현 어댑터.
//! API key는 raw mode에서 `*`로 가려서 입력받는다.

use std::env;
use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal;

use crate::application::ports::InputPrompter;
use crate::domain::policy::MAX_REVIEW_CHARS;

/// stdin/stderr 터미널 기반 입력 어댑터.
pub struct TerminalPrompter;

impl InputPrompter for TerminalPrompter {
    fn read_review(&self) -> Result<Option<String>> {
        eprintln!(
            "Enter the product review (max {} characters). Finish with an empty line or Ctrl-D:",
            MAX_REVIEW_CHARS - 1
        );
        let stdin = io::stdin();
        read_review_lines(stdin.lock())
    }

    fn read_api_key(&self, provider_name: &str) -> Result<Option<String>> {
        let label = format!("{provider_name} API key: ");
        if !supports_masked_input() {
            return read_line_fallback(&label);
        }

        match read_masked(&label) {
            Ok(v) => Ok(v),
            Err(_) => read_line_fallback(&label),
        }
    }
}

/// 입력을 묻지 않는 어댑터(라이브러리 직접 호출/비대화형 실행용).
pub struct NoPrompter;

impl InputPrompter for NoPrompter {
    fn read_review(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn read_api_key(&self, _provider_name: &str) -> Result<Option<String>> {
        Ok(None)
    }
}

/// 빈 줄 또는 EOF까지 읽어 하나의 리뷰로 합친다.
fn read_review_lines(reader: impl BufRead) -> Result<Option<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }
        lines.push(line);
    }

    if lines.is_empty() {
        return Ok(None);
    }
    Ok(Some(lines.join("\n")))
}

fn supports_masked_input() -> bool {
    if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
        return false;
    }

    // dumb 터미널에서는 raw mode 입력을 쓰지 않는다.
    if let Ok(term) = env::var("TERM")
        && term.eq_ignore_ascii_case("dumb")
    {
        return false;
    }

    true
}

fn read_line_fallback(label: &str) -> Result<Option<String>> {
    eprint!("{label}");
    io::stderr().flush()?;

    let mut line = String::new();
    let read = io::stdin().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn read_masked(label: &str) -> Result<Option<String>> {
    let mut stderr = io::stderr();
    eprint!("{label}");
    stderr.flush()?;

    let guard = InputGuard::enter()?;
    let mut secret = String::new();

    let outcome = loop {
        match event::read()? {
            Event::Paste(text) => {
                let text = text.trim_end_matches(['\r', '\n']);
                secret.push_str(text);
                write!(stderr, "{}", "*".repeat(text.chars().count()))?;
            }
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Enter => break Some(secret),
                    KeyCode::Backspace => {
                        if secret.pop().is_some() {
                            write!(stderr, "\x08 \x08")?;
                        }
                    }
                    KeyCode::Esc => break None,
                    KeyCode::Char('c') | KeyCode::Char('d')
                        if key.modifiers.contains(KeyModifiers::CONTROL) =>
                    {
                        break None;
                    }
                    KeyCode::Char(ch) => {
                        if !key.modifiers.contains(KeyModifiers::CONTROL)
                            && !key.modifiers.contains(KeyModifiers::ALT)
                        {
                            secret.push(ch);
                            write!(stderr, "*")?;
                        }
                    }
                    _ => {}
                }
            }
            _ => {}
        }
        stderr.flush()?;
    };

    drop(guard);
    eprintln!();
    Ok(outcome)
}

struct InputGuard;

impl InputGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for InputGuard {
    fn drop(&mut self) {
        let mut stderr = io::stderr();
        let _ = execute!(stderr, cursor::Show);
        let _ = terminal::disable_raw_mode();
        let _ = stderr.flush();
    }
}
