//! 콘솔 리포터 포트 구현 어댑터.
//! 진행 상황은 stderr로 보내고 stdout은 결과 리포트 전용으로 둔다.

use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;

use crate::application::ports::Reporter;

/// 콘솔 전용 리포터 어댑터.
pub struct ConsoleReporter {
    colored: bool,
    quiet: bool,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleReporter {
    /// stderr가 TTY일 때만 상태 색상을 사용한다.
    pub fn new(quiet: bool) -> Self {
        Self::with_writer(quiet, io::stderr().is_terminal(), Box::new(io::stderr()))
    }

    pub fn with_writer(quiet: bool, colored: bool, out: Box<dyn Write + Send>) -> Self {
        Self {
            colored,
            quiet,
            out: Mutex::new(out),
        }
    }

    /// quiet 모드에서는 아무것도 쓰지 않는다. 출력 실패는 무시한다.
    fn emit(&self, line: &str) {
        if self.quiet {
            return;
        }
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{line}");
            let _ = out.flush();
        }
    }
}

impl Reporter for ConsoleReporter {
    fn section(&self, name: &str) {
        self.emit("");
        self.emit(&format!("==================== {} ====================", name));
    }

    fn kv(&self, key: &str, value: &str) {
        self.emit(&format!("{:<12}: {}", key, value));
    }

    fn status(&self, scope: &str, message: &str) {
        self.emit(&format!("[{:<12}] {}", scope, message));
    }

    fn provider_status(&self, provider: &str, status: &str, extra: Option<&str>) {
        let status = if self.colored {
            colorize_status(status)
        } else {
            status.to_string()
        };
        match extra {
            Some(extra) => self.emit(&format!("[provider:{:<8}] {:<7} {}", provider, status, extra)),
            None => self.emit(&format!("[provider:{:<8}] {}", provider, status)),
        }
    }
}

fn colorize_status(status: &str) -> String {
    match status {
        "running" => format!("\x1b[33m{status}\x1b[0m"),
        "done" => format!("\x1b[32m{status}\x1b[0m"),
        "error" => format!("\x1b[31m{status}\x1b[0m"),
        _ => status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn exercise(reporter: &ConsoleReporter) {
        reporter.section("Review");
        reporter.kv("Characters", "42 / 700");
        reporter.status("Usage", "150 tokens");
        reporter.provider_status("OpenAI", "done", Some("1.2s"));
    }

    #[test]
    fn writes_plain_lines_when_not_quiet() {
        let buf = SharedBuf::default();
        let reporter = ConsoleReporter::with_writer(false, false, Box::new(buf.clone()));
        exercise(&reporter);

        let text = buf.text();
        assert!(text.contains("==================== Review ===================="));
        assert!(text.contains("Characters  : 42 / 700"));
        assert!(text.contains("[Usage       ] 150 tokens"));
        assert!(text.contains("[provider:OpenAI  ] done    1.2s"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn quiet_reporter_writes_nothing() {
        let buf = SharedBuf::default();
        let reporter = ConsoleReporter::with_writer(true, true, Box::new(buf.clone()));
        exercise(&reporter);

        assert!(buf.text().is_empty());
    }

    #[test]
    fn colors_known_statuses_only() {
        assert_eq!(colorize_status("done"), "\x1b[32mdone\x1b[0m");
        assert_eq!(colorize_status("error"), "\x1b[31merror\x1b[0m");
        assert_eq!(colorize_status("queued"), "queued");
    }
}
