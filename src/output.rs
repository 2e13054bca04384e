/// Abstraction over user-facing output.
///
/// Command modules use this trait instead of `println!`/`eprintln!` so tests
/// can capture what a command prints.
pub trait UserOutput: Send + Sync {
    /// Informational line, written to stdout.
    fn status(&self, message: &str);

    /// Success message.
    fn success(&self, message: &str);

    /// Warning, written to stderr.
    fn warning(&self, message: &str);

    /// A blank line separator.
    fn blank(&self);
}

/// Standard CLI output.
pub struct CliOutput;

impl UserOutput for CliOutput {
    fn status(&self, message: &str) {
        println!("{}", message);
    }

    fn success(&self, message: &str) {
        println!("\x1b[32m{}\x1b[0m", message);
    }

    fn warning(&self, message: &str) {
        eprintln!("\x1b[33m{}\x1b[0m", message);
    }

    fn blank(&self) {
        println!();
    }
}

/// Collects output in memory.
#[cfg(test)]
#[derive(Default)]
pub struct CapturedOutput {
    lines: parking_lot::Mutex<Vec<String>>,
}

#[cfg(test)]
impl CapturedOutput {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn text(&self) -> String {
        self.lines().join("\n")
    }
}

#[cfg(test)]
impl UserOutput for CapturedOutput {
    fn status(&self, message: &str) {
        self.lines.lock().push(message.to_string());
    }

    fn success(&self, message: &str) {
        self.lines.lock().push(message.to_string());
    }

    fn warning(&self, message: &str) {
        self.lines.lock().push(format!("warning: {}", message));
    }

    fn blank(&self) {
        self.lines.lock().push(String::new());
    }
}
