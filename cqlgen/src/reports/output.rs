//! Line-oriented sinks that reports render into.

/// Where a rendered line goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Target for reports.
///
/// Reports call the semantic methods; an implementation only decides where
/// each finished line is written.
pub trait Output {
    fn write_line(&mut self, stream: Stream, line: String);

    fn section(&mut self, name: &str) {
        self.write_line(Stream::Stdout, format!("{}:", name));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.write_line(Stream::Stdout, format!("{}: {}", key, value));
    }

    fn list_item(&mut self, text: &str) {
        self.write_line(Stream::Stdout, format!("  - {}", text));
    }

    /// A file that was created.
    fn added_item(&mut self, text: &str) {
        self.write_line(Stream::Stdout, format!("  + {}", text));
    }

    /// A file whose content changed.
    fn updated_item(&mut self, text: &str) {
        self.write_line(Stream::Stdout, format!("  ~ {}", text));
    }

    /// A file that already had the right content.
    fn unchanged_item(&mut self, text: &str) {
        self.write_line(Stream::Stdout, format!("  = {}", text));
    }

    fn warning(&mut self, msg: &str) {
        self.write_line(Stream::Stderr, format!("warning: {}", msg));
    }

    fn error(&mut self, msg: &str) {
        self.write_line(Stream::Stderr, format!("error: {}", msg));
    }

    fn divider(&mut self, label: &str) {
        self.write_line(Stream::Stdout, format!("── {} ──", label));
    }

    fn preformatted(&mut self, text: &str) {
        self.write_line(Stream::Stdout, text.to_string());
    }

    fn newline(&mut self) {
        self.write_line(Stream::Stdout, String::new());
    }
}

pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Prints to the process's stdout and stderr.
#[derive(Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for TerminalOutput {
    fn write_line(&mut self, stream: Stream, line: String) {
        match stream {
            Stream::Stdout => println!("{}", line),
            Stream::Stderr => eprintln!("{}", line),
        }
    }
}

/// Keeps every line in order, regardless of stream.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingOutput {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl Output for RecordingOutput {
    fn write_line(&mut self, _stream: Stream, line: String) {
        self.lines.push(line);
    }
}
