use std::io::{self, Write};

/// The text capability reporters write through.
pub trait TextSink {
    fn write_str(&mut self, text: &str) -> io::Result<()>;

    /// Writes `text` (if any) followed by a newline.
    fn write_line(&mut self, text: Option<&str>) -> io::Result<()> {
        if let Some(text) = text.filter(|t| !t.is_empty()) {
            self.write_str(text)?;
        }
        self.write_str("\n")
    }

    fn flush_sink(&mut self) -> io::Result<()>;
}

impl<W: Write + ?Sized> TextSink for W {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.write_all(text.as_bytes())
    }

    fn flush_sink(&mut self) -> io::Result<()> {
        self.flush()
    }
}
