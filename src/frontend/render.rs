//! Renders the event stream back to text

use std::io::Write;

use crate::config::Config;
use crate::frontend::grouping::Event;
use crate::utils::{Error, Result};

/// Writes events to an output as they arrive
pub struct Renderer<W: Write> {
    out: W,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write every event in order; stops at the first error
    pub fn render<I>(&mut self, events: I) -> Result<()>
    where
        I: IntoIterator<Item = Result<Event>>,
    {
        for event in events {
            self.write_event(&event?)?;
        }
        self.out.flush().map_err(|e| Error::Io(e.to_string()))
    }

    fn write_event(&mut self, event: &Event) -> Result<()> {
        self.out
            .write_all(event.text().as_bytes())
            .map_err(|e| Error::Io(e.to_string()))
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Translate a whole source text into S-expressions
pub fn translate(source: &str, config: &Config) -> Result<String> {
    let mut output = String::with_capacity(source.len());
    for event in crate::events(source, config) {
        output.push_str(event?.text());
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_render_to_writer() {
        let mut renderer = Renderer::new(Vec::new());
        renderer
            .render(crate::events("a\n  b", &Config::default()))
            .unwrap();
        assert_eq!(renderer.into_inner(), b"(a\n  (b))");
    }

    #[test]
    fn test_render_stops_on_error() {
        let mut renderer = Renderer::new(Vec::new());
        let result = renderer.render(crate::events("a\n  (b]", &Config::default()));
        assert!(matches!(result, Err(Error::UnmatchedParens { .. })));
        // Only what came before the bad closer was written
        assert_eq!(renderer.into_inner(), b"(a\n  (b");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure() {
        let mut renderer = Renderer::new(BrokenPipe);
        let result = renderer.render(crate::events("a", &Config::default()));
        assert_eq!(result, Err(Error::Io("closed".to_string())));
    }
}
