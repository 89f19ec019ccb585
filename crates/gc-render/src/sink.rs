use std::io::{self, BufWriter, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use gc_core::traits::OutputSink;

/// Sink terminal : séquences crossterm mises en file sur un `Write`.
///
/// Sur un writer bufferisé (cas de [`TerminalSink::stdout`]), rien n'est
/// envoyé avant `flush()` : le repositionnement du curseur et la frame
/// partent ensemble, sans scintillement.
///
/// # Example
/// ```
/// use gc_core::traits::OutputSink;
/// use gc_render::sink::TerminalSink;
/// let mut sink = TerminalSink::new(Vec::new());
/// sink.write_frame("@@\n").unwrap();
/// sink.flush().unwrap();
/// assert_eq!(sink.into_inner(), b"@@\n");
/// ```
pub struct TerminalSink<W: Write> {
    out: W,
}

impl TerminalSink<BufWriter<io::Stdout>> {
    /// Sink on the process standard output, buffered until `flush()`.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(BufWriter::new(io::stdout()))
    }
}

impl<W: Write> TerminalSink<W> {
    /// Wrap any writer.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Underlying writer.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Recover the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputSink for TerminalSink<W> {
    fn write_frame(&mut self, frame: &str) -> io::Result<()> {
        self.out.write_all(frame.as_bytes())
    }

    fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Hide)
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Show)
    }

    fn move_to_origin(&mut self) -> io::Result<()> {
        queue!(self.out, MoveTo(0, 0))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Opération reçue par un [`MemorySink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkEvent {
    /// Texte d'une frame.
    Frame(String),
    /// Effacement de l'écran.
    Clear,
    /// Curseur masqué.
    HideCursor,
    /// Curseur réaffiché.
    ShowCursor,
    /// Retour à l'origine.
    MoveToOrigin,
    /// Flush.
    Flush,
}

/// Sink en mémoire : journalise chaque opération. Sert aux tests et au
/// rendu hors terminal.
///
/// # Example
/// ```
/// use gc_core::traits::OutputSink;
/// use gc_render::sink::{MemorySink, SinkEvent};
/// let mut sink = MemorySink::default();
/// sink.hide_cursor().unwrap();
/// assert_eq!(sink.events, vec![SinkEvent::HideCursor]);
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Toutes les opérations, dans l'ordre.
    pub events: Vec<SinkEvent>,
    /// Échoue sur `write_frame` une fois ce nombre de frames écrit.
    pub fail_after_frames: Option<usize>,
}

impl MemorySink {
    /// Frames written so far, in order.
    #[must_use]
    pub fn frames(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Frame(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl OutputSink for MemorySink {
    fn write_frame(&mut self, frame: &str) -> io::Result<()> {
        if self
            .fail_after_frames
            .is_some_and(|limit| self.frames().len() >= limit)
        {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink fermé"));
        }
        self.events.push(SinkEvent::Frame(frame.to_owned()));
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.events.push(SinkEvent::Clear);
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.events.push(SinkEvent::HideCursor);
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.events.push(SinkEvent::ShowCursor);
        Ok(())
    }

    fn move_to_origin(&mut self) -> io::Result<()> {
        self.events.push(SinkEvent::MoveToOrigin);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.events.push(SinkEvent::Flush);
        Ok(())
    }
}
