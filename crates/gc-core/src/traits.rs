use std::io;
use std::time::{Duration, Instant};

/// Destination des frames rendues (terminal, buffer mémoire...).
///
/// Le cœur n'émet que ces six opérations ; la mécanique d'écriture propre à
/// chaque plateforme reste dans l'implémentation.
///
/// # Example
/// ```
/// use gc_core::traits::OutputSink;
/// use std::io;
///
/// struct NullSink;
/// impl OutputSink for NullSink {
///     fn write_frame(&mut self, _frame: &str) -> io::Result<()> { Ok(()) }
///     fn clear(&mut self) -> io::Result<()> { Ok(()) }
///     fn hide_cursor(&mut self) -> io::Result<()> { Ok(()) }
///     fn show_cursor(&mut self) -> io::Result<()> { Ok(()) }
///     fn move_to_origin(&mut self) -> io::Result<()> { Ok(()) }
///     fn flush(&mut self) -> io::Result<()> { Ok(()) }
/// }
/// ```
pub trait OutputSink {
    /// Écrit un bloc de texte rendu à la position courante du curseur.
    fn write_frame(&mut self, frame: &str) -> io::Result<()>;

    /// Efface l'écran.
    fn clear(&mut self) -> io::Result<()>;

    /// Masque le curseur.
    fn hide_cursor(&mut self) -> io::Result<()>;

    /// Réaffiche le curseur.
    fn show_cursor(&mut self) -> io::Result<()>;

    /// Replace le curseur à l'origine de la frame, sans effacer.
    fn move_to_origin(&mut self) -> io::Result<()>;

    /// Pousse les écritures en attente.
    fn flush(&mut self) -> io::Result<()>;
}

/// Source de temps monotone + primitive de sommeil.
///
/// Injectée dans le pacer pour pouvoir simuler l'horloge murale en test.
pub trait Clock {
    /// Instant courant.
    fn now(&self) -> Instant;

    /// Suspend le thread courant pendant `duration`.
    fn sleep(&self, duration: Duration);
}
