use std::time::{Duration, Instant};

use gc_ascii::Interpreter;
use gc_core::clock::CancelToken;
use gc_core::config::PlaybackConfig;
use gc_core::error::CoreError;
use gc_core::frame::Animation;
use gc_core::traits::{Clock, OutputSink};

use crate::stats::PlaybackStats;

/// Délai effectif d'une frame, en millisecondes.
///
/// `delay_cs · 10`, divisé par `speed` et arrondi (au moins 1 ms) si
/// `speed > 0`, puis relevé à `min_interval_ms`.
///
/// # Example
/// ```
/// use gc_render::pacer::effective_delay_ms;
/// assert_eq!(effective_delay_ms(10, 2.0, 20), 50);
/// assert_eq!(effective_delay_ms(1, 1.0, 20), 20);
/// assert_eq!(effective_delay_ms(3, 4.0, 0), 8);
/// ```
#[must_use]
pub fn effective_delay_ms(delay_cs: u32, speed: f32, min_interval_ms: u32) -> u64 {
    let mut ms = f64::from(delay_cs) * 10.0;
    if speed > 0.0 {
        ms = (ms / f64::from(speed)).round().max(1.0);
    }
    (ms as u64).max(u64::from(min_interval_ms))
}

/// État de l'ordonnanceur.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PacerState {
    /// Pas encore démarré.
    Idle,
    /// Boucle rendu/sommeil en cours.
    Playing,
    /// Terminé, curseur restauré. État terminal.
    Stopped,
}

/// État de lecture, possédé exclusivement par la boucle du pacer.
#[derive(Clone, Debug)]
pub struct PlaybackState {
    /// Frame courante (0-based, modulo le nombre de frames).
    pub frame_index: usize,
    /// Instant prévu pour l'affichage de la frame suivante.
    pub next_frame_time: Instant,
    speed: f32,
    min_interval_ms: u32,
}

impl PlaybackState {
    /// Start a schedule at `start`, positioned on frame 0.
    #[must_use]
    pub fn new(start: Instant, config: &PlaybackConfig) -> Self {
        Self {
            frame_index: 0,
            next_frame_time: start,
            speed: config.speed,
            min_interval_ms: config.min_interval_ms,
        }
    }

    /// Délai effectif d'une frame déclarant `delay_cs`.
    #[must_use]
    pub fn delay_for(&self, delay_cs: u32) -> Duration {
        Duration::from_millis(effective_delay_ms(
            delay_cs,
            self.speed,
            self.min_interval_ms,
        ))
    }

    /// Avance l'échéance d'un délai de frame.
    ///
    /// L'échéance est décalée de `delay` depuis la précédente, pas depuis
    /// `frame_start` : le dépassement d'un sommeil ne s'accumule pas. Elle
    /// repart de `frame_start` seulement après un blocage d'au moins un
    /// délai complet.
    pub fn schedule(&mut self, frame_start: Instant, delay: Duration) {
        if frame_start.saturating_duration_since(self.next_frame_time) >= delay {
            self.next_frame_time = frame_start + delay;
        } else {
            self.next_frame_time += delay;
        }
    }

    /// Rattrapage : saute des frames sans les rendre jusqu'à ce que
    /// l'échéance repasse dans le futur, ou qu'un cycle complet ait été
    /// considéré. Retourne le nombre de frames sautées et de bouclages.
    pub fn catch_up(&mut self, now: Instant, animation: &Animation) -> (usize, u64) {
        let mut skipped = 0;
        let mut loops = 0;
        while self.next_frame_time <= now && skipped < animation.len() {
            let upcoming = animation.frame(self.frame_index + 1).delay_cs();
            self.next_frame_time += self.delay_for(upcoming);
            if self.advance(animation.len()) {
                loops += 1;
            }
            skipped += 1;
        }
        (skipped, loops)
    }

    /// Passe à la frame suivante. `true` si l'index est revenu à 0.
    pub fn advance(&mut self, frame_count: usize) -> bool {
        self.frame_index = (self.frame_index + 1) % frame_count.max(1);
        self.frame_index == 0
    }
}

/// Lecture temps réel d'une animation dans un [`OutputSink`].
///
/// # Example
/// ```
/// use gc_ascii::Interpreter;
/// use gc_core::clock::{CancelToken, SystemClock};
/// use gc_core::config::{PlaybackConfig, RenderConfig};
/// use gc_core::frame::{Animation, AnimationFrame};
/// use gc_core::pixel::PixelBuffer;
/// use gc_render::pacer::{FramePacer, PacerState};
/// use gc_render::sink::MemorySink;
///
/// let frame = AnimationFrame::new(PixelBuffer::filled(2, 2, &[255]).unwrap(), 1);
/// let animation = Animation::new(vec![frame]).unwrap();
/// let mut pacer = FramePacer::new(
///     Interpreter::new(RenderConfig { target_width: 2, target_height: 2, ..RenderConfig::default() }),
///     PlaybackConfig::default(),
///     SystemClock,
/// );
/// let cancel = CancelToken::new();
/// cancel.cancel();
/// let mut sink = MemorySink::default();
/// let stats = pacer.play(&animation, &mut sink, &cancel).unwrap();
/// assert_eq!(stats.rendered, 0);
/// assert_eq!(pacer.state(), PacerState::Stopped);
/// ```
pub struct FramePacer<C: Clock> {
    interpreter: Interpreter,
    config: PlaybackConfig,
    clock: C,
    state: PacerState,
}

impl<C: Clock> FramePacer<C> {
    /// Create an idle pacer.
    #[must_use]
    pub fn new(interpreter: Interpreter, config: PlaybackConfig, clock: C) -> Self {
        Self {
            interpreter,
            config,
            clock,
            state: PacerState::Idle,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> PacerState {
        self.state
    }

    /// Joue `animation` en boucle jusqu'à annulation.
    ///
    /// Efface l'écran et masque le curseur au démarrage ; le curseur est
    /// réaffiché quelle que soit la sortie (annulation, erreur, panic).
    ///
    /// # Errors
    /// Returns an error if a frame cannot be rendered or the sink fails.
    pub fn play<S: OutputSink>(
        &mut self,
        animation: &Animation,
        sink: &mut S,
        cancel: &CancelToken,
    ) -> Result<PlaybackStats, CoreError> {
        if self.state == PacerState::Stopped {
            log::warn!("Pacer déjà arrêté, relance ignorée.");
            return Ok(PlaybackStats::default());
        }

        let mut guard = CursorGuard { sink };
        let mut stats = PlaybackStats::default();
        self.state = PacerState::Playing;
        log::info!(
            "Lecture : {} frames, vitesse ×{}, intervalle min {} ms",
            animation.len(),
            self.config.speed,
            self.config.min_interval_ms
        );

        let result = self.run(animation, &mut *guard.sink, cancel, &mut stats);
        if let Err(e) = guard.restore() {
            log::warn!("Restauration du curseur impossible : {e}");
        }
        self.state = PacerState::Stopped;

        log::info!(
            "Lecture arrêtée : {} rendues, {} sautées, {} boucles, {:.1} fps",
            stats.rendered,
            stats.skipped,
            stats.loops,
            stats.fps()
        );
        result.map(|()| stats)
    }

    fn run<S: OutputSink>(
        &self,
        animation: &Animation,
        sink: &mut S,
        cancel: &CancelToken,
        stats: &mut PlaybackStats,
    ) -> Result<(), CoreError> {
        sink.clear()?;
        sink.hide_cursor()?;
        sink.flush()?;

        let mut playback = PlaybackState::new(self.clock.now(), &self.config);
        let mut text = String::new();

        loop {
            if cancel.is_cancelled() {
                return Ok(());
            }

            let frame_start = self.clock.now();
            let frame = animation.frame(playback.frame_index);
            self.interpreter.convert_into(frame.buffer(), &mut text)?;
            sink.move_to_origin()?;
            sink.write_frame(&text)?;
            sink.flush()?;
            stats.record_render(frame_start);

            let delay = playback.delay_for(frame.delay_cs());
            playback.schedule(frame_start, delay);

            let now = self.clock.now();
            if playback.next_frame_time > now {
                self.clock.sleep(playback.next_frame_time - now);
            } else {
                let (skipped, loops) = playback.catch_up(now, animation);
                stats.skipped += skipped as u64;
                stats.loops += loops;
                log::debug!(
                    "En retard : {skipped} frame(s) sautée(s), reprise à {}",
                    (playback.frame_index + 1) % animation.len()
                );
            }

            if playback.advance(animation.len()) {
                stats.loops += 1;
            }
        }
    }
}

/// Réaffiche le curseur à la destruction, y compris pendant un unwind.
struct CursorGuard<'s, S: OutputSink> {
    sink: &'s mut S,
}

impl<S: OutputSink> CursorGuard<'_, S> {
    fn restore(&mut self) -> std::io::Result<()> {
        self.sink.show_cursor()?;
        self.sink.flush()
    }
}

impl<S: OutputSink> Drop for CursorGuard<'_, S> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let _ = self.restore();
        }
    }
}
