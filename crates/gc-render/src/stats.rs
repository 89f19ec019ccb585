use std::collections::VecDeque;
use std::time::Instant;

/// Taille par défaut de la fenêtre glissante du calcul de FPS.
const FPS_WINDOW: usize = 30;

/// Statistiques d'une session de lecture.
///
/// Le FPS effectif est calculé sur une fenêtre glissante de timestamps de
/// rendu fournis par l'horloge du pacer. Zéro allocation après init.
///
/// # Example
/// ```
/// use gc_render::stats::PlaybackStats;
/// use std::time::{Duration, Instant};
/// let mut stats = PlaybackStats::default();
/// let t0 = Instant::now();
/// stats.record_render(t0);
/// stats.record_render(t0 + Duration::from_millis(100));
/// assert_eq!(stats.rendered, 2);
/// assert!((stats.fps() - 10.0).abs() < 1e-6);
/// ```
#[derive(Clone, Debug)]
pub struct PlaybackStats {
    /// Frames rendues et écrites dans le sink.
    pub rendered: u64,
    /// Frames sautées pendant un rattrapage.
    pub skipped: u64,
    /// Passages de la dernière frame à la première.
    pub loops: u64,
    timestamps: VecDeque<Instant>,
    window: usize,
}

impl Default for PlaybackStats {
    fn default() -> Self {
        Self::new(FPS_WINDOW)
    }
}

impl PlaybackStats {
    /// Create empty stats averaging FPS over `window` renders.
    #[must_use]
    pub fn new(window: usize) -> Self {
        let window = window.max(2);
        Self {
            rendered: 0,
            skipped: 0,
            loops: 0,
            timestamps: VecDeque::with_capacity(window + 1),
            window,
        }
    }

    /// À appeler une fois par frame rendue, avec l'instant de début de rendu.
    pub fn record_render(&mut self, at: Instant) {
        self.rendered += 1;
        self.timestamps.push_back(at);
        if self.timestamps.len() > self.window {
            self.timestamps.pop_front();
        }
    }

    /// Frames rendues par seconde sur la fenêtre (0.0 si moins de deux).
    #[must_use]
    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.timestamps.front(), self.timestamps.back()) else {
            return 0.0;
        };
        let secs = last.duration_since(*first).as_secs_f64();
        if secs > 0.0 {
            (self.timestamps.len() - 1) as f64 / secs
        } else {
            0.0
        }
    }

    /// Part des frames affichées parmi toutes les frames traversées.
    #[must_use]
    pub fn render_ratio(&self) -> f64 {
        let total = self.rendered + self.skipped;
        if total == 0 {
            return 1.0;
        }
        self.rendered as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn empty_stats() {
        let stats = PlaybackStats::default();
        assert!(stats.fps().abs() < f64::EPSILON);
        assert!((stats.render_ratio() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn window_slides() {
        let mut stats = PlaybackStats::new(3);
        let t0 = Instant::now();
        // Trois frames lentes puis trois rapides : seule la fin compte
        for ms in [0u64, 500, 1000, 1010, 1020, 1030] {
            stats.record_render(t0 + Duration::from_millis(ms));
        }
        assert_eq!(stats.rendered, 6);
        assert!((stats.fps() - 100.0).abs() < 1e-6);
    }

    #[test]
    fn render_ratio_counts_skips() {
        let mut stats = PlaybackStats::default();
        stats.record_render(Instant::now());
        stats.skipped = 3;
        assert!((stats.render_ratio() - 0.25).abs() < f64::EPSILON);
    }
}
