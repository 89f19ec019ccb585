use crate::error::CoreError;
use crate::pixel::PixelBuffer;

/// Une frame d'animation : pixels + délai déclaré en centisecondes.
///
/// # Example
/// ```
/// use gc_core::frame::AnimationFrame;
/// use gc_core::pixel::PixelBuffer;
/// let buf = PixelBuffer::filled(1, 1, &[0]).unwrap();
/// let frame = AnimationFrame::new(buf, 0);
/// assert_eq!(frame.delay_cs(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct AnimationFrame {
    buffer: PixelBuffer,
    delay_cs: u32,
}

impl AnimationFrame {
    /// Construit une frame. Un délai `<= 0` est ramené à 1 centiseconde.
    #[must_use]
    pub fn new(buffer: PixelBuffer, delay_cs: i32) -> Self {
        Self {
            buffer,
            delay_cs: delay_cs.max(1).unsigned_abs(),
        }
    }

    /// Pixel data of the frame.
    #[inline]
    #[must_use]
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Declared delay in hundredths of a second, always `>= 1`.
    #[inline]
    #[must_use]
    pub fn delay_cs(&self) -> u32 {
        self.delay_cs
    }
}

/// Séquence animée non vide dont toutes les frames partagent les mêmes
/// dimensions et le même nombre de canaux.
#[derive(Clone, Debug)]
pub struct Animation {
    frames: Vec<AnimationFrame>,
}

impl Animation {
    /// Valide la séquence produite par le décodeur.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidInput`] if `frames` is empty or the frames
    /// disagree on width, height or channel count.
    ///
    /// # Example
    /// ```
    /// use gc_core::frame::{Animation, AnimationFrame};
    /// use gc_core::pixel::PixelBuffer;
    /// let f = |v| AnimationFrame::new(PixelBuffer::filled(2, 2, &[v]).unwrap(), 10);
    /// let anim = Animation::new(vec![f(0), f(255)]).unwrap();
    /// assert_eq!(anim.len(), 2);
    /// ```
    pub fn new(frames: Vec<AnimationFrame>) -> Result<Self, CoreError> {
        let Some(first) = frames.first() else {
            return Err(CoreError::InvalidInput("animation sans frame".into()));
        };
        let shape = shape_of(first.buffer());
        if let Some((idx, _)) = frames
            .iter()
            .enumerate()
            .find(|(_, f)| shape_of(f.buffer()) != shape)
        {
            return Err(CoreError::InvalidInput(format!(
                "frame {idx} : dimensions différentes de la frame 0"
            )));
        }
        Ok(Self { frames })
    }

    /// Number of frames, always `>= 1`.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`; an `Animation` cannot be built empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at `index`, wrapping modulo the frame count.
    #[inline]
    #[must_use]
    pub fn frame(&self, index: usize) -> &AnimationFrame {
        &self.frames[index % self.frames.len()]
    }

    /// All frames in display order.
    #[must_use]
    pub fn frames(&self) -> &[AnimationFrame] {
        &self.frames
    }

    /// Somme des délais déclarés d'un cycle complet, en centisecondes.
    #[must_use]
    pub fn total_delay_cs(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.delay_cs())).sum()
    }
}

fn shape_of(buf: &PixelBuffer) -> (u32, u32, u8) {
    (buf.width(), buf.height(), buf.channels())
}
