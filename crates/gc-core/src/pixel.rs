use crate::error::CoreError;

/// Buffer de pixels brut, row-major, canaux entrelacés.
///
/// Invariant : `data.len() == width * height * channels`, garanti par le
/// constructeur. L'octet du canal `c` au pixel `(x, y)` se trouve à
/// `(y * width + x) * channels + c`.
///
/// # Example
/// ```
/// use gc_core::pixel::PixelBuffer;
/// let buf = PixelBuffer::new(2, 1, 3, vec![255, 0, 0, 0, 0, 255]).unwrap();
/// assert_eq!(buf.get(1, 0, 2), Some(255));
/// assert_eq!(buf.get(2, 0, 0), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl PixelBuffer {
    /// Valide et encapsule un buffer décodé.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidInput`] if a dimension is zero, the channel
    /// count is not 1 or 3, or the buffer length does not match.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidInput(format!(
                "dimensions nulles {width}×{height}"
            )));
        }
        if channels != 1 && channels != 3 {
            return Err(CoreError::InvalidInput(format!(
                "{channels} canaux (attendu 1 ou 3)"
            )));
        }
        let expected = width as usize * height as usize * usize::from(channels);
        if data.len() != expected {
            return Err(CoreError::InvalidInput(format!(
                "buffer de {} octets, attendu {expected}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Buffer uniforme : chaque pixel reçoit `pixel` (longueur = nombre de canaux).
    ///
    /// # Errors
    /// Same conditions as [`PixelBuffer::new`].
    ///
    /// # Example
    /// ```
    /// use gc_core::pixel::PixelBuffer;
    /// let white = PixelBuffer::filled(2, 2, &[255, 255, 255]).unwrap();
    /// assert_eq!(white.data().len(), 12);
    /// ```
    pub fn filled(width: u32, height: u32, pixel: &[u8]) -> Result<Self, CoreError> {
        let channels = u8::try_from(pixel.len())
            .map_err(|_| CoreError::InvalidInput(format!("{} canaux", pixel.len())))?;
        let count = width as usize * height as usize;
        Self::new(width, height, channels, pixel.repeat(count))
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of interleaved channels (1 or 3).
    #[inline]
    #[must_use]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Raw bytes, row-major.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Accès borné au canal `channel` du pixel `(x, y)`.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u32, y: u32, channel: u8) -> Option<u8> {
        if x >= self.width || y >= self.height || channel >= self.channels {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * usize::from(self.channels)
            + usize::from(channel);
        self.data.get(idx).copied()
    }

    /// Tous les canaux du pixel `(x, y)`, ou une slice vide hors limites.
    ///
    /// # Example
    /// ```
    /// use gc_core::pixel::PixelBuffer;
    /// let buf = PixelBuffer::filled(3, 3, &[10, 20, 30]).unwrap();
    /// assert_eq!(buf.pixel(2, 2), &[10, 20, 30]);
    /// assert!(buf.pixel(3, 0).is_empty());
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        if x >= self.width || y >= self.height {
            return &[];
        }
        let c = usize::from(self.channels);
        let idx = (y as usize * self.width as usize + x as usize) * c;
        self.data.get(idx..idx + c).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_length_mismatch() {
        let err = PixelBuffer::new(2, 2, 3, vec![0; 11]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn rejects_zero_dimensions_and_empty_data() {
        assert!(PixelBuffer::new(0, 4, 1, vec![]).is_err());
        assert!(PixelBuffer::new(4, 0, 1, vec![]).is_err());
    }

    #[test]
    fn rejects_unsupported_channel_count() {
        assert!(PixelBuffer::new(1, 1, 4, vec![0; 4]).is_err());
        assert!(PixelBuffer::new(1, 1, 2, vec![0; 2]).is_err());
    }

    #[test]
    fn row_major_interleaved_layout() {
        // 2×2 RGB, chaque octet = son propre index
        let buf = PixelBuffer::new(2, 2, 3, (0..12).collect()).unwrap();
        assert_eq!(buf.get(0, 1, 0), Some(6));
        assert_eq!(buf.get(1, 1, 2), Some(11));
        assert_eq!(buf.pixel(1, 0), &[3, 4, 5]);
        assert_eq!(buf.get(0, 0, 3), None);
    }

    #[test]
    fn grayscale_buffer() {
        let buf = PixelBuffer::new(3, 1, 1, vec![1, 2, 3]).unwrap();
        assert_eq!(buf.pixel(2, 0), &[3]);
        assert_eq!(buf.get(1, 0, 1), None);
    }
}
