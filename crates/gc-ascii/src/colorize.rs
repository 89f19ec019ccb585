use std::fmt::Write;

/// Séquence de réinitialisation des attributs.
pub const RESET: &str = "\x1b[0m";

/// Préfixe commun des séquences de couleur truecolor de premier plan.
pub const FG_TRUECOLOR_PREFIX: &str = "\x1b[38;2;";

/// Ajoute `glyph` à `out`, encadré par une couleur 24 bits et un reset si
/// `enabled`. Pas d'allocation : `out` est réutilisé d'une frame à l'autre.
///
/// # Example
/// ```
/// use gc_ascii::colorize::colorize_into;
/// let mut out = String::new();
/// colorize_into(&mut out, '@', (255, 128, 0), true);
/// assert_eq!(out, "\x1b[38;2;255;128;0m@\x1b[0m");
/// out.clear();
/// colorize_into(&mut out, '@', (255, 128, 0), false);
/// assert_eq!(out, "@");
/// ```
#[inline]
pub fn colorize_into(out: &mut String, glyph: char, rgb: (u8, u8, u8), enabled: bool) {
    if enabled {
        let (r, g, b) = rgb;
        // Écriture dans une String : ne peut pas échouer
        let _ = write!(out, "{FG_TRUECOLOR_PREFIX}{r};{g};{b}m");
        out.push(glyph);
        out.push_str(RESET);
    } else {
        out.push(glyph);
    }
}
