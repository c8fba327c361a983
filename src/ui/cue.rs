use std::io::{self, Write};

/// Send-success cue, owned by the app so the handle has one explicit owner.
///
/// Strictly cosmetic: `play` is best-effort and callers log failures instead
/// of propagating them.
pub struct Chime;

impl Chime {
    pub fn new() -> Self {
        Self
    }

    pub fn play(&mut self) -> io::Result<()> {
        let mut out = io::stdout();
        out.write_all(b"\x07")?;
        out.flush()
    }
}

impl Default for Chime {
    fn default() -> Self {
        Self::new()
    }
}
