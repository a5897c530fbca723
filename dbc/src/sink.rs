use super::*;
use std::io::Write;

/// Accepts one line of space-separated tokens per call.
pub trait Sink {
    /// Appends `tokens` joined by single spaces and terminated by `\n`.
    /// No tokens writes a blank line.
    fn emit(&mut self, tokens: &[&str]) -> Result<(), Error>;
}

/// A [`Sink`] over any [`std::io::Write`].
pub struct LineWriter<W> {
    inner: W,
}

impl<W: Write> LineWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Sink for LineWriter<W> {
    fn emit(&mut self, tokens: &[&str]) -> Result<(), Error> {
        let mut tokens = tokens.iter();
        if let Some(first) = tokens.next() {
            self.inner.write_all(first.as_bytes())?;
            for token in tokens {
                self.inner.write_all(b" ")?;
                self.inner.write_all(token.as_bytes())?;
            }
        }
        self.inner.write_all(b"\n")?;
        Ok(())
    }
}

/// Appends each line, with its terminator.
impl Sink for String {
    fn emit(&mut self, tokens: &[&str]) -> Result<(), Error> {
        for (i, token) in tokens.iter().enumerate() {
            if i > 0 {
                self.push(' ');
            }
            self.push_str(token);
        }
        self.push('\n');
        Ok(())
    }
}

/// Collects each line, without its terminator.
impl Sink for Vec<String> {
    fn emit(&mut self, tokens: &[&str]) -> Result<(), Error> {
        self.push(tokens.join(" "));
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn joins_tokens() {
        let mut w = LineWriter::new(Vec::new());
        w.emit(&["BO_", "100", "Status:", "8", "ECU1"]).unwrap();
        w.emit(&[]).unwrap();
        w.emit(&["", "SG_", "Flag"]).unwrap();
        assert_eq!(w.into_inner(), b"BO_ 100 Status: 8 ECU1\n\n SG_ Flag\n");

        let mut text = String::new();
        text.emit(&["BO_", "100", "Status:", "8", "ECU1"]).unwrap();
        text.emit(&[]).unwrap();
        text.emit(&["", "SG_", "Flag"]).unwrap();
        assert_eq!(text, "BO_ 100 Status: 8 ECU1\n\n SG_ Flag\n");
    }

    #[test]
    fn write_failure() {
        let mut w = LineWriter::new(Broken);
        assert!(matches!(w.emit(&["VERSION"]), Err(Error::Sink(_))));
    }
}
