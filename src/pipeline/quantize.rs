//! Lossy PNG compression through an external `pngquant` binary.

use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Quality floor and ceiling passed to pngquant.
pub const QUALITY: (u8, u8) = (85, 85);

#[derive(Debug, Clone)]
pub struct Quantizer {
    binary: PathBuf,
    quality: (u8, u8),
}

impl Quantizer {
    pub fn new<P: Into<PathBuf>>(binary: P) -> Self {
        Self {
            binary: binary.into(),
            quality: QUALITY,
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Compresses `png` in place.
    ///
    /// Never fails the caller: a missing binary or a failed run is logged and
    /// the image stays as it was.
    pub fn quantize(&self, png: &Path) -> bool {
        let status = Command::new(&self.binary)
            .arg("--force")
            .arg(format!("--quality={}-{}", self.quality.0, self.quality.1))
            .arg("--output")
            .arg(png)
            .arg("--")
            .arg(png)
            .status();

        match status {
            Ok(status) if status.success() => {
                debug!("Quantized {}", png.display());
                true
            }
            Ok(status) => {
                warn!(
                    "pngquant exited with {} for {}, keeping the uncompressed image",
                    status,
                    png.display()
                );
                false
            }
            Err(e) => {
                warn!(
                    "Unable to run pngquant at '{}': {}. Set pngquant_path to a valid binary (https://pngquant.org/)",
                    self.binary.display(),
                    e
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("a.png");
        std::fs::write(&png, b"data").unwrap();

        let quantizer = Quantizer::new(dir.path().join("no-such-pngquant"));
        assert!(!quantizer.quantize(&png));
        assert_eq!(std::fs::read(&png).unwrap(), b"data");
    }
}
