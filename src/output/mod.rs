//! Atomic JSON output.
//!
//! The document is written to a temporary file next to the destination and
//! renamed over it on `commit()`. Dropping the writer before committing
//! removes the temporary file and leaves the destination untouched.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

#[cfg(unix)]
use std::{fs::Permissions, os::unix::fs::PermissionsExt};


const INDENT: &[u8] = b"    ";

pub struct AtomicJsonWriter {
    temp: NamedTempFile,
    final_path: PathBuf,
}

impl AtomicJsonWriter {
    /// Create the temporary file in the destination's directory so the final
    /// rename stays on one filesystem.
    pub fn new(final_path: impl AsRef<Path>) -> io::Result<Self> {
        let final_path = final_path.as_ref().to_path_buf();
        let parent = match final_path.parent() {
            Some(dir) if dir.as_os_str().is_empty() => Path::new("."),
            Some(dir) => dir,
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("no parent directory for {}", final_path.display()),
                ));
            }
        };

        // tempfile defaults to 0600; open with 0666 so the umask decides, as for
        // any freshly created file.
        let mut builder = Builder::new();
        #[cfg(unix)]
        builder.permissions(Permissions::from_mode(0o666));
        let temp = builder.tempfile_in(parent)?;
        Ok(Self { temp, final_path })
    }

    /// Serialize `value` with a four-space indent and move it into place.
    pub fn commit<T: Serialize + ?Sized>(mut self, value: &T) -> io::Result<PathBuf> {
        {
            let mut buf = BufWriter::new(self.temp.as_file_mut());
            let mut serializer =
                serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
            value.serialize(&mut serializer)?;
            buf.write_all(b"\n")?;
            buf.flush()?;
        }
        self.temp.as_file().sync_all()?;

        self.temp
            .persist(&self.final_path)
            .map_err(|e| e.error)?;
        Ok(self.final_path)
    }
}
