use anyhow::{Context, Result, bail};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

/// Largest input accepted, in bytes.
pub const MAX_INPUT_SIZE: usize = 1024 * 1024;

/// Reads the text to translate from a file or stdin.
pub struct InputReader;

impl InputReader {
    /// Reads `file_path`, or stdin when no path is given.
    ///
    /// A single trailing line break is removed so `echo text | ytr` does not
    /// send the newline to the provider.
    pub fn read(file_path: Option<&Path>) -> Result<String> {
        let text = match file_path {
            Some(path) => Self::read_file(path)?,
            None => Self::read_limited(io::stdin().lock()).context("Failed to read from stdin")?,
        };
        Ok(strip_trailing_newline(text))
    }

    fn read_file(path: &Path) -> Result<String> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to access file: {}", path.display()))?;

        let size = metadata.len() as usize;
        if size > MAX_INPUT_SIZE {
            bail!(too_large_message(size));
        }

        let file =
            File::open(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
        Self::read_limited(file).with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Reads at most [`MAX_INPUT_SIZE`] bytes of UTF-8 from `reader`.
    fn read_limited(reader: impl Read) -> Result<String> {
        let mut buffer = Vec::new();
        // One extra byte tells "exactly at the limit" apart from "over it"
        reader
            .take(MAX_INPUT_SIZE as u64 + 1)
            .read_to_end(&mut buffer)?;

        if buffer.len() > MAX_INPUT_SIZE {
            bail!(too_large_message(buffer.len()));
        }

        String::from_utf8(buffer).context("Input is not valid UTF-8")
    }
}

fn too_large_message(size: usize) -> String {
    format!(
        "Input size ({:.1} MB) exceeds maximum allowed size (1 MB).\n\n\
         Consider splitting the input into smaller parts.",
        size as f64 / 1024.0 / 1024.0
    )
}

fn strip_trailing_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}
