use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};

const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB

/// Reads translation input from a file or stdin.
pub struct InputReader;

impl InputReader {
    pub fn read(file_path: Option<&str>) -> Result<String> {
        file_path.map_or_else(Self::read_stdin, Self::read_file)
    }

    /// Reads the input and splits it into one message per non-blank line.
    pub fn read_messages(file_path: Option<&str>) -> Result<Vec<String>> {
        Ok(split_messages(&Self::read(file_path)?))
    }

    fn read_file(path: &str) -> Result<String> {
        let size = fs::metadata(path)
            .with_context(|| format!("Failed to access file: {path}"))?
            .len() as usize;
        check_size(size)?;

        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
    }

    fn read_stdin() -> Result<String> {
        let mut buffer = Vec::new();
        io::stdin()
            .lock()
            .take(MAX_INPUT_SIZE as u64 + 1)
            .read_to_end(&mut buffer)
            .context("Failed to read from stdin")?;
        check_size(buffer.len())?;

        String::from_utf8(buffer).context("Input is not valid UTF-8")
    }
}

fn check_size(size: usize) -> Result<()> {
    if size > MAX_INPUT_SIZE {
        anyhow::bail!(
            "Input exceeds the maximum allowed size (1 MB).\n\n\
             Split it into several smaller batches."
        );
    }
    Ok(())
}

/// Splits text into messages: one per line, blank lines dropped, `\r\n` tolerated.
pub fn split_messages(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
