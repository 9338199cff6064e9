use crate::error::{ReleaseError, Result};
use regex::Regex;

/// Shape of one `git ls-remote --tags --refs` line: `<sha40>\trefs/tags/<name>`
const REMOTE_TAG_LINE: &str = r"^[0-9a-f]{40}\trefs/tags/(\S+)$";

/// Extracts tag names from raw remote tag listings
#[derive(Debug, Clone)]
pub struct TagLineParser {
    line: Regex,
}

impl TagLineParser {
    pub fn new() -> Result<Self> {
        Ok(TagLineParser {
            line: Regex::new(REMOTE_TAG_LINE)?,
        })
    }

    /// Parse a listing into tag names, in listing order
    ///
    /// Every line is validated before anything is extracted, so a single
    /// malformed line rejects the whole listing.
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Tag names, duplicates preserved
    /// * `Err(MalformedTagLine)` - First line that does not match, with its index
    pub fn parse(&self, raw_text: &str) -> Result<Vec<String>> {
        let lines = split_lines(raw_text);

        if let Some((line_index, content)) = lines
            .iter()
            .enumerate()
            .find(|(_, line)| !self.line.is_match(line))
        {
            return Err(ReleaseError::MalformedTagLine {
                line_index,
                content: content.to_string(),
            });
        }

        Ok(lines
            .iter()
            .filter_map(|line| self.line.captures(line))
            .filter_map(|captures| captures.get(1))
            .map(|name| name.as_str().to_string())
            .collect())
    }
}

/// Split on `\n` only; `str::lines` would also strip `\r` and let CRLF listings through.
fn split_lines(raw_text: &str) -> Vec<&str> {
    let body = raw_text.strip_suffix('\n').unwrap_or(raw_text);
    if body.is_empty() {
        return Vec::new();
    }
    body.split('\n').collect()
}
