//! Line scanners over the kernel's text files.
//!
//! Every `try_*` function reports why a read failed; the plain variants map
//! any failure to a default and log it, which is what the facades use.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::error::{ReadError, ReadResult};

/// Logs why a read failed and hands back `None`.
pub(crate) fn available<T>(result: ReadResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(error = %e, "metric unavailable");
            None
        }
    }
}

fn open(path: &Path) -> ReadResult<BufReader<File>> {
    tracing::trace!(path = %path.display(), "reading");
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| ReadError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Feeds each line to `visit` until it returns `Some`. Lines are decoded
/// lossily so a stray byte in one line does not hide the rest of the file.
fn scan_lines<R>(path: &Path, mut visit: impl FnMut(&str) -> Option<R>) -> ReadResult<Option<R>> {
    let reader = open(path)?;
    for line in reader.split(b'\n') {
        let line = line.map_err(|source| ReadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(found) = visit(&String::from_utf8_lossy(&line)) {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

fn parse<T: FromStr>(path: &Path, token: &str) -> ReadResult<T> {
    token.parse().map_err(|_| ReadError::Malformed {
        path: path.to_path_buf(),
        token: token.to_string(),
    })
}

/// Splits a `/proc/<pid>/stat` line on whitespace, keeping the
/// parenthesized command name as one token. The name may itself contain
/// spaces and `)`, so the group runs to the last `)` on the line.
fn stat_tokens(line: &str) -> Vec<&str> {
    match (line.find('('), line.rfind(')')) {
        (Some(open), Some(close)) if open < close => {
            let mut out: Vec<&str> = line[..open].split_whitespace().collect();
            out.push(&line[open..=close]);
            out.extend(line[close + 1..].split_whitespace());
            out
        }
        _ => line.split_whitespace().collect(),
    }
}

/// Value of the first `<key> <value> [unit]` line whose key matches exactly.
pub fn try_keyed_value<T: FromStr>(path: &Path, key: &str) -> ReadResult<T> {
    let token = scan_lines(path, |line| {
        let mut fields = line.split_whitespace();
        if fields.next() == Some(key) {
            Some(fields.next().unwrap_or_default().to_string())
        } else {
            None
        }
    })?
    .ok_or_else(|| ReadError::KeyNotFound {
        path: path.to_path_buf(),
        key: key.to_string(),
    })?;

    parse(path, &token)
}

pub fn keyed_value<T: FromStr>(path: &Path, key: &str) -> Option<T> {
    available(try_keyed_value(path, key))
}

pub fn try_first_line(path: &Path) -> ReadResult<String> {
    Ok(scan_lines(path, |line| Some(line.to_string()))?.unwrap_or_default())
}

/// First line of the file, empty when unavailable.
pub fn first_line(path: &Path) -> String {
    available(try_first_line(path)).unwrap_or_default()
}

/// At most `count` whitespace tokens of the first line.
pub fn try_first_line_fields(path: &Path, count: usize) -> ReadResult<Vec<String>> {
    let line = try_first_line(path)?;
    Ok(line
        .split_whitespace()
        .take(count)
        .map(str::to_string)
        .collect())
}

pub fn first_line_fields(path: &Path, count: usize) -> Vec<String> {
    available(try_first_line_fields(path, count)).unwrap_or_default()
}

fn pick<T: FromStr>(path: &Path, fields: &[&str], skip: usize, width: usize) -> ReadResult<Vec<T>> {
    (skip..skip + width)
        .map(|index| {
            let token = fields.get(index).ok_or_else(|| ReadError::MissingField {
                path: path.to_path_buf(),
                index,
            })?;
            parse(path, token)
        })
        .collect()
}

/// Skips `skip` whitespace tokens of the first line and parses the next `width`.
pub fn try_positional_fields<T: FromStr>(path: &Path, skip: usize, width: usize) -> ReadResult<Vec<T>> {
    let line = try_first_line(path)?;
    let fields: Vec<&str> = line.split_whitespace().collect();
    pick(path, &fields, skip, width)
}

pub fn positional_fields<T: FromStr>(path: &Path, skip: usize, width: usize) -> Option<Vec<T>> {
    available(try_positional_fields(path, skip, width))
}

/// Like [`try_positional_fields`] for a `/proc/<pid>/stat` file, where the
/// command name counts as a single token.
pub fn try_pid_stat_fields<T: FromStr>(path: &Path, skip: usize, width: usize) -> ReadResult<Vec<T>> {
    let line = try_first_line(path)?;
    pick(path, &stat_tokens(&line), skip, width)
}

pub fn pid_stat_fields<T: FromStr>(path: &Path, skip: usize, width: usize) -> Option<Vec<T>> {
    available(try_pid_stat_fields(path, skip, width))
}

/// First token of the first line parsed as `T`.
pub fn try_first_value<T: FromStr>(path: &Path) -> ReadResult<T> {
    try_positional_fields(path, 0, 1)?
        .pop()
        .ok_or_else(|| ReadError::MissingField {
            path: path.to_path_buf(),
            index: 0,
        })
}

pub fn first_value<T: FromStr + Default>(path: &Path) -> T {
    available(try_first_value(path)).unwrap_or_default()
}

/// Subdirectories of `path` whose names are all decimal digits.
pub fn numeric_dir_entries(path: &Path) -> BTreeSet<u32> {
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "cannot list directory");
            return BTreeSet::new();
        }
    };

    entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter_map(|entry| {
            let name = entry.file_name();
            let name = name.to_str()?;
            if !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()) {
                name.parse().ok()
            } else {
                None
            }
        })
        .collect()
}

/// `PRETTY_NAME` of an os-release file, without its quotes.
pub fn try_pretty_name(path: &Path) -> ReadResult<String> {
    const KEY: &str = "PRETTY_NAME";

    scan_lines(path, |line| {
        let (key, value) = line.split_once('=')?;
        (key.trim() == KEY).then(|| value.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
    })?
    .ok_or_else(|| ReadError::KeyNotFound {
        path: path.to_path_buf(),
        key: KEY.to_string(),
    })
}

/// First colon-delimited record whose field `index` equals `value`.
pub fn try_colon_record(path: &Path, index: usize, value: &str) -> ReadResult<Vec<String>> {
    scan_lines(path, |line| {
        let fields: Vec<&str> = line.split(':').collect();
        (fields.get(index) == Some(&value)).then(|| fields.iter().map(|f| f.to_string()).collect::<Vec<String>>())
    })?
    .ok_or_else(|| ReadError::KeyNotFound {
        path: path.to_path_buf(),
        key: value.to_string(),
    })
}
