use std::{fs, path::Path, sync::LazyLock};

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::{error::GenerateError, schema::EnvMapping};

/// Read and parse a dotenv file. Nothing is exported into the process env.
pub fn read_env_file(path: &Path) -> Result<EnvMapping, GenerateError> {
    let text = fs::read_to_string(path).map_err(|source| GenerateError::ReadEnvFile {
        path: path.to_path_buf(),
        source,
    })?;

    let env = parse_env_text(&text).map_err(|source| GenerateError::ParseEnvFile {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), entries = env.len(), "parsed env file");
    Ok(env)
}

/// A line of the env file that could not be understood.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct EnvParseError {
    pub line: usize,
    pub message: String,
}

static KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("env key regex"));

/// Parse `KEY=value` lines. Values are kept verbatim: `$VAR` is never
/// expanded, so the result does not depend on the calling process env.
/// A repeated key keeps its first position and takes the last value.
pub fn parse_env_text(text: &str) -> Result<EnvMapping, EnvParseError> {
    let mut out = EnvMapping::new();
    let mut lines = text.lines().enumerate();

    while let Some((idx, line)) = lines.next() {
        let mut s = line.trim();
        if s.is_empty() || s.starts_with('#') {
            continue;
        }

        if let Some(rest) = s.strip_prefix("export ") {
            s = rest.trim_start();
        }

        let (k, v) = s.split_once('=').ok_or_else(|| EnvParseError {
            line: idx + 1,
            message: format!("expected KEY=VALUE, got: {line}"),
        })?;

        let key = k.trim();
        if !KEY.is_match(key) {
            return Err(EnvParseError {
                line: idx + 1,
                message: format!("invalid key '{key}'"),
            });
        }

        let raw = v.trim_start();
        let value = match raw.chars().next() {
            Some(q @ ('"' | '\'' | '`')) => {
                let mut body = raw[1..].to_string();
                // Quoted values may span lines until the closing quote.
                loop {
                    if let Some(end) = body.find(q) {
                        body.truncate(end);
                        break;
                    }
                    let Some((_, next)) = lines.next() else {
                        return Err(EnvParseError {
                            line: idx + 1,
                            message: format!("unterminated {q} quote for key '{key}'"),
                        });
                    };
                    body.push('\n');
                    body.push_str(next);
                }
                if q == '"' {
                    body.replace("\\n", "\n").replace("\\r", "\r")
                } else {
                    body
                }
            }
            _ => strip_inline_comment(raw).trim_end().to_string(),
        };

        out.insert(key.to_string(), value);
    }

    Ok(out)
}

// `#` starts a comment only after whitespace, so `a#b` stays intact.
fn strip_inline_comment(value: &str) -> &str {
    let bytes = value.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'#' && (i == 0 || bytes[i - 1].is_ascii_whitespace()) {
            return &value[..i];
        }
    }
    value
}
