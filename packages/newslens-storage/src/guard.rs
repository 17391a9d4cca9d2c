//! Read-only admission check for generated queries.
//!
//! The check works on a sanitized copy of the query where string literals, quoted identifiers
//! and comments are blanked out, so keywords that only appear inside data never trigger a
//! rejection. It errs on the side of rejecting: a variable that happens to be named like a write
//! clause is refused as well.

use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

const LEADING_CLAUSES: [&str; 5] = ["MATCH", "OPTIONAL", "WITH", "UNWIND", "RETURN"];
const DENIED_KEYWORDS: [&str; 23] = [
	"CREATE", "INSERT", "MERGE", "DELETE", "DETACH", "NODETACH", "SET", "REMOVE", "DROP",
	"FOREACH", "LOAD", "CALL", "ALTER", "RENAME", "GRANT", "DENY", "REVOKE", "START", "STOP",
	"TERMINATE", "USE", "APOC", "DBMS",
];

static WORD: LazyLock<Result<Regex, regex::Error>> =
	LazyLock::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*"));

/// Returns `Ok(())` only for a single read-only statement.
pub fn ensure_read_only(query: &str) -> Result<()> {
	let sanitized = blank_literals(query);
	let body = sanitized.trim();
	let body = body.strip_suffix(';').unwrap_or(body).trim();

	if body.is_empty() {
		return Err(Error::WriteRejected("Generated query is empty.".to_string()));
	}
	if body.contains(';') {
		return Err(Error::WriteRejected(
			"Generated query must be a single statement.".to_string(),
		));
	}

	let word = WORD
		.as_ref()
		.map_err(|err| Error::InvalidArgument(format!("Keyword pattern failed to compile: {err}.")))?;
	let mut leading = true;

	for found in word.find_iter(body) {
		if !is_clause_position(body, found.start(), found.end()) {
			continue;
		}

		let keyword = found.as_str().to_ascii_uppercase();

		if leading {
			if !LEADING_CLAUSES.contains(&keyword.as_str()) {
				return Err(Error::WriteRejected(format!(
					"Generated query must start with a read clause, found {keyword}."
				)));
			}

			leading = false;
		}
		if DENIED_KEYWORDS.contains(&keyword.as_str()) {
			return Err(Error::WriteRejected(format!(
				"Generated query contains a disallowed clause: {keyword}."
			)));
		}
	}

	if leading {
		return Err(Error::WriteRejected("Generated query has no clauses.".to_string()));
	}

	Ok(())
}

// Property access, labels, relationship types, map keys and parameters are not clauses.
fn is_clause_position(body: &str, start: usize, end: usize) -> bool {
	let before = body[..start].chars().rev().find(|c| !c.is_whitespace());
	let after = body[end..].chars().find(|c| !c.is_whitespace());

	if matches!(before, Some('.' | ':' | '$')) {
		return false;
	}
	if matches!(after, Some(':')) {
		return false;
	}
	// Identifier characters glued to the match, e.g. the tail of a non-ASCII name. An ASCII digit
	// cannot end an identifier the word pattern missed, so `1DELETE` still reads as a clause.
	if body[..start]
		.chars()
		.next_back()
		.is_some_and(|c| (c.is_alphanumeric() && !c.is_ascii_digit()) || c == '_')
	{
		return false;
	}
	if body[end..].chars().next().is_some_and(|c| c.is_alphanumeric()) {
		return false;
	}

	true
}

#[derive(Clone, Copy, PartialEq)]
enum Scan {
	Code,
	Quoted(char),
	LineComment,
	BlockComment,
}

fn blank_literals(query: &str) -> String {
	let mut out = String::with_capacity(query.len());
	let mut state = Scan::Code;
	let mut chars = query.chars().peekable();

	while let Some(c) = chars.next() {
		match state {
			Scan::Code => match c {
				'\'' | '"' | '`' => {
					state = Scan::Quoted(c);

					out.push(' ');
				},
				'/' if chars.peek() == Some(&'/') => {
					chars.next();

					state = Scan::LineComment;

					out.push_str("  ");
				},
				'/' if chars.peek() == Some(&'*') => {
					chars.next();

					state = Scan::BlockComment;

					out.push_str("  ");
				},
				_ => out.push(c),
			},
			Scan::Quoted(quote) => {
				if c == '\\' && quote != '`' {
					chars.next();

					out.push_str("  ");

					continue;
				}
				if c == quote {
					state = Scan::Code;
				}

				out.push(' ');
			},
			Scan::LineComment => {
				if c == '\n' {
					state = Scan::Code;

					out.push('\n');
				} else {
					out.push(' ');
				}
			},
			Scan::BlockComment => {
				if c == '*' && chars.peek() == Some(&'/') {
					chars.next();

					state = Scan::Code;

					out.push(' ');
				}

				out.push(' ');
			},
		}
	}

	out
}
