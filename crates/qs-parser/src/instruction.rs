use std::collections::BTreeMap;
use std::sync::OnceLock;

use qs_core::{InstructionId, QuestError};
use regex::Regex;

/// How a flag field appeared in the instruction text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagToken<'a> {
    Absent,
    Bare,
    Valued(&'a str),
}

/// One tokenized script line: `kind positional... key:value... flag...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub id: InstructionId,
    pub source: String,
    pub kind: String,
    pub positional: Vec<String>,
    pub named: BTreeMap<String, String>,
}

#[derive(Debug)]
struct RawToken {
    text: String,
    quoted_from: Option<usize>,
}

fn key_regex() -> &'static Regex {
    static KEY: OnceLock<Regex> = OnceLock::new();
    KEY.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_\-]*$").expect("key regex must compile"))
}

impl Instruction {
    pub fn parse(id: InstructionId, source: &str) -> Result<Self, QuestError> {
        let error = |message: String| QuestError::instruction_format(id.to_string(), message);

        let mut tokens = split_tokens(source).map_err(error)?.into_iter();
        let Some(kind) = tokens.next() else {
            return Err(error("Instruction is empty.".to_string()));
        };
        if kind.quoted_from.is_some() || kind.text.is_empty() {
            return Err(error(format!("Invalid instruction kind \"{}\".", kind.text)));
        }

        let mut positional = Vec::new();
        let mut named = BTreeMap::new();
        for token in tokens {
            if let Some((key, value)) = split_named(&token) {
                if value.is_empty() {
                    return Err(error(format!("Field \"{}\" has no value.", key)));
                }
                if named.insert(key.to_string(), value.to_string()).is_some() {
                    return Err(error(format!("Field \"{}\" is declared twice.", key)));
                }
                continue;
            }
            positional.push(token.text);
        }

        Ok(Self {
            id,
            source: source.trim().to_string(),
            kind: kind.text,
            positional,
            named,
        })
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }

    pub fn named(&self, key: &str) -> Option<&str> {
        self.named.get(key).map(String::as_str)
    }

    /// A flag is declared either bare (`independent`) or with a value
    /// (`independent:false`). The first positional token is the subject and
    /// never counts as a bare flag.
    pub fn flag(&self, key: &str) -> FlagToken<'_> {
        if let Some(value) = self.named(key) {
            return FlagToken::Valued(value);
        }
        if self.positional.iter().skip(1).any(|token| token == key) {
            return FlagToken::Bare;
        }
        FlagToken::Absent
    }
}

fn split_named(token: &RawToken) -> Option<(&str, &str)> {
    let colon = token.text.find(':')?;
    if token.quoted_from.is_some_and(|quote| quote < colon) {
        return None;
    }
    let (key, value) = (&token.text[..colon], &token.text[colon + 1..]);
    key_regex().is_match(key).then_some((key, value))
}

fn split_tokens(source: &str) -> Result<Vec<RawToken>, String> {
    let mut tokens = Vec::new();
    let mut current: Option<RawToken> = None;
    let mut in_quotes = false;
    let mut chars = source.chars();

    while let Some(ch) = chars.next() {
        if in_quotes {
            let token = current.get_or_insert_with(empty_token);
            match ch {
                '"' => in_quotes = false,
                '\\' => match chars.next() {
                    Some(escaped @ ('"' | '\\')) => token.text.push(escaped),
                    Some(other) => {
                        token.text.push('\\');
                        token.text.push(other);
                    }
                    None => return Err("Quoted value ends with a dangling escape.".to_string()),
                },
                _ => token.text.push(ch),
            }
            continue;
        }

        match ch {
            '"' => {
                let token = current.get_or_insert_with(empty_token);
                token.quoted_from.get_or_insert(token.text.len());
                in_quotes = true;
            }
            ch if ch.is_whitespace() => {
                if let Some(token) = current.take() {
                    tokens.push(token);
                }
            }
            _ => current.get_or_insert_with(empty_token).text.push(ch),
        }
    }

    if in_quotes {
        return Err("Unterminated quoted value.".to_string());
    }
    if let Some(token) = current {
        tokens.push(token);
    }
    Ok(tokens)
}

fn empty_token() -> RawToken {
    RawToken {
        text: String::new(),
        quoted_from: None,
    }
}
