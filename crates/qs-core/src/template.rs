use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder,
}

/// A log message with positional `%s` placeholders and `%%` escapes.
///
/// The placeholder count is checked against the caller's arity when the
/// template is parsed, so [`MessageTemplate::format`] cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    raw: String,
    segments: Vec<Segment>,
    placeholders: usize,
}

impl MessageTemplate {
    pub fn parse(raw: &str, arity: usize) -> Result<Self, String> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut placeholders = 0usize;
        let mut chars = raw.chars();

        while let Some(ch) = chars.next() {
            if ch != '%' {
                literal.push(ch);
                continue;
            }
            match chars.next() {
                Some('%') => literal.push('%'),
                Some('s') => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder);
                    placeholders += 1;
                }
                Some(other) => {
                    return Err(format!(
                        "Unsupported placeholder \"%{}\" in message \"{}\". Use \"%s\" or \"%%\".",
                        other, raw
                    ))
                }
                None => {
                    return Err(format!(
                        "Message \"{}\" ends with a dangling \"%\". Use \"%%\" for a literal percent.",
                        raw
                    ))
                }
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        if placeholders > arity {
            return Err(format!(
                "Message \"{}\" has {} placeholders, but at most {} values are available.",
                raw, placeholders, arity
            ));
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
            placeholders,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn placeholders(&self) -> usize {
        self.placeholders
    }

    /// Fills placeholders in order. Surplus values are ignored.
    pub fn format(&self, values: &[&dyn Display]) -> String {
        let mut out = String::with_capacity(self.raw.len());
        let mut values = values.iter();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder => {
                    if let Some(value) = values.next() {
                        out.push_str(&value.to_string());
                    }
                }
            }
        }
        out
    }
}

impl Display for MessageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
