//! Structured completions: ask the model for JSON (or plain lines), recover a typed
//! value from the reply, and fall back to a static value when that fails.
//!
//! Every helper returns a [`Structured`] whose `used_fallback` flag tells the caller
//! whether the value came from the model or from the fallback.

use serde::de::DeserializeOwned;

use super::client::{ChatCompletion, LlmError};
use super::types::Prompt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Object,
    Array,
}

impl JsonShape {
    fn delimiters(self) -> (char, char) {
        match self {
            JsonShape::Object => ('{', '}'),
            JsonShape::Array => ('[', ']'),
        }
    }
}

/// A model-produced value, or the fallback that replaced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Structured<T> {
    pub value: T,
    pub used_fallback: bool,
}

impl<T> Structured<T> {
    pub fn generated(value: T) -> Self {
        Self {
            value,
            used_fallback: false,
        }
    }

    pub fn fallback(value: T) -> Self {
        Self {
            value,
            used_fallback: true,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Structured<U> {
        Structured {
            value: f(self.value),
            used_fallback: self.used_fallback,
        }
    }
}

/// A typed schema the model is asked to produce.
pub trait StructuredOutput: DeserializeOwned {
    const SHAPE: JsonShape;

    /// Shape checks beyond what deserialization enforces.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// An element of a JSON array output.
pub trait ListItem: DeserializeOwned {
    fn validate_item(&self) -> Result<(), String> {
        Ok(())
    }
}

impl ListItem for String {
    fn validate_item(&self) -> Result<(), String> {
        if self.trim().is_empty() {
            return Err("blank string item".into());
        }
        Ok(())
    }
}

impl<T: ListItem> StructuredOutput for Vec<T> {
    const SHAPE: JsonShape = JsonShape::Array;

    fn validate(&self) -> Result<(), String> {
        if self.is_empty() {
            return Err("empty list".into());
        }
        self.iter().try_for_each(ListItem::validate_item)
    }
}

/// The greedy span from the first opening delimiter to the last closing one.
pub fn extract_json_span(text: &str, shape: JsonShape) -> Option<&str> {
    let (open, close) = shape.delimiters();
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if end > start {
        Some(&text[start..=end])
    } else {
        None
    }
}

pub fn parse_structured<T: StructuredOutput>(text: &str) -> Result<T, String> {
    let span = extract_json_span(text, T::SHAPE).ok_or_else(|| "no JSON span in reply".to_string())?;
    let value: T = serde_json::from_str(span).map_err(|e| e.to_string())?;
    value.validate()?;
    Ok(value)
}

pub fn structured_or_else<T, F>(text: &str, fallback: F) -> Structured<T>
where
    T: StructuredOutput,
    F: FnOnce() -> T,
{
    match parse_structured(text) {
        Ok(value) => Structured::generated(value),
        Err(reason) => {
            tracing::warn!("Serving fallback content: {}", reason);
            Structured::fallback(fallback())
        }
    }
}

pub async fn complete_structured<T, F>(
    llm: &dyn ChatCompletion,
    prompt: &Prompt,
    fallback: F,
) -> Result<Structured<T>, LlmError>
where
    T: StructuredOutput,
    F: FnOnce() -> T,
{
    let text = llm.complete(prompt).await?;
    Ok(structured_or_else(&text, fallback))
}

/// Splits a plain-line reply into cleaned, de-duplicated items.
pub fn parse_lines(text: &str, max: usize) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for line in text.lines() {
        let line = clean_line(line);
        if line.is_empty() || line.ends_with(':') {
            continue;
        }
        if items.iter().any(|existing| existing.eq_ignore_ascii_case(&line)) {
            continue;
        }
        items.push(line);
        if items.len() == max {
            break;
        }
    }
    items
}

fn clean_line(line: &str) -> String {
    let mut line = line.trim();

    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(stripped) = rest
            .strip_prefix('.')
            .or_else(|| rest.strip_prefix(')'))
            .or_else(|| rest.strip_prefix(" -"))
            // "2025: ..." is a title, "3: ..." is an index
            .or_else(|| rest.strip_prefix(':').filter(|_| digits <= 2))
        {
            line = stripped.trim_start();
        }
    }
    line = line
        .trim_start_matches(['-', '*', '•'])
        .trim()
        .trim_start_matches("**")
        .trim_end_matches("**")
        .trim();

    line.trim_matches(['"', '\'', '“', '”']).trim().to_string()
}

pub async fn complete_lines<F>(
    llm: &dyn ChatCompletion,
    prompt: &Prompt,
    max: usize,
    fallback: F,
) -> Result<Structured<Vec<String>>, LlmError>
where
    F: FnOnce() -> Vec<String>,
{
    let text = llm.complete(prompt).await?;
    let lines = parse_lines(&text, max);
    if lines.is_empty() {
        tracing::warn!("Serving fallback content: no usable lines in reply");
        return Ok(Structured::fallback(fallback()));
    }
    Ok(Structured::generated(lines))
}

pub async fn complete_text<F>(
    llm: &dyn ChatCompletion,
    prompt: &Prompt,
    fallback: F,
) -> Result<Structured<String>, LlmError>
where
    F: FnOnce() -> String,
{
    let text = llm.complete(prompt).await?;
    let text = text.trim();
    if text.is_empty() {
        tracing::warn!("Serving fallback content: empty reply");
        return Ok(Structured::fallback(fallback()));
    }
    Ok(Structured::generated(text.to_string()))
}
