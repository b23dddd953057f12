//! # Slotted Templates
//!
//! A block renders to markup interleaved with named slots. The render pipeline
//! fills slots by lookup, so user text that happens to look like a placeholder
//! token is never substituted.
//!
//! The textual form of an unfilled template uses the placeholder tokens
//! `{{children}}` and `{{column-<i>-children}}`.

use std::fmt;

/// Named insertion point for child markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Linear children of a container
    Children,

    /// Children of the column at this index
    Column(usize),
}

impl Slot {
    pub fn token(&self) -> String {
        match self {
            Slot::Children => "{{children}}".to_string(),
            Slot::Column(index) => format!("{{{{column-{}-children}}}}", index),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Markup(String),
    Slot(Slot),
}

/// Markup plus an explicit list of slots
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Template with no slots
    pub fn markup(text: impl Into<String>) -> Self {
        let mut template = Self::new();
        template.push_str(&text.into());
        template
    }

    pub fn push_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(Segment::Markup(last)) => last.push_str(text),
            _ => self.segments.push(Segment::Markup(text.to_string())),
        }
    }

    pub fn push_slot(&mut self, slot: Slot) {
        self.segments.push(Segment::Slot(slot));
    }

    pub fn append(&mut self, other: Template) {
        for segment in other.segments {
            match segment {
                Segment::Markup(text) => self.push_str(&text),
                Segment::Slot(slot) => self.push_slot(slot),
            }
        }
    }

    /// Slots in document order
    pub fn slots(&self) -> Vec<Slot> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Slot(slot) => Some(*slot),
                Segment::Markup(_) => None,
            })
            .collect()
    }

    pub fn has_slot(&self, slot: Slot) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::Slot(s) if *s == slot))
    }

    /// Surround the whole template with markup, keeping its slots.
    pub fn wrap(self, before: &str, after: &str) -> Template {
        let mut wrapped = Template::markup(before);
        wrapped.append(self);
        wrapped.push_str(after);
        wrapped
    }

    /// Produce final markup, asking `fill` for the content of every slot.
    pub fn fill<F>(self, mut fill: F) -> String
    where
        F: FnMut(Slot) -> String,
    {
        let mut out = String::new();
        for segment in self.segments {
            match segment {
                Segment::Markup(text) => out.push_str(&text),
                Segment::Slot(slot) => out.push_str(&fill(slot)),
            }
        }
        out
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Markup(text) => f.write_str(text)?,
                Segment::Slot(slot) => write!(f, "{}", slot)?,
            }
        }
        Ok(())
    }
}
