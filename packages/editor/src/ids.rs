//! Block id generation.
//!
//! Ids have the form `block-<n>`. The counter only moves forward, so an id is
//! never handed out twice in a document's lifetime, even after deletion.

const PREFIX: &str = "block-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    next: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next free id. Candidates for which `taken` returns true are skipped.
    pub fn next_id(&mut self, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let id = format!("{}{}", PREFIX, self.next);
            self.next += 1;
            if !taken(&id) {
                return id;
            }
        }
    }

    /// Move the counter past every `block-<n>` id in `ids`.
    pub fn advance_past<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        for n in ids.into_iter().filter_map(sequence_number) {
            if n >= self.next {
                self.next = n.saturating_add(1);
            }
        }
    }
}

fn sequence_number(id: &str) -> Option<u64> {
    id.strip_prefix(PREFIX)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_id(|_| false), "block-1");
        assert_eq!(ids.next_id(|_| false), "block-2");
    }

    #[test]
    fn test_advance_past_loaded_ids() {
        let mut ids = IdGenerator::new();
        ids.advance_past(["root", "block-7", "block-3", "block-1700000000000-abc"]);
        assert_eq!(ids.next_id(|_| false), "block-8");
    }

    #[test]
    fn test_skip_taken() {
        let mut ids = IdGenerator::new();
        let id = ids.next_id(|candidate| candidate == "block-1" || candidate == "block-2");
        assert_eq!(id, "block-3");
    }
}
