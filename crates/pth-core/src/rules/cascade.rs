use crate::category::Predicate;
use crate::error::DeriveError;
use crate::position::Position;

/// A compiled condition, kept together with the text it was written as so
/// that explain output can show which entries fired.
#[derive(Debug, Clone)]
pub struct Condition {
    source: String,
    predicate: Predicate,
}

impl Condition {
    pub(crate) fn new(source: String, predicate: Predicate) -> Self {
        Self { source, predicate }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }
}

#[derive(Debug, Clone)]
pub enum Rule {
    Literal(String),
    Cascade(Cascade),
}

/// An ordered list of `(condition, rule)` entries; the first matching
/// entry decides.
#[derive(Debug, Clone, Default)]
pub struct Cascade {
    entries: Vec<(Condition, Rule)>,
}

impl Cascade {
    pub(crate) fn new(entries: Vec<(Condition, Rule)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(Condition, Rule)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of literal results reachable from this cascade, nested
    /// cascades included.
    pub fn leaf_count(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, rule)| match rule {
                Rule::Literal(_) => 1,
                Rule::Cascade(inner) => inner.leaf_count(),
            })
            .sum()
    }

    pub fn evaluate(&self, pos: &Position, table: &'static str) -> Result<&str, DeriveError> {
        self.evaluate_with(pos, table, |_| {})
    }

    /// Like `evaluate`, also returning the source of the matched condition
    /// at every nesting level, outermost first.
    pub fn evaluate_traced(
        &self,
        pos: &Position,
        table: &'static str,
    ) -> Result<(&str, Vec<&str>), DeriveError> {
        let mut path = Vec::new();
        let value = self.evaluate_with(pos, table, |cond| path.push(cond.source()))?;
        Ok((value, path))
    }

    fn evaluate_with<'a>(
        &'a self,
        pos: &Position,
        table: &'static str,
        mut on_match: impl FnMut(&'a Condition),
    ) -> Result<&'a str, DeriveError> {
        let mut current = self;
        'level: loop {
            for (cond, rule) in &current.entries {
                if !cond.predicate.matches(pos) {
                    continue;
                }
                on_match(cond);
                match rule {
                    Rule::Literal(value) => return Ok(value),
                    Rule::Cascade(inner) => {
                        current = inner;
                        continue 'level;
                    }
                }
            }
            // A nested cascade that runs dry does not fall back to the
            // entries after its parent.
            return Err(DeriveError::NoMatchingRule {
                table,
                position: pos.to_string(),
            });
        }
    }
}
