//! Merging BIO-tagged sub-word tokens into entity spans.
//!
//! A `B-` token opens a span, following `I-` tokens extend it, and `O` (or
//! the next `B-`) closes it. Only the `B-` token's type is authoritative:
//! taggers sometimes mislabel the type of continuation tokens.

use citeparse_core::{AggregatedEntity, AggregationConfig, EntityType, Tag, Tagged};
use tracing::debug;

/// Aggregate a token stream into entity spans, in order.
///
/// Malformed labels are treated as `O`. Empty tokens are skipped. An `I-`
/// token with no open span starts a new span of its own type.
pub fn aggregate_entities<T: Tagged>(
    tokens: impl IntoIterator<Item = T>,
    config: &AggregationConfig,
) -> Vec<AggregatedEntity> {
    tokens
        .into_iter()
        .fold(Aggregation::default(), |acc, token| acc.step(&token, config))
        .finish()
}

/// Fold state: completed spans plus the span being built.
#[derive(Default)]
struct Aggregation {
    done: Vec<AggregatedEntity>,
    current: Option<AggregatedEntity>,
}

impl Aggregation {
    fn step(self, token: &impl Tagged, config: &AggregationConfig) -> Self {
        let text = token.text();
        if text.is_empty() {
            return self;
        }

        let tag = token.tag().unwrap_or_else(|err| {
            debug!(token = %text, %err, "malformed label, treating as O");
            Tag::Outside
        });

        match tag {
            Tag::Outside => self.flush(),
            Tag::Begin(ty) => self.flush().open(text, ty),
            Tag::Inside(ty) => self.extend(text, ty, config),
        }
    }

    /// Close the open span. A span left empty (a bare continuation marker)
    /// is dropped.
    fn flush(mut self) -> Self {
        if let Some(entity) = self.current.take()
            && !entity.text.is_empty()
        {
            self.done.push(entity);
        }
        self
    }

    fn open(mut self, text: &str, ty: EntityType) -> Self {
        self.current = Some(AggregatedEntity::new(text, ty));
        self
    }

    fn extend(mut self, text: &str, ty: EntityType, config: &AggregationConfig) -> Self {
        let mut entity = self
            .current
            .take()
            .unwrap_or_else(|| AggregatedEntity::new(String::new(), ty));
        join_token(&mut entity, text, config);
        self.current = Some(entity);
        self
    }

    fn finish(self) -> Vec<AggregatedEntity> {
        self.flush().done
    }
}

/// Append a continuation token to an open span.
///
/// Marked sub-words are glued on without the marker; an empty marker marks
/// nothing. Capitalised tokens in a non-empty case name get a leading space.
/// Everything else is glued on as-is.
fn join_token(entity: &mut AggregatedEntity, token: &str, config: &AggregationConfig) {
    let marker = config.continuation_marker.as_str();
    if !marker.is_empty()
        && let Some(rest) = token.strip_prefix(marker)
    {
        entity.text.push_str(rest);
        return;
    }

    let capitalised = token.chars().next().is_some_and(char::is_uppercase);
    if config.space_capitalized_case_name_tokens
        && capitalised
        && entity.entity_type == EntityType::CaseName
        && !entity.text.is_empty()
    {
        entity.text.push(' ');
    }
    entity.text.push_str(token);
}
