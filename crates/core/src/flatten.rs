//! Turns category groups into the single sequence a session walks through.

use std::collections::HashMap;

use crate::model::{CategoryGroup, CategoryId, Question, QuestionId};

/// Category identity retained for every flattened question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInfo {
    pub id: CategoryId,
    pub name: String,
}

/// Ordered questions of an assignment with a lookup back to their category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatQuestionSequence {
    questions: Vec<Question>,
    owners: Vec<usize>,
    categories: Vec<CategoryInfo>,
    positions: HashMap<QuestionId, usize>,
}

/// Concatenate the questions of every group, in group order.
///
/// Groups without questions are skipped. The result only depends on the
/// input, so review screens can rebuild the same ordering independently of a
/// live session.
#[must_use]
pub fn flatten(groups: &[CategoryGroup]) -> FlatQuestionSequence {
    let total = groups.iter().map(|g| g.questions().len()).sum();
    let mut sequence = FlatQuestionSequence {
        questions: Vec::with_capacity(total),
        owners: Vec::with_capacity(total),
        categories: Vec::new(),
        positions: HashMap::with_capacity(total),
    };

    for group in groups.iter().filter(|g| !g.is_empty()) {
        let owner = sequence.categories.len();
        sequence.categories.push(CategoryInfo {
            id: group.id(),
            name: group.name().to_string(),
        });
        for question in group.questions() {
            // First occurrence wins if an id is repeated across groups.
            sequence
                .positions
                .entry(question.id())
                .or_insert(sequence.questions.len());
            sequence.questions.push(question.clone());
            sequence.owners.push(owner);
        }
    }

    sequence
}

impl FlatQuestionSequence {
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn position(&self, id: QuestionId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    #[must_use]
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.position(id).and_then(|index| self.get(index))
    }

    #[must_use]
    pub fn category_at(&self, index: usize) -> Option<&CategoryInfo> {
        self.owners
            .get(index)
            .and_then(|owner| self.categories.get(*owner))
    }

    #[must_use]
    pub fn category_of(&self, id: QuestionId) -> Option<&CategoryInfo> {
        self.position(id).and_then(|index| self.category_at(index))
    }

    /// Categories that contributed at least one question, in order.
    #[must_use]
    pub fn categories(&self) -> &[CategoryInfo] {
        &self.categories
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// `questionId -> categoryId` lookup.
    #[must_use]
    pub fn category_lookup(&self) -> HashMap<QuestionId, CategoryId> {
        self.questions
            .iter()
            .zip(&self.owners)
            .map(|(q, owner)| (q.id(), self.categories[*owner].id))
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn preserves_category_and_question_order() {
        let groups = two_categories();
        let seq = flatten(&groups);

        let ids: Vec<u64> = seq.iter().map(|q| q.id().value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(seq.category_at(0).unwrap().name, "A");
        assert_eq!(seq.category_at(2).unwrap().name, "B");
        assert_eq!(seq.category_of(QuestionId::new(2)).unwrap().id, CategoryId::new(10));
    }

    #[test]
    fn length_is_sum_of_group_lengths() {
        let mut groups = two_categories();
        groups.push(group(30, "Empty", Vec::new()));
        groups.push(group(40, "C", vec![question(4, &["x", "y"]), question(5, &["x", "y"])]));

        let expected: usize = groups.iter().map(|g| g.questions().len()).sum();
        let seq = flatten(&groups);
        assert_eq!(seq.len(), expected);
        assert_eq!(seq.categories().len(), 3);
    }

    #[test]
    fn flatten_is_idempotent() {
        let groups = two_categories();
        assert_eq!(flatten(&groups), flatten(&groups));
    }

    #[test]
    fn empty_groups_are_skipped() {
        let groups = vec![group(1, "Empty", Vec::new())];
        let seq = flatten(&groups);
        assert!(seq.is_empty());
        assert!(seq.categories().is_empty());
    }

    #[test]
    fn category_lookup_covers_every_question() {
        let seq = flatten(&two_categories());
        let lookup = seq.category_lookup();
        assert_eq!(lookup.len(), 3);
        assert_eq!(lookup[&QuestionId::new(3)], CategoryId::new(20));
    }
}
