//! Locally held, not-yet-submitted ratings

use std::collections::BTreeMap;

use exo_common::RatingSubmission;

use crate::error::Result;

/// Rating shown for a planet the user has not touched yet
pub const DEFAULT_DISPLAYED_RATING: u8 = 5;

/// Planet name → pending rating in `[0, 10]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingDraft {
    entries: BTreeMap<String, u8>,
}

impl RatingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or replace the pending rating for `planet_name`
    pub fn set(&mut self, planet_name: impl Into<String>, rating: i64) -> Result<()> {
        let submission = RatingSubmission::new(planet_name, rating);
        submission.validate()?;
        // validate() bounds the rating to 0..=10
        self.entries.insert(submission.planet_name, rating as u8);
        Ok(())
    }

    pub fn get(&self, planet_name: &str) -> Option<u8> {
        self.entries.get(planet_name).copied()
    }

    /// Pending rating, or the default shown for untouched planets
    pub fn displayed(&self, planet_name: &str) -> u8 {
        self.get(planet_name).unwrap_or(DEFAULT_DISPLAYED_RATING)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// One submission per entry, in name order
    pub fn submissions(&self) -> Vec<RatingSubmission> {
        self.entries
            .iter()
            .map(|(name, &rating)| RatingSubmission::new(name.clone(), i64::from(rating)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    #[test]
    fn test_set_replaces_previous_value() {
        let mut draft = RatingDraft::new();
        draft.set("Kepler-442 b", 3).unwrap();
        draft.set("Kepler-442 b", 8).unwrap();

        assert_eq!(draft.len(), 1);
        assert_eq!(draft.get("Kepler-442 b"), Some(8));
    }

    #[test]
    fn test_out_of_range_rejected_and_draft_unchanged() {
        let mut draft = RatingDraft::new();
        draft.set("Earth", 10).unwrap();

        assert!(matches!(draft.set("Earth", 11), Err(ClientError::Common(_))));
        assert!(matches!(draft.set("Mars", -1), Err(ClientError::Common(_))));
        assert_eq!(draft.get("Earth"), Some(10));
        assert_eq!(draft.len(), 1);
    }

    #[test]
    fn test_displayed_defaults_to_five() {
        let mut draft = RatingDraft::new();
        assert_eq!(draft.displayed("Earth"), 5);
        draft.set("Earth", 0).unwrap();
        assert_eq!(draft.displayed("Earth"), 0);
    }

    #[test]
    fn test_submissions_cover_every_entry() {
        let mut draft = RatingDraft::new();
        draft.set("b", 2).unwrap();
        draft.set("a", 7).unwrap();

        let submissions = draft.submissions();
        assert_eq!(
            submissions,
            vec![RatingSubmission::new("a", 7), RatingSubmission::new("b", 2)]
        );
    }
}
