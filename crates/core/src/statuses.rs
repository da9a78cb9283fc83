//! Workflow status seeding.

/// Statuses every root project starts with, in rank order.
pub const INITIAL_STATUSES: &[&str] = &["To Do", "In Progress", "Waiting On", "Done"];

/// Rank assigned to each name, starting at zero.
///
/// The lowest rank is the project's default status.
pub fn ranked<I, S>(names: I) -> Vec<(String, i32)>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .zip(0..)
        .map(|(name, rank)| (name.into(), rank))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_statuses_are_ranked_in_order() {
        let ranked = ranked(INITIAL_STATUSES.iter().copied());
        assert_eq!(ranked[0], ("To Do".to_string(), 0));
        assert_eq!(ranked[3], ("Done".to_string(), 3));
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(ranked(Vec::<String>::new()).is_empty());
    }
}
