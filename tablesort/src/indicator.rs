use std::collections::BTreeMap;

use crate::state::Direction;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum HeaderState {
    Ascending,
    Descending,
    #[default]
    Neutral
}

impl HeaderState {
    pub fn from_direction(direction: Direction) -> HeaderState {
        match direction {
            Direction::Ascending => HeaderState::Ascending,
            Direction::Descending => HeaderState::Descending,
            Direction::Unsorted => HeaderState::Neutral
        }
    }
}

pub type HeaderStates = BTreeMap<usize, HeaderState>;

/// Indicator for every column in `columns`; only the active column can be
/// anything other than neutral.
pub fn project(active_column: Option<usize>, direction: Direction, columns: impl IntoIterator<Item = usize>) -> HeaderStates {
    let mut states: HeaderStates = columns
        .into_iter()
        .map(|idx| (idx, HeaderState::Neutral))
        .collect();
    if let Some(active) = active_column {
        states.insert(active, HeaderState::from_direction(direction));
    }
    states
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_active_column_is_marked() {
        let states = project(Some(2), Direction::Descending, 0..4);
        assert_eq!(states.len(), 4);
        assert_eq!(states[&2], HeaderState::Descending);
        assert!(states.iter().filter(|(idx, _)| **idx != 2).all(|(_, s)| *s == HeaderState::Neutral));
    }

    #[test]
    fn unsorted_active_column_is_neutral() {
        let states = project(Some(1), Direction::Unsorted, 0..3);
        assert!(states.values().all(|s| *s == HeaderState::Neutral));
    }

    #[test]
    fn no_active_column() {
        let states = project(None, Direction::Unsorted, [1, 5]);
        assert_eq!(states.keys().copied().collect::<Vec<_>>(), [1, 5]);
    }
}
