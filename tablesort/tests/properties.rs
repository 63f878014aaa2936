use proptest::prelude::*;

use tablesort::{compare_values, ColumnSpec, ColumnType, Data, Direction, Row, SortStateStore};

const TABLE: &str = "reportsTable";

/// A row either has both a name and an amount, or only a name (a
/// placeholder that cannot be sorted by amount).
fn row_strategy() -> impl Strategy<Value = Row> {
    (
        "[абвеёжАБEa ]{0,4}",
        prop::option::weighted(0.8, "-?[0-9]{1,4}(,[0-9]{1,2})?")
    ).prop_map(|(name, amount)| {
        let row = Row::new().with(name);
        match amount {
            Some(amount) => row.with(amount),
            None => row
        }
    })
}

fn register(rows: Vec<Row>) -> SortStateStore {
    let mut store = SortStateStore::new();
    store.register(
        TABLE,
        rows,
        [ColumnSpec::new(0, ColumnType::Text), ColumnSpec::new(1, ColumnType::Number)],
        None,
    );
    store
}

fn order(store: &SortStateStore) -> Vec<usize> {
    store.table(TABLE).unwrap().order().to_vec()
}

fn sortable_count(rows: &[Row], column: usize) -> usize {
    rows.iter().filter(|row| row.get_col(column).is_some()).count()
}

proptest! {
    #[test]
    fn three_requests_restore_registration_order(rows in prop::collection::vec(row_strategy(), 0..24), column in 0usize..2) {
        let n = rows.len();
        let enough = sortable_count(&rows, column) >= 2;
        let mut store = register(rows);

        for _ in 0..3 {
            prop_assert_eq!(store.request_sort(TABLE, column).is_some(), enough);
        }
        prop_assert_eq!(order(&store), (0..n).collect::<Vec<_>>());
        prop_assert_eq!(store.state(TABLE).unwrap().direction(), Direction::Unsorted);
    }

    #[test]
    fn sorting_is_deterministic(rows in prop::collection::vec(row_strategy(), 2..24), column in 0usize..2) {
        let mut first = register(rows.clone());
        let mut second = register(rows);

        first.request_sort(TABLE, column);
        second.request_sort(TABLE, column);
        prop_assert_eq!(order(&first), order(&second));

        // a full cycle lands on the same ascending order
        let ascending = order(&first);
        for _ in 0..3 {
            first.request_sort(TABLE, column);
        }
        prop_assert_eq!(order(&first), ascending);
    }

    #[test]
    fn unsortable_rows_trail_in_original_order(rows in prop::collection::vec(row_strategy(), 0..24), descending in any::<bool>()) {
        let missing: Vec<usize> = rows.iter()
            .enumerate()
            .filter(|(_, row)| row.get_col(1).is_none())
            .map(|(idx, _)| idx)
            .collect();
        let sortable = rows.len() - missing.len();
        let mut store = register(rows);

        if store.request_sort(TABLE, 1).is_none() {
            return Ok(());
        }
        if descending {
            store.request_sort(TABLE, 1).unwrap();
        }

        let order = order(&store);
        prop_assert_eq!(&order[sortable..], missing.as_slice());
    }

    #[test]
    fn sorted_rows_are_ordered(rows in prop::collection::vec(row_strategy(), 2..24), descending in any::<bool>()) {
        let mut store = register(rows);
        if store.request_sort(TABLE, 1).is_none() {
            return Ok(());
        }
        if descending {
            store.request_sort(TABLE, 1).unwrap();
        }

        let amounts: Vec<&str> = store.rows(TABLE)
            .unwrap()
            .filter_map(|row| row.get_col(1))
            .map(|cell| cell.text())
            .collect();
        for pair in amounts.windows(2) {
            let ordering = compare_values(Data::Str(pair[0]), Data::Str(pair[1]), ColumnType::Number);
            if descending {
                prop_assert!(ordering.is_ge(), "{:?} before {:?}", pair[0], pair[1]);
            } else {
                prop_assert!(ordering.is_le(), "{:?} before {:?}", pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn cycling_to_unsorted_restores_registration_order(
        rows in prop::collection::vec(row_strategy(), 2..24),
        clicks in prop::collection::vec(0usize..3, 0..8),
        column in 0usize..2
    ) {
        prop_assume!(sortable_count(&rows, column) >= 2);
        let n = rows.len();
        let mut store = register(rows);
        for clicked in clicks {
            store.request_sort(TABLE, clicked);
        }

        for _ in 0..3 {
            prop_assert!(store.request_sort(TABLE, column).is_some());
            if store.state(TABLE).unwrap().direction() == Direction::Unsorted {
                break;
            }
        }
        prop_assert_eq!(store.state(TABLE).unwrap().direction(), Direction::Unsorted);
        prop_assert_eq!(order(&store), (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn reset_is_idempotent(rows in prop::collection::vec(row_strategy(), 0..24), clicks in prop::collection::vec(0usize..3, 0..8)) {
        let n = rows.len();
        let mut store = register(rows);
        for column in clicks {
            store.request_sort(TABLE, column);
        }

        prop_assert!(store.reset(TABLE));
        let once = order(&store);
        prop_assert!(store.reset(TABLE));
        prop_assert_eq!(order(&store), once.clone());
        prop_assert_eq!(once, (0..n).collect::<Vec<_>>());
        prop_assert_eq!(store.state(TABLE).unwrap().active_column(), None);
    }
}
