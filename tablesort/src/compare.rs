use std::cmp::Ordering;

use crate::coerce::{coerce, Comparable};
use crate::collate::compare_ru;
use crate::data::{ColumnType, Data};

/// Orders two coerced values; `Less` means `a` precedes `b` ascending.
pub fn compare(a: &Comparable, b: &Comparable) -> Ordering {
    match (a, b) {
        (Comparable::Numeric(a), Comparable::Numeric(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        (Comparable::Text(a), Comparable::Text(b)) => compare_ru(a, b),
        (Comparable::Numeric(_), Comparable::Text(_)) => Ordering::Less,
        (Comparable::Text(_), Comparable::Numeric(_)) => Ordering::Greater
    }
}

pub fn compare_values(a: Data, b: Data, ty: ColumnType) -> Ordering {
    compare(&coerce(a, ty), &coerce(b, ty))
}
