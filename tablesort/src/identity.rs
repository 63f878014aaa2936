use std::sync::Arc;

use crate::row::Row;

/// Caller supplied row id lookup, given the row and its registration index.
pub type RowIdExtractor = Arc<dyn Fn(&Row, usize) -> Option<i64> + Send + Sync>;

/// Tie-break key for a row. Never displayed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RowIdentity(pub i64);

impl RowIdentity {
    pub fn resolve(row: &Row, original_index: usize, extractor: Option<&RowIdExtractor>) -> RowIdentity {
        extractor
            .and_then(|extract| extract(row, original_index))
            .map_or(RowIdentity(original_index as i64), RowIdentity)
    }
}

/// Reads the row id from the leading integer of the text in `column`.
pub fn column_id_extractor(column: usize) -> RowIdExtractor {
    Arc::new(move |row: &Row, _: usize| row.get_col(column).and_then(|cell| parse_leading_int(cell.text())))
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extractor_result_wins() {
        let row = Row::new().with("x").with("17");
        let extractor = column_id_extractor(1);
        assert_eq!(RowIdentity::resolve(&row, 4, Some(&extractor)), RowIdentity(17));
    }

    #[test]
    fn falls_back_to_original_index() {
        let row = Row::new().with("x").with("нет");
        let extractor = column_id_extractor(1);
        assert_eq!(RowIdentity::resolve(&row, 4, Some(&extractor)), RowIdentity(4));
        assert_eq!(RowIdentity::resolve(&row, 4, None), RowIdentity(4));

        let short = Row::new().with("Нет данных");
        assert_eq!(RowIdentity::resolve(&short, 2, Some(&extractor)), RowIdentity(2));
    }

    #[test]
    fn leading_integer_like_parse_int() {
        assert_eq!(parse_leading_int(" 42 "), Some(42));
        assert_eq!(parse_leading_int("-7abc"), Some(-7));
        assert_eq!(parse_leading_int("+"), None);
        assert_eq!(parse_leading_int("abc"), None);
    }
}
