mod data;
mod coerce;
mod collate;
mod compare;
mod column;
mod row;
mod identity;
mod indicator;
mod state;
mod view;
mod store;

pub use data::{ColumnType, Data, ParseColumnTypeError, Value};
pub use coerce::{coerce, parse_number, parse_timestamp, to_bool, to_number, to_timestamp, Comparable, TRUTHY_TOKENS};
pub use collate::compare_ru;
pub use compare::{compare, compare_values};
pub use column::{ColumnSpec, ValueGetter};
pub use row::{Cell, Row};
pub use identity::{column_id_extractor, RowIdExtractor, RowIdentity};
pub use indicator::{project, HeaderState, HeaderStates};
pub use state::{Direction, SortState};
pub use view::{SortOutcome, TableView};
pub use store::SortStateStore;
