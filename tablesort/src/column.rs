use std::fmt;
use std::sync::Arc;

use crate::data::{ColumnType, Data};
use crate::row::Cell;

pub type ValueGetter = Arc<dyn Fn(&Cell) -> Data<'_> + Send + Sync>;

/// Sorting configuration for one column, fixed for a registration.
#[derive(Clone, Default)]
pub struct ColumnSpec {
    pub index: usize,
    pub ty: ColumnType,
    value_getter: Option<ValueGetter>
}

impl ColumnSpec {
    pub fn new(index: usize, ty: ColumnType) -> Self {
        ColumnSpec {
            index,
            ty,
            value_getter: None
        }
    }

    pub fn with_value_getter(mut self, getter: impl Fn(&Cell) -> Data<'_> + Send + Sync + 'static) -> Self {
        self.value_getter = Some(Arc::new(getter));
        self
    }

    /// The value a cell is sorted by: the getter if one is declared, then
    /// the cell's explicit sort value, then its trimmed text.
    pub fn raw_value<'c>(&self, cell: &'c Cell) -> Data<'c> {
        if let Some(getter) = &self.value_getter {
            getter(cell)
        } else if let Some(value) = cell.sort_value() {
            value
        } else {
            Data::Str(cell.text().trim())
        }
    }
}

impl fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("index", &self.index)
            .field("ty", &self.ty)
            .field("value_getter", &self.value_getter.is_some())
            .finish()
    }
}
