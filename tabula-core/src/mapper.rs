use crate::{
    Error, Result, RowLabeled, Slot, Table, Value, coerce, normalize,
    stream::{BoxStream, Stream, StreamExt, TryStreamExt},
};
use std::collections::HashMap;

/// Aggregate whose members line up, in order, with the fields of a table.
///
/// Usually implemented through [`crate::record!`].
pub trait Record {
    fn cells(&mut self) -> Vec<Slot<'_>>;
}

/// Implements [`Record`] for a struct by listing its members in field order.
///
/// ```rust
/// use tabula_core::record;
/// struct User {
///     id: i64,
///     name: String,
///     score: Option<f64>,
/// }
/// record!(User { id, name, score });
/// ```
#[macro_export]
macro_rules! record {
    ($type:ty { $($member:ident),+ $(,)? }) => {
        impl $crate::Record for $type {
            fn cells(&mut self) -> Vec<$crate::Slot<'_>> {
                vec![$($crate::Cell::slot(&mut self.$member)),+]
            }
        }
    };
}

/// Decoding shared by single row and multi row cursors.
///
/// The current row was already scanned into typed scratch cells, one per field,
/// every method here only redistributes those cells.
pub trait Mapper {
    fn table(&self) -> &Table;

    /// Scratch cells of the current row.
    fn current(&self) -> Result<&[Value]>;

    /// Coerces field `i` into `destinations[i]`, `None` destinations are skipped.
    fn scan<'d>(&self, destinations: impl IntoIterator<Item = Option<Slot<'d>>>) -> Result<()> {
        let current = self.current()?;
        let destinations = destinations.into_iter().collect::<Vec<_>>();
        if destinations.len() > current.len() {
            return Err(Error::ShapeMismatch {
                table: self.table().name().into(),
                what: "destinations",
                expected: current.len(),
                actual: destinations.len(),
            });
        }
        for (destination, cell) in destinations.into_iter().zip(current) {
            if destination.is_some() {
                coerce(destination, normalize(cell))?;
            }
        }
        Ok(())
    }

    /// Coerces every field into the matching member of `record`.
    fn record<R: Record + ?Sized>(&self, record: &mut R) -> Result<()> {
        let current = self.current()?;
        let cells = record.cells();
        if cells.len() != current.len() {
            return Err(Error::ShapeMismatch {
                table: self.table().name().into(),
                what: "record members",
                expected: current.len(),
                actual: cells.len(),
            });
        }
        for (slot, cell) in cells.into_iter().zip(current) {
            coerce(Some(slot), normalize(cell))?;
        }
        Ok(())
    }

    /// Normalized values in field order.
    fn slice(&self) -> Result<Vec<Value>> {
        Ok(self.current()?.iter().map(normalize).collect())
    }

    /// Normalized values keyed by field name.
    fn map(&self) -> Result<HashMap<String, Value>> {
        Ok(self
            .table()
            .fields()
            .iter()
            .zip(self.current()?)
            .map(|(field, cell)| (field.name.clone(), normalize(cell)))
            .collect())
    }
}

/// Typed empty scratch cells shaped after the fields of `table`.
pub fn scratch_row(table: &Table) -> Vec<Value> {
    table
        .fields()
        .iter()
        .map(|v| Value::empty_for(v.field_type.code))
        .collect()
}

fn fill_scratch(table: &Table, scratch: &mut [Value], row: RowLabeled) -> Result<()> {
    if row.values.len() != scratch.len() {
        let error = Error::ShapeMismatch {
            table: table.name().into(),
            what: "columns",
            expected: scratch.len(),
            actual: row.values.len(),
        };
        log::error!("{:#}", error);
        return Err(error);
    }
    for (cell, raw) in scratch.iter_mut().zip(row.values.into_vec()) {
        cell.fill(raw)?;
    }
    Ok(())
}

/// A single decoded row.
#[derive(Debug, Clone)]
pub struct Row<'t> {
    table: &'t Table,
    scratch: Vec<Value>,
}

impl<'t> Row<'t> {
    pub fn new(table: &'t Table, row: RowLabeled) -> Result<Self> {
        let mut scratch = scratch_row(table);
        fill_scratch(table, &mut scratch, row)?;
        Ok(Self { table, scratch })
    }
}

impl<'t> Mapper for Row<'t> {
    fn table(&self) -> &Table {
        self.table
    }

    fn current(&self) -> Result<&[Value]> {
        Ok(&self.scratch)
    }
}

/// Forward only cursor over many rows.
///
/// Call [`Rows::advance`] before decoding each row. The scratch cells are reused
/// from one row to the next.
pub struct Rows<'a> {
    table: &'a Table,
    stream: BoxStream<'a, Result<RowLabeled>>,
    scratch: Vec<Value>,
    positioned: bool,
}

impl<'a> Rows<'a> {
    pub fn new(table: &'a Table, stream: impl Stream<Item = Result<RowLabeled>> + Send + 'a) -> Self {
        Self {
            table,
            stream: stream.boxed(),
            scratch: scratch_row(table),
            positioned: false,
        }
    }

    /// Moves to the next row, `false` once the cursor is exhausted.
    pub async fn advance(&mut self) -> Result<bool> {
        self.positioned = false;
        let Some(row) = self.stream.try_next().await? else {
            return Ok(false);
        };
        fill_scratch(self.table, &mut self.scratch, row)?;
        self.positioned = true;
        Ok(true)
    }
}

impl<'a> Mapper for Rows<'a> {
    fn table(&self) -> &Table {
        self.table
    }

    fn current(&self) -> Result<&[Value]> {
        if self.positioned {
            Ok(&self.scratch)
        } else {
            Err(Error::NoRows)
        }
    }
}
