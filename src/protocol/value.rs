//! Decoded values
//!
//! Typed payloads of DATA responses. The shape is chosen by the response
//! code, never by looking at the payload.

use super::codes::DataType;

/// A row-major table of INTs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntTable {
    rows: usize,
    columns: usize,
    cells: Vec<i32>,
}

impl IntTable {
    /// Build a table from row-major cells.
    ///
    /// Returns `None` if `cells.len() != rows * columns`.
    pub fn new(rows: usize, columns: usize, cells: Vec<i32>) -> Option<Self> {
        (rows.checked_mul(columns)? == cells.len()).then_some(Self {
            rows,
            columns,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    pub fn row(&self, index: usize) -> Option<&[i32]> {
        if index >= self.rows {
            return None;
        }
        let start = index * self.columns;
        Some(&self.cells[start..start + self.columns])
    }

    pub fn get(&self, row: usize, column: usize) -> Option<i32> {
        if column >= self.columns {
            return None;
        }
        self.row(row).map(|r| r[column])
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[i32]> {
        (0..self.rows).filter_map(move |i| self.row(i))
    }
}

/// Payload of a DATA response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Byte(u8),
    Bool(bool),
    Int(i32),
    String(String),
    ByteList(Vec<u8>),
    BoolList(Vec<bool>),
    IntList(Vec<i32>),
    StringList(Vec<String>),
    IntInt(i32, i32),
    IntIntIntInt(i32, i32, i32, i32),
    IntTable(IntTable),
}

impl Value {
    /// Data type the value was announced as
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Byte(_) => DataType::Byte,
            Value::Bool(_) => DataType::Bool,
            Value::Int(_) => DataType::Int,
            Value::String(_) => DataType::String,
            Value::ByteList(_) => DataType::ByteList,
            Value::BoolList(_) => DataType::BoolList,
            Value::IntList(_) => DataType::IntList,
            Value::StringList(_) => DataType::StringList,
            Value::IntInt(..) => DataType::IntInt,
            Value::IntIntIntInt(..) => DataType::IntIntIntInt,
            Value::IntTable(_) => DataType::IntTable,
        }
    }
}

/// Conversion from a decoded value into the Rust type an operation returns.
///
/// Hands the value back unchanged when the shape does not match.
pub trait FromValue: Sized {
    const DATA_TYPE: DataType;

    fn from_value(value: Value) -> Result<Self, Value>;
}

macro_rules! impl_from_value {
    ($ty:ty, $data_type:ident, $pattern:pat => $out:expr) => {
        impl FromValue for $ty {
            const DATA_TYPE: DataType = DataType::$data_type;

            fn from_value(value: Value) -> Result<Self, Value> {
                match value {
                    $pattern => Ok($out),
                    other => Err(other),
                }
            }
        }
    };
}

impl_from_value!(u8, Byte, Value::Byte(v) => v);
impl_from_value!(bool, Bool, Value::Bool(v) => v);
impl_from_value!(i32, Int, Value::Int(v) => v);
impl_from_value!(String, String, Value::String(v) => v);
impl_from_value!(Vec<u8>, ByteList, Value::ByteList(v) => v);
impl_from_value!(Vec<bool>, BoolList, Value::BoolList(v) => v);
impl_from_value!(Vec<i32>, IntList, Value::IntList(v) => v);
impl_from_value!(Vec<String>, StringList, Value::StringList(v) => v);
impl_from_value!((i32, i32), IntInt, Value::IntInt(a, b) => (a, b));
impl_from_value!((i32, i32, i32, i32), IntIntIntInt, Value::IntIntIntInt(a, b, c, d) => (a, b, c, d));
impl_from_value!(IntTable, IntTable, Value::IntTable(v) => v);
