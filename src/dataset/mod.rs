//! Flow datasets: the record type and the tabular source it is read from

mod record;
mod table;

pub use record::{FieldKind, FlowField, FlowRecord};
pub use table::FlowTable;
