//! Billable documents: line items, invoices and the statements built from them

pub mod invoice;
pub mod line_item;
pub mod statement;

pub use invoice::*;
pub use line_item::*;
pub use statement::*;
