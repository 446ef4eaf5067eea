//! # Schema Definition
//!
//! The immutable descriptors table definitions are made of and the change
//! DSL that turns them into DDL.

mod change;
mod field_spec;

pub use change::{
    AddColumn, AddIndex, CreateSequence, CreateTable, CustomChange, DatabaseChange, RemoveColumn,
};
pub use field_spec::{Constraint, ConstraintKind, FieldReference, FieldSpec, ReferenceAction};
