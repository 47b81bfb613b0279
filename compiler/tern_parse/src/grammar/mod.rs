//! Grammar productions, split by node family.
//!
//! - `stmt.rs`: statements, blocks, loops
//! - `expr.rs`: Pratt expression loop, prefix/postfix, primaries

mod expr;
mod stmt;
