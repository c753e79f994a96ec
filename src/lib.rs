//! Schema-driven data access for MySQL.
//!
//! A [`Table`] is loaded from the information catalog at runtime. Its fields then
//! drive positional CRUD statements and the decoding of their results, without
//! any per-table code.
//!
//! ```rust,no_run
//! use tabula::{Connection, Mapper, Value, args, load_table, record};
//!
//! struct User {
//!     id: i64,
//!     name: String,
//!     score: Option<f64>,
//! }
//! record!(User { id, name, score });
//!
//! async fn example<C: Connection>(connection: &mut C) -> tabula::Result<()> {
//!     let users = load_table(connection, "users").await?;
//!     users.add(connection, &args![Value::Null, "alice", 4.5]).await?;
//!     if let Some(row) = users.get(connection, &args![Value::Null, "alice"]).await? {
//!         let mut user = User { id: 0, name: String::new(), score: None };
//!         row.record(&mut user)?;
//!     }
//!     Ok(())
//! }
//! ```
pub use tabula_core::*;
