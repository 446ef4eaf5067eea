//! # Connection Contract
//!
//! The minimal contract a database driver implements: run one statement
//! with bound arguments and hand back a result provider. Everything else
//! (typed fetch, scalar reads, transactions, schema changes) is layered on
//! through [`ConnectionExt`].
//!
//! Builders render parameter slots as `%@`; [`number_parameters`] rewrites
//! them to the dialect's `$1…$n` form just before the text reaches the
//! driver.

use eyre::Result;
use tracing::debug;

use super::row::{no_value_error, Row, RowExt};
use crate::error::SqlError;
use crate::records::{decode_row, Decodable};
use crate::schema::DatabaseChange;
use crate::sql::{AnyQuery, QualifiedField, RowReturningQuery, ScalarReturningQuery};
use crate::types::Value;

/// The result of one executed statement.
pub trait ResultProvider {
    /// Rows affected by a change statement.
    fn count_affected(&self) -> u64;

    /// The next result row, or `None` when the result is exhausted.
    fn next_row(&mut self) -> Option<Box<dyn Row>>;
}

/// A live database connection.
pub trait Connection {
    /// Runs one statement with its ordered arguments. The statement text
    /// uses the driver's native `$n` placeholders.
    fn run(&mut self, statement: &str, arguments: Vec<Value>) -> Result<Box<dyn ResultProvider>>;
}

/// Rewrites `%@` parameter slots as `$1…$n`.
pub fn number_parameters(statement: &str) -> String {
    let mut output = String::with_capacity(statement.len());
    let mut count = 0;
    for part in statement.split("%@") {
        if count > 0 {
            output.push('$');
            output.push_str(&count.to_string());
        }
        count += 1;
        output.push_str(part);
    }
    output
}

/// Query execution, typed fetching, and transactions over any
/// [`Connection`].
pub trait ConnectionExt: Connection {
    /// Runs any query, renumbering its parameter slots first.
    fn run_query(&mut self, query: &dyn AnyQuery) -> Result<Box<dyn ResultProvider>> {
        let statement = number_parameters(&query.statement());
        debug!(statement = %statement, "running statement");
        self.run(&statement, query.arguments())
    }

    /// Runs a query and reports how many rows it affected.
    fn execute(&mut self, query: &dyn AnyQuery) -> Result<u64> {
        Ok(self.run_query(query)?.count_affected())
    }

    /// Runs a row-returning query and decodes every row.
    fn fetch_all<T: Decodable>(&mut self, query: &dyn RowReturningQuery) -> Result<Vec<T>> {
        let mut provider = self.run_query(query)?;
        let mut records = Vec::new();
        while let Some(row) = provider.next_row() {
            records.push(decode_row(row.as_ref(), None)?);
        }
        Ok(records)
    }

    /// Runs a row-returning query and decodes the first row; fails when
    /// the result is empty.
    fn fetch_one<T: Decodable>(&mut self, query: &dyn RowReturningQuery) -> Result<T> {
        let mut provider = self.run_query(query)?;
        match provider.next_row() {
            Some(row) => decode_row(row.as_ref(), None),
            None => Err(SqlError::new("no rows were returned").into()),
        }
    }

    /// Reads the `scalar` column of the first result row.
    fn scalar(&mut self, query: &dyn ScalarReturningQuery) -> Result<i64> {
        match self.scalar_if_exists(query)? {
            Some(value) => Ok(value),
            None => Err(SqlError::new(
                "failed to calculate scalar because no rows were returned",
            )
            .into()),
        }
    }

    /// Reads the `scalar` column of the first result row, if any.
    fn scalar_if_exists(&mut self, query: &dyn ScalarReturningQuery) -> Result<Option<i64>> {
        let mut provider = self.run_query(query)?;
        match provider.next_row() {
            Some(row) => match row.get_if_exists(&QualifiedField::new("scalar"))? {
                Some(value) => Ok(Some(value)),
                None => Err(no_value_error("scalar", row.columns())),
            },
            None => Ok(None),
        }
    }

    fn begin(&mut self) -> Result<()> {
        debug!("begin transaction");
        self.run("BEGIN", Vec::new()).map(|_| ())
    }

    fn commit(&mut self) -> Result<()> {
        debug!("commit transaction");
        self.run("COMMIT", Vec::new()).map(|_| ())
    }

    fn rollback(&mut self) -> Result<()> {
        debug!("rollback transaction");
        self.run("ROLLBACK", Vec::new()).map(|_| ())
    }

    /// Runs `handler` inside a transaction.
    ///
    /// On handler (or commit) failure, rollback is attempted once and the
    /// original error is re-raised; a rollback failure itself is logged
    /// and swallowed.
    fn transaction<O>(&mut self, handler: impl FnOnce(&mut Self) -> Result<O>) -> Result<O>
    where
        Self: Sized,
    {
        self.begin()?;
        let result = handler(self).and_then(|output| {
            self.commit()?;
            Ok(output)
        });
        match result {
            Ok(output) => Ok(output),
            Err(error) => {
                if let Err(rollback_error) = self.rollback() {
                    debug!(error = %rollback_error, "rollback failed");
                }
                Err(error)
            }
        }
    }

    /// Applies a schema change by running its forward queries in order.
    fn apply(&mut self, change: &dyn DatabaseChange) -> Result<()> {
        for query in change.forward_queries()? {
            self.run_query(&query)?;
        }
        Ok(())
    }
}

impl<C: Connection + ?Sized> ConnectionExt for C {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_parameters() {
        assert_eq!(
            number_parameters("INSERT INTO t (a,b) VALUES (%@, %@)"),
            "INSERT INTO t (a,b) VALUES ($1, $2)"
        );
        assert_eq!(number_parameters("SELECT 1"), "SELECT 1");
        assert_eq!(number_parameters("%@"), "$1");
    }
}
