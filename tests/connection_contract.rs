//! # Connection Contract Tests
//!
//! Exercises the driver-facing layer against an in-memory connection that
//! records every statement it is asked to run: typed fetching, scalar
//! reads, schema-change application, and the transaction wrapper's
//! rollback behavior.

use eyre::{bail, Result};
use tabula::schema::{CreateTable, FieldSpec};
use tabula::sql::{RawQuery, Table};
use tabula::types::DataType;
use tabula::{
    Connection, ConnectionExt, Decodable, Decoder, RawRow, ResultProvider, Row, Value,
};

struct VecProvider {
    rows: std::vec::IntoIter<RawRow>,
    affected: u64,
}

impl ResultProvider for VecProvider {
    fn count_affected(&self) -> u64 {
        self.affected
    }

    fn next_row(&mut self) -> Option<Box<dyn Row>> {
        self.rows.next().map(|row| Box::new(row) as Box<dyn Row>)
    }
}

/// Records statements and replays canned rows; fails any statement whose
/// text matches `fail_on`.
#[derive(Default)]
struct RecordingConnection {
    statements: Vec<String>,
    rows: Vec<RawRow>,
    fail_on: Option<String>,
}

impl Connection for RecordingConnection {
    fn run(&mut self, statement: &str, _arguments: Vec<Value>) -> Result<Box<dyn ResultProvider>> {
        self.statements.push(statement.to_string());
        if self.fail_on.as_deref() == Some(statement) {
            bail!("simulated failure running '{}'", statement);
        }
        Ok(Box::new(VecProvider {
            rows: std::mem::take(&mut self.rows).into_iter(),
            affected: 1,
        }))
    }
}

struct Account {
    id: i64,
    name: String,
}

impl Table for Account {
    const NAME: &'static str = "accounts";
}

impl Decodable for Account {
    fn decode(d: &mut Decoder<'_>) -> Result<Self> {
        Ok(Account {
            id: d.field("id")?,
            name: d.field("name")?,
        })
    }

    fn table() -> Option<&'static str> {
        Some("accounts")
    }
}

mod fetching {
    use super::*;

    #[test]
    fn fetch_all_decodes_every_row() {
        let mut connection = RecordingConnection {
            rows: vec![
                RawRow::new().with_column("id", "1").with_column("name", "checking"),
                RawRow::new().with_column("id", "2").with_column("name", "savings"),
            ],
            ..Default::default()
        };
        let accounts: Vec<Account> = connection.fetch_all(&Account::select()).unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].id, 1);
        assert_eq!(accounts[1].name, "savings");
        assert_eq!(connection.statements, vec!["SELECT * FROM accounts"]);
    }

    #[test]
    fn fetch_one_fails_on_empty_results() {
        let mut connection = RecordingConnection::default();
        let result: Result<Account> = connection.fetch_one(&Account::select());
        assert!(result.is_err());
    }

    #[test]
    fn scalar_reads_the_scalar_column() {
        let mut connection = RecordingConnection {
            rows: vec![RawRow::new().with_column("scalar", "42")],
            ..Default::default()
        };
        let count = connection.scalar(&Account::select_count()).unwrap();
        assert_eq!(count, 42);
        assert_eq!(
            connection.statements,
            vec!["SELECT count(*) AS scalar FROM accounts"]
        );
    }

    #[test]
    fn scalar_if_exists_is_none_on_empty_results() {
        let mut connection = RecordingConnection::default();
        let count = connection
            .scalar_if_exists(&Account::select_count())
            .unwrap();
        assert_eq!(count, None);
    }

    #[test]
    fn run_query_renumbers_parameter_slots() {
        let mut connection = RecordingConnection::default();
        let query = RawQuery::with_arguments(
            "INSERT INTO accounts (\"name\") VALUES (%@)",
            vec![Value::from("checking")],
        );
        connection.execute(&query).unwrap();
        assert_eq!(
            connection.statements,
            vec!["INSERT INTO accounts (\"name\") VALUES ($1)"]
        );
    }
}

mod transactions {
    use super::*;

    #[test]
    fn successful_handler_commits() {
        let mut connection = RecordingConnection::default();
        let output = connection
            .transaction(|c| {
                c.execute(&RawQuery::new("DELETE FROM accounts"))?;
                Ok(7)
            })
            .unwrap();
        assert_eq!(output, 7);
        assert_eq!(
            connection.statements,
            vec!["BEGIN", "DELETE FROM accounts", "COMMIT"]
        );
    }

    #[test]
    fn failed_handler_rolls_back_and_reraises_the_original_error() {
        let mut connection = RecordingConnection::default();
        let result: Result<()> = connection.transaction(|_| bail!("handler exploded"));
        assert_eq!(result.unwrap_err().to_string(), "handler exploded");
        assert_eq!(connection.statements, vec!["BEGIN", "ROLLBACK"]);
    }

    #[test]
    fn rollback_failure_does_not_mask_the_handler_error() {
        let mut connection = RecordingConnection {
            fail_on: Some("ROLLBACK".to_string()),
            ..Default::default()
        };
        let result: Result<()> = connection.transaction(|_| bail!("handler exploded"));
        assert_eq!(result.unwrap_err().to_string(), "handler exploded");
        assert_eq!(connection.statements, vec!["BEGIN", "ROLLBACK"]);
    }

    #[test]
    fn commit_failure_rolls_back() {
        let mut connection = RecordingConnection {
            fail_on: Some("COMMIT".to_string()),
            ..Default::default()
        };
        let result: Result<()> = connection.transaction(|_| Ok(()));
        assert!(result.is_err());
        assert_eq!(connection.statements, vec!["BEGIN", "COMMIT", "ROLLBACK"]);
    }
}

mod schema_changes {
    use super::*;

    #[test]
    fn apply_runs_forward_queries_in_order() {
        let mut connection = RecordingConnection::default();
        let change = CreateTable::new(
            "accounts",
            vec![
                FieldSpec::new("id", DataType::Serial).primary_key(),
                FieldSpec::new("name", DataType::String(Some(100))).not_null(),
            ],
        );
        connection.apply(&change).unwrap();
        assert_eq!(
            connection.statements,
            vec![
                "CREATE TABLE accounts (\
                 \"id\" SERIAL PRIMARY KEY,\
                 \"name\" varchar(100) NOT NULL)"
            ]
        );
    }
}
