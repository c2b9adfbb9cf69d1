//! [`Database`] implementations.

#![allow(
    clippy::items_after_statements,
    reason = "`const SQL` after statements"
)]
#![allow(clippy::too_many_lines, reason = "SQL-related code a bit verbose")]

mod development;
mod lead;
mod property;

use async_trait::async_trait;
use refinery_core::{
    traits::r#async::{AsyncQuery, AsyncTransaction},
    AsyncMigrate, Migration,
};
use tracerr::Traced;
use tracing as log;

use crate::infra::{database, postgres};
#[cfg(doc)]
use crate::infra::Database;

use super::Postgres;

#[async_trait]
impl AsyncTransaction for Postgres {
    type Error = Traced<database::Error>;

    async fn execute(
        &mut self,
        queries: &[&str],
    ) -> Result<usize, Self::Error> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)?;
        AsyncTransaction::execute(&mut **conn, queries)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

#[async_trait]
impl AsyncQuery<Vec<Migration>> for Postgres {
    async fn query(
        &mut self,
        query: &str,
    ) -> Result<Vec<Migration>, <Self as AsyncTransaction>::Error> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)?;
        AsyncQuery::query(&mut **conn, query)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

impl AsyncMigrate for Postgres {}

/// Reads the provided optional `INT4` column as a [`u16`].
fn opt_u16(row: &tokio_postgres::Row, column: &str) -> Option<u16> {
    int4_to_u16(column, row.get(column))
}

/// Converts the provided optional `INT4` value of the `column` into a
/// [`u16`].
///
/// A value out of the [`u16`] range is treated as an unknown one.
fn int4_to_u16(column: &str, value: Option<i32>) -> Option<u16> {
    value.and_then(|n| {
        u16::try_from(n)
            .inspect_err(|_| {
                log::warn!("`{column}` value `{n}` is out of range, ignored");
            })
            .ok()
    })
}

#[cfg(test)]
mod spec {
    use super::int4_to_u16;

    #[test]
    fn out_of_range_int4_is_unknown() {
        assert_eq!(int4_to_u16("parking", Some(2)), Some(2));
        assert_eq!(int4_to_u16("parking", Some(65_535)), Some(65_535));
        assert_eq!(int4_to_u16("parking", Some(70_000)), None);
        assert_eq!(int4_to_u16("bedrooms", Some(-1)), None);
        assert_eq!(int4_to_u16("bedrooms", None), None);
    }
}
