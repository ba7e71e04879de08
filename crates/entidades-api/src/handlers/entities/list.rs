//! Row listing handler for `GET /api/{nombreProyecto}/{nombreTabla}`

use actix_web::{get, web, HttpResponse};
use entidades_configs::ServerConfig;
use entidades_store::{select_all_sql, ConnectionManager, Row, StoreError, TableIdentifier, TabularResult};
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Instant;

use super::models::{EntityPath, ListError};

/// GET /api/{nombreProyecto}/{nombreTabla} - List every row of a table
///
/// Returns a JSON array with one object per row, keyed by column name.
/// SQL NULL cells are returned as JSON `null`.
///
/// # Authentication
/// None. This endpoint is anonymous.
#[get("/{nombreProyecto}/{nombreTabla}")]
pub async fn list_rows(
    path: web::Path<EntityPath>,
    connections: web::Data<Arc<dyn ConnectionManager>>,
    config: web::Data<ServerConfig>,
) -> Result<HttpResponse, ListError> {
    let EntityPath {
        project_name,
        table_name,
    } = path.into_inner();

    let rows = list_table_rows(
        connections.get_ref().clone(),
        &config.security.allowed_tables,
        &project_name,
        &table_name,
    )
    .await?;

    Ok(HttpResponse::Ok().json(rows))
}

/// Validate the table name, read the whole table and map it to [`Row`]s.
///
/// The connection is opened and closed on a blocking thread; it is released
/// whether or not the query succeeds.
pub async fn list_table_rows(
    connections: Arc<dyn ConnectionManager>,
    allowed_tables: &[String],
    project_name: &str,
    table_name: &str,
) -> Result<Vec<Row>, ListError> {
    if table_name.trim().is_empty() {
        return Err(ListError::EmptyTableName);
    }

    let table = TableIdentifier::parse(table_name).map_err(|e| {
        warn!("Rejected table name for project '{}': {}", project_name, e);
        ListError::InvalidTableName(table_name.to_string())
    })?;

    if !table.is_allowed(allowed_tables) {
        warn!("Table '{}' is not in security.allowed_tables", table);
        return Err(ListError::TableNotAllowed(table.to_string()));
    }

    let sql = select_all_sql(&table);
    debug!("Listing rows: project='{}' table='{}'", project_name, table);

    let start = Instant::now();
    let outcome = web::block(move || fetch_all(connections.as_ref(), &sql))
        .await
        .map_err(ListError::from)
        .and_then(|result| result.map_err(ListError::from));
    let took = start.elapsed().as_secs_f64() * 1000.0;

    match outcome {
        Ok(result) => {
            info!(
                "Listed {} rows from '{}' in {:.2}ms",
                result.row_count(),
                table,
                took
            );
            Ok(result.into_rows())
        },
        Err(err @ ListError::Database { .. }) => {
            warn!("Listing '{}' failed after {:.2}ms: {}", table, took, err);
            Err(err)
        },
        Err(err) => {
            error!("Listing '{}' failed after {:.2}ms: {}", table, took, err);
            Err(err)
        },
    }
}

/// One connection, one query, then close. Close runs on every path; a query
/// failure takes precedence over a close failure.
fn fetch_all(connections: &dyn ConnectionManager, sql: &str) -> Result<TabularResult, StoreError> {
    let mut connection = connections.open()?;
    let result = connection.execute_query(sql, None);
    let closed = connection.close();

    match (result, closed) {
        (Ok(result), Ok(())) => Ok(result),
        (Ok(_), Err(close_err)) => Err(close_err),
        (Err(query_err), Err(close_err)) => {
            warn!("Failed to close connection after query error: {}", close_err);
            Err(query_err)
        },
        (Err(query_err), Ok(())) => Err(query_err),
    }
}
