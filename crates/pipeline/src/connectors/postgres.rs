//! PostgreSQL connectors: the `users` and `projects` tables.
//!
//! Both connectors hold a lazy pool, so nothing touches the network until the
//! first fetch. A connection is acquired per call and
//! released on every exit path when the guard drops.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use tributary_core::{AppError, AppResult};

use crate::connectors::query_terms;
use crate::sources::{RetrievedRecord, SourceKind};
use crate::Connector;

/// Create a lazy pool for `database_url`.
fn lazy_pool(database_url: &str) -> AppResult<PgPool> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect_lazy(database_url)
        .map_err(|e| AppError::Connector(format!("Invalid PostgreSQL URL: {}", e)))
}

/// Row shape of the `users` table, as far as retrieval cares.
#[derive(Debug, FromRow)]
struct UserRow {
    username: String,
    role: String,
    department: String,
}

impl UserRow {
    fn render(&self) -> String {
        format!(
            "Username: {}, Role: {}, Department: {}",
            self.username, self.role, self.department
        )
    }
}

/// Connector for the `users` table.
pub struct PgUsersConnector {
    pool: PgPool,
}

impl PgUsersConnector {
    /// Create a connector for the database at `database_url`.
    pub fn new(database_url: &str) -> AppResult<Self> {
        Ok(Self {
            pool: lazy_pool(database_url)?,
        })
    }
}

#[async_trait]
impl Connector for PgUsersConnector {
    fn kind(&self) -> SourceKind {
        SourceKind::RelationalUsers
    }

    async fn fetch(&self, query: &str, limit: usize) -> AppResult<Vec<RetrievedRecord>> {
        let terms = query_terms(query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::Connector(format!("PostgreSQL connection failed: {}", e)))?;

        let rows: Vec<UserRow> = sqlx::query_as(
            "SELECT username, role, department FROM users \
             WHERE EXISTS ( \
                 SELECT 1 FROM unnest($1::text[]) AS t(term) \
                 WHERE username ILIKE '%' || term || '%' \
                    OR role ILIKE '%' || term || '%' \
                    OR department ILIKE '%' || term || '%' \
             ) \
             ORDER BY user_id \
             LIMIT $2",
        )
        .bind(&terms)
        .bind(limit as i64)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::Connector(format!("users query failed: {}", e)))?;

        Ok(rows
            .iter()
            .map(|row| RetrievedRecord::new(SourceKind::RelationalUsers, row.render()))
            .collect())
    }
}

/// Row shape of the `projects` table, as far as retrieval cares.
#[derive(Debug, FromRow)]
struct ProjectRow {
    name: String,
    status: String,
    priority: String,
    description: String,
    tasks_count: i32,
}

impl ProjectRow {
    fn render(&self) -> String {
        format!(
            "Project: {}, Status: {}, Priority: {}, Tasks: {}, Description: {}",
            self.name, self.status, self.priority, self.tasks_count, self.description
        )
    }
}

/// Connector for the `projects` table.
pub struct PgProjectsConnector {
    pool: PgPool,
}

impl PgProjectsConnector {
    /// Create a connector for the database at `database_url`.
    pub fn new(database_url: &str) -> AppResult<Self> {
        Ok(Self {
            pool: lazy_pool(database_url)?,
        })
    }
}

#[async_trait]
impl Connector for PgProjectsConnector {
    fn kind(&self) -> SourceKind {
        SourceKind::RelationalProjects
    }

    async fn fetch(&self, query: &str, limit: usize) -> AppResult<Vec<RetrievedRecord>> {
        let terms = query_terms(query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::Connector(format!("PostgreSQL connection failed: {}", e)))?;

        let rows: Vec<ProjectRow> = sqlx::query_as(
            "SELECT name, status, priority, description, tasks_count FROM projects \
             WHERE EXISTS ( \
                 SELECT 1 FROM unnest($1::text[]) AS t(term) \
                 WHERE name ILIKE '%' || term || '%' \
                    OR status ILIKE '%' || term || '%' \
                    OR description ILIKE '%' || term || '%' \
             ) \
             ORDER BY project_id \
             LIMIT $2",
        )
        .bind(&terms)
        .bind(limit as i64)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::Connector(format!("projects query failed: {}", e)))?;

        Ok(rows
            .iter()
            .map(|row| RetrievedRecord::new(SourceKind::RelationalProjects, row.render()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_row_rendering() {
        let row = UserRow {
            username: "user_10".to_string(),
            role: "Manager".to_string(),
            department: "Sales".to_string(),
        };
        assert_eq!(
            row.render(),
            "Username: user_10, Role: Manager, Department: Sales"
        );
    }

    #[test]
    fn test_project_row_rendering() {
        let row = ProjectRow {
            name: "Project Name 7".to_string(),
            status: "Active".to_string(),
            priority: "High".to_string(),
            description: "Data migration".to_string(),
            tasks_count: 12,
        };
        let rendered = row.render();
        assert!(rendered.starts_with("Project: Project Name 7"));
        assert!(rendered.contains("Tasks: 12"));
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        assert!(PgUsersConnector::new("not a url").is_err());
    }
}
