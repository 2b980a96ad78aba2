//! Seed command handler.
//!
//! Creates and populates the sample data the connectors query: a `users`
//! and a `projects` table in PostgreSQL, and a `documents` collection in
//! MongoDB. Existing sample data is dropped first, so the command is safe
//! to re-run.

use clap::Args;
use mongodb::bson::{doc, Document};
use mongodb::Client;
use sqlx::postgres::PgPoolOptions;
use tributary_core::{AppError, AppResult, PipelineConfig};

/// Number of synthetic users inserted into PostgreSQL.
const USER_COUNT: i32 = 1000;

/// Number of synthetic projects inserted into PostgreSQL.
const PROJECT_COUNT: i32 = 200;

/// Number of synthetic design documents inserted into MongoDB.
const DOCUMENT_COUNT: usize = 120;

/// Subsystems the synthetic design documents are written about.
const DOC_TOPICS: &[&str] = &[
    "retrieval pipeline",
    "ingestion service",
    "billing system",
    "auth gateway",
    "reporting stack",
    "deployment runbook",
];

/// Create and populate the sample data sources
#[derive(Args, Debug)]
pub struct SeedCommand {
    /// Seed only PostgreSQL
    #[arg(long, conflicts_with = "mongo_only")]
    pub postgres_only: bool,

    /// Seed only MongoDB
    #[arg(long)]
    pub mongo_only: bool,
}

impl SeedCommand {
    /// Execute the seed command.
    pub async fn execute(&self, config: &PipelineConfig) -> AppResult<()> {
        if !self.mongo_only {
            self.seed_postgres(config).await?;
        }
        if !self.postgres_only {
            self.seed_mongo(config).await?;
        }
        Ok(())
    }

    /// Recreate and fill the `users` and `projects` tables.
    async fn seed_postgres(&self, config: &PipelineConfig) -> AppResult<()> {
        let url = config.database_url.as_deref().ok_or_else(|| {
            AppError::Config("DATABASE_URL is required to seed PostgreSQL".to_string())
        })?;

        tracing::info!("Connecting to PostgreSQL");
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(url)
            .await
            .map_err(|e| AppError::Connector(format!("PostgreSQL connection failed: {}", e)))?;

        sqlx::query("DROP TABLE IF EXISTS projects")
            .execute(&pool)
            .await
            .map_err(seed_err)?;
        sqlx::query("DROP TABLE IF EXISTS users")
            .execute(&pool)
            .await
            .map_err(seed_err)?;

        sqlx::query(
            "CREATE TABLE users ( \
                 user_id SERIAL PRIMARY KEY, \
                 username VARCHAR(50), \
                 role VARCHAR(50), \
                 department VARCHAR(50), \
                 created_at TIMESTAMP \
             )",
        )
        .execute(&pool)
        .await
        .map_err(seed_err)?;

        tracing::info!("Inserting {} records into 'users'", USER_COUNT);
        sqlx::query(
            "INSERT INTO users (username, role, department, created_at) \
             SELECT \
                 'user_' || i::text, \
                 CASE WHEN i % 10 = 0 THEN 'Manager' ELSE 'Staff' END, \
                 CASE (i % 5) \
                     WHEN 0 THEN 'Sales' \
                     WHEN 1 THEN 'IT' \
                     WHEN 2 THEN 'HR' \
                     WHEN 3 THEN 'Finance' \
                     ELSE 'R&D' \
                 END, \
                 NOW() - (random() * INTERVAL '365 days') \
             FROM generate_series(1, $1) AS s(i)",
        )
        .bind(USER_COUNT)
        .execute(&pool)
        .await
        .map_err(seed_err)?;

        sqlx::query(
            "CREATE TABLE projects ( \
                 project_id SERIAL PRIMARY KEY, \
                 name VARCHAR(100), \
                 status VARCHAR(20), \
                 priority VARCHAR(20), \
                 description TEXT, \
                 tasks_count INT \
             )",
        )
        .execute(&pool)
        .await
        .map_err(seed_err)?;

        tracing::info!("Inserting {} records into 'projects'", PROJECT_COUNT);
        sqlx::query(
            "INSERT INTO projects (name, status, priority, description, tasks_count) \
             SELECT \
                 'Project Name ' || i::text, \
                 CASE (i % 3) WHEN 0 THEN 'Active' WHEN 1 THEN 'Completed' ELSE 'On Hold' END, \
                 CASE (i % 3) WHEN 0 THEN 'High' WHEN 1 THEN 'Medium' ELSE 'Low' END, \
                 'Detailed description for Project ' || i::text || \
                     '. This project involves complex data migration and ETL pipelines.', \
                 i % 50 + 10 \
             FROM generate_series(1, $1) AS s(i)",
        )
        .bind(PROJECT_COUNT)
        .execute(&pool)
        .await
        .map_err(seed_err)?;

        println!(
            "PostgreSQL seeded: {} users, {} projects",
            USER_COUNT, PROJECT_COUNT
        );
        Ok(())
    }

    /// Recreate and fill the `documents` collection.
    async fn seed_mongo(&self, config: &PipelineConfig) -> AppResult<()> {
        let uri = config.mongo_uri.as_deref().ok_or_else(|| {
            AppError::Config("MONGO_URI is required to seed MongoDB".to_string())
        })?;

        tracing::info!("Connecting to MongoDB");
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| AppError::Connector(format!("MongoDB connection failed: {}", e)))?;

        let collection = client
            .database(&config.mongo_db)
            .collection::<Document>("documents");

        collection
            .delete_many(doc! {})
            .await
            .map_err(|e| AppError::Connector(format!("Failed to clear 'documents': {}", e)))?;

        let documents: Vec<Document> = (1..=DOCUMENT_COUNT)
            .map(|i| {
                let topic = DOC_TOPICS[i % DOC_TOPICS.len()];
                doc! {
                    "doc_id": format!("DOC-{:04}", i),
                    "title": format!("Design note {}: {}", i, topic),
                    "body": format!(
                        "Design document {} covering the {}: components, interfaces, \
                         failure modes, and the operational runbook.",
                        i, topic
                    ),
                    "tags": ["design", "architecture", topic],
                    "updated_at": format!("2025-{:02}-{:02}", i % 12 + 1, i % 28 + 1),
                }
            })
            .collect();

        tracing::info!("Inserting {} documents into 'documents'", documents.len());
        collection
            .insert_many(documents)
            .await
            .map_err(|e| AppError::Connector(format!("Failed to insert documents: {}", e)))?;

        println!("MongoDB seeded: {} design documents", DOCUMENT_COUNT);
        Ok(())
    }
}

fn seed_err(e: sqlx::Error) -> AppError {
    AppError::Connector(format!("PostgreSQL seeding failed: {}", e))
}
