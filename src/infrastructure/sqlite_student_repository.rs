use std::{str::FromStr, time::Duration};

use async_trait::async_trait;
use sqlx::{
    QueryBuilder, Row, Sqlite, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
};
use tracing::debug;

use crate::{
    domain::{
        errors::DomainError,
        student::{CompoundCriteria, NewStudent, Student},
    },
    infrastructure::StudentRepository,
};

const CREATE_STUDENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS students (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        age INTEGER,
        document TEXT,
        address TEXT
    )
"#;

const STUDENT_COLUMNS: &str = "id, name, age, document, address";

#[derive(Clone)]
pub struct SqliteStudentRepository {
    pool: SqlitePool,
}

impl SqliteStudentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connects and creates the `students` table if it is missing.
    ///
    /// An in-memory database lives only as long as its connection, so `:memory:`
    /// URLs are pinned to a single connection that is never recycled.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DomainError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(map_sqlx_error)?
            .create_if_missing(true);

        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        let repository = Self::new(pool);
        repository.migrate().await?;
        Ok(repository)
    }

    pub async fn migrate(&self) -> Result<(), DomainError> {
        sqlx::query(CREATE_STUDENTS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        debug!("students table ready");
        Ok(())
    }

    async fn fetch_where(
        &self,
        column: &'static str,
        bind: impl FnOnce(&mut QueryBuilder<'_, Sqlite>),
    ) -> Result<Vec<Student>, DomainError> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE {column} = "
        ));
        bind(&mut builder);
        builder.push(" ORDER BY id");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_student).collect()
    }
}

#[async_trait]
impl StudentRepository for SqliteStudentRepository {
    async fn create(&self, student: NewStudent) -> Result<Student, DomainError> {
        let row = sqlx::query(&format!(
            "INSERT INTO students (name, age, document, address) VALUES (?, ?, ?, ?) \
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(student.name)
        .bind(student.age)
        .bind(student.document)
        .bind(student.address)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row_to_student(&row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, DomainError> {
        let maybe_row = sqlx::query(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        maybe_row.as_ref().map(row_to_student).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Student>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_student).collect()
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Student>, DomainError> {
        let name = name.to_string();
        self.fetch_where("name", |builder| {
            builder.push_bind(name);
        })
        .await
    }

    async fn find_by_age(&self, age: i64) -> Result<Vec<Student>, DomainError> {
        self.fetch_where("age", |builder| {
            builder.push_bind(age);
        })
        .await
    }

    async fn find_by_compound(
        &self,
        criteria: &CompoundCriteria,
    ) -> Result<Option<Student>, DomainError> {
        let mut builder =
            QueryBuilder::<Sqlite>::new(format!("SELECT {STUDENT_COLUMNS} FROM students"));
        let mut has_where = false;

        if let Some(name) = criteria.name.clone() {
            push_where_prefix(&mut builder, &mut has_where);
            builder.push("name = ").push_bind(name);
        }
        if let Some(age) = criteria.age {
            push_where_prefix(&mut builder, &mut has_where);
            builder.push("age = ").push_bind(age);
        }
        if let Some(document) = criteria.document.clone() {
            push_where_prefix(&mut builder, &mut has_where);
            builder.push("document = ").push_bind(document);
        }
        builder.push(" ORDER BY id LIMIT 1");

        let maybe_row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        maybe_row.as_ref().map(row_to_student).transpose()
    }

    async fn update(&self, student: Student) -> Result<Option<Student>, DomainError> {
        let maybe_row = sqlx::query(&format!(
            "UPDATE students SET name = ?, age = ?, document = ?, address = ? \
             WHERE id = ? RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(student.name)
        .bind(student.age)
        .bind(student.document)
        .bind(student.address)
        .bind(student.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        maybe_row.as_ref().map(row_to_student).transpose()
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() == 1)
    }
}

fn push_where_prefix(builder: &mut QueryBuilder<'_, Sqlite>, has_where: &mut bool) {
    if !*has_where {
        builder.push(" WHERE ");
        *has_where = true;
    } else {
        builder.push(" AND ");
    }
}

fn row_to_student(row: &SqliteRow) -> Result<Student, DomainError> {
    Ok(Student {
        id: row.try_get("id").map_err(map_sqlx_error)?,
        name: row.try_get("name").map_err(map_sqlx_error)?,
        age: row.try_get("age").map_err(map_sqlx_error)?,
        document: row.try_get("document").map_err(map_sqlx_error)?,
        address: row.try_get("address").map_err(map_sqlx_error)?,
    })
}

fn map_sqlx_error(error: sqlx::Error) -> DomainError {
    DomainError::storage(error.to_string())
}
