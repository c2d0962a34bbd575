use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::store::{CommentFilter, Page, VacancyFilter, VacancyStore};
use crate::error::Result;
use crate::models::comment::{Comment, CommentDraft, CommentUpdate};
use crate::models::user::User;
use crate::models::vacancy::{Vacancy, VacancyStatus};
use crate::utils::time::to_rfc3339;

const VACANCY_COLUMNS: &str = "id, title, company, description, min_salary, max_salary, status, created_at, status_changed_at, updated_at, author_id";

const COMMENT_SELECT: &str = "SELECT c.id, c.text, c.created_at, c.vacancy_id, c.author_id, v.title AS vacancy_title
             FROM comments c
             JOIN vacancies v ON v.id = c.vacancy_id";

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escapes LIKE wildcards so search terms match literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn where_clause(filters: &[String]) -> String {
    if filters.is_empty() {
        "".to_string()
    } else {
        format!("WHERE {}", filters.join(" AND "))
    }
}

#[async_trait]
impl VacancyStore for PgStore {
    async fn insert_user(&self, user: &User) -> Result<User> {
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, username, created_at
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn fetch_user(&self, id: Uuid) -> Result<User> {
        let row = sqlx::query_as::<_, User>(
            "SELECT id, username, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_user(&self, id: Uuid) -> Result<u64> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn insert_vacancy(&self, vacancy: &Vacancy) -> Result<Vacancy> {
        let query = format!(
            r#"
            INSERT INTO vacancies (
                id, title, company, description, min_salary, max_salary,
                status, created_at, status_changed_at, updated_at, author_id
            ) VALUES (
                $1,$2,$3,$4,$5,$6,
                $7,$8,$9,$10,$11
            )
            RETURNING {}
            "#,
            VACANCY_COLUMNS
        );
        let row = sqlx::query_as::<_, Vacancy>(&query)
            .bind(vacancy.id)
            .bind(&vacancy.title)
            .bind(&vacancy.company)
            .bind(&vacancy.description)
            .bind(vacancy.min_salary)
            .bind(vacancy.max_salary)
            .bind(vacancy.status)
            .bind(vacancy.created_at)
            .bind(vacancy.status_changed_at)
            .bind(vacancy.updated_at)
            .bind(vacancy.author_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn fetch_vacancy(&self, id: Uuid) -> Result<Vacancy> {
        let query = format!("SELECT {} FROM vacancies WHERE id = $1", VACANCY_COLUMNS);
        let row = sqlx::query_as::<_, Vacancy>(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn fetch_vacancy_status(&self, id: Uuid) -> Result<VacancyStatus> {
        let status =
            sqlx::query_scalar::<_, VacancyStatus>("SELECT status FROM vacancies WHERE id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(status)
    }

    async fn update_vacancy(&self, vacancy: &Vacancy) -> Result<Vacancy> {
        let query = format!(
            r#"
            UPDATE vacancies
            SET
                title = $2,
                company = $3,
                description = $4,
                min_salary = $5,
                max_salary = $6,
                status = $7,
                status_changed_at = $8,
                updated_at = $9,
                author_id = $10
            WHERE id = $1
            RETURNING {}
            "#,
            VACANCY_COLUMNS
        );
        let row = sqlx::query_as::<_, Vacancy>(&query)
            .bind(vacancy.id)
            .bind(&vacancy.title)
            .bind(&vacancy.company)
            .bind(&vacancy.description)
            .bind(vacancy.min_salary)
            .bind(vacancy.max_salary)
            .bind(vacancy.status)
            .bind(vacancy.status_changed_at)
            .bind(vacancy.updated_at)
            .bind(vacancy.author_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_vacancy(&self, id: Uuid) -> Result<u64> {
        let res = sqlx::query("DELETE FROM vacancies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn list_vacancies(
        &self,
        filter: &VacancyFilter,
        page: Page,
    ) -> Result<(Vec<Vacancy>, i64)> {
        let mut filters = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if let Some(status) = filter.status {
            filters.push(format!("status = ${}::vacancy_status", args.len() + 1));
            args.push(status.as_str().to_string());
        }
        if let Some(company) = &filter.company {
            filters.push(format!("company = ${}", args.len() + 1));
            args.push(company.clone());
        }
        if let Some(author_id) = filter.author_id {
            filters.push(format!("author_id = ${}::uuid", args.len() + 1));
            args.push(author_id.to_string());
        }
        if let Some(from) = filter.created_from {
            filters.push(format!("created_at >= ${}::timestamptz", args.len() + 1));
            args.push(to_rfc3339(from));
        }
        if let Some(to) = filter.created_to {
            filters.push(format!("created_at <= ${}::timestamptz", args.len() + 1));
            args.push(to_rfc3339(to));
        }
        if let Some(search) = &filter.search {
            let n = args.len() + 1;
            filters.push(format!(
                "(title ILIKE ${n} OR company ILIKE ${n} OR description ILIKE ${n})"
            ));
            args.push(like_pattern(search));
        }

        let where_clause = where_clause(&filters);

        let items_query = format!(
            "SELECT {}
             FROM vacancies
             {}
             ORDER BY created_at DESC, id DESC
             LIMIT ${} OFFSET ${}",
            VACANCY_COLUMNS,
            where_clause,
            args.len() + 1,
            args.len() + 2
        );
        let total_query = format!("SELECT COUNT(*) FROM vacancies {}", where_clause);

        let mut items_statement = sqlx::query_as::<_, Vacancy>(&items_query);
        for value in &args {
            items_statement = items_statement.bind(value);
        }
        items_statement = items_statement.bind(page.limit).bind(page.offset);
        let items = items_statement.fetch_all(&self.pool).await?;

        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query);
        for value in &args {
            total_statement = total_statement.bind(value);
        }
        let total = total_statement.fetch_one(&self.pool).await?;

        Ok((items, total))
    }

    async fn insert_comment(&self, comment: &CommentDraft) -> Result<Comment> {
        let row = sqlx::query_as::<_, Comment>(
            r#"
            WITH inserted AS (
                INSERT INTO comments (id, text, created_at, vacancy_id, author_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, text, created_at, vacancy_id, author_id
            )
            SELECT i.id, i.text, i.created_at, i.vacancy_id, i.author_id, v.title AS vacancy_title
            FROM inserted i
            JOIN vacancies v ON v.id = i.vacancy_id
            "#,
        )
        .bind(comment.id)
        .bind(&comment.text)
        .bind(comment.created_at)
        .bind(comment.vacancy_id)
        .bind(comment.author_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn fetch_comment(&self, id: Uuid) -> Result<Comment> {
        let query = format!("{} WHERE c.id = $1", COMMENT_SELECT);
        let row = sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_comment(&self, comment: &CommentUpdate) -> Result<Comment> {
        let row = sqlx::query_as::<_, Comment>(
            r#"
            WITH updated AS (
                UPDATE comments
                SET text = $2, vacancy_id = $3, author_id = $4
                WHERE id = $1
                RETURNING id, text, created_at, vacancy_id, author_id
            )
            SELECT u.id, u.text, u.created_at, u.vacancy_id, u.author_id, v.title AS vacancy_title
            FROM updated u
            JOIN vacancies v ON v.id = u.vacancy_id
            "#,
        )
        .bind(comment.id)
        .bind(&comment.text)
        .bind(comment.vacancy_id)
        .bind(comment.author_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_comment(&self, id: Uuid) -> Result<u64> {
        let res = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn list_comments(
        &self,
        filter: &CommentFilter,
        page: Page,
    ) -> Result<(Vec<Comment>, i64)> {
        let mut filters = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if let Some(vacancy_id) = filter.vacancy_id {
            filters.push(format!("c.vacancy_id = ${}::uuid", args.len() + 1));
            args.push(vacancy_id.to_string());
        }
        if let Some(author_id) = filter.author_id {
            filters.push(format!("c.author_id = ${}::uuid", args.len() + 1));
            args.push(author_id.to_string());
        }
        if let Some(from) = filter.created_from {
            filters.push(format!("c.created_at >= ${}::timestamptz", args.len() + 1));
            args.push(to_rfc3339(from));
        }
        if let Some(to) = filter.created_to {
            filters.push(format!("c.created_at <= ${}::timestamptz", args.len() + 1));
            args.push(to_rfc3339(to));
        }
        if let Some(search) = &filter.search {
            let n = args.len() + 1;
            filters.push(format!("(c.text ILIKE ${n} OR v.title ILIKE ${n})"));
            args.push(like_pattern(search));
        }

        let where_clause = where_clause(&filters);

        let items_query = format!(
            "{}
             {}
             ORDER BY c.created_at DESC, c.id DESC
             LIMIT ${} OFFSET ${}",
            COMMENT_SELECT,
            where_clause,
            args.len() + 1,
            args.len() + 2
        );
        let total_query = format!(
            "SELECT COUNT(*) FROM comments c JOIN vacancies v ON v.id = c.vacancy_id {}",
            where_clause
        );

        let mut items_statement = sqlx::query_as::<_, Comment>(&items_query);
        for value in &args {
            items_statement = items_statement.bind(value);
        }
        items_statement = items_statement.bind(page.limit).bind(page.offset);
        let items = items_statement.fetch_all(&self.pool).await?;

        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query);
        for value in &args {
            total_statement = total_statement.bind(value);
        }
        let total = total_statement.fetch_one(&self.pool).await?;

        Ok((items, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("rust"), "%rust%");
        assert_eq!(like_pattern("100%_"), "%100\\%\\_%");
    }

    #[test]
    fn where_clause_joins_with_and() {
        assert_eq!(where_clause(&[]), "");
        let filters = vec!["a = $1".to_string(), "b = $2".to_string()];
        assert_eq!(where_clause(&filters), "WHERE a = $1 AND b = $2");
    }
}
