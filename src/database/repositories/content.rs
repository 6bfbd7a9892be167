//! Category and story repositories

use sqlx::SqlitePool;
use chrono::Utc;
use crate::models::content::{Category, Story, StorySummary, CreateStoryRequest};
use crate::utils::errors::StoryBotError;

#[derive(Clone)]
#[derive(Debug)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a category. Names are unique.
    pub async fn create(&self, name: &str) -> Result<Category, StoryBotError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, created_at)
            VALUES ($1, $2)
            RETURNING id, name, created_at
            "#
        )
        .bind(name.trim())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Category>, StoryBotError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at FROM categories WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Category>, StoryBotError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at FROM categories WHERE name = $1"
        )
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// All categories in alphabetical order
    pub async fn list(&self) -> Result<Vec<Category>, StoryBotError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at FROM categories ORDER BY name"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Delete a category together with its stories
    pub async fn delete(&self, id: i64) -> Result<bool, StoryBotError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64, StoryBotError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

#[derive(Clone)]
#[derive(Debug)]
pub struct StoryRepository {
    pool: SqlitePool,
}

impl StoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &CreateStoryRequest) -> Result<Story, StoryBotError> {
        let story = sqlx::query_as::<_, Story>(
            r#"
            INSERT INTO stories (title, content, category_id, is_premium, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, content, category_id, is_premium, created_at
            "#
        )
        .bind(&request.title)
        .bind(&request.content)
        .bind(request.category_id)
        .bind(request.is_premium)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(story)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Story>, StoryBotError> {
        let story = sqlx::query_as::<_, Story>(
            "SELECT id, title, content, category_id, is_premium, created_at FROM stories WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(story)
    }

    /// Stories of one category, newest first
    pub async fn list_by_category(&self, category_id: i64) -> Result<Vec<Story>, StoryBotError> {
        let stories = sqlx::query_as::<_, Story>(
            r#"
            SELECT id, title, content, category_id, is_premium, created_at
            FROM stories
            WHERE category_id = $1
            ORDER BY created_at DESC, id DESC
            "#
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(stories)
    }

    /// Every story with its category name, for the admin listing
    pub async fn list_summaries(&self) -> Result<Vec<StorySummary>, StoryBotError> {
        let stories = sqlx::query_as::<_, StorySummary>(
            r#"
            SELECT s.id, s.title, c.name AS category_name, s.is_premium
            FROM stories s
            JOIN categories c ON c.id = s.category_id
            ORDER BY s.created_at DESC, s.id DESC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stories)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, StoryBotError> {
        let result = sqlx::query("DELETE FROM stories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64, StoryBotError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM stories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::{create_pool, run_migrations, DatabaseConfig};

    async fn setup() -> (CategoryRepository, StoryRepository) {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        (CategoryRepository::new(pool.clone()), StoryRepository::new(pool))
    }

    fn story(title: &str, category_id: i64, is_premium: bool) -> CreateStoryRequest {
        CreateStoryRequest {
            title: title.to_string(),
            content: format!("{} content", title),
            category_id,
            is_premium,
        }
    }

    #[tokio::test]
    async fn test_category_names_are_unique() {
        let (categories, _) = setup().await;
        categories.create("Horror").await.unwrap();

        assert!(categories.create("Horror").await.is_err());
        assert_eq!(categories.count().await.unwrap(), 1);
        assert!(categories.find_by_name(" Horror ").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_stories_listed_per_category() {
        let (categories, stories) = setup().await;
        let horror = categories.create("Horror").await.unwrap();
        let comedy = categories.create("Comedy").await.unwrap();

        stories.create(&story("Night", horror.id, false)).await.unwrap();
        stories.create(&story("Crypt", horror.id, true)).await.unwrap();
        stories.create(&story("Joke", comedy.id, false)).await.unwrap();

        let listed = stories.list_by_category(horror.id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title, "Crypt");
        assert!(listed[0].is_premium);

        let summaries = stories.list_summaries().await.unwrap();
        assert_eq!(summaries.len(), 3);
        assert!(summaries.iter().any(|s| s.title == "Joke" && s.category_name == "Comedy"));
    }

    #[tokio::test]
    async fn test_deleting_category_removes_its_stories() {
        let (categories, stories) = setup().await;
        let horror = categories.create("Horror").await.unwrap();
        let created = stories.create(&story("Night", horror.id, false)).await.unwrap();

        assert!(categories.delete(horror.id).await.unwrap());
        assert!(stories.find_by_id(created.id).await.unwrap().is_none());
        assert_eq!(stories.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_story_requires_existing_category() {
        let (_, stories) = setup().await;
        assert!(stories.create(&story("Orphan", 42, false)).await.is_err());
    }
}
