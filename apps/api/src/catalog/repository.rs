use sqlx::SqlitePool;
use tracing::info;

use crate::models::catalog::{Course, CourseRow, Job, JobRow, NewCourse, NewJob};

/// Jobs with both a title and a description, in stored (insertion) order.
pub async fn fetch_jobs(pool: &SqlitePool) -> anyhow::Result<Vec<Job>> {
    let rows = sqlx::query_as::<_, JobRow>(
        r#"
        SELECT id, job_title, company, description, CAST(created_at AS TEXT) AS created_at
        FROM jobs
        WHERE description IS NOT NULL
          AND job_title IS NOT NULL
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Job::from).collect())
}

/// Courses in stored order. Rating and enrollment are read as text and parsed leniently.
pub async fn fetch_courses(pool: &SqlitePool) -> anyhow::Result<Vec<Course>> {
    let rows = sqlx::query_as::<_, CourseRow>(
        r#"
        SELECT course_title,
               organization,
               skills,
               url,
               CAST(rating AS TEXT) AS rating,
               CAST(course_students_enrolled AS TEXT) AS course_students_enrolled
        FROM courses
        WHERE course_title IS NOT NULL
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Course::from).collect())
}

/// Every job row, including ones without a description. Used by the CSV backup.
pub async fn fetch_all_job_rows(pool: &SqlitePool) -> sqlx::Result<Vec<JobRow>> {
    sqlx::query_as::<_, JobRow>(
        r#"
        SELECT id, job_title, company, description, CAST(created_at AS TEXT) AS created_at
        FROM jobs
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Inserts jobs in one transaction and returns how many were saved.
pub async fn save_jobs(pool: &SqlitePool, jobs: &[NewJob]) -> sqlx::Result<u64> {
    if jobs.is_empty() {
        info!("No jobs to save");
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    let mut saved = 0_u64;
    for job in jobs {
        sqlx::query("INSERT INTO jobs (job_title, company, description) VALUES (?, ?, ?)")
            .bind(&job.job_title)
            .bind(&job.company)
            .bind(&job.description)
            .execute(&mut *tx)
            .await?;
        saved += 1;
    }
    tx.commit().await?;

    info!("Saved {saved} jobs");
    Ok(saved)
}

/// Inserts courses in one transaction and returns how many were saved.
pub async fn save_courses(pool: &SqlitePool, courses: &[NewCourse]) -> sqlx::Result<u64> {
    if courses.is_empty() {
        info!("No courses to save");
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    let mut saved = 0_u64;
    for course in courses {
        sqlx::query(
            r#"
            INSERT INTO courses
                (course_title, organization, skills, url, rating, course_students_enrolled)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&course.course_title)
        .bind(&course.organization)
        .bind(&course.skills)
        .bind(&course.url)
        .bind(course.rating)
        .bind(course.course_students_enrolled)
        .execute(&mut *tx)
        .await?;
        saved += 1;
    }
    tx.commit().await?;

    info!("Saved {saved} courses");
    Ok(saved)
}

pub async fn count_jobs(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
        .fetch_one(pool)
        .await
}

pub async fn count_courses(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM courses")
        .fetch_one(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn new_job(title: &str, description: Option<&str>) -> NewJob {
        NewJob {
            job_title: title.to_string(),
            company: Some("Acme".to_string()),
            description: description.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_save_and_fetch_jobs_in_insertion_order() {
        let pool = test_pool().await;
        let saved = save_jobs(
            &pool,
            &[
                new_job("Data Analyst", Some("sql")),
                new_job("No Description", None),
                new_job("Data Analyst", Some("python")),
            ],
        )
        .await
        .unwrap();
        assert_eq!(saved, 3);
        assert_eq!(count_jobs(&pool).await.unwrap(), 3);

        let jobs = fetch_jobs(&pool).await.unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].description.as_deref(), Some("sql"));
        assert_eq!(jobs[1].description.as_deref(), Some("python"));

        let rows = fetch_all_job_rows(&pool).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].created_at.is_some());
    }

    #[tokio::test]
    async fn test_save_empty_is_zero() {
        let pool = test_pool().await;
        assert_eq!(save_jobs(&pool, &[]).await.unwrap(), 0);
        assert_eq!(save_courses(&pool, &[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_fetch_courses_degrades_bad_values() {
        let pool = test_pool().await;
        save_courses(
            &pool,
            &[NewCourse {
                course_title: "SQL for Data Science".to_string(),
                organization: Some("UC Davis".to_string()),
                skills: Some("SQL, Data Analysis".to_string()),
                url: Some("https://example.org/sql".to_string()),
                rating: Some(4.6),
                course_students_enrolled: Some(1200),
            }],
        )
        .await
        .unwrap();

        // SQLite accepts text in REAL/INTEGER columns; scraped data sometimes lands that way
        sqlx::query(
            "INSERT INTO courses (course_title, skills, rating, course_students_enrolled) VALUES (?, ?, ?, ?)",
        )
        .bind("Mystery Course")
        .bind(Option::<String>::None)
        .bind("not rated")
        .bind("12,345")
        .execute(&pool)
        .await
        .unwrap();

        let courses = fetch_courses(&pool).await.unwrap();
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].rating, Some(4.6));
        assert_eq!(courses[0].enrollment, Some(1200));
        assert_eq!(courses[1].rating, None);
        assert_eq!(courses[1].enrollment, Some(12_345));
        assert_eq!(courses[1].skills, None);
        assert_eq!(count_courses(&pool).await.unwrap(), 2);
    }
}
