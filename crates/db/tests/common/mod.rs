//! Fixture builders shared by the repository integration tests.

#![allow(dead_code)]

use coursehub_core::types::DbId;
use coursehub_db::models::course::{Course, CreateCourse};
use coursehub_db::models::user::{CreateUser, User};
use coursehub_db::repositories::{CourseRepo, UserRepo};
use sqlx::PgPool;

pub async fn create_user(pool: &PgPool, name: &str, role: &str) -> User {
    let input = CreateUser {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        password_hash: "not-a-real-hash".to_string(),
        role: role.to_string(),
    };
    UserRepo::create(pool, &input).await.unwrap()
}

pub fn new_course(instructor: &User, title: &str, price: f64) -> CreateCourse {
    CreateCourse {
        title: title.to_string(),
        description: format!("Everything about {title}."),
        instructor_id: instructor.id,
        instructor_name: instructor.name.clone(),
        category: "Programming".to_string(),
        level: "Beginner".to_string(),
        duration_hours: 4,
        price,
        thumbnail: String::new(),
        is_published: true,
    }
}

pub async fn create_course(pool: &PgPool, instructor: &User, title: &str, price: f64) -> Course {
    CourseRepo::create(pool, &new_course(instructor, title, price))
        .await
        .unwrap()
}

pub async fn course(pool: &PgPool, id: DbId) -> Course {
    CourseRepo::find_by_id(pool, id).await.unwrap().unwrap()
}
