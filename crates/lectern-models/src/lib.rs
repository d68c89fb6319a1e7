//! # Lectern Models
//!
//! Domain models and DTOs for the Lectern API.
//!
//! This crate provides all data structures used throughout the Lectern
//! application, including database entities, request/response DTOs, and
//! validation schemas.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed UUID newtypes for domain entities
//! - [`users`]: User entity, roles, and user-facing DTOs
//! - [`education_terms`]: Education term entity and DTOs
//! - [`lessons`]: Lesson entity and DTOs
//! - [`lesson_programs`]: Weekly lesson program entity and DTOs

pub mod education_terms;
pub mod ids;
pub mod lesson_programs;
pub mod lessons;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use education_terms::{
    CreateEducationTermDto, EducationTerm, EducationTermFilterParams,
    PaginatedEducationTermsResponse, Term,
};
pub use ids::{EducationTermId, LessonId, LessonProgramId, UserId};
pub use lesson_programs::{
    CreateLessonProgramDto, DayOfWeek, LessonProgram, LessonProgramWithLessons,
    PaginatedLessonProgramsResponse,
};
pub use lessons::{CreateLessonDto, Lesson, LessonFilterParams, PaginatedLessonsResponse};
pub use users::{
    ChooseLessonProgramsDto, CreateStudentDto, CreateTeacherDto, CreateUserDto, Gender,
    PaginatedUsersResponse, UpdateStudentSelfDto, User, UserFilterParams, UserRole,
};
