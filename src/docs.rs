//! OpenAPI documentation, served through Swagger UI and Scalar.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use lectern_core::{PaginationMeta, PaginationParams};
use lectern_models::education_terms::{
    CreateEducationTermDto, EducationTerm, EducationTermFilterParams,
    PaginatedEducationTermsResponse, Term,
};
use lectern_models::lesson_programs::{
    CreateLessonProgramDto, DayOfWeek, LessonProgram, LessonProgramFilterParams,
    LessonProgramWithLessons, PaginatedLessonProgramsResponse,
};
use lectern_models::lessons::{
    CreateLessonDto, Lesson, LessonFilterParams, PaginatedLessonsResponse,
};
use lectern_models::users::{
    ChooseLessonProgramsDto, CreateStudentDto, CreateTeacherDto, CreateUserDto, Gender,
    PaginatedUsersResponse, UpdateStudentSelfDto, User, UserFilterParams, UserRole,
};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    LoginRequest, LoginResponse, MessageResponse, UpdatePasswordRequest,
};
use crate::modules::students::model::{StudentFilterParams, UpdateStudentStatusDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_me,
        crate::modules::auth::controller::update_password,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user_by_id,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::get_advisor_teachers,
        crate::modules::teachers::controller::save_advisor_teacher,
        crate::modules::teachers::controller::delete_advisor_teacher,
        crate::modules::teachers::controller::get_my_advisees,
        crate::modules::teachers::controller::get_teacher_by_id,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::add_teacher_lesson_programs,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::update_student_self,
        crate::modules::students::controller::choose_lesson_programs,
        crate::modules::students::controller::get_student_by_id,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::update_student_status,
        crate::modules::lessons::controller::create_lesson,
        crate::modules::lessons::controller::get_lessons,
        crate::modules::lessons::controller::get_lesson_by_name,
        crate::modules::lessons::controller::delete_lesson,
        crate::modules::education_terms::controller::create_education_term,
        crate::modules::education_terms::controller::get_education_terms,
        crate::modules::education_terms::controller::get_education_term_by_id,
        crate::modules::education_terms::controller::update_education_term,
        crate::modules::education_terms::controller::delete_education_term,
        crate::modules::lesson_programs::controller::create_lesson_program,
        crate::modules::lesson_programs::controller::get_lesson_programs,
        crate::modules::lesson_programs::controller::get_assigned_lesson_programs,
        crate::modules::lesson_programs::controller::get_unassigned_lesson_programs,
        crate::modules::lesson_programs::controller::get_lesson_program_by_id,
        crate::modules::lesson_programs::controller::delete_lesson_program,
    ),
    components(
        schemas(
            User,
            UserRole,
            Gender,
            CreateUserDto,
            CreateTeacherDto,
            CreateStudentDto,
            UpdateStudentSelfDto,
            UpdateStudentStatusDto,
            ChooseLessonProgramsDto,
            UserFilterParams,
            StudentFilterParams,
            PaginatedUsersResponse,
            LoginRequest,
            LoginResponse,
            UpdatePasswordRequest,
            MessageResponse,
            ErrorResponse,
            EducationTerm,
            Term,
            CreateEducationTermDto,
            EducationTermFilterParams,
            PaginatedEducationTermsResponse,
            Lesson,
            CreateLessonDto,
            LessonFilterParams,
            PaginatedLessonsResponse,
            LessonProgram,
            LessonProgramWithLessons,
            DayOfWeek,
            CreateLessonProgramDto,
            LessonProgramFilterParams,
            PaginatedLessonProgramsResponse,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and account self-service"),
        (name = "Users", description = "Admin and manager account management"),
        (name = "Teachers", description = "Teacher accounts and advisor duties"),
        (name = "Students", description = "Student accounts and enrollment"),
        (name = "Lessons", description = "Lesson catalog"),
        (name = "Education Terms", description = "Academic term calendar"),
        (name = "Lesson Programs", description = "Weekly lesson schedule slots")
    ),
    info(
        title = "Lectern API",
        version = "0.1.0",
        description = "A school management REST API built with Rust, Axum, and PostgreSQL featuring JWT-based authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
