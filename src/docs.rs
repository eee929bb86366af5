use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::middleware::role::UserRole;
use crate::modules::attendance::model::{
    AttendanceEntry, AttendanceRecord, AttendanceStatus, AttendanceSummary, MarkAttendanceDto,
};
use crate::modules::classes::model::{
    AssignmentDto, Class, ClassAssignment, ClassWithAssignments, CreateClassDto, UpdateClassDto,
};
use crate::modules::examinations::model::{
    CreateExaminationDto, Examination, UpdateExaminationDto,
};
use crate::modules::notices::model::{CreateNoticeDto, Notice, UpdateNoticeDto};
use crate::modules::periods::model::{CreatePeriodDto, Period, UpdatePeriodDto};
use crate::modules::schools::model::{RegisterSchoolDto, School, SchoolPublic, UpdateSchoolDto};
use crate::modules::session::model::{LoginRequest, LoginResponse, LoginUser, MessageResponse};
use crate::modules::students::model::{RegisterStudentDto, Student, UpdateStudentDto};
use crate::modules::subjects::model::{CreateSubjectDto, Subject, UpdateSubjectDto};
use crate::modules::teachers::model::{RegisterTeacherDto, Teacher, UpdateTeacherDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::session::controller::sign_out,
        crate::modules::session::controller::is_login,
        crate::modules::schools::controller::register_school,
        crate::modules::schools::controller::login_school,
        crate::modules::schools::controller::school_gallery,
        crate::modules::schools::controller::fetch_own_school,
        crate::modules::schools::controller::update_school,
        crate::modules::students::controller::login_student,
        crate::modules::students::controller::register_student,
        crate::modules::students::controller::fetch_students_with_query,
        crate::modules::students::controller::fetch_own_student,
        crate::modules::students::controller::fetch_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::teachers::controller::login_teacher,
        crate::modules::teachers::controller::register_teacher,
        crate::modules::teachers::controller::fetch_teachers_with_query,
        crate::modules::teachers::controller::fetch_own_teacher,
        crate::modules::teachers::controller::fetch_teacher,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::fetch_classes,
        crate::modules::classes::controller::fetch_class,
        crate::modules::classes::controller::fetch_attendee_classes,
        crate::modules::classes::controller::update_class,
        crate::modules::classes::controller::delete_class,
        crate::modules::classes::controller::add_class_assignment,
        crate::modules::classes::controller::update_class_assignment,
        crate::modules::classes::controller::delete_class_assignment,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::fetch_subjects,
        crate::modules::subjects::controller::fetch_subject,
        crate::modules::subjects::controller::update_subject,
        crate::modules::subjects::controller::delete_subject,
        crate::modules::examinations::controller::create_examination,
        crate::modules::examinations::controller::fetch_examinations,
        crate::modules::examinations::controller::fetch_class_examinations,
        crate::modules::examinations::controller::fetch_examination,
        crate::modules::examinations::controller::update_examination,
        crate::modules::examinations::controller::delete_examination,
        crate::modules::periods::controller::create_period,
        crate::modules::periods::controller::fetch_periods,
        crate::modules::periods::controller::fetch_teacher_periods,
        crate::modules::periods::controller::fetch_class_periods,
        crate::modules::periods::controller::fetch_period,
        crate::modules::periods::controller::update_period,
        crate::modules::periods::controller::delete_period,
        crate::modules::attendance::controller::mark_attendance,
        crate::modules::attendance::controller::fetch_attendance,
        crate::modules::attendance::controller::check_attendance,
        crate::modules::attendance::controller::attendance_summary,
        crate::modules::notices::controller::add_notice,
        crate::modules::notices::controller::fetch_notices,
        crate::modules::notices::controller::fetch_audience_notices,
        crate::modules::notices::controller::update_notice,
        crate::modules::notices::controller::delete_notice,
    ),
    components(
        schemas(
            UserRole,
            LoginRequest,
            LoginResponse,
            LoginUser,
            MessageResponse,
            School,
            SchoolPublic,
            RegisterSchoolDto,
            UpdateSchoolDto,
            Student,
            RegisterStudentDto,
            UpdateStudentDto,
            Teacher,
            RegisterTeacherDto,
            UpdateTeacherDto,
            Class,
            ClassAssignment,
            ClassWithAssignments,
            CreateClassDto,
            UpdateClassDto,
            AssignmentDto,
            Subject,
            CreateSubjectDto,
            UpdateSubjectDto,
            Examination,
            CreateExaminationDto,
            UpdateExaminationDto,
            Period,
            CreatePeriodDto,
            UpdatePeriodDto,
            AttendanceStatus,
            AttendanceEntry,
            AttendanceRecord,
            AttendanceSummary,
            MarkAttendanceDto,
            Notice,
            CreateNoticeDto,
            UpdateNoticeDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Schools", description = "School registration, login and profile"),
        (name = "Students", description = "Student management endpoints"),
        (name = "Teachers", description = "Teacher management endpoints"),
        (name = "Classes", description = "Class and subject/teacher assignment management"),
        (name = "Subjects", description = "Subject management endpoints"),
        (name = "Examinations", description = "Examination scheduling"),
        (name = "Periods", description = "Timetable period scheduling"),
        (name = "Attendance", description = "Attendance marking and history"),
        (name = "Notices", description = "School notice board"),
        (name = "Session", description = "Sign-out and session introspection")
    ),
    info(
        title = "SparkSchool API",
        version = "0.1.0",
        description = "A multi-tenant school administration REST API built with Rust, Axum, and PostgreSQL featuring JWT-based authentication.",
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
