pub mod attendance;
pub mod classes;
pub mod examinations;
pub mod notices;
pub mod periods;
pub mod schools;
pub mod session;
pub mod students;
pub mod subjects;
pub mod teachers;
