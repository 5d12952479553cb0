pub mod classes;
pub mod exams;
pub mod memberships;
pub mod results;
pub mod subjects;
