/// 考勤数据系统 (Attendance System)
///
/// - roster: 学生名单加载
/// - book:   考勤记录与CSV持久化
pub mod book;
pub mod roster;

pub use book::{AttendanceBook, AttendanceRecord, Status};
pub use roster::{load_roster, Student};
