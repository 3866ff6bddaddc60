//! 预导入模块，方便使用

pub use super::batches::{ActiveModel as BatchActiveModel, Entity as Batches, Model as BatchModel};
pub use super::course_topics::{
    ActiveModel as CourseTopicActiveModel, Entity as CourseTopics, Model as CourseTopicModel,
};
pub use super::courses::{
    ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel,
};
pub use super::staff::{ActiveModel as StaffActiveModel, Entity as Staff, Model as StaffModel};
pub use super::staff_attendance::{
    ActiveModel as StaffAttendanceActiveModel, Entity as StaffAttendance,
    Model as StaffAttendanceModel,
};
pub use super::staff_courses::{
    ActiveModel as StaffCourseActiveModel, Entity as StaffCourses, Model as StaffCourseModel,
};
pub use super::student_attendance::{
    ActiveModel as StudentAttendanceActiveModel, Entity as StudentAttendance,
    Model as StudentAttendanceModel,
};
pub use super::student_topic_progress::{
    ActiveModel as TopicProgressActiveModel, Entity as StudentTopicProgress,
    Model as TopicProgressModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
