use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 账号表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 教职工表（与账号一对一）
        manager
            .create_table(
                Table::create()
                    .table(Staff::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Staff::StaffId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Staff::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Staff::StaffName).string_len(100).not_null())
                    .col(ColumnDef::new(Staff::Contact).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Staff::StaffEmail)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Staff::Table, Staff::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::CourseId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Courses::CourseName)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // 教职工-课程关联表
        manager
            .create_table(
                Table::create()
                    .table(StaffCourses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StaffCourses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StaffCourses::StaffId).big_integer().not_null())
                    .col(ColumnDef::new(StaffCourses::CourseId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(StaffCourses::Table, StaffCourses::StaffId)
                            .to(Staff::Table, Staff::StaffId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StaffCourses::Table, StaffCourses::CourseId)
                            .to(Courses::Table, Courses::CourseId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 批次表
        manager
            .create_table(
                Table::create()
                    .table(Batches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Batches::BatchId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Batches::StaffId).big_integer().not_null())
                    .col(ColumnDef::new(Batches::BatchName).string_len(50).not_null())
                    .col(ColumnDef::new(Batches::StartTime).time().not_null())
                    .col(ColumnDef::new(Batches::EndTime).time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Batches::Table, Batches::StaffId)
                            .to(Staff::Table, Staff::StaffId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 学生表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::StudentId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Students::StudentName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Students::JoinDate).date().not_null())
                    .col(ColumnDef::new(Students::EndDate).date().null())
                    .col(ColumnDef::new(Students::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Students::StaffId).big_integer().null())
                    .col(ColumnDef::new(Students::BatchId).big_integer().null())
                    .col(
                        ColumnDef::new(Students::StudentEmail)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Students::StudentContact)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Students::Mode)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::CourseId)
                            .to(Courses::Table, Courses::CourseId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::StaffId)
                            .to(Staff::Table, Staff::StaffId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::BatchId)
                            .to(Batches::Table, Batches::BatchId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 课程知识点表
        manager
            .create_table(
                Table::create()
                    .table(CourseTopics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseTopics::TopicId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseTopics::CourseId).big_integer().not_null())
                    .col(
                        ColumnDef::new(CourseTopics::ModuleName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseTopics::TopicName)
                            .string_len(100)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseTopics::Table, CourseTopics::CourseId)
                            .to(Courses::Table, Courses::CourseId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 学习进度表
        manager
            .create_table(
                Table::create()
                    .table(StudentTopicProgress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentTopicProgress::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentTopicProgress::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentTopicProgress::TopicId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentTopicProgress::StartDate).date().null())
                    .col(ColumnDef::new(StudentTopicProgress::EndDate).date().null())
                    .col(ColumnDef::new(StudentTopicProgress::Marks).integer().null())
                    .col(
                        ColumnDef::new(StudentTopicProgress::Sign)
                            .string_len(100)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentTopicProgress::Table, StudentTopicProgress::StudentId)
                            .to(Students::Table, Students::StudentId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentTopicProgress::Table, StudentTopicProgress::TopicId)
                            .to(CourseTopics::Table, CourseTopics::TopicId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 教职工考勤表
        manager
            .create_table(
                Table::create()
                    .table(StaffAttendance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StaffAttendance::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StaffAttendance::StaffId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StaffAttendance::Date).date().not_null())
                    .col(ColumnDef::new(StaffAttendance::Time).time().not_null())
                    .col(
                        ColumnDef::new(StaffAttendance::WifiVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StaffAttendance::Table, StaffAttendance::StaffId)
                            .to(Staff::Table, Staff::StaffId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 学生考勤表
        manager
            .create_table(
                Table::create()
                    .table(StudentAttendance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentAttendance::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentAttendance::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentAttendance::Date).date().not_null())
                    .col(ColumnDef::new(StudentAttendance::Time).time().not_null())
                    .col(ColumnDef::new(StudentAttendance::Status).boolean().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentAttendance::Table, StudentAttendance::StudentId)
                            .to(Students::Table, Students::StudentId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 唯一约束
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_staff_courses_pair")
                    .table(StaffCourses::Table)
                    .col(StaffCourses::StaffId)
                    .col(StaffCourses::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_batches_staff_name")
                    .table(Batches::Table)
                    .col(Batches::StaffId)
                    .col(Batches::BatchName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_course_topics_course_module_topic")
                    .table(CourseTopics::Table)
                    .col(CourseTopics::CourseId)
                    .col(CourseTopics::ModuleName)
                    .col(CourseTopics::TopicName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_progress_student_topic")
                    .table(StudentTopicProgress::Table)
                    .col(StudentTopicProgress::StudentId)
                    .col(StudentTopicProgress::TopicId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_staff_attendance_day")
                    .table(StaffAttendance::Table)
                    .col(StaffAttendance::StaffId)
                    .col(StaffAttendance::Date)
                    .col(StaffAttendance::WifiVerified)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_student_attendance_day")
                    .table(StudentAttendance::Table)
                    .col(StudentAttendance::StudentId)
                    .col(StudentAttendance::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 查询索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_staff_batch")
                    .table(Students::Table)
                    .col(Students::StaffId)
                    .col(Students::BatchId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_course_id")
                    .table(Students::Table)
                    .col(Students::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_batches_start_time")
                    .table(Batches::Table)
                    .col(Batches::StartTime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(StudentAttendance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StaffAttendance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentTopicProgress::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseTopics::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Batches::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StaffCourses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Staff::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    Status,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Staff {
    Table,
    StaffId,
    UserId,
    StaffName,
    Contact,
    StaffEmail,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    CourseId,
    CourseName,
}

#[derive(DeriveIden)]
enum StaffCourses {
    Table,
    Id,
    StaffId,
    CourseId,
}

#[derive(DeriveIden)]
enum Batches {
    Table,
    BatchId,
    StaffId,
    BatchName,
    StartTime,
    EndTime,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    StudentId,
    StudentName,
    JoinDate,
    EndDate,
    CourseId,
    StaffId,
    BatchId,
    StudentEmail,
    StudentContact,
    Mode,
}

#[derive(DeriveIden)]
enum CourseTopics {
    Table,
    TopicId,
    CourseId,
    ModuleName,
    TopicName,
}

#[derive(DeriveIden)]
enum StudentTopicProgress {
    Table,
    Id,
    StudentId,
    TopicId,
    StartDate,
    EndDate,
    Marks,
    Sign,
}

#[derive(DeriveIden)]
enum StaffAttendance {
    Table,
    Id,
    StaffId,
    Date,
    Time,
    WifiVerified,
}

#[derive(DeriveIden)]
enum StudentAttendance {
    Table,
    Id,
    StudentId,
    Date,
    Time,
    Status,
}
