use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::topics::entities::CourseTopic;

/// 学生在某个知识点上的进度
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "progress.ts")]
pub struct TopicProgress {
    pub id: i64,
    pub student_id: i64,
    pub topic_id: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub marks: Option<i32>,
    /// 最后修改此行的教职工姓名
    pub sign: String,
}

impl TopicProgress {
    /// 与提交值是否不同
    pub fn differs_from(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        marks: Option<i32>,
    ) -> bool {
        self.start_date != start_date || self.end_date != end_date || self.marks != marks
    }
}

// 进度表中的一行
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "progress.ts")]
pub struct ProgressRow {
    #[serde(flatten)]
    #[ts(flatten)]
    pub progress: TopicProgress,
    pub module_name: String,
    pub topic_name: String,
}

// 学生详情：知识点及对应进度（可能尚无记录）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "progress.ts")]
pub struct TopicWithProgress {
    pub topic: CourseTopic,
    pub progress: Option<TopicProgress>,
}

// 管理端进度列表
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "progress.ts")]
pub struct ProgressListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub progress: TopicProgress,
    pub student_name: String,
    pub staff_name: Option<String>,
    pub course_name: String,
    pub module_name: String,
    pub topic_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_differs_from() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1);
        let row = TopicProgress {
            id: 1,
            student_id: 1,
            topic_id: 1,
            start_date: date,
            end_date: None,
            marks: Some(7),
            sign: "Asha".into(),
        };
        assert!(!row.differs_from(date, None, Some(7)));
        assert!(row.differs_from(date, None, Some(8)));
        assert!(row.differs_from(None, None, Some(7)));
    }
}
