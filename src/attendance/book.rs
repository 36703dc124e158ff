/// 考勤表模块: 内存记录 + CSV持久化
/// Attendance book: in-memory records with CSV persistence
use super::roster::Student;
use anyhow::Result;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// CSV表头,与save/load的列顺序一致
const HEADER: [&str; 4] = ["name", "reg_id", "status", "last_seen"];

/// 考勤状态 (CSV中序列化为整数: 0=缺席, 1=出席)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Status {
    Absent,
    Present,
}

impl From<Status> for u8 {
    fn from(status: Status) -> u8 {
        match status {
            Status::Absent => 0,
            Status::Present => 1,
        }
    }
}

impl TryFrom<u8> for Status {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Status::Absent),
            1 => Ok(Status::Present),
            other => Err(format!("无效的考勤状态: {}", other)),
        }
    }
}

/// 单个学生的考勤记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub name: String,
    pub reg_id: String,
    pub status: Status,
    pub last_seen: Option<DateTime<Local>>,
}

/// 考勤表: 按名单顺序保存记录,学号索引定位
///
/// 记录集合在进程生命周期内固定为名单的学号集合,
/// 签到只修改状态和时间,不增删记录
pub struct AttendanceBook {
    path: PathBuf,
    records: Vec<AttendanceRecord>,
    index: HashMap<String, usize>,
}

impl AttendanceBook {
    /// 从名单初始化,全部记为缺席
    pub fn new(path: impl Into<PathBuf>, roster: &[Student]) -> Self {
        let mut records: Vec<AttendanceRecord> = Vec::with_capacity(roster.len());
        let mut index: HashMap<String, usize> = HashMap::with_capacity(roster.len());

        for student in roster {
            let record = AttendanceRecord {
                name: student.name.clone(),
                reg_id: student.reg_id.clone(),
                status: Status::Absent,
                last_seen: None,
            };
            match index.get(&student.reg_id) {
                // 学号重复: 后出现的覆盖先前的,位置不变
                Some(&slot) => records[slot] = record,
                None => {
                    index.insert(student.reg_id.clone(), records.len());
                    records.push(record);
                }
            }
        }

        Self {
            path: path.into(),
            records,
            index,
        }
    }

    /// 签到: 已知学号置为出席并刷新扫描时间,重复扫描幂等
    ///
    /// 未知学号只打印告警,不自动注册
    pub fn mark(&mut self, name: &str, reg_id: &str) -> bool {
        match self.index.get(reg_id) {
            Some(&slot) => {
                let record = &mut self.records[slot];
                record.status = Status::Present;
                record.last_seen = Some(Local::now());
                true
            }
            None => {
                eprintln!("⚠️  {} (学号 {}) 不在名单中,忽略", name, reg_id);
                false
            }
        }
    }

    /// 全量写盘: 先写临时文件再rename,写入中途崩溃不会破坏旧表
    pub fn save(&self) -> Result<()> {
        let tmp = self.path.with_extension("csv.tmp");
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_path(&tmp)?;
            // 表头手动写出,空名单也要有表头
            writer.write_record(HEADER)?;
            for record in &self.records {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// 读回考勤表 (与save同格式)
    pub fn load(path: &Path) -> Result<Vec<AttendanceRecord>> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut records = Vec::new();
        for record in reader.deserialize() {
            records.push(record?);
        }
        Ok(records)
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    /// 出席人数
    pub fn present_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.status == Status::Present)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn roster() -> Vec<Student> {
        vec![
            Student {
                name: "Alice".to_string(),
                reg_id: "A1".to_string(),
            },
            Student {
                name: "Bob".to_string(),
                reg_id: "B2".to_string(),
            },
        ]
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("qrscan_book_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_initial_all_absent() {
        let book = AttendanceBook::new(temp_path("init.csv"), &roster());
        assert_eq!(book.records().len(), 2);
        for record in book.records() {
            assert_eq!(record.status, Status::Absent);
            assert!(record.last_seen.is_none());
        }
        assert_eq!(book.present_count(), 0);
    }

    #[test]
    fn test_mark_known_sets_present() {
        let mut book = AttendanceBook::new(temp_path("mark.csv"), &roster());
        assert!(book.mark("Alice", "A1"));

        let alice = &book.records()[0];
        assert_eq!(alice.status, Status::Present);
        assert!(alice.last_seen.is_some());

        // Bob不受影响
        let bob = &book.records()[1];
        assert_eq!(bob.status, Status::Absent);
        assert!(bob.last_seen.is_none());
        assert_eq!(book.present_count(), 1);
    }

    #[test]
    fn test_remark_moves_last_seen_forward() {
        let mut book = AttendanceBook::new(temp_path("remark.csv"), &roster());
        assert!(book.mark("Alice", "A1"));
        let first = book.records()[0].last_seen.unwrap();

        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(book.mark("Alice", "A1"));
        let second = book.records()[0].last_seen.unwrap();

        assert_eq!(book.records()[0].status, Status::Present);
        assert!(second > first);
    }

    #[test]
    fn test_mark_unknown_changes_nothing() {
        let mut book = AttendanceBook::new(temp_path("unknown.csv"), &roster());
        assert!(!book.mark("Mallory", "Z9"));

        assert_eq!(book.records().len(), 2);
        for record in book.records() {
            assert_eq!(record.status, Status::Absent);
            assert!(record.last_seen.is_none());
        }
    }

    #[test]
    fn test_duplicate_reg_id_last_wins() {
        let mut duped = roster();
        duped.push(Student {
            name: "Alicia".to_string(),
            reg_id: "A1".to_string(),
        });

        let book = AttendanceBook::new(temp_path("dup.csv"), &duped);
        assert_eq!(book.records().len(), 2);
        // 位置不变,姓名取后出现的
        assert_eq!(book.records()[0].name, "Alicia");
        assert_eq!(book.records()[0].reg_id, "A1");
    }

    #[test]
    fn test_save_load_round_trip() {
        let path = temp_path("roundtrip.csv");
        let mut book = AttendanceBook::new(&path, &roster());
        book.mark("Alice", "A1");
        book.save().unwrap();

        let loaded = AttendanceBook::load(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        for (loaded, original) in loaded.iter().zip(book.records()) {
            assert_eq!(loaded.name, original.name);
            assert_eq!(loaded.reg_id, original.reg_id);
            assert_eq!(loaded.status, original.status);
            // 时间戳读回后表示同一时刻
            assert_eq!(loaded.last_seen, original.last_seen);
        }

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_leaves_no_tmp_file() {
        let path = temp_path("atomic.csv");
        let book = AttendanceBook::new(&path, &roster());
        book.save().unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("csv.tmp").exists());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_status_serializes_as_integers() {
        let path = temp_path("ints.csv");
        let mut book = AttendanceBook::new(&path, &roster());
        book.mark("Alice", "A1");
        book.save().unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let mut lines = raw.lines();
        assert_eq!(lines.next().unwrap(), "name,reg_id,status,last_seen");
        assert!(lines.next().unwrap().starts_with("Alice,A1,1,"));
        assert_eq!(lines.next().unwrap(), "Bob,B2,0,");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_empty_book_writes_header() {
        let path = temp_path("empty.csv");
        let book = AttendanceBook::new(&path, &[]);
        book.save().unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw.trim_end(), "name,reg_id,status,last_seen");

        std::fs::remove_file(&path).unwrap();
    }
}
