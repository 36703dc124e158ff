/// 学生名单加载模块
/// Student roster loading module
use anyhow::Result;
use std::path::Path;

/// 名单条目: 姓名 + 学号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub name: String,
    pub reg_id: String,
}

/// 从CSV文件加载学生名单 (首行为表头,每行只取前两列)
///
/// 文件不存在时返回空名单,不报错
pub fn load_roster(path: &Path) -> Result<Vec<Student>> {
    if !path.exists() {
        eprintln!("⚠️  名单文件不存在: {} (按空名单处理)", path.display());
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let mut students = Vec::new();
    for record in reader.records() {
        let record = record?;
        // 不足两列的行跳过
        if record.len() < 2 {
            continue;
        }
        students.push(Student {
            name: record[0].to_string(),
            reg_id: record[1].to_string(),
        });
    }

    Ok(students)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("qrscan_roster_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_load_roster_basic() {
        let path = temp_path("basic.csv");
        std::fs::write(&path, "name,reg_id\nAlice,A1\nBob,B2\n").unwrap();

        let roster = load_roster(&path).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].name, "Alice");
        assert_eq!(roster[0].reg_id, "A1");
        assert_eq!(roster[1].name, "Bob");
        assert_eq!(roster[1].reg_id, "B2");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_roster_skips_short_rows() {
        let path = temp_path("short.csv");
        // 第二行只有一列,应被跳过
        std::fs::write(&path, "name,reg_id\nAlice,A1\nBob\nCarol,C3\n").unwrap();

        let roster = load_roster(&path).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[1].reg_id, "C3");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_roster_extra_columns_ignored() {
        let path = temp_path("extra.csv");
        std::fs::write(&path, "name,reg_id,note\nAlice,A1,late\n").unwrap();

        let roster = load_roster(&path).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].name, "Alice");
        assert_eq!(roster[0].reg_id, "A1");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_yields_empty_roster() {
        let path = temp_path("does_not_exist.csv");
        let roster = load_roster(&path).unwrap();
        assert!(roster.is_empty());
    }
}
