/// 二维码载荷解析模块
/// QR payload parsing
use anyhow::{anyhow, Result};

/// 解析后的二维码内容: `"Name: <name>, RegID: <reg_id>"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub name: String,
    pub reg_id: String,
}

impl Payload {
    /// 按位置解析: 先按", "切字段,再按": "取值
    ///
    /// 字段名不校验,只取前两个字段的值
    pub fn parse(data: &str) -> Result<Self> {
        let mut fields = data.split(", ");
        let name = field_value(fields.next())
            .ok_or_else(|| anyhow!("载荷缺少姓名字段: {:?}", data))?;
        let reg_id = field_value(fields.next())
            .ok_or_else(|| anyhow!("载荷缺少学号字段: {:?}", data))?;

        Ok(Self {
            name: name.to_string(),
            reg_id: reg_id.to_string(),
        })
    }
}

fn field_value(field: Option<&str>) -> Option<&str> {
    field.and_then(|f| f.split_once(": ")).map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed() {
        let payload = Payload::parse("Name: Alice, RegID: A1").unwrap();
        assert_eq!(payload.name, "Alice");
        assert_eq!(payload.reg_id, "A1");
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(Payload::parse("garbage").is_err());
    }

    #[test]
    fn test_parse_missing_reg_id_fails() {
        assert!(Payload::parse("Name: Alice").is_err());
    }

    #[test]
    fn test_parse_extra_fields_ignored() {
        let payload = Payload::parse("Name: Bob, RegID: B2, Class: CS101").unwrap();
        assert_eq!(payload.name, "Bob");
        assert_eq!(payload.reg_id, "B2");
    }

    #[test]
    fn test_parse_is_positional_not_keyed() {
        // 字段名不校验,按位置取值
        let payload = Payload::parse("N: Carol, R: C3").unwrap();
        assert_eq!(payload.name, "Carol");
        assert_eq!(payload.reg_id, "C3");
    }

    #[test]
    fn test_parse_empty_string_fails() {
        assert!(Payload::parse("").is_err());
    }
}
