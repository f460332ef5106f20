use serde::{Deserialize, Serialize};

/// 학급 정보
///
/// 외부 학급 대장이 관리하는 불변 참조 데이터.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassInfo {
    /// 학급 ID (예: "3-1")
    pub id: String,
    /// 학년
    pub grade: u8,
    /// 반 번호
    pub class_num: u8,
    /// 표시 색상 (UI용 HEX 코드)
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "#4F86C6".to_string()
}

impl ClassInfo {
    /// 표시용 이름 (예: "3학년 1반")
    pub fn display_name(&self) -> String {
        format!("{}학년 {}반", self.grade, self.class_num)
    }
}

impl std::fmt::Display for ClassInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_format() {
        let class = ClassInfo {
            id: "5-2".to_string(),
            grade: 5,
            class_num: 2,
            color: default_color(),
        };
        assert_eq!(class.display_name(), "5학년 2반");
    }
}
