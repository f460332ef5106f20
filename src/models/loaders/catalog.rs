use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;

use crate::models::activity::ActivityCandidate;

/// JSON 자산에서 활동 카탈로그 로드
///
/// 카탈로그는 교육과정 CSV에서 동기화된 JSON 배열이다.
///
/// # 인자
/// - `path`: 카탈로그 JSON 파일 경로
///
/// # 반환
/// 전체 후보 활동 목록 (카탈로그 선언 순서 유지)
pub async fn load_catalog(path: &Path) -> Result<Vec<ActivityCandidate>> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("카탈로그 파일을 읽을 수 없습니다: {}", path.display()))?;

    let catalog: Vec<ActivityCandidate> = serde_json::from_str(&content)
        .with_context(|| format!("카탈로그 파일을 해석할 수 없습니다: {}", path.display()))?;

    tracing::info!("✓ 활동 카탈로그 로드 완료: {}개 활동", catalog.len());

    Ok(catalog)
}

/// 학년에 맞는 후보만 추려서 반환 (카탈로그 순서 유지)
pub fn candidates_for_grade(
    catalog: &[ActivityCandidate],
    grade: u8,
) -> Vec<ActivityCandidate> {
    catalog
        .iter()
        .filter(|a| a.fits_grade(grade))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Vec<ActivityCandidate> {
        serde_json::from_str(
            r#"[
                {"id": "a1", "name": "저학년 술래잡기", "domain": "운동",
                 "acePhase": "A", "grades": [1, 2], "spaces": ["운동장"]},
                {"id": "a2", "name": "전학년 스트레칭", "domain": "운동",
                 "acePhase": "A"},
                {"id": "a3", "name": "고학년 플래그풋볼", "domain": "스포츠",
                 "acePhase": "C", "grades": [5, 6], "spaces": ["운동장", "체육관"]}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn grade_filter_keeps_catalog_order() {
        let catalog = sample_catalog();
        let for_grade_5 = candidates_for_grade(&catalog, 5);
        let names: Vec<&str> = for_grade_5.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["전학년 스트레칭", "고학년 플래그풋볼"]);
    }

    #[test]
    fn no_match_yields_universal_only() {
        let catalog = sample_catalog();
        let for_grade_3 = candidates_for_grade(&catalog, 3);
        assert_eq!(for_grade_3.len(), 1);
        assert_eq!(for_grade_3[0].name, "전학년 스트레칭");
    }
}
