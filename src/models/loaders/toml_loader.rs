use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use tokio::fs;

use crate::models::dataset::WeeklyDataset;
use crate::models::record::LessonRecord;
use crate::models::settings::EngineSettings;
use crate::models::timetable::WeeklyTimetable;

/// records.toml 파일 구조
#[derive(Debug, Deserialize)]
struct RecordsFile {
    #[serde(default)]
    records: Vec<LessonRecord>,
}

/// 기록 목록을 학급별로 묶고 최신순으로 정렬
///
/// 엔진은 기록이 최신순(날짜 내림차순, 같은 날짜는 차시 내림차순)이라고
/// 가정하므로 로더가 그 불변식을 보장한다.
fn group_records(records: Vec<LessonRecord>) -> HashMap<String, Vec<LessonRecord>> {
    let mut by_class: HashMap<String, Vec<LessonRecord>> = HashMap::new();
    for record in records {
        by_class.entry(record.class_id.clone()).or_default().push(record);
    }
    for class_records in by_class.values_mut() {
        class_records.sort_by(|a, b| b.date.cmp(&a.date).then(b.sequence.cmp(&a.sequence)));
    }
    by_class
}

/// TOML 파일에서 주간 시간표 로드
pub async fn load_timetable(path: &Path) -> Result<WeeklyTimetable> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("시간표 파일을 읽을 수 없습니다: {}", path.display()))?;

    let timetable: WeeklyTimetable = toml::from_str(&content)
        .with_context(|| format!("시간표 파일을 해석할 수 없습니다: {}", path.display()))?;

    // 학급 ID 형식 점검 ("학년-반" 꼴이 아니면 경고만 남긴다)
    if let Ok(re) = Regex::new(r"^\d+-\d+$") {
        for class in &timetable.classes {
            if !re.is_match(&class.id) {
                tracing::warn!("⚠️ 학급 ID 형식이 예상과 다릅니다: {}", class.id);
            }
        }
    }

    Ok(timetable)
}

/// TOML 파일에서 수업 기록 로드
pub async fn load_records(path: &Path) -> Result<HashMap<String, Vec<LessonRecord>>> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        tracing::info!("기록 파일이 없어 빈 기록으로 시작합니다: {}", path.display());
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("기록 파일을 읽을 수 없습니다: {}", path.display()))?;

    let file: RecordsFile = toml::from_str(&content)
        .with_context(|| format!("기록 파일을 해석할 수 없습니다: {}", path.display()))?;

    Ok(group_records(file.records))
}

/// TOML 파일에서 엔진 설정 로드 (없으면 기본값)
pub async fn load_settings(path: &Path) -> Result<EngineSettings> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        tracing::info!("설정 파일이 없어 기본 설정을 사용합니다: {}", path.display());
        return Ok(EngineSettings::default());
    }

    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("설정 파일을 읽을 수 없습니다: {}", path.display()))?;

    let settings: EngineSettings = toml::from_str(&content)
        .with_context(|| format!("설정 파일을 해석할 수 없습니다: {}", path.display()))?;

    Ok(settings)
}

/// 데이터 폴더에서 주간 스냅샷 전체 로드
///
/// # 인자
/// - `folder_path`: timetable.toml / records.toml / settings.toml이 있는 폴더
///
/// # 반환
/// 엔진 입력으로 쓸 `WeeklyDataset`
pub async fn load_weekly_dataset(folder_path: &str) -> Result<WeeklyDataset> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("데이터 폴더가 없습니다: {}", folder_path);
    }

    let timetable = load_timetable(&folder.join("timetable.toml")).await?;
    let records = load_records(&folder.join("records.toml")).await?;
    let settings = load_settings(&folder.join("settings.toml")).await?;

    tracing::info!(
        "✓ 주간 데이터 로드 완료: 학급 {}개, 배정 칸 {}개, 기록 학급 {}개",
        timetable.classes.len(),
        timetable.slots.len(),
        records.len()
    );

    Ok(WeeklyDataset {
        timetable,
        records,
        settings,
    })
}
