//! 로그 도구 모듈
//!
//! 로그 초기화와 진행 상황 출력 보조 함수를 제공한다

use std::fs;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::{AppError, AppResult};

/// tracing 구독자 초기화
///
/// RUST_LOG 환경 변수가 있으면 그 필터를, 없으면 info 수준을 쓴다.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// 주간 계획 출력 파일 초기화
///
/// # 인자
/// - `log_file_path`: 출력 파일 경로
pub fn init_log_file(log_file_path: &str) -> AppResult<()> {
    let log_header = format!(
        "{}\n주간 수업 추천 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
        .map_err(|e| AppError::file_write_failed(log_file_path, e))?;
    Ok(())
}

/// 프로그램 시작 정보 기록
///
/// # 인자
/// - `week_start`: 주 시작일 표시 문자열
pub fn log_startup(week_start: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 프로그램 시작 - 주간 수업 추천 모드");
    info!("📅 대상 주: {} 시작", week_start);
    info!("{}", "=".repeat(60));
}

/// 날씨 판정 결과 기록
///
/// # 인자
/// - `status_text`: 적합도 문구
/// - `reason`: 판정 원인 (없을 수 있음)
pub fn log_weather(status_text: &str, reason: Option<&str>) {
    match reason {
        Some(reason) => info!("🌤️ 오늘의 야외 판정: {} ({})", status_text, reason),
        None => info!("🌤️ 오늘의 야외 판정: {}", status_text),
    }
}

/// 요일 처리 시작 기록
///
/// # 인자
/// - `day_label`: 요일 한글 이름
/// - `slot_count`: 해당 요일 칸 수
pub fn log_day_start(day_label: &str, slot_count: usize) {
    info!("\n{}", "─".repeat(60));
    info!("📋 {}요일 수업 {}개", day_label, slot_count);
    info!("{}", "─".repeat(60));
}

/// 최종 통계 출력
///
/// # 인자
/// - `recommended`: 추천이 계산된 칸 수
/// - `skipped`: 수업이 없는 칸 수
/// - `no_data`: 활동 자료가 없던 칸 수
/// - `log_file_path`: 출력 파일 경로
pub fn print_final_stats(
    recommended: usize,
    skipped: usize,
    no_data: usize,
    log_file_path: &str,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 주간 추천 완료 통계");
    info!(
        "완료 시간: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 추천 계산: {}개", recommended);
    info!("⏭️ 수업 없음: {}개", skipped);
    info!("⚠️ 자료 없음: {}개", no_data);
    info!("{}", "=".repeat(60));
    info!("\n주간 계획이 저장되었습니다: {}", log_file_path);
}

/// 긴 문자열을 로그 표시용으로 자르기
///
/// # 인자
/// - `text`: 원본 문자열
/// - `max_len`: 최대 길이
///
/// # 반환
/// 잘린 문자열
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
