use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::Datelike;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::models::activity::ActivityCandidate;
use crate::models::dataset::WeeklyDataset;
use crate::models::loaders;
use crate::models::recommendation::{Recommendation, SlotRecommendation};
use crate::models::timetable::Weekday;
use crate::models::weather::{AirQualitySnapshot, WeatherSnapshot};
use crate::orchestrator::Recommender;
use crate::services::ai_enhancer::AiEnhancer;
use crate::utils::logging;

/// 애플리케이션 주 구조
pub struct App {
    config: Config,
    dataset: WeeklyDataset,
    catalog: Vec<ActivityCandidate>,
}

impl App {
    /// 애플리케이션 초기화
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::init_log_file(&config.output_log_file)?;

        // 주간 데이터와 카탈로그 로드
        info!("\n📁 주간 데이터를 불러오는 중...");
        let dataset = loaders::load_weekly_dataset(&config.data_folder).await?;
        let catalog = loaders::load_catalog(&PathBuf::from(&config.catalog_file)).await?;

        logging::log_startup(&dataset.timetable.week_start.to_string());

        Ok(Self {
            config,
            dataset,
            catalog,
        })
    }

    /// 애플리케이션 주 로직 실행
    pub async fn run(&self) -> Result<()> {
        // 날씨/대기질 실황 조회 (실패해도 기본값으로 계속)
        let (weather, air) = fetch_snapshots(&self.config).await;

        let mut recommender = Recommender::new(
            self.dataset.clone(),
            self.catalog.clone(),
            &weather,
            &air,
            AiEnhancer::new(&self.config),
        );

        logging::log_weather(
            &recommender.weather().text,
            recommender.weather().reason.as_deref(),
        );

        // 주간 추천 계산과 출력
        let week = recommender.week_recommendations();
        let mut stats = WeekStats::default();

        for (day, day_recs) in &week {
            logging::log_day_start(day.label(), day_recs.len());
            for rec in day_recs {
                log_slot(rec, self.config.verbose_logging);
                stats.count(&rec.outcome);
            }
        }

        append_week_plan(&self.config.output_log_file, &week)?;

        // 오늘 추천의 AI 해설 (설정으로 켠 경우에만)
        if self.config.enable_ai_summary {
            if let Some(today) = today_weekday() {
                self.run_ai_summaries(&mut recommender, today).await;
            } else {
                info!("💡 주말이라 AI 해설을 건너뜁니다");
            }
        }

        logging::print_final_stats(
            stats.recommended,
            stats.skipped,
            stats.no_data,
            &self.config.output_log_file,
        );

        Ok(())
    }

    /// 오늘 수업이 있는 학급들의 AI 해설 생성
    ///
    /// 호출 측 규약대로 요청 사이에 쿨다운만큼 기다린다.
    async fn run_ai_summaries(&self, recommender: &mut Recommender, today: Weekday) {
        let class_ids: Vec<String> = recommender
            .day_recommendations(today)
            .into_iter()
            .filter(|r| !r.outcome.is_skipped())
            .map(|r| r.class_id)
            .collect();

        if class_ids.is_empty() {
            info!("💡 오늘은 해설할 추천이 없습니다");
            return;
        }

        info!("\n🤖 오늘({}) 추천의 AI 해설을 생성합니다...", today.label());

        for (idx, class_id) in class_ids.iter().enumerate() {
            if idx > 0 {
                tokio::time::sleep(Duration::from_secs(self.config.ai_cooldown_secs)).await;
            }
            match recommender.enrich_class(class_id, today).await {
                Ok(Some(text)) => {
                    info!("✓ [{}] {}", class_id, logging::truncate_text(&text, 80));
                }
                Ok(None) => {
                    info!("[{}] 해설할 추천이 없습니다", class_id);
                }
                Err(e) => {
                    error!("❌ [{}] AI 해설 실패: {}", class_id, e);
                }
            }
        }
    }
}

/// 주간 통계
#[derive(Debug, Default)]
struct WeekStats {
    recommended: usize,
    skipped: usize,
    no_data: usize,
}

impl WeekStats {
    fn count(&mut self, outcome: &Recommendation) {
        match outcome {
            Recommendation::Skipped { .. } => self.skipped += 1,
            Recommendation::Computed { detail: Some(_), .. } => self.recommended += 1,
            Recommendation::Computed { detail: None, .. } => self.no_data += 1,
        }
    }
}

// ========== 보조 함수 ==========

/// 날씨/대기질 실황 동시 조회
///
/// 둘 중 하나라도 실패하면 경고만 남기고 기본값으로 진행한다.
/// 판정기는 기본값으로도 항상 답을 낸다.
async fn fetch_snapshots(config: &Config) -> (WeatherSnapshot, AirQualitySnapshot) {
    if config.weather_service_key.is_empty() {
        warn!("⚠️ 기상청 서비스 키가 없어 기본 날씨값으로 진행합니다");
        return (WeatherSnapshot::default(), AirQualitySnapshot::default());
    }

    let (weather, air) = tokio::join!(
        crate::api::fetch_live_weather(config),
        crate::api::fetch_air_quality(config),
    );

    let weather = weather.unwrap_or_else(|e| {
        warn!("⚠️ 날씨 조회 실패, 기본값 사용: {}", e);
        WeatherSnapshot::default()
    });
    let air = air.unwrap_or_else(|e| {
        warn!("⚠️ 대기질 조회 실패, 기본값 사용: {}", e);
        AirQualitySnapshot::default()
    });

    (weather, air)
}

/// 오늘의 수업 요일 (주말이면 None)
fn today_weekday() -> Option<Weekday> {
    match chrono::Local::now().weekday() {
        chrono::Weekday::Mon => Some(Weekday::Mon),
        chrono::Weekday::Tue => Some(Weekday::Tue),
        chrono::Weekday::Wed => Some(Weekday::Wed),
        chrono::Weekday::Thu => Some(Weekday::Thu),
        chrono::Weekday::Fri => Some(Weekday::Fri),
        _ => None,
    }
}

/// 칸 하나의 추천을 로그로 출력
fn log_slot(rec: &SlotRecommendation, verbose: bool) {
    match &rec.outcome {
        Recommendation::Skipped { skip_message, .. } => {
            info!("  {}교시 [{}] ⏭️ {}", rec.period, rec.class_id, skip_message);
        }
        Recommendation::Computed { detail: Some(detail), adjust_message, special_message } => {
            info!(
                "  {}교시 [{}] {} ({} · {} · {})",
                rec.period,
                rec.class_id,
                detail.activity,
                detail.domain,
                detail.ace_phase,
                detail.space
            );
            if verbose {
                info!("      💡 {}", detail.rationale);
                if !detail.alternatives.is_empty() {
                    info!("      대안: {}", detail.alternatives.join(", "));
                }
            }
            if let Some(msg) = adjust_message {
                info!("      🔔 {}", msg);
            }
            if let Some(msg) = special_message {
                info!("      ⭐ {}", msg);
            }
        }
        Recommendation::Computed { detail: None, .. } => {
            info!("  {}교시 [{}] ⚠️ 활동 자료 없음", rec.period, rec.class_id);
        }
    }
}

/// 주간 계획을 출력 파일에 덧붙이기
fn append_week_plan(
    path: &str,
    week: &std::collections::BTreeMap<Weekday, Vec<SlotRecommendation>>,
) -> Result<()> {
    let mut file = OpenOptions::new().append(true).open(path)?;

    for (day, day_recs) in week {
        writeln!(file, "[{}요일]", day.label())?;
        if day_recs.is_empty() {
            writeln!(file, "  (수업 없음)")?;
        }
        for rec in day_recs {
            match &rec.outcome {
                Recommendation::Skipped { skip_message, .. } => {
                    writeln!(file, "  {}교시 {} - {}", rec.period, rec.class_id, skip_message)?;
                }
                Recommendation::Computed { detail: Some(detail), .. } => {
                    writeln!(
                        file,
                        "  {}교시 {} - {} ({} / {})",
                        rec.period, rec.class_id, detail.activity, detail.domain, detail.space
                    )?;
                }
                Recommendation::Computed { detail: None, .. } => {
                    writeln!(file, "  {}교시 {} - 활동 자료 없음", rec.period, rec.class_id)?;
                }
            }
        }
        writeln!(file)?;
    }

    Ok(())
}
