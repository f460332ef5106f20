use std::collections::HashMap;

use lesson_recommender::config::Config;
use lesson_recommender::models::settings::{EngineSettings, EventKind, ManualSpecialEvent};
use lesson_recommender::models::timetable::WeeklyTimetable;
use lesson_recommender::models::weather::{AirQualitySnapshot, PrecipType, WeatherSnapshot};
use lesson_recommender::models::{ActivityCandidate, Domain, LessonRecord, WeeklyDataset};
use lesson_recommender::services::ai_enhancer::AiEnhancer;
use lesson_recommender::services::weather_context::{self, OutdoorStatus};
use lesson_recommender::{Recommendation, Recommender, Weekday};

fn sample_timetable() -> WeeklyTimetable {
    toml::from_str(
        r#"
        week_start = "2026-04-20"

        [[classes]]
        id = "3-1"
        grade = 3
        class_num = 1

        [[slots]]
        day = "mon"
        period = 1
        class_id = "3-1"

        [[slots]]
        day = "tue"
        period = 2
        class_id = "3-1"
        memo = "미세먼지 주의보"

        [[slots]]
        day = "wed"
        period = 1
        class_id = "3-1"
        memo = "운동회 예행 연습"
    "#,
    )
    .unwrap()
}

fn sample_catalog() -> Vec<ActivityCandidate> {
    serde_json::from_str(
        r#"[
            {"id": "a1", "name": "운동장 티볼 게임", "domain": "스포츠",
             "acePhase": "E", "spaces": ["운동장"]},
            {"id": "a2", "name": "교실 매트 스트레칭", "domain": "운동",
             "acePhase": "A", "spaces": ["교실", "체육관"]},
            {"id": "a3", "name": "강당 리듬 표현", "domain": "표현",
             "acePhase": "A", "spaces": ["강당"]}
        ]"#,
    )
    .unwrap()
}

fn recommender_with(weather: WeatherSnapshot, events: Vec<ManualSpecialEvent>) -> Recommender {
    let dataset = WeeklyDataset {
        timetable: sample_timetable(),
        records: HashMap::new(),
        settings: EngineSettings {
            manual_special_events: events,
            ..Default::default()
        },
    };
    Recommender::new(
        dataset,
        sample_catalog(),
        &weather,
        &AirQualitySnapshot::default(),
        AiEnhancer::new(&Config::default()),
    )
}

#[test]
fn rainy_day_prefers_indoor_capable_activity() {
    let rain = WeatherSnapshot {
        pty: PrecipType::Rain,
        ..Default::default()
    };

    // 판정: 강수가 원인인 야외 비권장
    let ctx = weather_context::resolve(&rain, &AirQualitySnapshot::default());
    assert_eq!(ctx.status, OutdoorStatus::NotRecommended);
    assert_eq!(ctx.reason.as_deref(), Some("비"));

    // 비 오는 월요일: 운동장 전용 활동이 1위가 되어서는 안 된다
    let recommender = recommender_with(rain, vec![]);
    let monday = recommender.day_recommendations(Weekday::Mon);
    let detail = monday[0].outcome.detail().unwrap();
    assert_ne!(detail.activity, "운동장 티볼 게임");
    assert_eq!(detail.activity, "교실 매트 스트레칭");
}

#[test]
fn indoor_event_eliminates_outdoor_only_candidate() {
    // 화요일 메모의 "미세먼지"가 실내 전환을 강제하고, 운동장 전용
    // 활동은 쓸 수 있는 공간이 없어 탈락 수준으로 밀려난다
    let recommender = recommender_with(WeatherSnapshot::default(), vec![]);
    let tuesday = recommender.day_recommendations(Weekday::Tue);
    let detail = tuesday[0].outcome.detail().unwrap();

    assert_ne!(detail.activity, "운동장 티볼 게임");
    assert_ne!(detail.space, "운동장");
    assert!(!detail.alternatives.is_empty());
}

#[test]
fn skip_memo_short_circuits_slot() {
    let recommender = recommender_with(WeatherSnapshot::default(), vec![]);
    let wednesday = recommender.day_recommendations(Weekday::Wed);

    match &wednesday[0].outcome {
        Recommendation::Skipped {
            skip_reason,
            skip_message,
        } => {
            assert_eq!(skip_reason, "운동회");
            assert_eq!(skip_message, "오늘은 운동회입니다! 체육 수업이 없어요.");
        }
        other => panic!("운동회 칸은 건너뛰어야 합니다: {:?}", other),
    }
}

#[test]
fn manual_skip_calendar_event_overrides_slot() {
    let events = vec![ManualSpecialEvent {
        date: "2026-04-20".parse().unwrap(),
        kind: EventKind::Skip,
        label: "재량휴업일".to_string(),
    }];
    let recommender = recommender_with(WeatherSnapshot::default(), events);
    let monday = recommender.day_recommendations(Weekday::Mon);
    assert!(monday[0].outcome.is_skipped());
}

#[test]
fn empty_records_balance_and_sequence_defaults() {
    let recommender = recommender_with(WeatherSnapshot::default(), vec![]);

    let balance = recommender.domain_balance("3-1");
    assert_eq!(balance.total, 0);
    for (_, count) in balance.counts {
        assert_eq!(count, 0);
    }
    assert_eq!(balance.suggested, Domain::Sport);
    assert_eq!(recommender.next_lesson_sequence("3-1", Domain::Sport), 1);
}

#[test]
fn identical_inputs_give_identical_week() {
    let first = recommender_with(WeatherSnapshot::default(), vec![]);
    let second = recommender_with(WeatherSnapshot::default(), vec![]);

    let week_a = serde_json::to_string(&first.week_recommendations()).unwrap();
    let week_b = serde_json::to_string(&second.week_recommendations()).unwrap();
    assert_eq!(week_a, week_b);
}

#[test]
fn continuity_with_records_feeds_progression() {
    let records_toml: HashMap<String, Vec<LessonRecord>> = {
        let record: LessonRecord = toml::from_str(
            r#"
            class_id = "3-1"
            date = "2026-04-13"
            activity = "교실 매트 스트레칭"
            domain = "운동"
            ace_phase = "A"
            sequence = 2
        "#,
        )
        .unwrap();
        HashMap::from([("3-1".to_string(), vec![record])])
    };

    let dataset = WeeklyDataset {
        timetable: sample_timetable(),
        records: records_toml,
        settings: EngineSettings::default(),
    };
    let recommender = Recommender::new(
        dataset,
        sample_catalog(),
        &WeatherSnapshot::default(),
        &AirQualitySnapshot::default(),
        AiEnhancer::new(&Config::default()),
    );

    // 직전 활동과 이름이 같은 후보는 반복 감점 때문에 1위가 못 된다
    let monday = recommender.day_recommendations(Weekday::Mon);
    let detail = monday[0].outcome.detail().unwrap();
    assert_ne!(detail.activity, "교실 매트 스트레칭");

    // 운동 영역 차시는 2까지 기록되어 있으므로 다음은 3
    assert_eq!(recommender.next_lesson_sequence("3-1", Domain::Fitness), 3);
    assert_eq!(recommender.next_lesson_sequence("3-1", Domain::Expression), 1);
}

#[test]
fn enrich_skipped_slot_returns_none() {
    // 수요일은 운동회로 건너뛰므로 해설 대상이 없다
    let mut recommender = recommender_with(WeatherSnapshot::default(), vec![]);
    let result =
        tokio_test::block_on(recommender.enrich_class("3-1", Weekday::Wed)).unwrap();
    assert!(result.is_none());
}
