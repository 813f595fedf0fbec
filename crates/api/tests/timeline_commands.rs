//! Shift timeline command tests

mod support;

use serde_json::json;
use shiftline_api::commands::{session_gantt, shift_timeline, start_activity, stop_activity};
use shiftline_domain::{RemoteFailureKind, ShiftType, ShiftlineError, SourceTab};
use support::{site_time, TestSession};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn shift_timeline_detects_day_shift_and_draws_running_activity() {
    let session = TestSession::start_at(site_time(3, 8, 0)).await;
    let ctx = &session.ctx;

    start_activity(ctx, "Loading", "LD01", SourceTab::Work).await.unwrap();
    session.advance_minutes(60);
    start_activity(ctx, "Queueing", "QU02", SourceTab::Delay).await.unwrap();
    session.advance_minutes(30);

    let layout = shift_timeline(ctx, None).await;

    assert_eq!(layout.shift.shift_type, ShiftType::Day);
    assert_eq!(layout.time_labels.first().map(|l| l.label.as_str()), Some("06:00"));
    assert_eq!(layout.entries.len(), 2);
    assert_eq!(layout.entries[0].activity_code, "LD01");
    assert!(!layout.entries[0].ongoing);
    assert!(layout.entries[1].ongoing);
    assert_eq!(layout.entries[1].end_time, site_time(3, 9, 30));
    assert_eq!(layout.total_seconds, 5400);
}

#[tokio::test]
async fn shift_timeline_honours_explicit_night_shift() {
    let session = TestSession::start_at(site_time(3, 22, 0)).await;
    let ctx = &session.ctx;

    start_activity(ctx, "Hauling", "HL01", SourceTab::Work).await.unwrap();
    session.advance_minutes(90);
    stop_activity(ctx).await;

    let layout = shift_timeline(ctx, Some(ShiftType::Night)).await;

    assert_eq!(layout.shift.shift_type, ShiftType::Night);
    assert_eq!(layout.entries.len(), 1);
    let entry = &layout.entries[0];
    assert!((entry.left_percent - 33.33).abs() < 0.01);
    assert!((entry.width_percent - 12.5).abs() < 0.01);
}

#[tokio::test]
async fn session_gantt_lays_out_backend_intervals() {
    let session = TestSession::start_at(site_time(3, 12, 0)).await;
    Mock::given(method("GET"))
        .and(path("/api/sessions/S-310/gantt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                {
                    "activityName": "Loading",
                    "activityCode": "LD01",
                    "category": "work",
                    "startTime": "2026-06-03T06:00:00+07:00",
                    "endTime": "2026-06-03T09:00:00+07:00",
                    "totalSeconds": 10800
                },
                {
                    "activityName": "Refuel",
                    "activityCode": "DL05",
                    "category": "delay",
                    "startTime": "2026-06-03T09:00:00+07:00",
                    "endTime": "2026-06-03T10:00:00+07:00",
                    "totalSeconds": 3600
                }
            ]
        })))
        .expect(1)
        .mount(&session.server)
        .await;

    let layout = session_gantt(&session.ctx, " S-310 ", Some(ShiftType::Day)).await.unwrap();

    assert_eq!(layout.entries.len(), 2);
    assert_eq!(layout.total_seconds, 14400);
    let percentages: Vec<u32> = layout.category_summary.iter().map(|c| c.percentage).collect();
    assert_eq!(percentages, vec![75, 25]);
    assert!((layout.entries[1].left_percent - 25.0).abs() < 0.01);
}

#[tokio::test]
async fn session_gantt_surfaces_rejection() {
    let session = TestSession::start_at(site_time(3, 12, 0)).await;
    Mock::given(method("GET"))
        .and(path("/api/sessions/S-9/gantt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "unknown session"})),
        )
        .mount(&session.server)
        .await;

    let err = session_gantt(&session.ctx, "S-9", None).await.unwrap_err();

    assert_eq!(err.remote_kind(), Some(RemoteFailureKind::Rejected));
    assert!(err.to_string().contains("unknown session"));
}

#[tokio::test]
async fn session_gantt_maps_missing_session() {
    let session = TestSession::start_at(site_time(3, 12, 0)).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&session.server)
        .await;

    let err = session_gantt(&session.ctx, "S-404", None).await.unwrap_err();
    assert_eq!(err.remote_kind(), Some(RemoteFailureKind::NotFound));
}

#[tokio::test]
async fn blank_session_number_never_reaches_backend() {
    let session = TestSession::start_at(site_time(3, 12, 0)).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&session.server)
        .await;

    let result = session_gantt(&session.ctx, "   ", None).await;
    assert!(matches!(result, Err(ShiftlineError::InvalidInput(_))));
}
