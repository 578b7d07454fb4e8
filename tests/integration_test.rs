use serde_json::{json, Map, Value};
use std::time::Duration;
use treasure_hunt::clients::FeatureService;
use treasure_hunt::error::{ApiError, AppError, BusinessError};
use treasure_hunt::models::RawFeature;
use treasure_hunt::orchestrator::ActionOutcome;
use treasure_hunt::utils::logging;
use treasure_hunt::{prepare_session, HuntConfig, Position, RecordId, UserAction, ViewController};

/// 内存中的要素服务：图片地址解析耗时与输入顺序相反
struct MemoryService {
    features: Vec<RawFeature>,
    fail_fetch: bool,
}

impl FeatureService for MemoryService {
    async fn fetch_features(&self, service_url: &str) -> Result<Vec<RawFeature>, ApiError> {
        if self.fail_fetch {
            return Err(ApiError::BadResponse {
                endpoint: format!("{}/query", service_url),
                code: Some(500),
                message: Some("Unable to complete operation.".to_string()),
            });
        }
        Ok(self.features.clone())
    }

    async fn image_url(&self, service_url: &str, feature_id: RecordId) -> Result<String, ApiError> {
        let delay = 40u64.saturating_sub(feature_id.0 as u64 * 10);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(format!("{}/{}/attachments/1", service_url, feature_id.0))
    }
}

fn feature(id: i64, x: f64, y: f64) -> RawFeature {
    let attributes: Map<String, Value> = json!({
        "objectid": id,
        "prompt": format!("<p>Where is stop {}?</p>", id),
        "hint": format!("Near stop {}", id - 1),
        "exclamation": format!("Stop {}!", id),
    })
    .as_object()
    .cloned()
    .unwrap();
    RawFeature::new(attributes, x, y)
}

fn hunt() -> HuntConfig {
    HuntConfig {
        title: "Bus Stops".to_string(),
        description: "A tour".to_string(),
        instructions: "Click the map".to_string(),
        service_url: "https://example.com/FeatureServer/0/".to_string(),
        init_center: [10.0, 0.0],
        home_zoom: 12,
        min_zoom: 8,
        max_zoom: 18,
        intro_image: None,
        certificate_image: "certificate.jpg".to_string(),
        certificate_url: "certificate.pdf".to_string(),
    }
}

fn service(points: &[(i64, f64, f64)]) -> MemoryService {
    MemoryService {
        features: points.iter().map(|(id, x, y)| feature(*id, *x, *y)).collect(),
        fail_fetch: false,
    }
}

#[tokio::test]
async fn test_full_hunt() {
    logging::init(false);

    let service = service(&[(1, 0.0, 0.0), (2, 10.0, 0.0), (3, 20.0, 0.0)]);
    let session = prepare_session(&service, &hunt(), 3).await.unwrap();

    assert_eq!(session.tolerance_radius(), 20.0);
    assert_eq!(session.selected_id(), Some(RecordId(1)));
    assert_eq!(
        session.records()[1].image_url,
        "https://example.com/FeatureServer/0/2/attachments/1"
    );

    let mut controller = ViewController::new(hunt(), session);
    assert!(controller.view().intro.is_some());
    controller.dispatch(UserAction::DismissInstructions);

    for (x, last) in [(0.5, false), (10.5, false), (19.5, true)] {
        assert_eq!(
            controller.dispatch(UserAction::MapClick(Position::new(x, 0.0))),
            ActionOutcome::Solved
        );
        if !last {
            assert_eq!(controller.dispatch(UserAction::Next), ActionOutcome::Applied);
        }
    }

    assert!(controller.session().is_complete());
    assert_eq!(controller.dispatch(UserAction::ClaimPrize), ActionOutcome::Applied);
    let congrats = controller.view().congrats.unwrap();
    assert_eq!(congrats.title, "Bus Stops");
    assert_eq!(congrats.hero_image, "certificate.jpg");
}

#[tokio::test]
async fn test_tolerance_is_clamped_for_wide_hunts() {
    let service = service(&[(1, 0.0, 0.0), (2, 250.0, 0.0)]);

    let session = prepare_session(&service, &hunt(), 2).await.unwrap();

    assert_eq!(session.tolerance_radius(), 100.0);
}

#[tokio::test]
async fn test_single_record_requires_exact_click() {
    let service = service(&[(1, 5.0, 5.0)]);
    let session = prepare_session(&service, &hunt(), 1).await.unwrap();
    assert_eq!(session.tolerance_radius(), 0.0);

    let mut controller = ViewController::new(hunt(), session);
    controller.dispatch(UserAction::EscapeKey);

    assert!(matches!(
        controller.dispatch(UserAction::MapClick(Position::new(5.0001, 5.0))),
        ActionOutcome::Missed { .. }
    ));
    assert_eq!(
        controller.dispatch(UserAction::MapClick(Position::new(5.0, 5.0))),
        ActionOutcome::Solved
    );
    assert!(controller.session().can_claim());
}

#[tokio::test]
async fn test_fetch_failure_aborts_build() {
    let mut service = service(&[(1, 0.0, 0.0)]);
    service.fail_fetch = true;

    let result = prepare_session(&service, &hunt(), 1).await;

    assert!(matches!(result, Err(AppError::FeatureFetch(_))));
}

#[tokio::test]
async fn test_empty_service_is_an_error() {
    let service = service(&[]);

    let result = prepare_session(&service, &hunt(), 1).await;

    assert!(matches!(
        result,
        Err(AppError::Business(BusinessError::EmptyHunt))
    ));
}

#[tokio::test]
#[ignore] // 需要网络，手动运行：cargo test -- --ignored
async fn test_live_feature_service() {
    use treasure_hunt::{ArcGisClient, HttpExecutor};

    logging::init(true);

    // 通过环境变量指定一个带附件的点要素图层
    let Ok(url) = std::env::var("TREASURE_HUNT_SERVICE_URL") else {
        println!("未设置 TREASURE_HUNT_SERVICE_URL，跳过");
        return;
    };
    let mut config = hunt();
    config.service_url = url;

    let client = ArcGisClient::new(HttpExecutor::new(Duration::from_secs(30)).unwrap());
    let session = prepare_session(&client, &config, 4)
        .await
        .expect("构建题目失败");

    println!("找到 {} 道题，判定半径 {}", session.len(), session.tolerance_radius());
    assert!(!session.is_empty());
}
