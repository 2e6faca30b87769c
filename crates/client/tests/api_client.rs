use serde_json::json;
use vaas_client::{ApiClient, TelemetrySource, GPU_PER_CAMERA, HARDWARE, SYSTEM_STATUS};
use vaas_config::ApiConfig;
use vaas_core::{GpuStatus, VaasError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    let config = ApiConfig {
        base_url:   format!("{}/api", server.uri()),
        timeout_ms: Some(2_000),
    };
    ApiClient::new(&config).expect("client build")
}

#[tokio::test]
async fn hardware_report_decodes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api{HARDWARE}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "system": {
                "cpu": {"cores": 8, "threads": 16, "percent": 23.4},
                "memory": {"total_gb": 31.2, "used_gb": 12.0, "available_gb": 19.2, "percent": 38.5},
                "disk": {"total_gb": 915.8, "used_gb": 402.1, "free_gb": 467.0, "percent": 46.3},
                "ffmpeg_processes": [],
                "ffmpeg_count": 0
            },
            "gpu": {"available": true, "gpus": [{
                "index": 0, "name": "NVIDIA RTX A4000", "temperature": 54,
                "utilization_gpu": 37, "utilization_memory": 12,
                "memory_used_mb": 3120, "memory_total_mb": 16376,
                "power_draw_w": 61.5, "power_limit_w": 140
            }]},
            "gpu_processes": [
                {"pid": 4242, "name": "ffmpeg", "cmdline": "ffmpeg -hwaccel cuda -i rtmp://...", "gpu_memory_mb": 212}
            ]
        })))
        .mount(&server)
        .await;

    let report = client_for(&server).hardware().await.expect("hardware");
    assert_eq!(report.system.cpu.cores, 8);
    assert!(matches!(report.gpu_status(), GpuStatus::Ready(gpus) if gpus.len() == 1));
    assert_eq!(report.primary_gpu().unwrap().utilization_gpu, 37.0);
    assert_eq!(report.gpu_processes[0].pid, 4242);
}

#[tokio::test]
async fn gpu_per_camera_through_trait() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api{GPU_PER_CAMERA}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cameras": [
                {"camera_id": 3, "camera_name": "cam1", "client_slug": "acme", "gpu_memory_mb": 180, "process_count": 1},
                {"camera_id": 7, "camera_name": "cam2", "client_slug": "acme", "gpu_memory_mb": 0, "process_count": 0}
            ],
            "total_gpu_memory_mb": 180,
            "camera_count": 2
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let report = TelemetrySource::gpu_per_camera(&client).await.expect("per camera");
    assert_eq!(report.cameras.len(), 2);
    assert_eq!(report.cameras[0].camera_name, "cam1");
    assert_eq!(report.camera_count, Some(2));
    assert!(report.degraded_reason().is_none());
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api{HARDWARE}")))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).hardware().await.unwrap_err();
    assert!(matches!(err, VaasError::Status { status: 503, .. }));
}

#[tokio::test]
async fn html_body_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api{SYSTEM_STATUS}")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).system_status().await.unwrap_err();
    assert!(matches!(err, VaasError::Malformed { ref endpoint, .. } if endpoint == SYSTEM_STATUS));
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let config = ApiConfig {
        base_url:   "http://127.0.0.1:9/api".into(),
        timeout_ms: Some(500),
    };
    let err = ApiClient::new(&config).unwrap().hardware().await.unwrap_err();
    assert!(matches!(err, VaasError::Transport(_)));
}
