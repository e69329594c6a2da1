use super::*;

#[tokio::test(start_paused = true)]
async fn test_pings_immediately_then_every_interval() {
    let service = KeepAliveService::new(600, true);
    service.start().await;

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(service.ticks(), 1);

    tokio::time::sleep(Duration::from_secs(1249)).await;
    // t = 1250s: pings at 0, 600 and 1200
    assert_eq!(service.ticks(), 3);
    assert!(service.is_running().await);

    service.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_stop_halts_pings() {
    let service = KeepAliveService::new(10, true);
    service.start().await;
    tokio::time::sleep(Duration::from_secs(25)).await;
    let before = service.ticks();
    assert_eq!(before, 3);

    service.stop().await;
    tokio::time::sleep(Duration::from_secs(100)).await;
    assert_eq!(service.ticks(), before);
    assert!(!service.is_running().await);
}

#[tokio::test(start_paused = true)]
async fn test_disabled_service_never_pings() {
    let service = KeepAliveService::new(1, false);
    service.start().await;
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(service.ticks(), 0);
    assert!(!service.is_running().await);
}

#[test]
fn test_zero_interval_clamped_to_one_second() {
    let service = KeepAliveService::new(0, true);
    assert_eq!(service.interval(), Duration::from_secs(1));
}
