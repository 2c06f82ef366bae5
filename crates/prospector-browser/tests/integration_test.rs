use prospector_browser::{BrowserActions, ChromeLauncher, ContextLauncher, EvasionProfile};
use std::path::PathBuf;

fn chrome_path() -> PathBuf {
    std::env::var("PROSPECTOR_BROWSER_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/usr/bin/chromium"))
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_browser_engine_creation() {
    let profile = EvasionProfile::from_user_agents(&[]);
    let engine = ChromeLauncher::default().launch(&chrome_path(), &profile).await;
    assert!(engine.is_ok(), "Failed to create browser engine");
    engine.unwrap().close().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_masking_directives_applied() {
    let profile = EvasionProfile::from_user_agents(&["prospector-test-agent".to_string()]);
    let mut engine = ChromeLauncher::default()
        .launch(&chrome_path(), &profile)
        .await
        .unwrap();

    engine.navigate("https://example.com").await.unwrap();

    let webdriver = engine.evaluate("navigator.webdriver").await.unwrap();
    assert!(webdriver.is_null());

    let agent = engine.evaluate("navigator.userAgent").await.unwrap();
    assert_eq!(agent.as_str(), Some("prospector-test-agent"));

    engine.close().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_wait_for_missing_selector_times_out() {
    let profile = EvasionProfile::from_user_agents(&[]);
    let mut engine = ChromeLauncher::default()
        .launch(&chrome_path(), &profile)
        .await
        .unwrap();

    engine.navigate("https://example.com").await.unwrap();
    let err = engine.wait_for_selector("a#pnnext", 500).await.unwrap_err();
    assert!(err.is_absence());

    engine.close().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_wait_for_hidden_selector_times_out() {
    let profile = EvasionProfile::from_user_agents(&[]);
    let mut engine = ChromeLauncher::default()
        .launch(&chrome_path(), &profile)
        .await
        .unwrap();

    engine
        .navigate("data:text/html,<a id='next' style='display:none' href='#'>Next</a><a id='shown' href='#'>Shown</a>")
        .await
        .unwrap();
    let err = engine.wait_for_selector("a#next", 500).await.unwrap_err();
    assert!(err.is_absence());
    assert!(engine.wait_for_selector("a#shown", 2000).await.is_ok());

    engine.close().await.unwrap();
}
