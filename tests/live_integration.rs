use swapi_host::{ApiClient, Endpoint, ResponseMode, RetryPolicy};

#[tokio::test]
async fn live_people_record_has_a_name() {
    let base_url = match std::env::var("SWAPI_LIVE_BASE_URL") {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            eprintln!("skipping live test: SWAPI_LIVE_BASE_URL is not set");
            return;
        }
    };

    let client = ApiClient::new(base_url)
        .expect("live base url must parse")
        .with_retry_policy(RetryPolicy::new(1, std::time::Duration::from_millis(500)));

    let person = client
        .fetch_record(Endpoint::People)
        .await
        .expect("live people request must succeed");
    assert!(!person.name.is_empty());

    let mut out = Vec::new();
    client
        .report(Endpoint::Films, ResponseMode::Raw, &mut out)
        .await
        .expect("live films request must succeed");
    assert!(String::from_utf8(out).unwrap().contains("title"));
}
