use std::time::{Duration, Instant};

use specreport_demo::{FetchError, FetchService};

use crate::runner::Suite;

pub(super) fn suite() -> Suite {
    Suite::new("FetchService")
        .describe(
            Suite::new("futures")
                .it_async("fetches data", || async {
                    let result = FetchService::new().fetch_data(None).await;
                    assert_eq!(result.data, "Success");
                    assert!(result.timestamp_ms.is_some());
                })
                .it_async("surfaces fetch errors", || async {
                    let result = FetchService::new().fetch_with_error(true).await;
                    assert_eq!(result, Err(FetchError::Failed));
                    assert_eq!(FetchError::Failed.to_string(), "Failed to fetch data");
                })
                .it_async("succeeds when not told to fail", || async {
                    let result = FetchService::new().fetch_with_error(false).await;
                    assert_eq!(result.map(|r| r.data), Ok("Success".to_string()));
                }),
        )
        .describe(
            Suite::new("async lookups")
                .it_async("fetches a user profile", || async {
                    let profile = FetchService::new()
                        .user_data("1")
                        .await
                        .unwrap_or_else(|e| panic!("user_data failed: {e}"));
                    assert_eq!(profile.id, "1");
                    assert_eq!(profile.name, "User 1");
                    assert!(profile.email.contains("@example.com"));
                })
                .it_async("requires a user id", || async {
                    let result = FetchService::new().user_data("").await;
                    assert_eq!(result, Err(FetchError::MissingUserId));
                    assert_eq!(FetchError::MissingUserId.to_string(), "User ID is required");
                })
                .it_async("processes a batch", || async {
                    let results = FetchService::new().batch_process(&[1, 2, 3, 4, 5]).await;
                    assert_eq!(results, vec![2, 4, 6, 8, 10]);
                }),
        )
        .describe(Suite::new("timing").it_async("completes within a reasonable time", || async {
            let start = Instant::now();
            FetchService::new().fetch_data(Some(Duration::from_millis(100))).await;
            let elapsed = start.elapsed();
            assert!(elapsed >= Duration::from_millis(100), "finished early: {elapsed:?}");
            assert!(elapsed < Duration::from_secs(1), "took too long: {elapsed:?}");
        }))
        .describe(
            Suite::new("concurrency")
                .it_async("runs lookups concurrently", || async {
                    let service = FetchService::new();
                    let (a, b, c) = tokio::join!(service.user_data("1"), service.user_data("2"), service.user_data("3"));
                    let ids: Vec<String> = [a, b, c].into_iter().filter_map(Result::ok).map(|p| p.id).collect();
                    assert_eq!(ids, vec!["1", "2", "3"]);
                })
                .it_async("fails when any request fails", || async {
                    let service = FetchService::new();
                    let (a, b, c) = tokio::join!(
                        service.fetch_with_error(false),
                        service.fetch_with_error(true),
                        service.fetch_with_error(false)
                    );
                    let all: Result<Vec<_>, _> = [a, b, c].into_iter().collect();
                    assert_eq!(all.map(|v| v.len()), Err(FetchError::Failed));
                }),
        )
}
