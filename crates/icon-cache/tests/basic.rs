use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use icon_asset_cache::prelude::*;
use tokio::time::{sleep, Duration};

/// Cache whose source renders `<svg>{name}</svg>` after `delay`, counting calls.
fn svg_cache(calls: Arc<AtomicUsize>, delay: Duration) -> IconAssetCache {
    IconAssetCache::from_source(FnSource::new(move |parts: KeyParts| {
        let calls = calls.clone();
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            sleep(delay).await;
            Ok::<_, IconError>(format!("<svg>{}</svg>", parts.name))
        }
    }))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_fetches_share_one_retrieval() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cache = svg_cache(calls.clone(), Duration::from_millis(30));

    let mut tasks = Vec::new();
    for _ in 0..50 {
        let cache = cache.clone();
        tasks.push(tokio::spawn(async move {
            cache.fetch("home", "outline").await
        }));
    }

    for task in tasks {
        let body = task.await.unwrap().unwrap();
        assert_eq!(&*body, "<svg>home</svg>");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1, "source should run only once");
    let stats = cache.stats();
    assert_eq!(stats.loads, 1);
    assert_eq!(stats.coalesced + stats.hits, 49);
}

#[tokio::test]
async fn three_simultaneous_fetches_then_peek() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cache = svg_cache(calls.clone(), Duration::from_millis(20));

    let (a, b, c) = tokio::join!(
        cache.fetch("home", "outline"),
        cache.fetch("home", "outline"),
        cache.fetch("home", "outline"),
    );
    for body in [a, b, c] {
        assert_eq!(&*body.unwrap(), "<svg>home</svg>");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        cache.peek("home", "outline").as_deref(),
        Some("<svg>home</svg>")
    );
}

#[tokio::test]
async fn resolved_bodies_are_served_from_memory() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cache = svg_cache(calls.clone(), Duration::from_millis(1));

    assert!(cache.peek("cart", "solid").is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0, "peek must not fetch");

    let first = cache.fetch("cart", "solid").await.unwrap();
    let second = cache.fetch("cart", "solid").await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.peek("cart", "solid").as_deref(), Some("<svg>cart</svg>"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.stats().hits, 1);
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn failures_are_not_cached() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let cache = IconAssetCache::from_source(FnSource::new(move |parts: KeyParts| {
        let counter = counter.clone();
        async move {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(IconError::not_found_with_status(parts.key(), 404))
            } else {
                Ok("<svg/>".to_string())
            }
        }
    }));

    let err = cache.fetch("bell", "outline").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(cache.peek("bell", "outline").is_none());
    assert!(!cache.is_pending("bell", "outline"));

    let body = cache.fetch("bell", "outline").await.unwrap();
    assert_eq!(&*body, "<svg/>");
    assert_eq!(calls.load(Ordering::SeqCst), 2, "second fetch must retry");
    assert_eq!(cache.stats().errors, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn one_failure_fans_out_to_every_waiter() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let cache = IconAssetCache::from_source(FnSource::new(move |_parts: KeyParts| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            sleep(Duration::from_millis(30)).await;
            Err::<String, _>(IconError::transport("connection reset"))
        }
    }));

    let mut tasks = Vec::new();
    for _ in 0..10 {
        let cache = cache.clone();
        tasks.push(tokio::spawn(async move { cache.fetch("x", "y").await }));
    }
    for task in tasks {
        let err = task.await.unwrap().unwrap_err();
        assert_eq!(err, IconError::transport("connection reset"));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn clear_forgets_resolved_bodies() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cache = svg_cache(calls.clone(), Duration::from_millis(1));

    cache.fetch("home", "outline").await.unwrap();
    cache.clear();
    assert!(cache.peek("home", "outline").is_none());
    assert!(cache.is_empty());

    cache.fetch("home", "outline").await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(cache.stats().clears, 1);
}

#[tokio::test]
async fn preload_survives_individual_failures() {
    let cache = IconAssetCache::from_source(FnSource::new(|parts: KeyParts| async move {
        if parts.name == "missing" {
            Err(IconError::not_found(parts.key()))
        } else {
            Ok(format!("<svg>{}</svg>", parts.name))
        }
    }));

    let summary = cache
        .preload([("missing", "outline"), ("home", "outline")])
        .await;
    assert_eq!(summary, PreloadSummary { resolved: 1, failed: 1 });
    assert!(cache.peek("missing", "outline").is_none());
    assert_eq!(cache.peek("home", "outline").as_deref(), Some("<svg>home</svg>"));
}

#[tokio::test]
async fn preload_of_nothing_is_a_no_op() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cache = svg_cache(calls.clone(), Duration::from_millis(1));
    let summary = cache.preload(Vec::<(String, String)>::new()).await;
    assert_eq!(summary, PreloadSummary::default());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn instances_do_not_share_state() {
    let calls = Arc::new(AtomicUsize::new(0));
    let first = svg_cache(calls.clone(), Duration::from_millis(1));
    let second = svg_cache(calls.clone(), Duration::from_millis(1));

    first.fetch("home", "outline").await.unwrap();
    assert!(second.peek("home", "outline").is_none());
    second.fetch("home", "outline").await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
