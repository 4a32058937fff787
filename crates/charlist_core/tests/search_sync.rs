use charlist_core::{ParameterStore, SearchSync, DEFAULT_SEARCH_DEBOUNCE};
use std::time::{Duration, Instant};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Drives the channel like an event loop firing timer callbacks every `step`.
fn run_until(
    sync: &mut SearchSync,
    store: &mut ParameterStore,
    from: Instant,
    until: Instant,
    step: Duration,
) -> Vec<String> {
    let mut commits = Vec::new();
    let mut now = from;
    while now <= until {
        if let Some(value) = sync.poll(store, now) {
            commits.push(value);
        }
        now += step;
    }
    commits
}

#[test]
fn rapid_keystrokes_coalesce_into_one_commit_of_the_last_value() {
    let mut store = ParameterStore::new();
    let mut sync = SearchSync::new(&store, DEFAULT_SEARCH_DEBOUNCE);
    let t0 = Instant::now();

    sync.input("r", t0);
    assert!(run_until(&mut sync, &mut store, t0, t0 + ms(40), ms(10)).is_empty());
    sync.input("ri", t0 + ms(50));
    assert!(run_until(&mut sync, &mut store, t0 + ms(50), t0 + ms(90), ms(10)).is_empty());
    sync.input("ric", t0 + ms(100));

    let commits = run_until(&mut sync, &mut store, t0 + ms(100), t0 + ms(2_000), ms(10));

    assert_eq!(commits, ["ric"]);
    assert_eq!(store.name_query(), "ric");
    assert_eq!(store.revision(), 1);
}

#[test]
fn each_keystroke_restarts_the_window() {
    let mut store = ParameterStore::new();
    let mut sync = SearchSync::new(&store, DEFAULT_SEARCH_DEBOUNCE);
    let t0 = Instant::now();

    sync.input("m", t0);
    sync.input("mo", t0 + ms(400));
    assert_eq!(sync.poll(&mut store, t0 + ms(600)), None);
    assert_eq!(sync.deadline(), Some(t0 + ms(900)));
    assert_eq!(sync.poll(&mut store, t0 + ms(900)).as_deref(), Some("mo"));
}

#[test]
fn separate_quiet_periods_commit_separately() {
    let mut store = ParameterStore::new();
    let mut sync = SearchSync::new(&store, ms(100));
    let t0 = Instant::now();

    sync.input("rick", t0);
    assert_eq!(sync.poll(&mut store, t0 + ms(100)).as_deref(), Some("rick"));
    assert_eq!(sync.poll(&mut store, t0 + ms(150)), None);

    sync.input("", t0 + ms(200));
    assert_eq!(sync.poll(&mut store, t0 + ms(300)).as_deref(), Some(""));
    assert_eq!(store.to_query(), "");
}

#[test]
fn external_navigation_is_reflected_without_bouncing_back() {
    let mut store = ParameterStore::from_query("name=rick");
    let mut sync = SearchSync::new(&store, DEFAULT_SEARCH_DEBOUNCE);
    let t0 = Instant::now();

    store.navigate("name=morty&status=alive");
    assert!(sync.sync_from_store(&store));
    assert_eq!(sync.term(), "morty");
    assert!(!sync.is_pending());

    let revision = store.revision();
    assert!(run_until(&mut sync, &mut store, t0, t0 + ms(2_000), ms(50)).is_empty());
    assert_eq!(store.revision(), revision);
    assert!(!sync.sync_from_store(&store));
}

#[test]
fn navigation_during_typing_discards_the_pending_commit() {
    let mut store = ParameterStore::new();
    let mut sync = SearchSync::new(&store, DEFAULT_SEARCH_DEBOUNCE);
    let t0 = Instant::now();

    sync.input("summ", t0);
    store.navigate("name=beth");
    sync.sync_from_store(&store);

    assert_eq!(sync.poll(&mut store, t0 + ms(1_000)), None);
    assert_eq!(store.name_query(), "beth");
    assert_eq!(sync.term(), "beth");
}

#[test]
fn dropping_the_channel_leaves_the_store_untouched() {
    let mut store = ParameterStore::new();
    let t0 = Instant::now();
    {
        let mut sync = SearchSync::new(&store, DEFAULT_SEARCH_DEBOUNCE);
        sync.input("jerry", t0);
    }
    assert_eq!(store.name_query(), "");
    let mut sync = SearchSync::new(&store, DEFAULT_SEARCH_DEBOUNCE);
    assert_eq!(sync.poll(&mut store, t0 + ms(1_000)), None);
}
