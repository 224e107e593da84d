use feed_core::{update, FeedState, Msg};

#[test]
fn update_is_noop() {
    let state = FeedState::default();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn load_more_after_unmount_is_noop() {
    let (state, _) = update(FeedState::default(), Msg::Unmounted);
    let (next, effects) = update(state.clone(), Msg::LoadMore);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
