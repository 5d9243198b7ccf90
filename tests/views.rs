mod common;

use async_trait::async_trait;
use common::{memory_store, post, settle, shared, summary_of, user, Call, ScriptedBackend};
use complexapp::app::Action;
use complexapp::domain::{Profile, ProfileCounts, PLACEHOLDER_AVATAR};
use complexapp::ui::compute_screen;
use complexapp::ui::viewmodel::Body;
use complexapp::views::{
    Confirm, DeleteOutcome, LoadState, Page, PostView, ProfileView, Route, DELETED_FLASH,
    DELETE_PROMPT,
};
use std::sync::Mutex;

/// Answers every prompt the same way and remembers what it was asked.
struct Answer {
    yes: bool,
    asked: Mutex<Vec<String>>,
}

impl Answer {
    fn new(yes: bool) -> Self {
        Self {
            yes,
            asked: Mutex::new(Vec::new()),
        }
    }

    fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirm for Answer {
    async fn confirm(&self, prompt: &str) -> bool {
        self.asked.lock().unwrap().push(prompt.to_string());
        self.yes
    }
}

fn profile(name: &str) -> Profile {
    Profile {
        profile_username: name.to_string(),
        profile_avatar: format!("https://gravatar.com/avatar/{name}?s=128"),
        is_following: false,
        counts: ProfileCounts {
            post_counter: Some(1),
            follower_counter: Some(2),
            following_count: Some(3),
        },
    }
}

#[tokio::test(start_paused = true)]
async fn unmounting_a_post_view_cancels_its_fetch() {
    let (backend, api) = shared(ScriptedBackend::gated().with_post(post("7", "Hello", "alice")));
    let store = memory_store();

    let view = PostView::mount(api, store.dispatcher(), "7");
    settle().await;
    assert_eq!(backend.parked(), vec![Call::FetchPost("7".to_string())]);
    assert!(view.state().is_loading());

    drop(view);
    settle().await;

    assert_eq!(backend.cancelled(), vec![Call::FetchPost("7".to_string())]);
    assert!(!backend.release(&Call::FetchPost("7".to_string())));
}

#[tokio::test(start_paused = true)]
async fn switching_posts_discards_the_earlier_reply() {
    let second = post("2", "Second", "bob");
    let (backend, api) = shared(
        ScriptedBackend::gated()
            .ignoring_cancellation()
            .with_post(post("1", "First", "alice"))
            .with_post(second.clone()),
    );
    let store = memory_store();

    let mut view = PostView::mount(api, store.dispatcher(), "1");
    settle().await;
    view.set_id("2");
    settle().await;

    assert!(backend.release(&Call::FetchPost("2".to_string())));
    assert_eq!(view.settled().await, LoadState::Loaded(second));
    assert!(backend.release(&Call::FetchPost("1".to_string())));
    settle().await;

    assert_eq!(view.id().as_deref(), Some("2"));
    assert_eq!(view.state().loaded().map(|p| p.title.as_str()), Some("Second"));
}

#[tokio::test]
async fn a_missing_post_is_not_found() {
    let (_, api) = shared(ScriptedBackend::new());
    let store = memory_store();

    let view = PostView::mount(api, store.dispatcher(), "nope");

    assert_eq!(view.settled().await, LoadState::NotFound);
}

#[tokio::test]
async fn the_author_deletes_after_confirming() {
    let (backend, api) = shared(ScriptedBackend::new().with_post(post("7", "Hello", "alice")));
    let store = memory_store();
    store.dispatcher().dispatch(Action::login(user("alice")));
    let view = PostView::mount(api, store.dispatcher(), "7");
    view.settled().await;
    assert!(view.is_owner(&store.state()));
    assert_eq!(view.edit_route(), Some(Route::EditPost { id: "7".to_string() }));

    let answer = Answer::new(true);
    let outcome = view.delete(&store.state(), &answer).await;

    assert_eq!(
        outcome,
        DeleteOutcome::Deleted {
            redirect: Route::profile("alice")
        }
    );
    assert_eq!(answer.asked(), vec![DELETE_PROMPT.to_string()]);
    assert_eq!(store.state().flash_messages, vec![DELETED_FLASH.to_string()]);
    assert!(backend.calls().contains(&Call::Delete {
        id: "7".to_string(),
        token: "token-alice".to_string(),
    }));
}

#[tokio::test]
async fn declining_or_not_owning_sends_nothing() {
    let (backend, api) = shared(ScriptedBackend::new().with_post(post("7", "Hello", "alice")));
    let store = memory_store();
    let view = PostView::mount(api, store.dispatcher(), "7");
    view.settled().await;

    let answer = Answer::new(true);
    assert_eq!(view.delete(&store.state(), &answer).await, DeleteOutcome::NotPermitted);

    store.dispatcher().dispatch(Action::login(user("bob")));
    assert!(!view.is_owner(&store.state()));
    assert_eq!(view.delete(&store.state(), &answer).await, DeleteOutcome::NotPermitted);
    assert!(answer.asked().is_empty());

    store.dispatcher().dispatch(Action::login(user("alice")));
    let declined = Answer::new(false);
    assert_eq!(view.delete(&store.state(), &declined).await, DeleteOutcome::Declined);

    assert!(!backend
        .calls()
        .iter()
        .any(|call| matches!(call, Call::Delete { .. })));
    assert!(store.state().flash_messages.is_empty());
}

#[tokio::test]
async fn a_rejected_delete_reports_failure_without_a_flash() {
    let (_, api) = shared(
        ScriptedBackend::new()
            .with_post(post("7", "Hello", "alice"))
            .with_delete_reply("Nope"),
    );
    let store = memory_store();
    store.dispatcher().dispatch(Action::login(user("alice")));
    let view = PostView::mount(api, store.dispatcher(), "7");
    view.settled().await;

    let outcome = view.delete(&store.state(), &Answer::new(true)).await;

    assert!(matches!(outcome, DeleteOutcome::Failed(_)));
    assert!(store.state().flash_messages.is_empty());
}

#[tokio::test]
async fn profile_shows_placeholders_until_loaded() {
    let hello = post("7", "Hello", "alice");
    let (backend, api) = shared(
        ScriptedBackend::new()
            .with_profile(profile("alice"))
            .with_post(hello.clone()),
    );

    let view = ProfileView::mount(api, "alice", Some("token-bob".to_string()));
    let placeholder = view.header();
    assert_eq!(placeholder.profile_username, "...");
    assert_eq!(placeholder.profile_avatar, PLACEHOLDER_AVATAR);

    let (header, posts) = view.settled().await;

    assert_eq!(header, LoadState::Loaded(profile("alice")));
    assert_eq!(posts, LoadState::Loaded(vec![summary_of(&hello)]));
    assert!(backend.calls().contains(&Call::FetchProfile {
        username: "alice".to_string(),
        token: Some("token-bob".to_string()),
    }));
}

#[tokio::test]
async fn pages_follow_the_route_and_login_state() {
    let (_, api) = shared(ScriptedBackend::new().with_post(post("7", "Hello", "alice")));
    let store = memory_store();
    let dispatcher = store.dispatcher();

    assert!(matches!(
        Page::open(&Route::Home, &store.state(), &api, &dispatcher),
        Page::GuestHome
    ));
    assert!(matches!(
        Page::open(&Route::parse("/who"), &store.state(), &api, &dispatcher),
        Page::NotFound(_)
    ));

    dispatcher.dispatch(Action::login(user("alice")));
    assert!(matches!(
        Page::open(&Route::Home, &store.state(), &api, &dispatcher),
        Page::Home
    ));

    let page = Page::open(&Route::post("7"), &store.state(), &api, &dispatcher);
    page.settled().await;
    let vm = compute_screen(&store.state(), &page, None, &[]);
    let Body::Post(panel) = vm.body else {
        panic!("expected a post body, got {:?}", vm.body);
    };
    assert_eq!(panel.title, "Hello");
    assert_eq!(panel.date, "3/7/2024");
    assert!(panel.owner_actions.is_some());
}
