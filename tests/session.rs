mod common;

use common::{shared, user, Call, ScriptedBackend};
use complexapp::app::{Action, Store};
use complexapp::storage::{
    JsonSessionStore, SessionRecord, SessionStore, AVATAR_KEY, TOKEN_KEY, USERNAME_KEY,
};
use std::path::Path;
use tokio_util::sync::CancellationToken;

fn open(path: &Path) -> Store {
    Store::new(Box::new(JsonSessionStore::new(path.to_path_buf()).unwrap())).unwrap()
}

#[test]
fn login_survives_a_restart_and_logout_clears_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = open(&path);
    assert!(!store.state().logged_in);
    store.dispatcher().dispatch(Action::login(user("alice")));
    drop(store);

    let store = open(&path);
    assert!(store.state().logged_in);
    assert_eq!(store.state().user, user("alice"));
    assert_eq!(
        store.read_session().unwrap(),
        Some(SessionRecord::from(&user("alice")))
    );

    store.dispatcher().dispatch(Action::Logout);
    drop(store);

    let store = open(&path);
    assert!(!store.state().logged_in);
    assert_eq!(store.read_session().unwrap(), None);
}

#[test]
fn the_file_stores_the_three_named_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = open(&path);
    store.dispatcher().dispatch(Action::login(user("alice")));
    drop(store);

    let file = JsonSessionStore::new(path).unwrap();
    assert_eq!(file.get_item(TOKEN_KEY).unwrap().as_deref(), Some("token-alice"));
    assert_eq!(file.get_item(USERNAME_KEY).unwrap().as_deref(), Some("alice"));
    assert_eq!(
        file.get_item(AVATAR_KEY).unwrap().as_deref(),
        Some("https://gravatar.com/avatar/alice?s=128")
    );
}

#[test]
fn a_partial_record_starts_logged_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let mut file = JsonSessionStore::new(path.clone()).unwrap();
    file.set_item(TOKEN_KEY, "token-alice").unwrap();
    file.set_item(USERNAME_KEY, "alice").unwrap();
    drop(file);

    assert!(!open(&path).state().logged_in);
}

#[test]
fn flashes_and_search_visibility_are_not_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = open(&path);
    store.dispatcher().dispatch(Action::flash("hello"));
    store.dispatcher().dispatch(Action::OpenSearch);
    drop(store);

    let store = open(&path);
    assert!(store.state().flash_messages.is_empty());
    assert!(!store.state().is_search_open);
    assert_eq!(store.read_session().unwrap(), None);
}

#[tokio::test]
async fn backend_login_feeds_the_login_action() {
    let (backend, api) = shared(ScriptedBackend::new().with_user(user("alice"), "hunter2"));
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir.path().join("session.json"));
    let cancel = CancellationToken::new();

    assert_eq!(api.login("alice", "wrong", &cancel).await.unwrap(), None);

    let found = api.login("alice", "hunter2", &cancel).await.unwrap();
    store.dispatcher().dispatch(Action::login(found.unwrap()));

    assert!(store.state().is_current_user("alice"));
    assert_eq!(
        backend.calls(),
        vec![Call::Login("alice".to_string()), Call::Login("alice".to_string())]
    );
}
