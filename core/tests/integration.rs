//! Access layer and view controllers against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every operation
//! over real HTTP through `UreqTransport`. Validates that request building,
//! transport, and parsing agree with the actual server, and that the
//! controllers behave the same against it as against in-memory fakes.

use posts_core::notify::Inbox;
use posts_core::views::{DetailState, ListScreen};
use posts_core::{
    DetailView, FormMode, FormView, ListView, PostAccess, PostApi, PostClient, PostDraft, PostId,
    Route, Saved, Severity, TransportErrorKind, UreqTransport,
};

/// Spawns the mock server and returns the API base URL.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}{}", mock_server::API_PREFIX)
}

fn api(base_url: &str) -> PostApi {
    PostApi::new(PostClient::new(base_url), UreqTransport::new())
}

fn created_id(saved: Saved) -> PostId {
    saved.id().cloned().expect("mock server echoes the created post")
}

#[test]
fn crud_lifecycle() {
    let api = api(&start_server());

    // Step 1: list — should be empty.
    assert!(api.list().unwrap().is_empty(), "expected empty list");

    // Step 2: create a post.
    let saved = api.create(&PostDraft::new("Integration", "First body")).unwrap();
    let Saved::Post(created) = saved else {
        panic!("expected the created post back");
    };
    assert_eq!(created.title, "Integration");
    assert!(created.created_at.is_some(), "mock server stamps createdAt");
    let id = created.id.clone();

    // Step 3: get the created post.
    let fetched = api.get(&id).unwrap();
    assert_eq!(fetched, created);

    // Step 4: update replaces title and content, keeps id and createdAt.
    let updated = api
        .update(&id, &PostDraft::new("Renamed", "Second body"))
        .unwrap();
    let Saved::Post(updated) = updated else {
        panic!("expected the updated post back");
    };
    assert_eq!(updated.id, id);
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.content, "Second body");
    assert_eq!(updated.created_at, created.created_at);

    // Step 5: list — should have one item.
    assert_eq!(api.list().unwrap().len(), 1);

    // Step 6: delete echoes the id.
    assert_eq!(api.remove(&id).unwrap(), id);

    // Step 7: get after delete — should be NotFound.
    assert!(api.get(&id).unwrap_err().is_not_found());

    // Step 8: delete again — should be NotFound.
    assert!(api.remove(&id).unwrap_err().is_not_found());

    // Step 9: list — should be empty again.
    assert!(api.list().unwrap().is_empty(), "expected empty list after delete");
}

#[test]
fn list_view_deletes_without_refetch() {
    let api = api(&start_server());
    let ids: Vec<PostId> = ["one", "two", "three"]
        .into_iter()
        .map(|title| created_id(api.create(&PostDraft::new(title, "body")).unwrap()))
        .collect();

    let inbox = Inbox::new();
    let mut view = ListView::new(&api, &inbox);
    view.mount();

    view.request_delete(ids[1].clone());
    assert!(view.confirm_delete());

    let remaining: Vec<PostId> = view.posts().unwrap().iter().map(|p| p.id.clone()).collect();
    assert_eq!(remaining, vec![ids[0].clone(), ids[2].clone()]);
    assert_eq!(inbox.last().unwrap().severity, Severity::Success);

    // The server agrees, this time.
    let server_ids: Vec<PostId> = api.list().unwrap().into_iter().map(|p| p.id).collect();
    assert_eq!(server_ids, remaining);
}

#[test]
fn form_and_detail_round_trip() {
    let api = api(&start_server());
    let inbox = Inbox::new();

    let mut create = FormView::new(&api, FormMode::Create);
    create.mount();
    create.set_title("  Hello ");
    create.set_content("World");
    assert_eq!(create.submit(), Some(Route::List));

    let id = api.list().unwrap()[0].id.clone();

    let mut edit = FormView::new(&api, FormMode::Edit(id.clone()));
    edit.mount();
    assert_eq!(edit.draft(), &PostDraft::new("Hello", "World"));
    edit.set_content("Everyone");
    assert_eq!(edit.submit(), Some(Route::Detail(id.clone())));

    let mut detail = DetailView::new(&api, &inbox, id.clone());
    detail.mount();
    let post = detail.post().unwrap();
    assert_eq!(post.title, "Hello");
    assert_eq!(post.content, "Everyone");

    detail.request_delete();
    assert_eq!(detail.confirm_delete(), Some(Route::List));

    detail.mount();
    assert_eq!(detail.state(), &DetailState::NotFound);
}

#[test]
fn unreachable_server_fails_every_screen() {
    // Grab a free port and release it so nothing is listening.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let api = api(&format!("http://{addr}/api/v1"));

    let err = api.list().unwrap_err();
    assert!(matches!(err.kind, TransportErrorKind::Connection(_)));

    let inbox = Inbox::new();
    let mut list = ListView::new(&api, &inbox);
    list.mount();
    assert!(matches!(list.screen(), ListScreen::Failed(_)));
    assert_eq!(inbox.last().unwrap().severity, Severity::Error);

    let mut detail = DetailView::new(&api, &inbox, PostId::Number(1));
    detail.mount();
    assert!(matches!(detail.state(), DetailState::Failed(_)));

    let mut form = FormView::new(&api, FormMode::Create);
    form.set_title("A");
    form.set_content("B");
    assert_eq!(form.submit(), None);
    assert!(form.error().is_some());
    assert_eq!(form.draft(), &PostDraft::new("A", "B"));
}
