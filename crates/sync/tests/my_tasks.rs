//! Tests for the "my tasks" page: server filter, comment-count join,
//! facets and delete failure handling.

mod common;

use std::sync::atomic::Ordering;

use assert_matches::assert_matches;
use common::{task, user, Fixture};
use taskdesk_core::filter::TaskFilter;
use taskdesk_core::models::TaskStatus;
use taskdesk_sync::notify::RETRY;
use taskdesk_sync::views::{MyTasksView, FETCH_COMMENT_COUNTS_FAILED, FETCH_TASKS_FAILED};
use taskdesk_sync::{LoadOutcome, ViewState};

fn fixture() -> Fixture {
    let fx = Fixture::signed_in_as(user(10, "a"));
    *fx.tasks.rows.lock().unwrap() = vec![
        task(1, "pending", &[(10, "a")]),
        task(2, "completed", &[]),
    ];
    fx.comments.counts.lock().unwrap().extend([(1, 3), (2, 0)]);
    fx
}

// ---------------------------------------------------------------------------
// Test: rows carry comment counts and derived columns, in server order
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rows_are_enriched_in_order() {
    let fx = fixture();
    let view = MyTasksView::new(fx.services());

    assert_eq!(view.load().await, LoadOutcome::Applied { rows: 2 });

    let rows = view.controller().rows().await;
    assert_eq!(rows.iter().map(|r| r.task.id).collect::<Vec<_>>(), [1, 2]);
    assert_eq!(rows[0].comment_count, 3);
    assert_eq!(rows[0].user_names, "a");
    assert_eq!(rows[0].project_name, "Apollo");
    assert_eq!(rows[1].user_names, "N/A");
    assert_eq!(fx.comments.count_calls(), 2);
}

// ---------------------------------------------------------------------------
// Test: facets of the documented two-task scenario
// ---------------------------------------------------------------------------

#[tokio::test]
async fn facets_follow_rendered_rows() {
    let fx = fixture();
    let view = MyTasksView::new(fx.services());
    view.load().await;

    let facets = view.facets().await;

    assert_eq!(facets.statuses, [TaskStatus::Pending, TaskStatus::Completed]);
    assert_eq!(facets.users.len(), 1);
    assert_eq!(facets.users[0].id, 10);
    assert_eq!(facets.users[0].username, "a");
}

// ---------------------------------------------------------------------------
// Test: empty task list makes no count requests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_list_skips_the_join() {
    let fx = Fixture::signed_in_as(user(10, "a"));
    let view = MyTasksView::new(fx.services());

    assert_eq!(view.load().await, LoadOutcome::Applied { rows: 0 });
    assert_eq!(fx.comments.count_calls(), 0);
    assert!(view.facets().await.is_empty());
}

// ---------------------------------------------------------------------------
// Test: server filter is forwarded and re-fetches
// ---------------------------------------------------------------------------

#[tokio::test]
async fn applying_a_filter_refetches_with_it() {
    let fx = fixture();
    let mut view = MyTasksView::new(fx.services());
    view.load().await;

    let filter = TaskFilter::from_raw("completed", "", "").unwrap();
    view.apply_filter(filter.clone()).await;

    assert_eq!(fx.tasks.list_calls(), 2);
    assert_eq!(fx.tasks.filters.lock().unwrap().last(), Some(&filter));
    let rows = view.controller().rows().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].task.id, 2);
}

// ---------------------------------------------------------------------------
// Test: text filter narrows locally
// ---------------------------------------------------------------------------

#[tokio::test]
async fn text_filter_does_not_refetch() {
    let fx = fixture();
    let view = MyTasksView::new(fx.services());
    view.load().await;

    view.set_text_filter("task 2").await;

    let visible = view.visible_rows().await;
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].task.id, 2);
    assert_eq!(fx.tasks.list_calls(), 1);
}

// ---------------------------------------------------------------------------
// Test: a refused delete leaves the rows untouched
// ---------------------------------------------------------------------------

/// Deleting task 2 fails with `{"error": "Forbidden"}`: the rendered
/// collection is unchanged and the notification text is the server's.
#[tokio::test]
async fn refused_delete_keeps_rows_and_shows_server_message() {
    let fx = fixture();
    let view = MyTasksView::new(fx.services());
    view.load().await;
    let before = view.controller().rows().await;
    *fx.tasks.refuse_delete.lock().unwrap() = true;
    let mut rx = fx.notifications.subscribe();

    let result = view.delete(2).await;

    assert!(result.is_err());
    assert_eq!(view.controller().rows().await, before);
    assert_eq!(view.controller().state().await, ViewState::Ready);
    assert_eq!(fx.tasks.list_calls(), 1);
    let notice = rx.recv().await.unwrap();
    assert!(notice.is_error());
    assert_eq!(notice.message, "Forbidden");
}

// ---------------------------------------------------------------------------
// Test: a successful delete re-fetches everything
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_refetches_tasks_and_counts() {
    let fx = fixture();
    let view = MyTasksView::new(fx.services());
    view.load().await;

    view.delete(2).await.unwrap();

    assert_eq!(fx.tasks.delete_calls.load(Ordering::SeqCst), 1);
    assert_eq!(fx.tasks.list_calls(), 2);
    assert_eq!(fx.comments.count_calls(), 3);
    let rows = view.controller().rows().await;
    assert_eq!(rows.iter().map(|r| r.task.id).collect::<Vec<_>>(), [1]);
}

// ---------------------------------------------------------------------------
// Test: failure texts distinguish the task list from the counts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_task_fetch_uses_fixed_text_and_retry() {
    let fx = fixture();
    *fx.tasks.fail_list.lock().unwrap() = true;
    let view = MyTasksView::new(fx.services());
    let mut rx = fx.notifications.subscribe();

    let outcome = view.load().await;

    assert_matches!(outcome, LoadOutcome::Failed { message } if message == FETCH_TASKS_FAILED);
    let notice = rx.recv().await.unwrap();
    assert_eq!(notice.message, FETCH_TASKS_FAILED);
    assert_eq!(notice.action, RETRY);
}

#[tokio::test]
async fn one_failed_count_fails_the_whole_fetch() {
    let fx = fixture();
    let view = MyTasksView::new(fx.services());
    view.load().await;
    fx.comments.failing_counts.lock().unwrap().insert(2);

    let outcome = view.after_details_closed().await;

    assert_matches!(
        outcome,
        LoadOutcome::Failed { message } if message == FETCH_COMMENT_COUNTS_FAILED
    );
    // Previous rows stay rendered; no partial result is applied.
    assert_eq!(view.controller().rows().await.len(), 2);
    assert_eq!(view.controller().rows().await[0].comment_count, 3);
    assert_matches!(view.controller().state().await, ViewState::Error { .. });
}
