//! Plain-text tables for terminal output.

use taskdesk_core::facets::TaskFacets;
use taskdesk_core::models::{Comment, Project, Task, User, NOT_AVAILABLE, NO_USERS_ASSIGNED};
use taskdesk_sync::views::TaskRow;
use taskdesk_sync::Notification;

fn or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn projects(rows: &[Project]) {
    println!("{:>5}  {:<24}  {:<30}  ASSIGNED", "ID", "NAME", "DESCRIPTION");
    for p in rows {
        let assigned = p
            .assignee_names()
            .unwrap_or_else(|| NO_USERS_ASSIGNED.to_string());
        println!("{:>5}  {:<24}  {:<30}  {}", p.id, p.name, p.description, assigned);
    }
    println!("{} project(s)", rows.len());
}

pub fn tasks(rows: &[Task]) {
    println!(
        "{:>5}  {:<28}  {:<11}  {:<8}  {:<10}  ASSIGNED",
        "ID", "TITLE", "STATUS", "PRIORITY", "DUE"
    );
    for t in rows {
        println!(
            "{:>5}  {:<28}  {:<11}  {:<8}  {:<10}  {}",
            t.id,
            t.title,
            t.status,
            t.priority,
            or_na(t.due_date.map(|d| d.to_string())),
            t.assignee_names()
                .unwrap_or_else(|| NO_USERS_ASSIGNED.to_string()),
        );
    }
    println!("{} task(s)", rows.len());
}

pub fn task_rows(rows: &[TaskRow]) {
    println!(
        "{:>5}  {:<28}  {:<11}  {:<16}  {:<10}  {:>8}  ASSIGNED",
        "ID", "TITLE", "STATUS", "PROJECT", "DUE", "COMMENTS"
    );
    for row in rows {
        let t = &row.task;
        println!(
            "{:>5}  {:<28}  {:<11}  {:<16}  {:<10}  {:>8}  {}",
            t.id,
            t.title,
            t.status,
            row.project_name,
            or_na(t.due_date.map(|d| d.to_string())),
            row.comment_count,
            row.user_names,
        );
    }
    println!("{} task(s)", rows.len());
}

pub fn facets(facets: &TaskFacets) {
    if facets.is_empty() {
        return;
    }
    let statuses: Vec<&str> = facets.statuses.iter().map(|s| s.as_str()).collect();
    let users: Vec<String> = facets
        .users
        .iter()
        .map(|u| format!("{} ({})", u.username, u.id))
        .collect();
    println!("Statuses: {}", statuses.join(", "));
    println!("Assignees: {}", users.join(", "));
}

pub fn task_detail(task: &Task) {
    println!("#{} {}", task.id, task.title);
    println!("  Project:  {}", task.project_name());
    println!("  Status:   {}", task.status);
    println!("  Priority: {}", task.priority);
    println!("  Due:      {}", or_na(task.due_date.map(|d| d.to_string())));
    println!(
        "  Assigned: {}",
        task.assignee_names()
            .unwrap_or_else(|| NO_USERS_ASSIGNED.to_string())
    );
    if !task.description.is_empty() {
        println!("\n  {}", task.description);
    }
    println!();
}

/// `own[i]` marks comments the signed-in user may edit.
pub fn comments(rows: &[Comment], own: &[bool]) {
    for (comment, mine) in rows.iter().zip(own) {
        let when = or_na(
            comment
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string()),
        );
        let marker = if *mine { "*" } else { " " };
        println!("{marker} [{when}] {}: {}", comment.user.username(), comment.text);
    }
    println!("{} comment(s)", rows.len());
}

pub fn users(rows: &[User]) {
    println!("{:>5}  {:<20}  {:<30}  {:<5}  ACTIVE", "ID", "USERNAME", "EMAIL", "ADMIN");
    for u in rows {
        println!(
            "{:>5}  {:<20}  {:<30}  {:<5}  {}",
            u.id,
            u.username,
            if u.email.is_empty() { NOT_AVAILABLE } else { u.email.as_str() },
            if u.is_admin { "yes" } else { "no" },
            if u.is_active { "yes" } else { "no" },
        );
    }
}

pub fn notification(notice: &Notification) {
    let tag = if notice.is_error() { "error" } else { "ok" };
    eprintln!("[{tag}] {} ({})", notice.message, notice.action);
}
