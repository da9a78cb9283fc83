//! Integration tests for projects, their roles and statuses.

use assert_matches::assert_matches;
use sqlx::PgPool;
use taskmgmt_core::space_roles::ProjectRoles;
use taskmgmt_db::models::project::CreateProject;
use taskmgmt_db::models::task::CreateTask;
use taskmgmt_db::repositories::{ProjectRepo, StatusRepo, TaskRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_project(name: &str, parent_id: Option<i64>, roles: ProjectRoles) -> CreateProject {
    CreateProject {
        parent_id,
        name: name.to_string(),
        color: None,
        description: None,
        due_date: None,
        calendar_integrated: false,
        managers: roles.managers,
        participators: roles.participators,
    }
}

fn personal(name: &str, parent_id: Option<i64>) -> CreateProject {
    new_project(name, parent_id, ProjectRoles::personal("a"))
}

fn new_task(project_id: i64, status_id: Option<i64>, title: &str) -> CreateTask {
    CreateTask {
        project_id,
        status_id,
        title: title.to_string(),
        description: None,
        assignee: None,
        created_by: "alice".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_project_with_roles(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let input = new_project("Roadmap", None, ProjectRoles::for_space("alice", "/spaces/ops"));
    let project = ProjectRepo::create(&mut conn, &input).await.unwrap();
    drop(conn);

    assert_eq!(project.name, "Roadmap");
    assert!(!project.calendar_integrated);
    assert!(project.hidden_on.is_none());

    let loaded = ProjectRepo::find_with_roles(&pool, project.id)
        .await
        .unwrap()
        .expect("project should exist");
    assert_eq!(loaded.managers, ["alice", "manager:/spaces/ops"]);
    assert_eq!(loaded.participators, ["*:/spaces/ops"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_role_permissions_are_collapsed(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let mut input = new_project("Solo", None, ProjectRoles::personal("alice"));
    input.managers.push("alice".to_string());
    let project = ProjectRepo::create(&mut conn, &input).await.unwrap();
    drop(conn);

    let loaded = ProjectRepo::find_with_roles(&pool, project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.managers, ["alice"]);
    assert!(loaded.participators.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_project_is_none(pool: PgPool) {
    assert!(ProjectRepo::find_by_id(&pool, 9999).await.unwrap().is_none());
    assert!(ProjectRepo::find_with_roles(&pool, 9999).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_parent_is_fk_violation(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let input = new_project("Orphan", Some(9999), ProjectRoles::personal("alice"));
    let err = ProjectRepo::create(&mut conn, &input).await.unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref db) if db.is_foreign_key_violation());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_with_roles_orders_by_name(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    for name in ["Zeta", "Alpha", "Mid"] {
        ProjectRepo::create(&mut conn, &personal(name, None)).await.unwrap();
    }
    drop(conn);

    let all = ProjectRepo::list_with_roles(&pool).await.unwrap();
    let names: Vec<&str> = all.iter().map(|p| p.project.name.as_str()).collect();
    assert_eq!(names, ["Alpha", "Mid", "Zeta"]);
    assert!(all.iter().all(|p| p.managers == ["a"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_parent_cascades_to_children(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let parent = ProjectRepo::create(&mut conn, &personal("P", None))
        .await
        .unwrap();
    let child = ProjectRepo::create(
        &mut conn,
        &personal("C", Some(parent.id)),
    )
    .await
    .unwrap();
    drop(conn);

    sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(parent.id)
        .execute(&pool)
        .await
        .unwrap();
    assert!(ProjectRepo::find_by_id(&pool, child.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_initial_statuses_are_ranked(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let project = ProjectRepo::create(&mut conn, &personal("P", None))
        .await
        .unwrap();
    let created = StatusRepo::create_initial(&mut conn, project.id).await.unwrap();
    let names = StatusRepo::names_by_project(&mut conn, project.id).await.unwrap();
    drop(conn);

    assert_eq!(created.len(), 4);
    assert_eq!(names, ["To Do", "In Progress", "Waiting On", "Done"]);

    let default = StatusRepo::find_default(&pool, project.id).await.unwrap().unwrap();
    assert_eq!(default.name, "To Do");
    assert_eq!(default.rank, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_child_copies_parent_statuses(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let parent = ProjectRepo::create(&mut conn, &personal("P", None))
        .await
        .unwrap();
    let custom = vec!["Backlog".to_string(), "Shipped".to_string()];
    StatusRepo::create_ordered(&mut conn, parent.id, &custom).await.unwrap();

    let child = ProjectRepo::create(
        &mut conn,
        &personal("C", Some(parent.id)),
    )
    .await
    .unwrap();
    let inherited = StatusRepo::names_by_project(&mut conn, parent.id).await.unwrap();
    StatusRepo::create_ordered(&mut conn, child.id, &inherited).await.unwrap();
    drop(conn);

    let statuses = StatusRepo::list_by_project(&pool, child.id).await.unwrap();
    let names: Vec<&str> = statuses.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Backlog", "Shipped"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_status_name_is_unique_violation(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let project = ProjectRepo::create(&mut conn, &personal("P", None))
        .await
        .unwrap();
    let names = vec!["Same".to_string(), "Same".to_string()];
    let err = StatusRepo::create_ordered(&mut conn, project.id, &names)
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref db) if db.is_unique_violation());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_defaults_and_status_counts(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let p1 = ProjectRepo::create(&mut conn, &personal("P1", None))
        .await
        .unwrap();
    let p2 = ProjectRepo::create(&mut conn, &personal("P2", None))
        .await
        .unwrap();
    let s1 = StatusRepo::create_initial(&mut conn, p1.id).await.unwrap();
    drop(conn);

    let todo = s1[0].id;
    let done = s1[3].id;
    TaskRepo::create(&pool, &new_task(p1.id, Some(todo), "a")).await.unwrap();
    TaskRepo::create(&pool, &new_task(p1.id, Some(todo), "b")).await.unwrap();
    TaskRepo::create(&pool, &new_task(p1.id, Some(done), "c")).await.unwrap();
    TaskRepo::create(&pool, &new_task(p1.id, None, "unsorted")).await.unwrap();

    let defaults = StatusRepo::find_defaults(&pool, &[p1.id, p2.id]).await.unwrap();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0].project_id, p1.id);
    assert_eq!(defaults[0].name, "To Do");

    let counts = TaskRepo::count_by_status(&pool, &[p1.id, p2.id]).await.unwrap();
    let summary: Vec<(&str, i64)> = counts
        .iter()
        .map(|c| (c.status.as_str(), c.task_number))
        .collect();
    assert_eq!(summary, [("To Do", 2), ("Done", 1)]);
}
