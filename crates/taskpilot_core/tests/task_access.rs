use rusqlite::Connection;
use taskpilot_core::db::open_db_in_memory;
use taskpilot_core::{
    Caller, Member, NewTask, Priority, Project, ProjectRepository, ServiceError,
    SqliteProjectRepository, SqliteTaskRepository, SqliteTeamRepository, SqliteUserRepository,
    TaskPatch, TaskService, TaskStatus, Team, TeamRepository, User, UserRepository,
    UNASSIGNED_NAME,
};
use uuid::Uuid;

struct Fixture {
    owner: User,
    member: Member,
    project: Project,
}

#[test]
fn new_task_defaults_to_unassigned_low_pending() {
    let conn = open_db_in_memory().unwrap();
    let fx = seed(&conn);
    let service = task_service(&conn);

    let task = service
        .create_task(&Caller::user(fx.owner.id), fx.project.id, NewTask {
            title: "write docs".to_string(),
            ..NewTask::default()
        })
        .unwrap();

    assert!(!task.assignment.is_assigned());
    assert_eq!(task.assignment.name, UNASSIGNED_NAME);
    assert_eq!(task.priority, Priority::Low);
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.created_by, Some(fx.owner.id));

    let stored = service.get_task(task.id).unwrap();
    assert_eq!(stored, task);
}

#[test]
fn requested_assignee_must_belong_to_the_projects_team() {
    let conn = open_db_in_memory().unwrap();
    let fx = seed(&conn);
    let service = task_service(&conn);
    let caller = Caller::user(fx.owner.id);

    let task = service
        .create_task(&caller, fx.project.id, NewTask {
            title: "assigned".to_string(),
            assignee: Some(fx.member.member_id),
            ..NewTask::default()
        })
        .unwrap();
    assert_eq!(task.assignment.member_id, Some(fx.member.member_id));
    assert_eq!(task.assignment.name, fx.member.name);

    let err = service
        .create_task(&caller, fx.project.id, NewTask {
            title: "stranger".to_string(),
            assignee: Some(Uuid::new_v4()),
            ..NewTask::default()
        })
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[test]
fn blank_title_and_missing_project_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let fx = seed(&conn);
    let service = task_service(&conn);
    let caller = Caller::user(fx.owner.id);

    let err = service
        .create_task(&caller, fx.project.id, NewTask {
            title: "   ".to_string(),
            ..NewTask::default()
        })
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = service
        .create_task(&caller, Uuid::new_v4(), NewTask {
            title: "orphan".to_string(),
            ..NewTask::default()
        })
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "project", .. }));
}

#[test]
fn update_patch_retains_absent_fields() {
    let conn = open_db_in_memory().unwrap();
    let fx = seed(&conn);
    let service = task_service(&conn);
    let caller = Caller::user(fx.owner.id);

    let task = service
        .create_task(&caller, fx.project.id, NewTask {
            title: "draft".to_string(),
            description: Some("first cut".to_string()),
            priority: Some(Priority::Medium),
            ..NewTask::default()
        })
        .unwrap();

    let patch = TaskPatch {
        status: Some(TaskStatus::Done),
        ..TaskPatch::default()
    };
    let updated = service.update_task(&caller, task.id, &patch).unwrap();

    assert_eq!(updated.title, "draft");
    assert_eq!(updated.description, "first cut");
    assert_eq!(updated.priority, Priority::Medium);
    assert_eq!(updated.status, TaskStatus::Done);

    let stored = service.get_task(task.id).unwrap();
    assert_eq!(stored, updated);
}

#[test]
fn denied_update_persists_nothing() {
    let conn = open_db_in_memory().unwrap();
    let fx = seed(&conn);
    let service = task_service(&conn);

    let task = service
        .create_task(&Caller::user(fx.owner.id), fx.project.id, NewTask {
            title: "locked".to_string(),
            ..NewTask::default()
        })
        .unwrap();

    let stranger = Caller::with_member(Uuid::new_v4(), Uuid::new_v4());
    let patch = TaskPatch {
        title: Some("hijacked".to_string()),
        ..TaskPatch::default()
    };
    let err = service.update_task(&stranger, task.id, &patch).unwrap_err();
    assert!(matches!(err, ServiceError::AuthorizationDenied(_)));

    let stored = service.get_task(task.id).unwrap();
    assert_eq!(stored.title, "locked");
}

#[test]
fn assigned_member_may_update_without_owning_anything() {
    let conn = open_db_in_memory().unwrap();
    let fx = seed(&conn);
    let service = task_service(&conn);

    let task = service
        .create_task(&Caller::user(fx.owner.id), fx.project.id, NewTask {
            title: "theirs".to_string(),
            assignee: Some(fx.member.member_id),
            ..NewTask::default()
        })
        .unwrap();

    let assignee = Caller::with_member(Uuid::new_v4(), fx.member.member_id);
    let patch = TaskPatch {
        status: Some(TaskStatus::InProgress),
        ..TaskPatch::default()
    };
    let updated = service.update_task(&assignee, task.id, &patch).unwrap();
    assert_eq!(updated.status, TaskStatus::InProgress);
}

#[test]
fn delete_goes_through_the_same_gate() {
    let conn = open_db_in_memory().unwrap();
    let fx = seed(&conn);
    let service = task_service(&conn);
    let creator = Caller::user(fx.owner.id);

    let task = service
        .create_task(&creator, fx.project.id, NewTask {
            title: "ephemeral".to_string(),
            ..NewTask::default()
        })
        .unwrap();

    let stranger = Caller::with_member(Uuid::new_v4(), Uuid::new_v4());
    let err = service.delete_task(&stranger, task.id).unwrap_err();
    assert!(matches!(err, ServiceError::AuthorizationDenied(_)));

    service.delete_task(&creator, task.id).unwrap();
    let err = service.get_task(task.id).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "task", .. }));
}

#[test]
fn tasks_list_by_project_and_by_member() {
    let conn = open_db_in_memory().unwrap();
    let fx = seed(&conn);
    let service = task_service(&conn);
    let caller = Caller::user(fx.owner.id);

    let assigned = service
        .create_task(&caller, fx.project.id, NewTask {
            title: "assigned".to_string(),
            assignee: Some(fx.member.member_id),
            ..NewTask::default()
        })
        .unwrap();
    let unassigned = service
        .create_task(&caller, fx.project.id, NewTask {
            title: "unassigned".to_string(),
            ..NewTask::default()
        })
        .unwrap();

    let in_project: Vec<_> = service
        .list_by_project(fx.project.id)
        .unwrap()
        .into_iter()
        .map(|task| task.id)
        .collect();
    assert_eq!(in_project, vec![assigned.id, unassigned.id]);

    let mine: Vec<_> = service
        .list_by_member(fx.member.member_id)
        .unwrap()
        .into_iter()
        .map(|task| task.id)
        .collect();
    assert_eq!(mine, vec![assigned.id]);
}

fn task_service(
    conn: &Connection,
) -> TaskService<SqliteTaskRepository<'_>, SqliteProjectRepository<'_>, SqliteTeamRepository<'_>> {
    TaskService::new(
        SqliteTaskRepository::new(conn),
        SqliteProjectRepository::new(conn),
        SqliteTeamRepository::new(conn),
    )
}

fn seed(conn: &Connection) -> Fixture {
    let users = SqliteUserRepository::new(conn);
    let owner = User::new("Owner", "owner@example.com", "v1$00$00");
    users.create_user(&owner).unwrap();

    let teams = SqliteTeamRepository::new(conn);
    let team = Team::new("backend", owner.id);
    teams.create_team(&team).unwrap();
    let member = Member::new("Ada").with_capacity(3);
    teams.add_member(team.id, &member).unwrap();

    let projects = SqliteProjectRepository::new(conn);
    let project = Project::new("billing", team.id, owner.id);
    projects.create_project(&project).unwrap();

    Fixture {
        owner,
        member,
        project,
    }
}
