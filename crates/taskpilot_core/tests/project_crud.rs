use rusqlite::Connection;
use taskpilot_core::db::open_db_in_memory;
use taskpilot_core::{
    Member, ProjectService, ServiceError, SqliteProjectRepository, SqliteTeamRepository,
    SqliteUserRepository, Team, TeamRepository, User, UserRepository,
};
use uuid::Uuid;

#[test]
fn create_and_get_project_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_user(&conn, "owner@example.com");
    let team = seed_team(&conn, &owner, "backend");
    let service = project_service(&conn);

    let created = service
        .create_project(owner.id, team.id, "billing", "invoice pipeline")
        .unwrap();
    let fetched = service.get_project(created.id).unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.team_id, team.id);
    assert_eq!(fetched.created_by, owner.id);
    assert_eq!(fetched.description, "invoice pipeline");
}

#[test]
fn blank_project_name_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_user(&conn, "owner@example.com");
    let team = seed_team(&conn, &owner, "backend");
    let service = project_service(&conn);

    let err = service
        .create_project(owner.id, team.id, "  ", "")
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[test]
fn creating_project_under_missing_team_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_user(&conn, "owner@example.com");
    let service = project_service(&conn);

    let err = service
        .create_project(owner.id, Uuid::new_v4(), "billing", "")
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "team", .. }));
}

#[test]
fn projects_list_per_team_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_user(&conn, "owner@example.com");
    let team = seed_team(&conn, &owner, "backend");
    let other_team = seed_team(&conn, &owner, "frontend");
    let service = project_service(&conn);

    for name in ["alpha", "beta", "gamma"] {
        service.create_project(owner.id, team.id, name, "").unwrap();
    }
    service
        .create_project(owner.id, other_team.id, "elsewhere", "")
        .unwrap();

    let names: Vec<String> = service
        .list_by_team(team.id)
        .unwrap()
        .into_iter()
        .map(|project| project.name)
        .collect();
    assert_eq!(names, ["alpha", "beta", "gamma"]);
}

#[test]
fn list_for_user_spans_owned_and_member_teams() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_user(&conn, "owner@example.com");
    let other = seed_user(&conn, "other@example.com");
    let owned = seed_team(&conn, &owner, "owned");
    let foreign = seed_team(&conn, &other, "foreign");

    // First user sits in the second user's team under their own identity.
    let teams = SqliteTeamRepository::new(&conn);
    let mut membership = Member::new("Owner-as-member");
    membership.member_id = owner.id;
    teams.add_member(foreign.id, &membership).unwrap();

    let service = project_service(&conn);
    let in_owned = service.create_project(owner.id, owned.id, "own", "").unwrap();
    let in_foreign = service
        .create_project(other.id, foreign.id, "shared", "")
        .unwrap();

    let visible: Vec<_> = service
        .list_for_user(owner.id)
        .unwrap()
        .into_iter()
        .map(|project| project.id)
        .collect();
    assert!(visible.contains(&in_owned.id));
    assert!(visible.contains(&in_foreign.id));
    assert_eq!(visible.len(), 2);
}

fn project_service(
    conn: &Connection,
) -> ProjectService<SqliteProjectRepository<'_>, SqliteTeamRepository<'_>> {
    ProjectService::new(
        SqliteProjectRepository::new(conn),
        SqliteTeamRepository::new(conn),
    )
}

fn seed_user(conn: &Connection, email: &str) -> User {
    let users = SqliteUserRepository::new(conn);
    let user = User::new("Owner", email, "v1$00$00");
    users.create_user(&user).unwrap();
    user
}

fn seed_team(conn: &Connection, owner: &User, name: &str) -> Team {
    let teams = SqliteTeamRepository::new(conn);
    let team = Team::new(name, owner.id);
    teams.create_team(&team).unwrap();
    team
}
