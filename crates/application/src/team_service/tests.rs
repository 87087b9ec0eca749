use std::sync::Arc;

use worklog_core::{AppError, CompanyId};
use worklog_domain::{AuditAction, Permission, Project, Team, UserAccount};

use crate::AuthorizationService;
use crate::test_support::{FakeAuditRepository, FakeWorkspace, identity};

use super::TeamService;

async fn seeded(company_id: CompanyId) -> (Arc<FakeWorkspace>, Arc<FakeAuditRepository>, TeamService) {
    let workspace = Arc::new(FakeWorkspace::default());
    for user_id in ["lead", "dev", "ops"] {
        let Ok(user) = UserAccount::new(user_id, company_id, "role-1", user_id, "", None) else {
            panic!("user should be valid");
        };
        workspace.users.lock().await.push(user);
    }
    let Ok(project) = Project::new("p1", company_id, "Audit", None, false) else {
        panic!("project should be valid");
    };
    workspace.projects.lock().await.push(project);

    let Ok(mut team) = Team::new("team-1", company_id, "Platform", None) else {
        panic!("team should be valid");
    };
    team.replace_members(["lead".to_owned(), "dev".to_owned()]);
    workspace.teams.lock().await.push(team);

    let audit = Arc::new(FakeAuditRepository::default());
    let service = TeamService::new(
        AuthorizationService::new(),
        workspace.clone(),
        workspace.clone(),
        workspace.clone(),
        audit.clone(),
    );

    (workspace, audit, service)
}

#[tokio::test]
async fn team_admin_creates_and_lists_teams() {
    let company_id = CompanyId::new();
    let (_, audit, service) = seeded(company_id).await;
    let admin = identity(company_id, "owner", &[Permission::ManageTeams]);

    let created = service
        .create_team(&admin, "  Data  ", Some(String::new()))
        .await;
    let Ok(created) = created else {
        panic!("team should be created");
    };
    assert_eq!(created.name().as_str(), "Data");
    assert_eq!(created.description(), None);

    let teams = service.list_teams(&admin).await;
    assert_eq!(teams.map(|teams| teams.len()).ok(), Some(2));
    assert_eq!(audit.events.lock().await[0].action, AuditAction::TeamCreated);
}

#[tokio::test]
async fn assigned_lead_cannot_create_or_list_teams() {
    let company_id = CompanyId::new();
    let (_, _, service) = seeded(company_id).await;
    let lead = identity(company_id, "lead", &[Permission::ManageAssignedTeams]);

    assert!(matches!(
        service.create_team(&lead, "Data", None).await,
        Err(AppError::Forbidden(_))
    ));
    assert!(matches!(
        service.list_teams(&lead).await,
        Err(AppError::Forbidden(_))
    ));
}

#[tokio::test]
async fn assigned_lead_manages_own_team_members() {
    let company_id = CompanyId::new();
    let (workspace, _, service) = seeded(company_id).await;
    let lead = identity(company_id, "lead", &[Permission::ManageAssignedTeams]);

    let result = service
        .set_members(&lead, "team-1", vec!["lead".to_owned(), "ops".to_owned()])
        .await;
    assert!(result.is_ok());

    let teams = workspace.teams.lock().await;
    assert_eq!(
        teams[0].member_ids(),
        ["lead".to_owned(), "ops".to_owned()]
    );
}

#[tokio::test]
async fn assigned_permission_without_membership_is_denied() {
    let company_id = CompanyId::new();
    let (_, _, service) = seeded(company_id).await;
    let outsider = identity(company_id, "ops", &[Permission::ManageAssignedTeams]);

    let result = service
        .update_team(&outsider, "team-1", "Renamed", None)
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn unknown_members_and_projects_are_rejected() {
    let company_id = CompanyId::new();
    let (_, _, service) = seeded(company_id).await;
    let admin = identity(company_id, "owner", &[Permission::ManageTeams]);

    let members = service
        .set_members(&admin, "team-1", vec!["ghost".to_owned()])
        .await;
    assert!(matches!(members, Err(AppError::Validation(_))));

    let projects = service
        .set_projects(&admin, "team-1", vec!["p1".to_owned(), "p9".to_owned()])
        .await;
    assert!(matches!(projects, Err(AppError::Validation(_))));

    let projects = service
        .set_projects(&admin, "team-1", vec!["p1".to_owned()])
        .await;
    assert_eq!(
        projects.map(|team| team.project_ids().to_vec()).ok(),
        Some(vec!["p1".to_owned()])
    );
}

#[tokio::test]
async fn blank_member_and_project_ids_are_skipped() {
    let company_id = CompanyId::new();
    let (_, _, service) = seeded(company_id).await;
    let admin = identity(company_id, "owner", &[Permission::ManageTeams]);

    let members = service
        .set_members(&admin, "team-1", vec!["dev".to_owned(), "  ".to_owned()])
        .await;
    assert_eq!(
        members.map(|team| team.member_ids().to_vec()).ok(),
        Some(vec!["dev".to_owned()])
    );

    let projects = service
        .set_projects(&admin, "team-1", vec![String::new(), "p1".to_owned()])
        .await;
    assert_eq!(
        projects.map(|team| team.project_ids().to_vec()).ok(),
        Some(vec!["p1".to_owned()])
    );
}

#[tokio::test]
async fn teams_of_other_companies_are_not_found() {
    let company_id = CompanyId::new();
    let (_, _, service) = seeded(company_id).await;
    let stranger = identity(CompanyId::new(), "owner", &[Permission::ManageTeams]);

    assert!(matches!(
        service.get_team(&stranger, "team-1").await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.delete_team(&stranger, "team-1").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn delete_team_removes_it() {
    let company_id = CompanyId::new();
    let (workspace, _, service) = seeded(company_id).await;
    let admin = identity(company_id, "owner", &[Permission::ManageTeams]);

    assert!(service.delete_team(&admin, "team-1").await.is_ok());
    assert!(workspace.teams.lock().await.is_empty());
}
