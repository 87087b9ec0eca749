mod timesheets;


use tracing::warn;
use worklog_core::{AppError, AppResult, UserIdentity};
use worklog_domain::{Permission, Team, can_manage_team, has_permission};

pub use timesheets::TimesheetViewScope;

/// Authorization checks over the permission snapshot carried by a session.
///
/// Nothing here consults storage: the grants are whatever the identity
/// captured when the session was issued.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationService;

impl AuthorizationService {
    /// Creates a new authorization service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns whether the actor holds the permission.
    #[must_use]
    pub fn has_permission(&self, actor: &UserIdentity, permission: Permission) -> bool {
        has_permission(actor.permissions(), permission.as_str())
    }

    /// Ensures the actor holds the permission.
    pub fn require_permission(&self, actor: &UserIdentity, permission: Permission) -> AppResult<()> {
        if self.has_permission(actor, permission) {
            return Ok(());
        }

        warn!(
            company_id = %actor.company_id(),
            subject = %actor.subject(),
            permission = permission.as_str(),
            "permission denied"
        );
        Err(AppError::Forbidden(format!(
            "subject '{}' is missing permission '{}' in company '{}'",
            actor.subject(),
            permission.as_str(),
            actor.company_id()
        )))
    }

    /// Returns whether the actor may manage the team.
    #[must_use]
    pub fn can_manage_team(&self, actor: &UserIdentity, team: &Team) -> bool {
        can_manage_team(actor.permissions(), actor.subject(), team.member_ids())
    }

    /// Ensures the actor may manage the team, globally or as an assigned member.
    pub fn require_team_management(&self, actor: &UserIdentity, team: &Team) -> AppResult<()> {
        if self.can_manage_team(actor, team) {
            return Ok(());
        }

        warn!(
            company_id = %actor.company_id(),
            subject = %actor.subject(),
            team_id = %team.team_id(),
            "team management denied"
        );
        Err(AppError::Forbidden(format!(
            "subject '{}' cannot manage team '{}'",
            actor.subject(),
            team.team_id()
        )))
    }
}
