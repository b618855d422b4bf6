//! Runs parsed commands against a backlog service.

use serde_json::Value;

use super::{BacklogCommand, CommandError};
use crate::backlog::{ports::BacklogStore, services::BacklogService};

/// Executes `command` and encodes its result as JSON.
///
/// Operations on an unknown task yield `null`.
///
/// # Errors
///
/// Returns [`CommandError::Service`] when the backlog operation fails.
pub async fn execute<S>(
    service: &BacklogService<S>,
    command: BacklogCommand,
) -> Result<Value, CommandError>
where
    S: BacklogStore,
{
    let value = match command {
        BacklogCommand::CreateBacklog { kind } => {
            let created = service.create_backlog(kind).await?;
            serde_json::json!({ "created": created })
        }
        BacklogCommand::LoadBacklog { kind } => serde_json::to_value(service.load_backlog(kind).await?)?,
        BacklogCommand::GetTask { kind, id } => serde_json::to_value(service.get_task(kind, id).await?)?,
        BacklogCommand::ProposeFix { kind, id, proposal } => {
            serde_json::to_value(service.propose_fix(kind, id, proposal).await?)?
        }
        BacklogCommand::AddOptionsFromText { kind, id, text } => {
            serde_json::to_value(service.add_options_from_text(kind, id, &text).await?)?
        }
        BacklogCommand::AddTasksFromText { kind, text } => {
            serde_json::to_value(service.add_tasks_from_text(kind, &text).await?)?
        }
        BacklogCommand::ApproveResolution {
            kind,
            id,
            resolution,
        } => serde_json::to_value(service.approve_resolution(kind, id, &resolution).await?)?,
        BacklogCommand::GetApprovedTasks { kind } => {
            serde_json::to_value(service.get_approved_tasks(kind).await?)?
        }
        BacklogCommand::GetNewTasks { kind } => serde_json::to_value(service.get_new_tasks(kind).await?)?,
        BacklogCommand::FindTasksByStatus { kind, status } => {
            serde_json::to_value(service.find_tasks_by_status(kind, status).await?)?
        }
        BacklogCommand::SetStatus { kind, id, status } => {
            serde_json::to_value(service.set_status(kind, id, status).await?)?
        }
        BacklogCommand::UpdateTask { kind, id, update } => {
            serde_json::to_value(service.update_task(kind, id, update).await?)?
        }
        BacklogCommand::MarkDone {
            kind,
            id,
            done_text,
        } => serde_json::to_value(service.mark_done(kind, id, done_text.as_deref()).await?)?,
        BacklogCommand::AppendTask { kind, description } => {
            serde_json::to_value(service.append_task(kind, &description).await?)?
        }
        BacklogCommand::ApplyApprovals { kind, approvals } => {
            serde_json::to_value(service.apply_approvals(kind, approvals).await?)?
        }
    };
    Ok(value)
}
