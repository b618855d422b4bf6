//! Given steps for backlog lifecycle BDD scenarios.

use super::world::{BacklogWorld, run_async};
use backlog_ledger::backlog::domain::BacklogKind;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"an empty "{kind}" backlog"#)]
fn empty_backlog(world: &mut BacklogWorld, kind: String) -> Result<(), eyre::Report> {
    world.kind = BacklogKind::try_from(kind.as_str())
        .map_err(|err| eyre::eyre!("invalid kind in scenario: {err}"))?;
    let created =
        run_async(world.service.create_backlog(world.kind)).wrap_err("create backlog")?;
    if !created {
        return Err(eyre::eyre!("backlog {} already existed", world.kind));
    }
    Ok(())
}
