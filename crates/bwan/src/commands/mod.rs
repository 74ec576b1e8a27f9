//! Command dispatch: bridges CLI flags -> `EdgeService` -> output formatting.

pub mod edges;
pub mod util;

use bwan_core::EdgeService;

use crate::cli::{ActionOpts, GlobalOpts, RemoveTarget};
use crate::error::CliError;

use self::util::Confirmer;

/// Run every requested action, in the order list, dump, remove.
pub async fn dispatch<C: Confirmer>(
    service: &EdgeService,
    actions: &ActionOpts,
    global: &GlobalOpts,
    confirmer: &mut C,
) -> Result<(), CliError> {
    if actions.list_clients {
        edges::list(service, global).await?;
    }

    if let Some(ref path) = actions.dump_clients {
        edges::dump(service, global, path).await?;
    }

    match actions.remove_client {
        Some(RemoveTarget::One(ref id)) => edges::remove_one(service, id).await,
        Some(RemoveTarget::All) => edges::remove_all(service, global, confirmer).await,
        None => Ok(()),
    }
}
