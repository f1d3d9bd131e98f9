use std::path::Path;

use tracing::debug;

use crate::ClientResult;
use crate::kv::FileStore;
use crate::state::resolve_home;

/// Opens the file-backed store under the resolved home directory.
pub fn open_home_store(home_override: Option<&Path>) -> ClientResult<FileStore> {
    let home = resolve_home(home_override)?;
    let store = FileStore::open(&home)?;
    debug!(home = %store.dir().display(), "opened data store");
    Ok(store)
}
