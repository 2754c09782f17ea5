//! Object URL allocation for picked files

use crate::error::{PlaylistError, Result};
use crate::handle::{HandleRegistry, NamedFile, SourceHandle};
use tracing::warn;
use web_sys::{File, Url};

impl NamedFile for File {
    fn file_name(&self) -> String {
        self.name()
    }
}

/// Registry using `URL.createObjectURL` / `URL.revokeObjectURL`
#[derive(Debug, Default)]
pub struct ObjectUrlRegistry;

impl HandleRegistry<File> for ObjectUrlRegistry {
    fn acquire(&mut self, file: &File) -> Result<SourceHandle> {
        Url::create_object_url_with_blob(file)
            .map(SourceHandle::new)
            .map_err(|err| PlaylistError::HandleAllocation(format!("{err:?}")))
    }

    fn release(&mut self, handle: SourceHandle) {
        let url = handle.into_url();
        if let Err(err) = Url::revoke_object_url(&url) {
            warn!(%url, ?err, "failed to revoke object URL");
        }
    }
}
