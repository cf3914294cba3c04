use crate::config::MountConfig;
use crate::error::Result;
use crate::session::EditSession;
use log::debug;

/// Install `env_logger` as the log backend. Later calls do nothing.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(cfg!(test)).try_init();
}

/// Build one session per mount. Session ids are positions in `mounts`.
///
/// The first mount that fails to build aborts the whole call.
pub fn mount_editors(mounts: Vec<MountConfig>) -> Result<Vec<EditSession>> {
    debug!("mounting {} editor(s)", mounts.len());
    mounts
        .into_iter()
        .enumerate()
        .map(|(id, mount)| EditSession::new(id, mount))
        .collect()
}
