use std::io;
use std::path::Path;

/// Creates `path` (and its parents) if it does not exist yet.
///
/// Fails if something other than a directory already lives at `path`.
pub fn ensure_dir_exists(path: &Path) -> io::Result<()> {
    match std::fs::metadata(path) {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("Path exists but is not a directory: {}", path.display()),
                ));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("Creating directory: {}", path.display());
            std::fs::create_dir_all(path)
        }
        Err(e) => Err(e),
    }
}
