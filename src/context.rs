use crate::engine::Engine;
use anyhow::{anyhow, Context as _, Result};
use std::path::PathBuf;

/// Context used throughout the application
#[derive(Debug)]
pub struct Context {
    /// Current working directory
    pub cwd: PathBuf,

    /// Meant mostly for debugging, print commands instead of executing them
    pub dry_run: bool,

    /// Engine requested on the command line, if any
    engine: Option<String>,
}

impl Context {
    pub fn new(dry_run: bool, engine: Option<String>) -> Result<Self> {
        Ok(Self {
            cwd: std::env::current_dir()
                .with_context(|| "Failed to get current directory")?,
            dry_run,
            engine,
        })
    }

    /// Explicitly chosen engine or the first one found in PATH
    pub fn engine(&self) -> Result<Engine> {
        if let Some(chosen) = &self.engine {
            // test if engine exists in PATH or as a literal path
            if !(crate::util::executable_in_path(chosen) || std::path::Path::new(chosen).exists()) {
                // dry run never executes it so let it slide
                if !self.dry_run {
                    return Err(anyhow!("Engine {:?} not found in PATH or filesystem", chosen));
                }
            }

            return Ok(Engine::detect(chosen));
        }

        match Engine::find_available_engine() {
            Some(engine) => Ok(engine),
            // dry run prints the commands with docker
            None if self.dry_run => Ok(Engine::detect(crate::KNOWN_ENGINES[0])),
            None => Err(anyhow!("No compatible container engine found in PATH, tried {:?}", crate::KNOWN_ENGINES)),
        }
    }

    /// Resolves relative path against cwd
    pub fn absolute(&self, path: PathBuf) -> PathBuf {
        if path.is_absolute() {
            path
        } else {
            self.cwd.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_engine() {
        let ctx = Context::new(false, Some("/surely/not/an/engine".into())).unwrap();
        assert!(ctx.engine().is_err());

        let ctx = Context::new(true, Some("/surely/not/an/engine".into())).unwrap();
        assert_eq!(ctx.engine().unwrap().path, "/surely/not/an/engine");
    }

    #[test]
    fn absolute_paths() {
        let ctx = Context::new(false, None).unwrap();

        assert_eq!(ctx.absolute("/abs".into()), PathBuf::from("/abs"));
        assert_eq!(ctx.absolute("rel".into()), ctx.cwd.join("rel"));
    }
}
