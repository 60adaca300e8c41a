//! Build metadata embedded by `build.rs`.

use std::fmt;

/// Identity of the running console build
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub git_hash: &'static str,
    pub built_at: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
}

impl BuildInfo {
    pub const fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            git_hash: env!("CONSOLE_GIT_HASH"),
            built_at: env!("CONSOLE_BUILD_TIMESTAMP"),
            target: env!("CONSOLE_TARGET"),
            profile: env!("CONSOLE_PROFILE"),
        }
    }

    /// Version with the commit appended, e.g. "0.1.0+1a2b3c4d"
    pub fn full_version(&self) -> String {
        format!("{}+{}", self.version, self.git_hash)
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.name, self.full_version())?;
        writeln!(f)?;
        writeln!(f, "Build Information:")?;
        writeln!(f, "  Git Hash: {}", self.git_hash)?;
        writeln!(f, "  Built:    {}", self.built_at)?;
        writeln!(f, "  Target:   {}", self.target)?;
        writeln!(f, "  Profile:  {}", self.profile)?;
        Ok(())
    }
}

pub fn print_version() {
    print!("{}", BuildInfo::current());
}
