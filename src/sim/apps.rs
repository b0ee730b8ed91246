//! App manager - Installed packages and the sideload simulation

use std::time::Instant;

use super::timer::Delay;

pub const INSTALL_DELAY_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    User,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Sleeping,
    Stopped,
}

impl RunState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Sleeping => "Sleeping",
            Self::Stopped => "Stopped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledApp {
    pub name: &'static str,
    pub package: &'static str,
    pub version: &'static str,
    pub kind: PackageKind,
    pub state: RunState,
    pub size: &'static str,
    pub verified: bool,
}

impl InstalledApp {
    /// Only user packages can be uninstalled
    pub fn is_removable(&self) -> bool {
        self.kind == PackageKind::User
    }
}

pub const INSTALLED_APPS: &[InstalledApp] = &[
    InstalledApp {
        name: "System Launcher",
        package: "com.android.launcher3",
        version: "14.1",
        kind: PackageKind::System,
        state: RunState::Running,
        size: "42 MB",
        verified: false,
    },
    InstalledApp {
        name: "Settings",
        package: "com.android.settings",
        version: "14.0",
        kind: PackageKind::System,
        state: RunState::Sleeping,
        size: "12 MB",
        verified: false,
    },
    InstalledApp {
        name: "Duplex Agent",
        package: "io.duplex.bridge",
        version: "2.1.4",
        kind: PackageKind::User,
        state: RunState::Running,
        size: "8 MB",
        verified: true,
    },
    InstalledApp {
        name: "Social Media",
        package: "com.app.social",
        version: "54.2.1",
        kind: PackageKind::User,
        state: RunState::Running,
        size: "184 MB",
        verified: false,
    },
    InstalledApp {
        name: "Finance Pro",
        package: "com.bank.secure",
        version: "1.9.0",
        kind: PackageKind::User,
        state: RunState::Sleeping,
        size: "62 MB",
        verified: true,
    },
    InstalledApp {
        name: "Mobile Gaming",
        package: "com.dev.game",
        version: "2.0.1",
        kind: PackageKind::User,
        state: RunState::Stopped,
        size: "1.4 GB",
        verified: false,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppFilter {
    #[default]
    All,
    User,
    System,
}

impl AppFilter {
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::User => "User",
            Self::System => "System",
        }
    }

    pub fn all() -> &'static [AppFilter] {
        &[AppFilter::All, AppFilter::User, AppFilter::System]
    }

    fn accepts(&self, app: &InstalledApp) -> bool {
        match self {
            Self::All => true,
            Self::User => app.kind == PackageKind::User,
            Self::System => app.kind == PackageKind::System,
        }
    }
}

/// Apps passing `filter` whose name or package contains `query`
pub fn visible_apps(filter: AppFilter, query: &str) -> Vec<&'static InstalledApp> {
    let query = query.to_lowercase();
    INSTALLED_APPS
        .iter()
        .filter(|app| filter.accepts(app))
        .filter(|app| {
            app.name.to_lowercase().contains(&query) || app.package.contains(query.as_str())
        })
        .collect()
}

/// The "Sideload APK/IPA" push
#[derive(Debug, Default)]
pub struct Sideload {
    pending: Option<Delay>,
}

impl Sideload {
    pub fn start(&mut self, now: Instant) {
        if self.pending.is_none() {
            self.pending = Some(Delay::from_millis(now, INSTALL_DELAY_MS));
        }
    }

    pub fn is_installing(&self) -> bool {
        self.pending.is_some()
    }

    /// True once, when the push completes
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(delay) if delay.is_due(now) => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn filters_split_user_and_system() {
        assert_eq!(visible_apps(AppFilter::All, "").len(), 6);
        assert_eq!(visible_apps(AppFilter::User, "").len(), 4);
        assert_eq!(visible_apps(AppFilter::System, "").len(), 2);
    }

    #[test]
    fn search_matches_package_name() {
        let hits = visible_apps(AppFilter::All, "duplex");
        assert_eq!(hits.len(), 1);
        assert!(hits[0].verified);
        assert!(hits[0].is_removable());
    }

    #[test]
    fn sideload_takes_three_seconds() {
        let start = Instant::now();
        let mut sideload = Sideload::default();
        sideload.start(start);
        assert!(!sideload.poll(start + Duration::from_millis(2999)));
        assert!(sideload.poll(start + Duration::from_millis(INSTALL_DELAY_MS)));
        assert!(!sideload.is_installing());
    }
}
