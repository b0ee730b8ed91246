//! Filesystem interrogator - A fixed listing of the handset's internal storage

use std::time::Instant;

use super::timer::Delay;

/// Mount point the browser opens at
pub const MOUNT_POINT: &[&str] = &["/", "storage", "emulated", "0"];

pub const EXPORT_DELAY_MS: u64 = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Folder,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: &'static str,
    pub kind: EntryKind,
    pub size: &'static str,
    pub modified: &'static str,
    /// Restricted system folder; cannot be entered or deleted
    pub protected: bool,
}

impl FileEntry {
    const fn folder(name: &'static str, size: &'static str, modified: &'static str) -> Self {
        Self {
            name,
            kind: EntryKind::Folder,
            size,
            modified,
            protected: false,
        }
    }

    const fn file(name: &'static str, size: &'static str, modified: &'static str) -> Self {
        Self {
            name,
            kind: EntryKind::File,
            size,
            modified,
            protected: false,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }

    /// Lowercase extension, if any
    pub fn extension(&self) -> Option<&'static str> {
        if self.is_folder() {
            return None;
        }
        self.name.rsplit_once('.').map(|(_, ext)| ext)
    }
}

const ROOT: &[FileEntry] = &[
    FileEntry::folder("DCIM", "2.4 GB", "2024-05-20"),
    FileEntry::folder("Documents", "142 MB", "2024-05-18"),
    FileEntry::folder("Download", "8.1 GB", "2024-05-21"),
    FileEntry {
        name: "Android",
        kind: EntryKind::Folder,
        size: "1.2 GB",
        modified: "2024-05-15",
        protected: true,
    },
    FileEntry::file("system_dump.log", "2.4 MB", "2024-05-21"),
    FileEntry::file("device_key.pub", "1 KB", "2024-05-10"),
    FileEntry::file("vacation_photo.jpg", "4.2 MB", "2024-04-12"),
    FileEntry::file("contract_v2.pdf", "1.1 MB", "2024-05-01"),
];

const DCIM: &[FileEntry] = &[
    FileEntry::folder("Camera", "2.2 GB", "2024-05-20"),
    FileEntry::folder("Screenshots", "180 MB", "2024-05-19"),
];

const DOCUMENTS: &[FileEntry] = &[
    FileEntry::file("passport_scan.pdf", "3.8 MB", "2024-03-02"),
    FileEntry::file("notes_backup.txt", "24 KB", "2024-05-18"),
];

const DOWNLOAD: &[FileEntry] = &[
    FileEntry::file("firmware_S928B.zip", "7.9 GB", "2024-05-21"),
    FileEntry::file("invoice_0424.pdf", "212 KB", "2024-04-30"),
];

/// Entries inside the folder at `depth` levels below the mount point
fn listing(below_mount: &[String]) -> &'static [FileEntry] {
    match below_mount {
        [] => ROOT,
        [dir] if dir == "DCIM" => DCIM,
        [dir] if dir == "Documents" => DOCUMENTS,
        [dir] if dir == "Download" => DOWNLOAD,
        _ => &[],
    }
}

/// Breadcrumb navigation over the fixed tree
#[derive(Debug, Clone)]
pub struct FileBrowser {
    path: Vec<String>,
    export: Option<Delay>,
}

impl Default for FileBrowser {
    fn default() -> Self {
        Self {
            path: MOUNT_POINT.iter().map(|s| s.to_string()).collect(),
            export: None,
        }
    }
}

impl FileBrowser {
    /// Path segments from the filesystem root
    pub fn segments(&self) -> &[String] {
        &self.path
    }

    /// Joined display path, e.g. "/storage/emulated/0"
    pub fn display_path(&self) -> String {
        let tail = self.path[1..].join("/");
        format!("/{}", tail)
    }

    pub fn at_mount_point(&self) -> bool {
        self.path.len() <= MOUNT_POINT.len()
    }

    /// Entries in the current folder whose name contains `query`
    pub fn entries(&self, query: &str) -> Vec<&'static FileEntry> {
        let below = self.path.get(MOUNT_POINT.len()..).unwrap_or(&[]);
        let query = query.to_lowercase();
        listing(below)
            .iter()
            .filter(|e| e.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Step into a folder. Returns false for files and protected folders.
    pub fn enter(&mut self, entry: &FileEntry) -> bool {
        if !entry.is_folder() || entry.protected {
            return false;
        }
        self.path.push(entry.name.to_string());
        true
    }

    /// Go up one level, never above the mount point
    pub fn up(&mut self) {
        if !self.at_mount_point() {
            self.path.pop();
        }
    }

    /// Jump to a breadcrumb segment
    pub fn jump_to(&mut self, index: usize) {
        let keep = (index + 1).max(MOUNT_POINT.len());
        self.path.truncate(keep);
    }

    pub fn start_export(&mut self, now: Instant) {
        if self.export.is_none() {
            self.export = Some(Delay::from_millis(now, EXPORT_DELAY_MS));
        }
    }

    pub fn is_exporting(&self) -> bool {
        self.export.is_some()
    }

    /// Returns the completion notice once the manifest export finishes
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        if self.export?.is_due(now) {
            self.export = None;
            return Some(format!(
                "Filesystem manifest for {} exported to PC successfully.",
                self.display_path()
            ));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn opens_at_mount_point_with_eight_entries() {
        let browser = FileBrowser::default();
        assert_eq!(browser.display_path(), "/storage/emulated/0");
        assert_eq!(browser.entries("").len(), 8);
    }

    #[test]
    fn search_is_case_insensitive() {
        let browser = FileBrowser::default();
        let hits = browser.entries("PHOTO");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].extension(), Some("jpg"));
    }

    #[test]
    fn protected_folder_cannot_be_entered() {
        let mut browser = FileBrowser::default();
        let android = browser.entries("android")[0];
        assert!(android.protected);
        assert!(!browser.enter(android));
        assert!(browser.at_mount_point());
    }

    #[test]
    fn navigate_into_folder_and_back() {
        let mut browser = FileBrowser::default();
        let dcim = browser.entries("dcim")[0];
        assert!(browser.enter(dcim));
        assert_eq!(browser.display_path(), "/storage/emulated/0/DCIM");
        assert_eq!(browser.entries("").len(), 2);

        browser.up();
        assert!(browser.at_mount_point());
        browser.up();
        assert_eq!(browser.display_path(), "/storage/emulated/0");
    }

    #[test]
    fn breadcrumb_jump_stops_at_mount_point() {
        let mut browser = FileBrowser::default();
        let docs = browser.entries("documents")[0];
        browser.enter(docs);
        browser.jump_to(0);
        assert_eq!(browser.segments().len(), MOUNT_POINT.len());
    }

    #[test]
    fn export_names_current_path() {
        let start = Instant::now();
        let mut browser = FileBrowser::default();
        browser.start_export(start);
        assert!(browser.poll(start).is_none());
        let notice = browser
            .poll(start + Duration::from_millis(EXPORT_DELAY_MS))
            .unwrap();
        assert!(notice.contains("/storage/emulated/0"));
        assert!(!browser.is_exporting());
    }
}
