//! Session trajectory log and its CSV export
//!
//! Every `start`, detected step and fusion update appends one record. On
//! `end` the log is written as:
//!
//! ```text
//! x,y,orientation,landmark,WiFiCalibrated
//! 13,52,0,none,false
//! 14.15,52,0,none,false
//! ```
//!
//! to `<dir>/trajectory_<YYYYmmdd_HHMMSS>_<client>.csv`. Existing files are
//! never overwritten: a second trajectory for the same client and second
//! gets a `_<n>` suffix before `.csv`.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use pada::Pose2D;

use crate::error::Result;
use crate::protocol::NO_LANDMARK;

/// CSV header row
pub const CSV_HEADER: &str = "x,y,orientation,landmark,WiFiCalibrated";

/// Suffixes tried before giving up on a free file name
const MAX_NAME_SUFFIX: usize = 1000;

/// One logged pose
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryRecord {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    pub landmark: Option<String>,
    /// Pose came from fusing an external estimate
    pub fused: bool,
}

impl TrajectoryRecord {
    pub fn new(pose: Pose2D, landmark: Option<String>, fused: bool) -> Self {
        Self {
            x: pose.x,
            y: pose.y,
            heading: pose.heading,
            landmark,
            fused,
        }
    }
}

/// Ordered trajectory of one session
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    records: Vec<TrajectoryRecord>,
}

impl Trajectory {
    pub fn push(&mut self, record: TrajectoryRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[TrajectoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Write the trajectory into `dir`, creating it if needed. Returns the file path.
    pub fn save(&self, dir: &Path, client: SocketAddr, time: DateTime<Local>) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let (path, file) = create_unique(dir, &file_name(client, time))?;

        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", CSV_HEADER)?;
        for r in &self.records {
            writeln!(
                writer,
                "{},{},{},{},{}",
                r.x,
                r.y,
                r.heading,
                r.landmark.as_deref().unwrap_or(NO_LANDMARK),
                r.fused
            )?;
        }
        writer.flush()?;

        log::info!("Wrote {} trajectory records to {}", self.len(), path.display());
        Ok(path)
    }
}

/// Create `name` in `dir`, or `<stem>_<n>.csv` if it already exists.
fn create_unique(dir: &Path, name: &str) -> Result<(PathBuf, File)> {
    let stem = name.strip_suffix(".csv").unwrap_or(name);
    for n in 0..=MAX_NAME_SUFFIX {
        let path = match n {
            0 => dir.join(name),
            n => dir.join(format!("{}_{}.csv", stem, n)),
        };
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Err(std::io::Error::new(
        ErrorKind::AlreadyExists,
        format!("no free trajectory file name for {} in {}", name, dir.display()),
    )
    .into())
}

/// `trajectory_<YYYYmmdd_HHMMSS>_<client>.csv` with the address made path-safe.
pub fn file_name(client: SocketAddr, time: DateTime<Local>) -> String {
    let client: String = client
        .to_string()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("trajectory_{}_{}.csv", time.format("%Y%m%d_%H%M%S"), client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn client() -> SocketAddr {
        "192.168.1.20:40001".parse().unwrap()
    }

    #[test]
    fn test_file_name() {
        let time = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        assert_eq!(
            file_name(client(), time),
            "trajectory_20240305_140709_192_168_1_20_40001.csv"
        );
    }

    #[test]
    fn test_save_writes_header_and_rows() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut trajectory = Trajectory::default();
        trajectory.push(TrajectoryRecord::new(Pose2D::new(13.0, 52.0, 0.0), None, false));
        trajectory.push(TrajectoryRecord::new(
            Pose2D::new(14.5, 52.0, 0.5),
            Some("lobby".to_string()),
            true,
        ));

        let out = dir.path().join("nested");
        let path = trajectory.save(&out, client(), Local::now()).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![CSV_HEADER, "13,52,0,none,false", "14.5,52,0.5,lobby,true"]);
    }

    #[test]
    fn test_save_into_file_path_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let trajectory = Trajectory::default();
        assert!(trajectory.save(&blocker, client(), Local::now()).is_err());
    }

    #[test]
    fn test_save_same_second_keeps_both() {
        let dir = tempfile::TempDir::new().unwrap();
        let time = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        let mut walked = Trajectory::default();
        for i in 0..5 {
            walked.push(TrajectoryRecord::new(Pose2D::new(i as f64, 1.0, 0.0), None, false));
        }

        let first = walked.save(dir.path(), client(), time).unwrap();
        let second = Trajectory::default().save(dir.path(), client(), time).unwrap();
        let third = Trajectory::default().save(dir.path(), client(), time).unwrap();

        assert_ne!(first, second);
        assert_eq!(
            second.file_name().unwrap(),
            "trajectory_20240305_140709_192_168_1_20_40001_1.csv"
        );
        assert_eq!(
            third.file_name().unwrap(),
            "trajectory_20240305_140709_192_168_1_20_40001_2.csv"
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 3);
        assert_eq!(std::fs::read_to_string(first).unwrap().lines().count(), 6);
        assert_eq!(std::fs::read_to_string(second).unwrap().lines().count(), 1);
    }
}
