// src/model.rs
//
// Roster value types. A Snapshot is replaced wholesale on every changed
// fetch; the only in-place mutation is removal by uid.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attendance {
    Present,
    #[default]
    Absent,
}

impl Attendance {
    /// Lenient parse of the status column. Blank or unrecognized → Absent.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("present") {
            Attendance::Present
        } else {
            Attendance::Absent
        }
    }

    /// Wire form, as found in the sheet and written on export.
    pub fn as_str(self) -> &'static str {
        match self {
            Attendance::Present => "present",
            Attendance::Absent  => "absent",
        }
    }

    /// Badge text for the table.
    pub fn label(self) -> &'static str {
        match self {
            Attendance::Present => "Present",
            Attendance::Absent  => "Absent",
        }
    }

    pub fn is_present(self) -> bool { matches!(self, Attendance::Present) }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub uid: String,
    pub name: String,
    pub contact: String,
    pub attendance: Attendance,
}

impl AttendanceRecord {
    pub fn new(uid: &str, name: &str, contact: &str, attendance: Attendance) -> Self {
        Self {
            uid: s!(uid),
            name: s!(name),
            contact: s!(contact),
            attendance,
        }
    }

    /// Search rule: `term` is matched lower-cased against name and uid,
    /// and as-is against contact.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.uid.to_lowercase().contains(&term)
            || self.contact.contains(&term)
    }
}

/// Ordered roster. Duplicate uids are allowed to coexist.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    records: Vec<AttendanceRecord>,
}

impl Snapshot {
    pub fn new(records: Vec<AttendanceRecord>) -> Self { Self { records } }

    #[inline] pub fn records(&self) -> &[AttendanceRecord] { &self.records }
    #[inline] pub fn len(&self) -> usize { self.records.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &AttendanceRecord> { self.records.iter() }

    pub fn find(&self, uid: &str) -> Option<&AttendanceRecord> {
        self.records.iter().find(|r| r.uid == uid)
    }

    pub fn present_count(&self) -> usize {
        self.records.iter().filter(|r| r.attendance.is_present()).count()
    }

    pub fn absent_count(&self) -> usize {
        self.len() - self.present_count()
    }

    /// Drop every record with this uid. Returns how many were removed.
    pub fn remove_uid(&mut self, uid: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.uid != uid);
        before - self.records.len()
    }

    /// Records matching the search term, in roster order.
    pub fn filter<'a>(&'a self, term: &'a str) -> impl Iterator<Item = &'a AttendanceRecord> + 'a {
        self.records.iter().filter(move |r| term.is_empty() || r.matches(term))
    }
}

impl FromIterator<AttendanceRecord> for Snapshot {
    fn from_iter<I: IntoIterator<Item = AttendanceRecord>>(iter: I) -> Self {
        Self { records: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a AttendanceRecord;
    type IntoIter = std::slice::Iter<'a, AttendanceRecord>;

    fn into_iter(self) -> Self::IntoIter { self.records.iter() }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

impl Connectivity {
    pub fn is_online(self) -> bool { matches!(self, Connectivity::Online) }

    pub fn label(self) -> &'static str {
        match self {
            Connectivity::Online  => "Online",
            Connectivity::Offline => "Offline",
        }
    }
}
