// src/view.rs
//
// Pure projection of a Snapshot into what the table shows.
// Counts always cover the whole roster; rows honor the search term.

use reqwest::Url;

use crate::config::consts::AVATAR_URL;
use crate::model::{Attendance, AttendanceRecord, Snapshot};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowView {
    pub uid: String,
    pub name: String,
    pub avatar_url: String,
    pub contact: String,
    pub status: Attendance,
}

impl RowView {
    pub fn from_record(r: &AttendanceRecord) -> Self {
        Self {
            uid: r.uid.clone(),
            name: r.name.clone(),
            avatar_url: avatar_url(&r.name),
            contact: r.contact.clone(),
            status: r.attendance,
        }
    }

    #[inline] pub fn badge(&self) -> &'static str { self.status.label() }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableView {
    pub rows: Vec<RowView>,
    pub present: usize,
    pub absent: usize,
}

impl TableView {
    pub fn total(&self) -> usize { self.present + self.absent }
}

pub fn render(snapshot: &Snapshot, search: &str) -> TableView {
    TableView {
        rows: snapshot.filter(search).map(RowView::from_record).collect(),
        present: snapshot.present_count(),
        absent: snapshot.absent_count(),
    }
}

/// Generated avatar keyed by name.
pub fn avatar_url(name: &str) -> String {
    match Url::parse_with_params(AVATAR_URL, &[("name", name), ("background", "random")]) {
        Ok(url) => url.into(),
        Err(_) => s!(AVATAR_URL),
    }
}

/// Plain-text table for the terminal.
pub fn to_text(view: &TableView) -> String {
    let headers = ["UID", "Name", "Contact", "Status"];
    let cells: Vec<[&str; 4]> = view
        .rows
        .iter()
        .map(|r| [r.uid.as_str(), r.name.as_str(), r.contact.as_str(), r.badge()])
        .collect();

    let mut widths = headers.map(|h| h.chars().count());
    for row in &cells {
        for (w, c) in widths.iter_mut().zip(row) {
            *w = (*w).max(c.chars().count());
        }
    }

    let mut out = s!();
    let mut line = |row: &[&str; 4]| {
        let padded: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(c, w)| format!("{c:<w$}"))
            .collect();
        out.push_str(padded.join("  ").trim_end());
        out.push('\n');
    };
    line(&headers);
    for row in &cells {
        line(row);
    }
    out.push_str(&format!(
        "Present: {}  Absent: {}  Shown: {}/{}\n",
        view.present,
        view.absent,
        view.rows.len(),
        view.total()
    ));
    out
}
