//! The gallery page: every past generation, sortable and filterable by type.

use std::cmp::Ordering;
use std::fmt;

use atelier_ui::{DownloadRequest, Event, ViewerFrame, ViewerSettings};
use serde::{Deserialize, Serialize};

use crate::album::Album;
use crate::model::{GalleryEntry, gallery_projection};
use crate::snapshot::PageSnapshot;

/// Gallery sort options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Newest first
    #[default]
    #[serde(rename = "date-desc")]
    DateDesc,
    /// Oldest first
    #[serde(rename = "date-asc")]
    DateAsc,
    /// Alphabetical by generation type
    #[serde(rename = "type")]
    Type,
}

impl SortOrder {
    pub fn all() -> &'static [SortOrder] {
        &[SortOrder::DateDesc, SortOrder::DateAsc, SortOrder::Type]
    }

    pub fn name(&self) -> &'static str {
        match self {
            SortOrder::DateDesc => "date-desc",
            SortOrder::DateAsc => "date-asc",
            SortOrder::Type => "type",
        }
    }

    /// Parse a select-box value. Unknown values yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|order| order.name() == name)
    }

    /// The next option, wrapping around.
    pub fn cycle(&self) -> Self {
        match self {
            SortOrder::DateDesc => SortOrder::DateAsc,
            SortOrder::DateAsc => SortOrder::Type,
            SortOrder::Type => SortOrder::DateDesc,
        }
    }

    /// Order two entries. Entries with unreadable timestamps sort last for
    /// both date orders.
    fn compare(&self, a: &GalleryEntry, b: &GalleryEntry) -> Ordering {
        match self {
            SortOrder::Type => a.kind.to_lowercase().cmp(&b.kind.to_lowercase()),
            SortOrder::DateDesc | SortOrder::DateAsc => {
                match (a.timestamp_key(), b.timestamp_key()) {
                    (Some(x), Some(y)) if *self == SortOrder::DateDesc => y.cmp(&x),
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }
        }
    }
}

/// Which generation types are shown.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TypeFilter {
    #[default]
    All,
    Only(String),
}

impl TypeFilter {
    const ALL: &'static str = "all";

    pub fn matches(&self, entry: &GalleryEntry) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(kind) => entry.kind == *kind,
        }
    }
}

impl From<String> for TypeFilter {
    fn from(value: String) -> Self {
        if value == Self::ALL {
            TypeFilter::All
        } else {
            TypeFilter::Only(value)
        }
    }
}

impl From<TypeFilter> for String {
    fn from(filter: TypeFilter) -> Self {
        match filter {
            TypeFilter::All => TypeFilter::ALL.to_string(),
            TypeFilter::Only(kind) => kind,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str(Self::ALL),
            TypeFilter::Only(kind) => f.write_str(kind),
        }
    }
}

/// Number of entries per type, in first-seen order, plus the total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypeCounts {
    pub all: usize,
    pub per_type: Vec<(String, usize)>,
}

impl TypeCounts {
    pub fn from_entries(entries: &[GalleryEntry]) -> Self {
        let mut per_type: Vec<(String, usize)> = Vec::new();
        for entry in entries {
            match per_type.iter_mut().find(|(kind, _)| *kind == entry.kind) {
                Some((_, count)) => *count += 1,
                None => per_type.push((entry.kind.clone(), 1)),
            }
        }
        Self {
            all: entries.len(),
            per_type,
        }
    }

    /// Count for one filter option (0 for unknown types).
    pub fn count(&self, filter: &TypeFilter) -> usize {
        match filter {
            TypeFilter::All => self.all,
            TypeFilter::Only(kind) => self
                .per_type
                .iter()
                .find(|(k, _)| k == kind)
                .map_or(0, |(_, count)| *count),
        }
    }

    /// Select-box labels, e.g. `All Types (12)`, `Upscale (3)`.
    pub fn labels(&self) -> Vec<(TypeFilter, String)> {
        std::iter::once((TypeFilter::All, format!("All Types ({})", self.all)))
            .chain(self.per_type.iter().map(|(kind, count)| {
                (TypeFilter::Only(kind.clone()), format!("{kind} ({count})"))
            }))
            .collect()
    }
}

/// Sorted and filtered copy of `entries`. The sort is stable.
pub fn arrange(entries: &[GalleryEntry], sort: SortOrder, filter: &TypeFilter) -> Vec<GalleryEntry> {
    let mut visible: Vec<GalleryEntry> = entries
        .iter()
        .filter(|entry| filter.matches(entry))
        .cloned()
        .collect();
    visible.sort_by(|a, b| sort.compare(a, b));
    visible
}

/// Gallery page state.
///
/// The viewer always navigates the visible (sorted and filtered) list.
/// Changing the sort or filter closes it.
#[derive(Debug)]
pub struct GalleryPage {
    entries: Vec<GalleryEntry>,
    counts: TypeCounts,
    sort: SortOrder,
    filter: TypeFilter,
    album: Album<GalleryEntry>,
    /// Entries were appended unsorted while the viewer was open
    unsorted: bool,
    revision: u64,
}

impl GalleryPage {
    pub fn new(entries: Vec<GalleryEntry>, settings: ViewerSettings) -> Self {
        Self::with_view(entries, settings, SortOrder::default(), TypeFilter::default())
    }

    pub fn with_view(
        entries: Vec<GalleryEntry>,
        settings: ViewerSettings,
        sort: SortOrder,
        filter: TypeFilter,
    ) -> Self {
        let counts = TypeCounts::from_entries(&entries);
        let visible = arrange(&entries, sort, &filter);
        log::info!(
            "Gallery loaded: {} entries, {} shown ({}, {})",
            entries.len(),
            visible.len(),
            sort.name(),
            filter
        );
        Self {
            entries,
            counts,
            sort,
            filter,
            album: Album::new(visible, gallery_projection(), settings),
            unsorted: false,
            revision: 0,
        }
    }

    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    /// Entries in display order.
    pub fn visible(&self) -> &[GalleryEntry] {
        self.album.items()
    }

    pub fn counts(&self) -> &TypeCounts {
        &self.counts
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn filter(&self) -> &TypeFilter {
        &self.filter
    }

    pub fn album(&self) -> &Album<GalleryEntry> {
        &self.album
    }

    pub fn album_mut(&mut self) -> &mut Album<GalleryEntry> {
        &mut self.album
    }

    /// Bumped whenever the visible list is rebuilt. Hosts redraw the grid
    /// when it changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn rearrange(&mut self) {
        let visible = arrange(&self.entries, self.sort, &self.filter);
        log::debug!(
            "Showing {} of {} entries ({}, {})",
            visible.len(),
            self.entries.len(),
            self.sort.name(),
            self.filter
        );
        self.album.replace(visible);
        self.unsorted = false;
        self.revision += 1;
    }

    /// Sort entries appended while the viewer was open, once it has closed.
    fn settle(&mut self) {
        if self.unsorted && !self.album.is_open() {
            self.rearrange();
        }
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        if sort != self.sort {
            self.sort = sort;
            self.rearrange();
        }
    }

    pub fn set_filter(&mut self, filter: TypeFilter) {
        if filter != self.filter {
            self.filter = filter;
            self.rearrange();
        }
    }

    /// Add new entries (e.g. fresh generations). An open viewer stays on its image.
    pub fn append(&mut self, new_entries: Vec<GalleryEntry>) {
        if new_entries.is_empty() {
            return;
        }
        self.entries.extend(new_entries.iter().cloned());
        self.counts = TypeCounts::from_entries(&self.entries);
        if self.album.is_open() {
            // Re-sorting would move the open image; new entries go at the end
            // until the viewer closes.
            let shown = new_entries
                .into_iter()
                .filter(|entry| self.filter.matches(entry));
            self.album.append(shown);
            self.unsorted = true;
            self.revision += 1;
        } else {
            self.rearrange();
        }
    }

    pub fn open(&mut self, index: usize) -> bool {
        self.album.open(index)
    }

    pub fn close(&mut self) {
        self.album.close();
        self.settle();
    }

    pub fn on_event(&mut self, event: &Event) -> Option<DownloadRequest> {
        let request = self.album.on_event(event);
        self.settle();
        request
    }

    pub fn frame(&self) -> Option<ViewerFrame> {
        self.album.frame()
    }

    pub fn thumbnail_download(&self, index: usize) -> Option<DownloadRequest> {
        self.album.thumbnail_download(index)
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot::new(self.sort, self.filter.clone())
    }

    /// Apply a saved sort and filter.
    pub fn restore(&mut self, snapshot: &PageSnapshot) {
        self.sort = snapshot.sort;
        self.filter = snapshot.filter.clone();
        self.rearrange();
    }
}
