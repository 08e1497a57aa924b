use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::board::{group_by_taxonomy, StatusBoard};
use super::domain::Application;
use super::filter::{ApplicantFilter, StatusCounts};
use super::ranking::{rank, SortMode};

/// Presentation the reviewer is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ViewLayout {
    #[default]
    List,
    Board,
}

impl ViewLayout {
    pub fn parse(value: &str) -> Option<Self> {
        let needle = value.trim();
        if needle.eq_ignore_ascii_case("list") {
            Some(ViewLayout::List)
        } else if needle.eq_ignore_ascii_case("board") {
            Some(ViewLayout::Board)
        } else {
            None
        }
    }
}

impl TryFrom<String> for ViewLayout {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("unknown layout '{value}'"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewQuery {
    #[serde(default)]
    pub sort: SortMode,
    #[serde(default)]
    pub filter: ApplicantFilter,
    #[serde(default)]
    pub layout: ViewLayout,
}

impl ViewQuery {
    pub fn sorted_by(sort: SortMode) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    pub fn board(mut self) -> Self {
        self.layout = ViewLayout::Board;
        self
    }

    pub fn filtered(mut self, filter: ApplicantFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Everything a collab-applicants page renders for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicantView {
    pub sort: SortMode,
    pub applications: Vec<Application>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<StatusBoard>,
    pub counts: StatusCounts,
}

impl ApplicantView {
    /// Filter, then rank, then group. Counts always describe the unfiltered input.
    pub fn build(applications: &[Application], query: &ViewQuery) -> Self {
        let counts = StatusCounts::tally(applications);
        let filtered = query.filter.apply(applications);
        let sorted = rank(&filtered, query.sort);

        debug!(
            sort = query.sort.as_str(),
            total = applications.len(),
            shown = sorted.len(),
            "ranked applicants"
        );

        let board = match query.layout {
            ViewLayout::List => None,
            ViewLayout::Board => {
                let board = group_by_taxonomy(&sorted);
                if !board.unrecognized.is_empty() {
                    warn!(
                        count = board.unrecognized.len(),
                        "applications with unrecognized status kept out of board columns"
                    );
                }
                Some(board)
            }
        };

        Self {
            sort: query.sort,
            applications: sorted,
            board,
            counts,
        }
    }
}
