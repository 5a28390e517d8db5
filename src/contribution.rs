use std::collections::HashMap;

use itertools::Itertools;
use time::{Date, Month, UtcOffset};

use crate::project::Project;

/// How busy a day in the contribution calendar was
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    None,
    One,
    Two,
    /// 3 to 7 projects
    Several,
    /// 8 or more
    Many,
}

impl Level {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => Self::None,
            1 => Self::One,
            2 => Self::Two,
            3..=7 => Self::Several,
            _ => Self::Many,
        }
    }

    pub fn cell(&self) -> &'static str {
        match self {
            Self::None => "⬛",
            Self::One => "🟦",
            Self::Two => "🟪",
            Self::Several => "🟩",
            Self::Many => "🟨",
        }
    }
}

/// Every day of `year`, stopping at `today` for the current year
pub fn calendar(year: i32, today: Date) -> Vec<Date> {
    if year > today.year() {
        return Vec::new();
    }
    let Ok(first) = Date::from_calendar_date(year, Month::January, 1) else {
        return Vec::new();
    };
    let last = if year == today.year() {
        today
    } else {
        match Date::from_calendar_date(year, Month::December, 31) {
            Ok(d) => d,
            Err(_) => return Vec::new(),
        }
    };

    std::iter::successors(Some(first), |d| d.next_day())
        .take_while(|d| *d <= last)
        .collect()
}

/// Projects per UTC calendar day
pub fn counts(projects: &[Project]) -> HashMap<Date, usize> {
    projects
        .iter()
        .map(|p| p.created_at.to_offset(UtcOffset::UTC).date())
        .counts()
}

/// Years worth showing: any year with a project, plus the current one. Newest first.
pub fn years(projects: &[Project], today: Date) -> Vec<i32> {
    projects
        .iter()
        .map(|p| p.created_at.to_offset(UtcOffset::UTC).year())
        .chain(std::iter::once(today.year()))
        .unique()
        .sorted_unstable_by(|a, b| b.cmp(a))
        .collect()
}

pub fn tooltip(date: Date, count: usize) -> String {
    match count {
        0 => format!("No projects on {date}"),
        1 => format!("1 project on {date}"),
        n => format!("{n} projects on {date}"),
    }
}

pub struct ContributionGraph {
    pub year: i32,
    pub days: Vec<(Date, usize)>,
}

impl ContributionGraph {
    pub fn new(year: i32, today: Date, projects: &[Project]) -> Self {
        let counts = counts(projects);
        let days = calendar(year, today)
            .into_iter()
            .map(|d| (d, counts.get(&d).copied().unwrap_or(0)))
            .collect();
        Self { year, days }
    }

    pub fn total(&self) -> usize {
        self.days.iter().map(|(_, n)| n).sum()
    }

    /// Busiest day, earliest one on ties
    pub fn best_day(&self) -> Option<(Date, usize)> {
        self.days
            .iter()
            .copied()
            .filter(|(_, n)| *n > 0)
            .min_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)))
    }

    /// One row per weekday starting on Sunday, one column per week
    pub fn rows(&self) -> [Vec<Option<Level>>; 7] {
        let mut rows: [Vec<Option<Level>>; 7] = Default::default();
        let Some((first, _)) = self.days.first() else {
            return rows;
        };
        let offset = first.weekday().number_days_from_sunday() as usize;
        for row in rows.iter_mut().take(offset) {
            row.push(None);
        }
        for (i, (_, count)) in self.days.iter().enumerate() {
            rows[(offset + i) % 7].push(Some(Level::from_count(*count)));
        }
        rows
    }

    pub fn render(&self) -> String {
        if self.days.is_empty() {
            return format!("Nothing to show for {} yet", self.year);
        }
        let grid = self
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or("➖", |level| level.cell()))
                    .join("")
            })
            .join("\n");
        let legend = [
            (Level::One, "1 project"),
            (Level::Two, "2 projects"),
            (Level::Several, "3+ projects"),
            (Level::Many, "8+ projects"),
        ]
        .iter()
        .map(|(level, label)| format!("{} {}", level.cell(), label))
        .join("  ");

        let total = match self.total() {
            1 => format!("1 project in {}", self.year),
            n => format!("{n} projects in {}", self.year),
        };
        let best = self
            .best_day()
            .map(|(date, n)| format!("\nBusiest day: {}", tooltip(date, n)))
            .unwrap_or_default();
        format!("{grid}\n\n{legend}\n{total}{best}")
    }
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use super::*;
    use crate::project::tests::project;
    use crate::project::ProjectType;

    fn added(at: time::OffsetDateTime) -> Project {
        let mut p = project(1, ProjectType::Website, "p", &[]);
        p.created_at = at;
        p
    }

    #[test]
    fn test_levels() {
        assert_eq!(Level::None, Level::from_count(0));
        assert_eq!(Level::One, Level::from_count(1));
        assert_eq!(Level::Two, Level::from_count(2));
        assert_eq!(Level::Several, Level::from_count(3));
        assert_eq!(Level::Several, Level::from_count(7));
        assert_eq!(Level::Many, Level::from_count(8));
        assert_eq!(Level::Many, Level::from_count(100));
    }

    #[test]
    fn test_calendar() {
        let today = date!(2025 - 03 - 10);
        assert_eq!(366, calendar(2024, today).len());
        assert_eq!(365, calendar(2023, today).len());
        let this_year = calendar(2025, today);
        assert_eq!(31 + 28 + 10, this_year.len());
        assert_eq!(Some(&date!(2025 - 01 - 01)), this_year.first());
        assert_eq!(Some(&today), this_year.last());
        assert!(calendar(2026, today).is_empty());
    }

    #[test]
    fn test_counts_use_utc_day() {
        let projects = vec![
            added(datetime!(2024-05-01 23:30 -02:00)),
            added(datetime!(2024-05-02 00:10 UTC)),
            added(datetime!(2024-05-01 08:00 UTC)),
        ];
        let counts = counts(&projects);
        assert_eq!(Some(&2), counts.get(&date!(2024 - 05 - 02)));
        assert_eq!(Some(&1), counts.get(&date!(2024 - 05 - 01)));
    }

    #[test]
    fn test_years() {
        let projects = vec![
            added(datetime!(2023-05-01 10:00 UTC)),
            added(datetime!(2024-05-01 10:00 UTC)),
            added(datetime!(2023-07-01 10:00 UTC)),
        ];
        assert_eq!(vec![2025, 2024, 2023], years(&projects, date!(2025 - 01 - 05)));
        assert_eq!(vec![2025], years(&[], date!(2025 - 01 - 05)));
    }

    #[test]
    fn test_graph() {
        let projects = vec![
            added(datetime!(2024-01-01 10:00 UTC)),
            added(datetime!(2024-01-03 10:00 UTC)),
            added(datetime!(2024-01-03 11:00 UTC)),
            added(datetime!(2023-01-03 11:00 UTC)),
        ];
        let graph = ContributionGraph::new(2024, date!(2025 - 01 - 01), &projects);
        assert_eq!(366, graph.days.len());
        assert_eq!(3, graph.total());
        assert_eq!(Some((date!(2024 - 01 - 03), 2)), graph.best_day());

        // 2024-01-01 is a Monday
        let rows = graph.rows();
        assert_eq!(None, rows[0][0]);
        assert_eq!(Some(Level::One), rows[1][0]);
        assert_eq!(Some(Level::None), rows[2][0]);
        assert_eq!(Some(Level::Two), rows[3][0]);
        assert_eq!(366 + 1, rows.iter().map(Vec::len).sum::<usize>());

        let text = graph.render();
        assert_eq!(7, text.lines().take_while(|l| !l.is_empty()).count());
        assert!(text.contains("3 projects in 2024"));
        assert!(text.contains("Busiest day: 2 projects on 2024-01-03"));
    }

    #[test]
    fn test_empty_graph() {
        let graph = ContributionGraph::new(2030, date!(2025 - 01 - 01), &[]);
        assert_eq!(0, graph.total());
        assert_eq!(None, graph.best_day());
        assert_eq!("Nothing to show for 2030 yet", graph.render());
    }

    #[test]
    fn test_tooltip() {
        assert_eq!("No projects on 2024-02-29", tooltip(date!(2024 - 02 - 29), 0));
        assert_eq!("1 project on 2024-02-29", tooltip(date!(2024 - 02 - 29), 1));
        assert_eq!("3 projects on 2024-02-29", tooltip(date!(2024 - 02 - 29), 3));
    }
}
