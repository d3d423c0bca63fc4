//! Static catalog of the leagues that can be scraped, their subleagues
//! (conferences or historical names), the URL each season or franchise lives
//! at, and the post-processing quirks each source needs.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::types::{FetchJob, Quirks, RowFilter, SyntheticColumn, TableSelector};

pub const MLB_TEAM_IDS: &[&str] = &[
    "ANA", "ARI", "ATL", "BAL", "BOS", "CHC", "CHW", "CIN", "CLE", "COL", "DET", "FLA", "HOU",
    "KCR", "LAD", "MIL", "MIN", "NYM", "NYY", "OAK", "PHI", "PIT", "SDP", "SEA", "SFG", "STL",
    "TBD", "TEX", "TOR", "WSN",
];

pub const NFL_TEAM_IDS: &[&str] = &[
    "crd", "atl", "rav", "buf", "car", "chi", "cin", "cle", "dal", "den", "det", "gnb", "htx",
    "clt", "jax", "kan", "rai", "sdg", "ram", "mia", "min", "nwe", "nor", "nyg", "nyj", "phi",
    "pit", "sfo", "sea", "tam", "oti", "was",
];

pub const NHL_TEAM_IDS: &[&str] = &[
    "ANA", "PHX", "BOS", "BUF", "CGY", "CAR", "CHI", "COL", "CBJ", "DAL", "DET", "EDM", "FLA",
    "LAK", "MIN", "MTL", "NSH", "NJD", "NYI", "NYR", "OTT", "PHI", "PIT", "SJS", "SEA", "STL",
    "TBL", "TOR", "VAN", "VEG", "WSH", "WPG",
];

/// `(conference, first season, season after the last one)`; `None` means the
/// conference is still active.
const NCAAF_CONFERENCES: &[(&str, i32, Option<i32>)] = &[
    ("american", 2013, None),
    ("big-east", 1991, Some(2013)),
    ("acc", 1953, None),
    ("big-12", 1996, None),
    ("big-west", 1988, Some(2001)),
    ("pcaa", 1969, Some(1987)),
    ("big-ten", 1953, None),
    ("cusa", 1996, None),
    ("independent", 1900, None),
    ("mac", 1962, None),
    ("pac-12", 2011, None),
    ("pac-10", 1978, Some(2011)),
    ("pac-8", 1968, Some(1978)),
    ("aawu", 1959, Some(1968)),
    ("pcc", 1916, Some(1959)),
    ("sec", 1933, None),
    ("sun-belt", 2001, None),
];

const NCAAF_REPEATED_HEADER: RowFilter = RowFilter {
    column: "W",
    values: &["W"],
};

const TEAM_HISTORY_QUIRKS: Quirks = Quirks {
    table: TableSelector::First,
    skip_thead_rows: true,
    row_filter: None,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum League {
    Mlb,
    Nba,
    Nfl,
    Nhl,
    Ncaaf,
    Big5,
}

impl League {
    pub const ALL: [League; 6] = [
        League::Mlb,
        League::Nba,
        League::Nfl,
        League::Nhl,
        League::Ncaaf,
        League::Big5,
    ];

    /// Maps the interactive menu number (1-based) to a league.
    pub fn from_choice(choice: u32) -> Option<League> {
        let idx = usize::try_from(choice).ok()?.checked_sub(1)?;
        Self::ALL.get(idx).copied()
    }

    pub fn choice(&self) -> u32 {
        match self {
            League::Mlb => 1,
            League::Nba => 2,
            League::Nfl => 3,
            League::Nhl => 4,
            League::Ncaaf => 5,
            League::Big5 => 6,
        }
    }

    /// Directory name under the output root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            League::Mlb => "MLB",
            League::Nba => "NBA",
            League::Nfl => "NFL",
            League::Nhl => "NHL",
            League::Ncaaf => "NCAAF",
            League::Big5 => "big5",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            League::Mlb => "Major League Baseball",
            League::Nba => "National Basketball Association",
            League::Nfl => "National Football League",
            League::Nhl => "National Hockey League",
            League::Ncaaf => "NCAA Football Division 1",
            League::Big5 => {
                "The Big 5 European Leagues (Bundesliga, La Liga, Ligue 1, Premier, Serie A)"
            }
        }
    }

    /// Subleagues in scrape order. `latest_season` is exclusive.
    pub fn subleagues(&self, latest_season: i32) -> Vec<Subleague> {
        let seasons = |start, end: Option<i32>| Coverage::Seasons {
            start,
            end: end.unwrap_or(latest_season),
        };

        match self {
            League::Mlb => vec![Subleague::teams(*self, "MLB", MLB_TEAM_IDS)],
            League::Nfl => vec![Subleague::teams(*self, "NFL", NFL_TEAM_IDS)],
            League::Nhl => vec![Subleague::teams(*self, "NHL", NHL_TEAM_IDS)],
            League::Nba => vec![
                Subleague {
                    league: *self,
                    name: "BAA",
                    coverage: seasons(1947, Some(1950)),
                    quirks: Quirks {
                        skip_thead_rows: true,
                        ..Quirks::default()
                    },
                },
                Subleague {
                    league: *self,
                    name: "NBA",
                    coverage: seasons(1950, None),
                    quirks: Quirks {
                        skip_thead_rows: true,
                        ..Quirks::default()
                    },
                },
            ],
            League::Ncaaf => NCAAF_CONFERENCES
                .iter()
                .map(|&(name, start, end)| Subleague {
                    league: *self,
                    name,
                    coverage: seasons(start, end),
                    quirks: Quirks {
                        row_filter: Some(NCAAF_REPEATED_HEADER),
                        ..Quirks::default()
                    },
                })
                .collect(),
            League::Big5 => vec![Subleague {
                league: *self,
                name: "big5",
                coverage: seasons(1996, None),
                quirks: Quirks {
                    table: TableSelector::Class("stats_table"),
                    skip_thead_rows: true,
                    row_filter: None,
                },
            }],
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coverage {
    /// Seasons `start..end`, end exclusive.
    Seasons { start: i32, end: i32 },
    Franchises(&'static [&'static str]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subleague {
    pub league: League,
    pub name: &'static str,
    pub coverage: Coverage,
    pub quirks: Quirks,
}

impl Subleague {
    fn teams(league: League, name: &'static str, ids: &'static [&'static str]) -> Self {
        Self {
            league,
            name,
            coverage: Coverage::Franchises(ids),
            quirks: TEAM_HISTORY_QUIRKS,
        }
    }

    pub fn is_per_team(&self) -> bool {
        matches!(self.coverage, Coverage::Franchises(_))
    }

    /// Directory the per-season or per-team files land in.
    pub fn directory(&self, root: &Path) -> PathBuf {
        let league_dir = root.join(self.league.dir_name());
        match self.league {
            League::Ncaaf => league_dir.join(self.name),
            _ => league_dir,
        }
    }

    pub fn combined_file_name(&self) -> String {
        format!("{}-ALL.csv", self.name)
    }

    /// Prefix shared by this subleague's files; `None` when every CSV in the
    /// directory belongs to it.
    pub fn file_prefix(&self) -> Option<String> {
        match self.coverage {
            Coverage::Seasons { .. } => Some(format!("{}-", self.name)),
            Coverage::Franchises(_) => None,
        }
    }

    /// URL of the page holding `column`'s season or franchise table.
    pub fn url(&self, column: &SyntheticColumn) -> String {
        match (self.league, column) {
            (League::Nba, SyntheticColumn::Year(year)) => format!(
                "https://www.basketball-reference.com/leagues/{}_{}.html",
                self.name, year
            ),
            (League::Ncaaf, SyntheticColumn::Year(year)) => format!(
                "https://www.sports-reference.com/cfb/conferences/{}/{}.html",
                self.name, year
            ),
            (League::Big5, SyntheticColumn::Year(year)) => format!(
                "https://fbref.com/en/comps/Big5/{}-{}/{}-{}-Big-5-European-Leagues-Stats",
                year - 1,
                year,
                year - 1,
                year
            ),
            (League::Mlb, column) => format!(
                "https://www.baseball-reference.com/teams/{}/",
                column.value()
            ),
            (League::Nfl, column) => format!(
                "https://www.pro-football-reference.com/teams/{}/",
                column.value()
            ),
            (League::Nhl, column) => format!(
                "https://www.hockey-reference.com/teams/{}/history.html",
                column.value()
            ),
            // `jobs` only pairs season leagues with `SyntheticColumn::Year`.
            (League::Nba | League::Ncaaf | League::Big5, SyntheticColumn::Team(team)) => {
                unreachable!("{} is scraped by season, not by franchise `{}`", self.league, team)
            }
        }
    }

    fn season_file_name(&self, year: i32) -> String {
        match self.league {
            League::Big5 => format!("{}-{}-{}.csv", self.name, year - 1, year),
            _ => format!("{}-{}.csv", self.name, year),
        }
    }

    /// One job per season, or per franchise for team-history leagues.
    pub fn jobs(&self) -> Vec<FetchJob> {
        match &self.coverage {
            Coverage::Seasons { start, end } => (*start..*end)
                .map(|year| {
                    let column = SyntheticColumn::Year(year);
                    FetchJob {
                        url: self.url(&column),
                        file_name: self.season_file_name(year),
                        column,
                    }
                })
                .collect(),
            Coverage::Franchises(ids) => ids
                .iter()
                .map(|team| {
                    let column = SyntheticColumn::Team(team.to_string());
                    FetchJob {
                        url: self.url(&column),
                        file_name: format!("{}.csv", team),
                        column,
                    }
                })
                .collect(),
        }
    }

    /// Human-readable span for log and progress messages.
    pub fn span(&self) -> String {
        match &self.coverage {
            Coverage::Seasons { start, end } => format!("{} - {}", start, end - 1),
            Coverage::Franchises(ids) => format!("{} franchises", ids.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_choice() {
        assert_eq!(League::from_choice(1), Some(League::Mlb));
        assert_eq!(League::from_choice(5), Some(League::Ncaaf));
        assert_eq!(League::from_choice(6), Some(League::Big5));
        assert_eq!(League::from_choice(0), None);
        assert_eq!(League::from_choice(7), None);
        for league in League::ALL {
            assert_eq!(League::from_choice(league.choice()), Some(league));
        }
    }

    #[test]
    fn test_franchise_counts() {
        assert_eq!(MLB_TEAM_IDS.len(), 30);
        assert_eq!(NFL_TEAM_IDS.len(), 32);
        assert_eq!(NHL_TEAM_IDS.len(), 32);
    }

    #[test]
    fn test_nba_subleagues_and_urls() {
        let subs = League::Nba.subleagues(2022);
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].name, "BAA");

        let jobs = subs[0].jobs();
        assert_eq!(jobs.len(), 3);
        assert_eq!(
            jobs[0].url,
            "https://www.basketball-reference.com/leagues/BAA_1947.html"
        );
        assert_eq!(jobs[2].file_name, "BAA-1949.csv");
        assert_eq!(jobs[2].column, SyntheticColumn::Year(1949));

        let nba = subs[1].jobs();
        assert_eq!(nba.first().unwrap().file_name, "NBA-1950.csv");
        assert_eq!(nba.last().unwrap().file_name, "NBA-2021.csv");
    }

    #[test]
    fn test_ncaaf_conferences() {
        let subs = League::Ncaaf.subleagues(2022);
        assert_eq!(subs.len(), 17);

        let big_east = subs.iter().find(|s| s.name == "big-east").unwrap();
        assert_eq!(big_east.coverage, Coverage::Seasons { start: 1991, end: 2013 });
        assert_eq!(
            big_east.url(&SyntheticColumn::Year(2000)),
            "https://www.sports-reference.com/cfb/conferences/big-east/2000.html"
        );
        assert_eq!(
            big_east.directory(Path::new("scraped_data")),
            PathBuf::from("scraped_data/NCAAF/big-east")
        );
        assert_eq!(big_east.quirks.row_filter, Some(NCAAF_REPEATED_HEADER));

        let sec = subs.iter().find(|s| s.name == "sec").unwrap();
        assert_eq!(sec.coverage, Coverage::Seasons { start: 1933, end: 2022 });
    }

    #[test]
    fn test_big5_split_season_naming() {
        let sub = &League::Big5.subleagues(1998)[0];
        let jobs = sub.jobs();
        assert_eq!(jobs.len(), 2);
        assert_eq!(
            jobs[0].url,
            "https://fbref.com/en/comps/Big5/1995-1996/1995-1996-Big-5-European-Leagues-Stats"
        );
        assert_eq!(jobs[0].file_name, "big5-1995-1996.csv");
        assert_eq!(jobs[0].column, SyntheticColumn::Year(1996));
        assert_eq!(sub.directory(Path::new("out")), PathBuf::from("out/big5"));
        assert_eq!(sub.quirks.table, TableSelector::Class("stats_table"));
    }

    #[test]
    fn test_team_history_jobs() {
        let sub = &League::Nhl.subleagues(2022)[0];
        assert!(sub.is_per_team());
        assert_eq!(sub.file_prefix(), None);

        let jobs = sub.jobs();
        assert_eq!(jobs.len(), 32);
        assert_eq!(
            jobs[0].url,
            "https://www.hockey-reference.com/teams/ANA/history.html"
        );
        assert_eq!(jobs[0].file_name, "ANA.csv");
        assert_eq!(jobs[0].column, SyntheticColumn::Team("ANA".to_string()));

        let nfl = &League::Nfl.subleagues(2022)[0];
        assert_eq!(
            nfl.url(&SyntheticColumn::Team("gnb".to_string())),
            "https://www.pro-football-reference.com/teams/gnb/"
        );
        let mlb = &League::Mlb.subleagues(2022)[0];
        assert_eq!(
            mlb.url(&SyntheticColumn::Team("BOS".to_string())),
            "https://www.baseball-reference.com/teams/BOS/"
        );
    }

    #[test]
    fn test_latest_season_is_exclusive() {
        let sub = &League::Big5.subleagues(1997)[0];
        assert_eq!(sub.jobs().len(), 1);
        assert_eq!(sub.span(), "1996 - 1996");
    }
}
