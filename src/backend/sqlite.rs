use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::{Arc, Mutex};

use super::{DrillSearch, ProfileBackend, RoundBackend};
use crate::error::BackendError;
use crate::model::{
    CourseSummary, CourseTee, Drill, HandicapLevel, HoleScoreRow, Profile, ProfileUpdate,
    RoundRecord,
};

pub const SCHEMA: [&str; 6] = [
    include_str!("../sql/schema/sqlite/01_golf_courses.sql"),
    include_str!("../sql/schema/sqlite/02_course_tees.sql"),
    include_str!("../sql/schema/sqlite/03_rounds.sql"),
    include_str!("../sql/schema/sqlite/04_hole_scores.sql"),
    include_str!("../sql/schema/sqlite/05_drills.sql"),
    include_str!("../sql/schema/sqlite/06_profiles.sql"),
];

/// Local mirror of the hosted tables, for offline use and tests.
#[derive(Clone)]
pub struct SqliteBackend {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteBackend {
    /// Opens a database file; `:memory:` opens a private in-memory database.
    ///
    /// # Errors
    /// Returns an error if sqlite cannot open the file.
    pub fn open(db_name: &str) -> Result<Self, BackendError> {
        let conn = if db_name == ":memory:" {
            Connection::open_in_memory()?
        } else {
            Connection::open(db_name)?
        };
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// # Errors
    /// Returns an error if sqlite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, BackendError> {
        Self::open(":memory:")
    }

    /// Runs `f` against the connection on the blocking pool.
    async fn with_connection<T, F>(&self, f: F) -> Result<T, BackendError>
    where
        F: FnOnce(&Connection) -> Result<T, BackendError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| BackendError::new("sqlite connection lock poisoned"))?;
            f(&guard)
        })
        .await?
    }

    /// # Errors
    /// Returns an error if any statement in the batch fails; the batch is rolled back.
    pub async fn execute_batch(&self, sql: impl Into<String>) -> Result<(), BackendError> {
        let sql = sql.into();
        self.with_connection(move |conn| {
            let tx = conn.unchecked_transaction()?;
            tx.execute_batch(&sql)?;
            tx.commit()?;
            Ok(())
        })
        .await
    }

    /// Creates the tables the round controller and drill search read.
    ///
    /// # Errors
    /// Returns an error if the DDL fails.
    pub async fn init_schema(&self) -> Result<(), BackendError> {
        self.execute_batch(SCHEMA.join("\n")).await
    }
}

/// Makes user text literal inside a `LIKE ... ESCAPE '\'` pattern.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn parse_date(raw: Option<String>) -> Result<Option<NaiveDate>, BackendError> {
    raw.map(|s| {
        NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|e| BackendError::new(format!("bad round date {s}: {e}")))
    })
    .transpose()
}

#[async_trait]
impl RoundBackend for SqliteBackend {
    async fn count_rounds(&self, round_id: &str) -> Result<u64, BackendError> {
        let round_id = round_id.to_string();
        self.with_connection(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM rounds WHERE id = ?1",
                params![round_id],
                |row| row.get(0),
            )?;
            u64::try_from(count).map_err(|e| BackendError::new(e.to_string()))
        })
        .await
    }

    async fn fetch_round(&self, round_id: &str) -> Result<RoundRecord, BackendError> {
        let round_id = round_id.to_string();
        self.with_connection(move |conn| {
            let row = conn
                .query_row(
                    "SELECT r.id, r.course_id, r.tee_id, r.hole_count, r.date, \
                     c.id AS c_id, c.name AS c_name, c.city, c.state, c.total_par \
                     FROM rounds r LEFT JOIN golf_courses c ON c.id = r.course_id \
                     WHERE r.id = ?1",
                    params![round_id],
                    |row| {
                        let course = match row.get::<_, Option<String>>("c_id")? {
                            Some(id) => Some(CourseSummary {
                                id,
                                name: row.get("c_name")?,
                                city: row.get("city")?,
                                state: row.get("state")?,
                                total_par: row.get("total_par")?,
                            }),
                            None => None,
                        };
                        Ok((
                            RoundRecord {
                                id: row.get("id")?,
                                course_id: row.get("course_id")?,
                                tee_id: row.get("tee_id")?,
                                hole_count: row.get("hole_count")?,
                                date: None,
                                course,
                            },
                            row.get::<_, Option<String>>("date")?,
                        ))
                    },
                )
                .optional()?;
            let (mut record, date) =
                row.ok_or_else(|| BackendError::new(format!("no round with id {round_id}")))?;
            record.date = parse_date(date)?;
            Ok(record)
        })
        .await
    }

    async fn fetch_hole_scores(&self, round_id: &str) -> Result<Vec<HoleScoreRow>, BackendError> {
        let round_id = round_id.to_string();
        self.with_connection(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT round_id, hole_number, score, putts, fairway_hit, green_in_regulation \
                 FROM hole_scores WHERE round_id = ?1 ORDER BY hole_number ASC",
            )?;
            let rows = stmt
                .query_map(params![round_id], |row| {
                    Ok(HoleScoreRow {
                        round_id: row.get("round_id")?,
                        hole_number: row.get("hole_number")?,
                        score: row.get("score")?,
                        putts: row.get("putts")?,
                        fairway_hit: row.get("fairway_hit")?,
                        green_in_regulation: row.get("green_in_regulation")?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
    }

    async fn fetch_course_tees(&self, course_id: &str) -> Result<Vec<CourseTee>, BackendError> {
        let course_id = course_id.to_string();
        self.with_connection(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, course_id, name, color, course_rating, slope_rating \
                 FROM course_tees WHERE course_id = ?1 ORDER BY rowid",
            )?;
            let tees = stmt
                .query_map(params![course_id], |row| {
                    Ok(CourseTee {
                        id: row.get("id")?,
                        course_id: row.get("course_id")?,
                        name: row.get("name")?,
                        color: row.get("color")?,
                        course_rating: row.get("course_rating")?,
                        slope_rating: row.get("slope_rating")?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(tees)
        })
        .await
    }
}

#[async_trait]
impl DrillSearch for SqliteBackend {
    async fn search_drills(&self, query: &str) -> Result<Vec<Drill>, BackendError> {
        let pattern = format!("%{}%", escape_like(&query.trim().to_lowercase()));
        self.with_connection(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, overview, difficulty, duration, category, focus FROM drills \
                 WHERE lower(title) LIKE ?1 ESCAPE '\\' \
                 OR lower(coalesce(overview, '')) LIKE ?1 ESCAPE '\\' \
                 OR lower(coalesce(category, '')) LIKE ?1 ESCAPE '\\' \
                 OR lower(focus) LIKE ?1 ESCAPE '\\' \
                 ORDER BY title",
            )?;
            let raw = stmt
                .query_map(params![pattern], |row| {
                    Ok((
                        Drill {
                            id: row.get("id")?,
                            title: row.get("title")?,
                            overview: row.get("overview")?,
                            difficulty: row.get("difficulty")?,
                            duration: row.get("duration")?,
                            category: row.get("category")?,
                            focus: Vec::new(),
                        },
                        row.get::<_, String>("focus")?,
                    ))
                })?
                .collect::<Result<Vec<_>, _>>()?;
            raw.into_iter()
                .map(|(mut drill, focus)| -> Result<Drill, BackendError> {
                    drill.focus = serde_json::from_str(&focus)?;
                    Ok(drill)
                })
                .collect()
        })
        .await
    }
}

#[async_trait]
impl ProfileBackend for SqliteBackend {
    async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>, BackendError> {
        let user_id = user_id.to_string();
        self.with_connection(move |conn| {
            let row = conn
                .query_row(
                    "SELECT id, has_onboarded, handicap_level, goals, first_name, last_name, \
                     avatar_url, selected_goals, score_goal, handicap_goal \
                     FROM profiles WHERE id = ?1",
                    params![user_id],
                    |row| {
                        Ok((
                            Profile {
                                id: row.get("id")?,
                                has_onboarded: row.get("has_onboarded")?,
                                handicap_level: None,
                                goals: row.get("goals")?,
                                first_name: row.get("first_name")?,
                                last_name: row.get("last_name")?,
                                avatar_url: row.get("avatar_url")?,
                                selected_goals: Vec::new(),
                                score_goal: row.get("score_goal")?,
                                handicap_goal: row.get("handicap_goal")?,
                            },
                            row.get::<_, Option<String>>("handicap_level")?,
                            row.get::<_, String>("selected_goals")?,
                        ))
                    },
                )
                .optional()?;
            let Some((mut profile, level, goals)) = row else {
                return Ok(None);
            };
            profile.handicap_level = level.as_deref().and_then(HandicapLevel::parse);
            profile.selected_goals = serde_json::from_str(&goals)?;
            Ok(Some(profile))
        })
        .await
    }

    async fn create_profile(&self, user_id: &str) -> Result<(), BackendError> {
        let user_id = user_id.to_string();
        self.with_connection(move |conn| {
            conn.execute(
                "INSERT INTO profiles (id, has_onboarded) VALUES (?1, 0)",
                params![user_id],
            )?;
            Ok(())
        })
        .await
    }

    async fn save_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<(), BackendError> {
        let user_id = user_id.to_string();
        let update = update.clone();
        let selected_goals = serde_json::to_string(&update.selected_goals)?;
        self.with_connection(move |conn| {
            conn.execute(
                "UPDATE profiles SET \
                 handicap_level = coalesce(?2, handicap_level), \
                 goals = coalesce(?3, goals), \
                 first_name = coalesce(?4, first_name), \
                 last_name = coalesce(?5, last_name), \
                 avatar_url = coalesce(?6, avatar_url), \
                 selected_goals = ?7, score_goal = ?8, handicap_goal = ?9, \
                 has_onboarded = ?10 \
                 WHERE id = ?1",
                params![
                    user_id,
                    update.handicap_level.map(HandicapLevel::as_str),
                    update.goals,
                    update.first_name,
                    update.last_name,
                    update.avatar_url,
                    selected_goals,
                    update.score_goal,
                    update.handicap_goal,
                    update.has_onboarded,
                ],
            )?;
            Ok(())
        })
        .await
    }
}
