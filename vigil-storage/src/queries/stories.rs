//! Queries for user_stories and touch_points.
//!
//! A story and its touch points are always written together; callers wrap
//! `insert_story` in a transaction so either all rows land or none do.

use rusqlite::{params, Connection, OptionalExtension};
use vigil_core::errors::StorageError;
use vigil_core::types::ids::{ComponentId, StoryId, TouchPointId};
use vigil_core::types::{TouchPoint, UserStory};

use super::util::{map_sqlite_err, parse_engagement, parse_touch_type};

const STORY_COLUMNS: &str = "id, component_id, story_text, engagement, primitive_value, \
     expression, confidence_score, quality_score, created_at, updated_at";

fn map_story_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserStory> {
    Ok(UserStory {
        id: StoryId::from_string(row.get(0)?),
        component_id: ComponentId::from_string(row.get(1)?),
        story_text: row.get(2)?,
        engagement: parse_engagement(row.get(3)?)?,
        primitive_value: row.get(4)?,
        expression: row.get(5)?,
        confidence: row.get(6)?,
        quality: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
        touch_points: Vec::new(),
    })
}

/// Insert a story row and all of its touch point rows.
pub fn insert_story(conn: &Connection, story: &UserStory) -> Result<(), StorageError> {
    conn.execute(
        &format!(
            "INSERT INTO user_stories ({STORY_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
        ),
        params![
            story.id.as_str(),
            story.component_id.as_str(),
            story.story_text,
            story.engagement.as_str(),
            story.primitive_value,
            story.expression,
            story.confidence,
            story.quality,
            story.created_at,
            story.updated_at,
        ],
    )
    .map_err(map_sqlite_err)?;

    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO touch_points (id, story_id, touch_point, touch_type)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .map_err(map_sqlite_err)?;
    for tp in &story.touch_points {
        stmt.execute(params![
            tp.id.as_str(),
            tp.story_id.as_str(),
            tp.text,
            tp.touch_type.as_str(),
        ])
        .map_err(map_sqlite_err)?;
    }

    Ok(())
}

/// The most recently created story for a component, touch points attached.
pub fn current_story(
    conn: &Connection,
    component_id: &ComponentId,
) -> Result<Option<UserStory>, StorageError> {
    let story = conn
        .query_row(
            &format!("SELECT {STORY_COLUMNS} FROM current_stories WHERE component_id = ?1"),
            params![component_id.as_str()],
            map_story_row,
        )
        .optional()
        .map_err(map_sqlite_err)?;

    match story {
        Some(mut story) => {
            story.touch_points = touch_points_for(conn, &story.id)?;
            Ok(Some(story))
        }
        None => Ok(None),
    }
}

/// All touch points declared by a story.
pub fn touch_points_for(
    conn: &Connection,
    story_id: &StoryId,
) -> Result<Vec<TouchPoint>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, story_id, touch_point, touch_type
             FROM touch_points WHERE story_id = ?1 ORDER BY id",
        )
        .map_err(map_sqlite_err)?;
    let rows = stmt
        .query_map(params![story_id.as_str()], |row| {
            Ok(TouchPoint {
                id: TouchPointId::from_string(row.get(0)?),
                story_id: StoryId::from_string(row.get(1)?),
                text: row.get(2)?,
                touch_type: parse_touch_type(row.get(3)?)?,
            })
        })
        .map_err(map_sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(map_sqlite_err)
}

/// Number of story revisions recorded for a component.
pub fn story_count(conn: &Connection, component_id: &ComponentId) -> Result<i64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM user_stories WHERE component_id = ?1",
        params![component_id.as_str()],
        |row| row.get(0),
    )
    .map_err(map_sqlite_err)
}
