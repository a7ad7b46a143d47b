//! V001: full schema — six tables plus the derived read views.

pub const MIGRATION_SQL: &str = r#"
-- Components under observation. Mutated only through the registry.
CREATE TABLE IF NOT EXISTS components (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL CHECK (length(name) > 0),
    kind TEXT NOT NULL CHECK (kind IN ('agent', 'module', 'service', 'utility')),
    file_path TEXT,
    created_at INTEGER NOT NULL,
    last_analyzed INTEGER,
    status TEXT NOT NULL DEFAULT 'active'
        CHECK (status IN ('active', 'deprecated', 'flagged', 'archived'))
) STRICT;

CREATE INDEX IF NOT EXISTS idx_components_kind ON components(kind);
CREATE INDEX IF NOT EXISTS idx_components_status ON components(status);
CREATE INDEX IF NOT EXISTS idx_components_name ON components(name);
CREATE INDEX IF NOT EXISTS idx_components_path ON components(file_path)
    WHERE file_path IS NOT NULL;

-- User stories: append-only; the newest row per component is "current".
CREATE TABLE IF NOT EXISTS user_stories (
    id TEXT PRIMARY KEY,
    component_id TEXT NOT NULL REFERENCES components(id) ON DELETE CASCADE,
    story_text TEXT NOT NULL CHECK (length(story_text) > 0),
    engagement TEXT NOT NULL CHECK (engagement IN ('direct', 'proxy')),
    primitive_value TEXT NOT NULL CHECK (length(primitive_value) > 0),
    expression TEXT NOT NULL CHECK (length(expression) > 0),
    confidence_score REAL NOT NULL DEFAULT 0.0
        CHECK (confidence_score >= 0.0 AND confidence_score <= 1.0),
    quality_score REAL NOT NULL DEFAULT 0.0
        CHECK (quality_score >= 0.0 AND quality_score <= 1.0),
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_user_stories_component ON user_stories(component_id);
CREATE INDEX IF NOT EXISTS idx_user_stories_recency
    ON user_stories(component_id, created_at DESC);

-- Touch points declared by a story. Duplicates are tolerated.
CREATE TABLE IF NOT EXISTS touch_points (
    id TEXT PRIMARY KEY,
    story_id TEXT NOT NULL REFERENCES user_stories(id) ON DELETE CASCADE,
    touch_point TEXT NOT NULL CHECK (length(touch_point) > 0),
    touch_type TEXT NOT NULL CHECK (touch_type IN ('input', 'output', 'interface', 'event'))
) STRICT;

CREATE INDEX IF NOT EXISTS idx_touch_points_story ON touch_points(story_id);
CREATE INDEX IF NOT EXISTS idx_touch_points_type ON touch_points(touch_type);

-- Drift measurements: append-only time series per component per dimension.
CREATE TABLE IF NOT EXISTS drift_metrics (
    id TEXT PRIMARY KEY,
    component_id TEXT NOT NULL REFERENCES components(id) ON DELETE CASCADE,
    drift_score REAL NOT NULL CHECK (drift_score >= 0.0 AND drift_score <= 1.0),
    dimension TEXT NOT NULL
        CHECK (dimension IN ('implementation', 'interface', 'purpose', 'composite')),
    measured_at INTEGER NOT NULL,
    details TEXT
) STRICT;

CREATE INDEX IF NOT EXISTS idx_drift_metrics_component ON drift_metrics(component_id);
CREATE INDEX IF NOT EXISTS idx_drift_metrics_score ON drift_metrics(drift_score);
CREATE INDEX IF NOT EXISTS idx_drift_metrics_series
    ON drift_metrics(component_id, dimension, measured_at DESC);

-- Component flags. The partial unique index is the storage-level guarantee
-- that a component never carries two unresolved flags, regardless of what
-- the application layer believes.
CREATE TABLE IF NOT EXISTS component_flags (
    id TEXT PRIMARY KEY,
    component_id TEXT NOT NULL REFERENCES components(id) ON DELETE CASCADE,
    flag_level TEXT NOT NULL
        CHECK (flag_level IN ('none', 'minor', 'significant', 'critical')),
    drift_score REAL NOT NULL CHECK (drift_score >= 0.0 AND drift_score <= 1.0),
    details TEXT,
    flagged_at INTEGER NOT NULL,
    resolved_at INTEGER,
    resolved_by TEXT
) STRICT;

CREATE INDEX IF NOT EXISTS idx_component_flags_component ON component_flags(component_id);
CREATE INDEX IF NOT EXISTS idx_component_flags_level ON component_flags(flag_level);
CREATE UNIQUE INDEX IF NOT EXISTS idx_component_flags_open
    ON component_flags(component_id) WHERE resolved_at IS NULL;

-- Analysis log: append-only audit trail of scoring passes.
CREATE TABLE IF NOT EXISTS analysis_log (
    id TEXT PRIMARY KEY,
    component_id TEXT NOT NULL REFERENCES components(id) ON DELETE CASCADE,
    analysis_type TEXT NOT NULL
        CHECK (analysis_type IN ('initial', 'update', 'drift_check', 'scheduled')),
    started_at INTEGER NOT NULL,
    completed_at INTEGER,
    status TEXT NOT NULL DEFAULT 'running'
        CHECK (status IN ('running', 'completed', 'failed')),
    result_data TEXT,
    error_message TEXT
) STRICT;

CREATE INDEX IF NOT EXISTS idx_analysis_log_component ON analysis_log(component_id);
CREATE INDEX IF NOT EXISTS idx_analysis_log_started ON analysis_log(started_at DESC);
CREATE INDEX IF NOT EXISTS idx_analysis_log_running ON analysis_log(started_at)
    WHERE status = 'running';

-- The newest story per component.
CREATE VIEW IF NOT EXISTS current_stories AS
SELECT s.*
FROM user_stories s
WHERE s.id = (
    SELECT id FROM user_stories
    WHERE component_id = s.component_id
    ORDER BY created_at DESC, id DESC
    LIMIT 1
);

-- Components needing a human: review-level open flag, or latest composite
-- drift above the attention threshold. Ordered by severity, then score.
CREATE VIEW IF NOT EXISTS components_requiring_attention AS
SELECT
    c.id AS component_id,
    c.name,
    c.kind,
    c.status,
    f.flag_level,
    f.drift_score AS flag_score,
    f.flagged_at,
    m.drift_score AS latest_composite
FROM components c
LEFT JOIN component_flags f
    ON f.component_id = c.id AND f.resolved_at IS NULL
LEFT JOIN (
    SELECT component_id, drift_score,
           ROW_NUMBER() OVER (
               PARTITION BY component_id
               ORDER BY measured_at DESC, id DESC
           ) AS rn
    FROM drift_metrics
    WHERE dimension = 'composite'
) m ON m.component_id = c.id AND m.rn = 1
WHERE f.flag_level IN ('significant', 'critical')
   OR m.drift_score > 0.6
ORDER BY
    CASE f.flag_level
        WHEN 'critical' THEN 3
        WHEN 'significant' THEN 2
        WHEN 'minor' THEN 1
        ELSE 0
    END DESC,
    COALESCE(m.drift_score, f.drift_score) DESC;

-- Story coverage per component kind.
CREATE VIEW IF NOT EXISTS coverage_stats AS
SELECT
    c.kind,
    COUNT(DISTINCT c.id) AS total_components,
    COUNT(DISTINCT s.component_id) AS analyzed_components,
    ROUND(COUNT(DISTINCT s.component_id) * 100.0 / COUNT(DISTINCT c.id), 2)
        AS coverage_pct,
    (SELECT AVG(cs.quality_score)
     FROM current_stories cs
     JOIN components c2 ON c2.id = cs.component_id
     WHERE c2.kind = c.kind) AS avg_quality
FROM components c
LEFT JOIN user_stories s ON s.component_id = c.id
GROUP BY c.kind;
"#;
