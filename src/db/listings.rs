use crate::domain::{ListingRecord, Partition};
use crate::errors::ServerError;
use rusqlite::{params, Connection, Row};

const SQL_SELECT_PARTITION: &str = r#"
    SELECT
        id,                          -- 0
        city,                        -- 1
        period,                      -- 2
        lat,                         -- 3
        lng,                         -- 4
        room_type,                   -- 5
        person_capacity,             -- 6
        realSum,                     -- 7
        guest_satisfaction_overall,  -- 8
        cleanliness_rating,          -- 9
        dist,                        -- 10
        metro_dist,                  -- 11
        attr_index,                  -- 12
        rest_index                   -- 13
    FROM listings
    WHERE city = ?1 AND period = ?2
    ORDER BY id
"#;

const SQL_INSERT_LISTING: &str = r#"
    INSERT INTO listings (
        city, period, lat, lng,
        room_type, person_capacity, realSum,
        guest_satisfaction_overall, cleanliness_rating,
        dist, metro_dist, attr_index, rest_index
    ) VALUES (
        ?1, ?2, ?3, ?4,
        ?5, ?6, ?7,
        ?8, ?9,
        ?10, ?11, ?12, ?13
    )
"#;

fn listing_from_row(row: &Row<'_>) -> rusqlite::Result<ListingRecord> {
    Ok(ListingRecord {
        id: Some(row.get(0)?),
        city: row.get(1)?,
        period: row.get(2)?,
        lat: row.get(3)?,
        lng: row.get(4)?,
        room_type: row.get(5)?,
        person_capacity: row.get(6)?,
        real_sum: row.get(7)?,
        guest_satisfaction_overall: row.get(8)?,
        cleanliness_rating: row.get(9)?,
        dist: row.get(10)?,
        metro_dist: row.get(11)?,
        attr_index: row.get(12)?,
        rest_index: row.get(13)?,
    })
}

/// All rows of one partition in insertion order.
pub fn get_listings_for_partition(
    conn: &Connection,
    partition: &Partition,
) -> Result<Vec<ListingRecord>, ServerError> {
    let mut stmt = conn
        .prepare_cached(SQL_SELECT_PARTITION)
        .map_err(|e| ServerError::DbError(format!("prepare listings query failed: {e}")))?;

    let rows = stmt
        .query_map(params![partition.city(), partition.period()], listing_from_row)
        .map_err(|e| ServerError::DbError(format!("listings query failed: {e}")))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| ServerError::DbError(format!("listing row failed: {e}")))?);
    }
    Ok(results)
}

#[cfg(test)]
pub fn count_listings_for_partition(
    conn: &Connection,
    partition: &Partition,
) -> Result<i64, ServerError> {
    conn.query_row(
        "SELECT count(*) FROM listings WHERE city = ?1 AND period = ?2",
        params![partition.city(), partition.period()],
        |r| r.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("count listings failed: {e}")))
}

/// Removes every row of the partition. Returns the number of rows deleted.
pub fn delete_partition(conn: &Connection, partition: &Partition) -> Result<usize, ServerError> {
    conn.execute(
        "DELETE FROM listings WHERE city = ?1 AND period = ?2",
        params![partition.city(), partition.period()],
    )
    .map_err(|e| ServerError::DbError(format!("delete partition {partition} failed: {e}")))
}

/// Appends rows; any `id` on the records is ignored and assigned by SQLite.
pub fn insert_listings(conn: &Connection, records: &[ListingRecord]) -> Result<usize, ServerError> {
    let mut stmt = conn
        .prepare_cached(SQL_INSERT_LISTING)
        .map_err(|e| ServerError::DbError(format!("prepare insert failed: {e}")))?;

    for record in records {
        stmt.execute(params![
            record.city,
            record.period,
            record.lat,
            record.lng,
            record.room_type,
            record.person_capacity,
            record.real_sum,
            record.guest_satisfaction_overall,
            record.cleanliness_rating,
            record.dist,
            record.metro_dist,
            record.attr_index,
            record.rest_index,
        ])
        .map_err(|e| ServerError::DbError(format!("insert listing failed: {e}")))?;
    }

    Ok(records.len())
}
