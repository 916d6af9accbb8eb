use quarry_core::{driver::Footprint, Error};
use rusqlite::{ffi, ErrorCode};

/// Maps a rusqlite failure onto a footprint.
///
/// Uniqueness violations carry the offending columns, parsed from SQLite's
/// `UNIQUE constraint failed: users.email` message. A database that cannot
/// be opened or read is a connection failure. Everything else is a
/// `catchall`.
pub(crate) fn classify(err: rusqlite::Error) -> Error {
    let rusqlite::Error::SqliteFailure(failure, message) = &err else {
        return Error::query_failed(Footprint::catchall(), err);
    };

    match failure.extended_code {
        ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
            let keys = message.as_deref().map(unique_columns).unwrap_or_default();
            Error::query_failed(Footprint::not_unique(keys), err)
        }
        _ => match failure.code {
            ErrorCode::CannotOpen | ErrorCode::NotADatabase => {
                Error::bad_connection(err.to_string())
            }
            _ => Error::query_failed(Footprint::catchall(), err),
        },
    }
}

fn unique_columns(message: &str) -> Vec<String> {
    let Some((_, columns)) = message.split_once(": ") else {
        return vec![];
    };

    columns
        .split(", ")
        .map(|column| match column.rsplit_once('.') {
            Some((_, name)) => name,
            None => column,
        })
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}
