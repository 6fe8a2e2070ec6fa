//! Room identifier resolution.
//!
//! A board is keyed by a room id taken from the first command-line
//! argument. Both a bare room name and the web-style `?room=...` query
//! string are accepted.

/// Room used when none is given.
pub const DEFAULT_ROOM: &str = "event-storming-default";

/// Resolve the room id from command-line arguments.
pub fn room_from_args<I: Iterator<Item = String>>(mut args: I) -> String {
    match args.next() {
        Some(arg) => room_from_query(&arg),
        None => DEFAULT_ROOM.to_string(),
    }
}

/// Resolve the room id from a query-string-like argument.
pub fn room_from_query(query: &str) -> String {
    let query = query.trim_start_matches('?');

    if !query.contains('=') {
        let room = query.trim();
        return if room.is_empty() {
            DEFAULT_ROOM.to_string()
        } else {
            room.to_string()
        };
    }

    for pair in query.split('&') {
        if let Some(value) = pair.strip_prefix("room=") {
            if !value.is_empty() {
                return value.to_string();
            }
        }
    }
    DEFAULT_ROOM.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_argument_uses_default() {
        assert_eq!(room_from_args(std::iter::empty()), DEFAULT_ROOM);
    }

    #[test]
    fn test_bare_room_name() {
        assert_eq!(room_from_query("team-alpha"), "team-alpha");
    }

    #[test]
    fn test_query_string() {
        assert_eq!(room_from_query("?room=payments"), "payments");
        assert_eq!(room_from_query("room=payments&lang=en"), "payments");
    }

    #[test]
    fn test_query_without_room_uses_default() {
        assert_eq!(room_from_query("?lang=en"), DEFAULT_ROOM);
        assert_eq!(room_from_query("?room="), DEFAULT_ROOM);
        assert_eq!(room_from_query(""), DEFAULT_ROOM);
    }
}
